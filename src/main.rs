//! Car Price Insights - builds the dashboard report for a listing CSV
//!
//! Writes the report as JSON to stdout for the presentation layer.

use anyhow::{Context, Result};
use car_price_insights::{DashboardReport, DashboardSettings, DataLoader};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut settings = DashboardSettings::load()?;
    if let Some(source) = std::env::args().nth(1) {
        settings.source = source.into();
    }

    let mut loader = DataLoader::new().with_separator(settings.separator_byte()?);
    let dataset = loader
        .load(&settings.source)
        .with_context(|| format!("loading {}", settings.source.display()))?;

    let report = DashboardReport::build(&dataset, &settings).context("building report")?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
