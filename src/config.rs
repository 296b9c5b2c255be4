//! Dashboard Settings
//! Defaults, optional JSON file, then environment overrides.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Names a JSON settings file.
pub const CONFIG_ENV: &str = "CAR_DASHBOARD_CONFIG";
pub const SOURCE_ENV: &str = "CAR_DASHBOARD_SOURCE";
pub const PREVIEW_ROWS_ENV: &str = "CAR_DASHBOARD_PREVIEW_ROWS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub source: PathBuf,
    pub separator: char,
    pub preview_rows: usize,
    pub scatter_x: Option<String>,
    pub scatter_y: Option<String>,
    pub scatter_color: Option<String>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            source: PathBuf::from("car_prices_rsa_update_011.csv"),
            separator: ',',
            preview_rows: 10,
            scatter_x: None,
            scatter_y: None,
            scatter_color: None,
        }
    }
}

impl DashboardSettings {
    /// Resolve settings from the process environment.
    pub fn load() -> Result<Self> {
        let mut settings = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_json_file(&path)?,
            Err(_) => Self::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing settings {}", path.display()))
    }

    /// Apply `CAR_DASHBOARD_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(source) = lookup(SOURCE_ENV) {
            self.source = PathBuf::from(source);
        }
        if let Some(rows) = lookup(PREVIEW_ROWS_ENV) {
            self.preview_rows = rows
                .trim()
                .parse()
                .with_context(|| format!("{PREVIEW_ROWS_ENV}='{rows}' is not a row count"))?;
        }
        Ok(())
    }

    /// Field delimiter as the single byte the CSV reader expects.
    pub fn separator_byte(&self) -> Result<u8> {
        match u8::try_from(self.separator) {
            Ok(b) if b.is_ascii() => Ok(b),
            _ => bail!("separator '{}' must be a single ASCII character", self.separator),
        }
    }

    /// Explicit explorer axes, if all three are configured.
    pub fn scatter_axes(&self) -> Option<(String, String, String)> {
        Some((
            self.scatter_x.clone()?,
            self.scatter_y.clone()?,
            self.scatter_color.clone()?,
        ))
    }
}
