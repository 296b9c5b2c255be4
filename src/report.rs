//! Dashboard Report
//! Every result the presentation layer renders, computed in one pass.

use crate::config::DashboardSettings;
use crate::data::{ColumnClassification, Dataset, BRAND_COLUMN, ENGINE_SIZE_COLUMN, PRICE_COLUMN};
use crate::stats::{
    Aggregator, BrandAggregates, CategoryDistribution, CorrelationEngine, CorrelationMatrix,
    DatasetPreview, DatasetSummary, PreviewSampler, ScatterBuilder, ScatterSeries, StatsError,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub summary: DatasetSummary,
    pub preview: DatasetPreview,
    pub category_distribution: CategoryDistribution,
    pub price_vs_engine_size: ScatterSeries,
    pub brand_aggregates: BrandAggregates,
    pub columns: ColumnClassification,
    pub explorer: Option<ScatterSeries>,
    pub correlation: CorrelationMatrix,
}

impl DashboardReport {
    pub fn build(dataset: &Dataset, settings: &DashboardSettings) -> Result<Self, StatsError> {
        let columns = dataset.classification();

        let explorer = match settings
            .scatter_axes()
            .or_else(|| ScatterBuilder::default_axes(&columns))
        {
            Some((x, y, color)) => Some(ScatterBuilder::build(dataset, &x, &y, &color)?),
            None => None,
        };

        let report = Self {
            summary: Aggregator::summary(dataset)?,
            preview: PreviewSampler::sample(dataset, settings.preview_rows)?,
            category_distribution: Aggregator::category_distribution(dataset)?,
            price_vs_engine_size: ScatterBuilder::build(
                dataset,
                ENGINE_SIZE_COLUMN,
                PRICE_COLUMN,
                BRAND_COLUMN,
            )?,
            brand_aggregates: Aggregator::brand_aggregates(dataset)?,
            correlation: CorrelationEngine::correlation_matrix(dataset, &columns.numeric)?,
            explorer,
            columns,
        };

        log::info!(
            "report built: {} records, {} brands, {}x{} correlation",
            report.summary.total_records,
            report.summary.unique_brands,
            report.correlation.columns.len(),
            report.correlation.columns.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_dataset;

    #[test]
    fn builds_every_section() {
        let report =
            DashboardReport::build(&sample_dataset(), &DashboardSettings::default()).unwrap();

        assert_eq!(report.summary.unique_brands, 2);
        assert_eq!(report.preview.rows.len(), 3);
        assert_eq!(report.brand_aggregates.mean_price[0].key, "B");
        assert_eq!(report.columns.numeric, vec!["price", "engine_size"]);
        assert_eq!(report.price_vs_engine_size.point_count(), 3);
        assert_eq!(report.explorer.as_ref().unwrap().x_column, "price");
        assert!(report.correlation.is_symmetric());
    }

    #[test]
    fn configured_axes_win_and_are_checked() {
        let settings = DashboardSettings {
            scatter_x: Some("engine_size".into()),
            scatter_y: Some("price".into()),
            scatter_color: Some("price_category".into()),
            ..Default::default()
        };
        let report = DashboardReport::build(&sample_dataset(), &settings).unwrap();
        assert_eq!(report.explorer.unwrap().color_column, "price_category");

        let bad = DashboardSettings {
            scatter_x: Some("brand".into()),
            ..settings
        };
        assert!(DashboardReport::build(&sample_dataset(), &bad).is_err());
    }

    #[test]
    fn serializes_with_camel_case_contract_names() {
        let report =
            DashboardReport::build(&sample_dataset(), &DashboardSettings::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["summary"]["totalRecords"], 3);
        assert_eq!(json["summary"]["uniqueBrands"], 2);
        assert_eq!(json["columns"]["categorical"][2], "price_category");
        assert_eq!(json["categoryDistribution"]["buckets"][1]["category"], "Mid-Range");
        assert_eq!(json["brandAggregates"]["modelCount"][0]["key"], "A");
    }
}
