//! Stats module - Aggregation, correlation and chart-ready series

mod aggregator;
mod correlation;
mod preview;
mod scatter;

pub use aggregator::{
    Aggregator, BrandAggregates, CategoryBucket, CategoryDistribution, DatasetSummary,
    GroupCount, GroupValue, PriceSpread,
};
pub use correlation::{CorrelationEngine, CorrelationMatrix};
pub use preview::{DatasetPreview, PreviewSampler};
pub use scatter::{ScatterBuilder, ScatterGroup, ScatterSeries};

use crate::data::{ColumnKind, Dataset};
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Column '{0}' not found")]
    MissingColumn(String),
    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),
    #[error("Correlation needs at least two numeric columns, got {0}")]
    InsufficientColumns(usize),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Fail unless `name` exists in the dataset.
pub(crate) fn require_column(dataset: &Dataset, name: &str) -> Result<ColumnKind, StatsError> {
    dataset
        .column_kind(name)
        .ok_or_else(|| StatsError::MissingColumn(name.to_string()))
}

/// Fail unless `name` exists and is numeric.
pub(crate) fn require_numeric(dataset: &Dataset, name: &str) -> Result<(), StatsError> {
    match require_column(dataset, name)? {
        ColumnKind::Numeric => Ok(()),
        ColumnKind::Categorical => Err(StatsError::NotNumeric(name.to_string())),
    }
}
