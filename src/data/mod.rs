//! Data module - CSV loading, typed schema and price tiers

mod category;
mod dataset;
mod loader;
mod schema;

pub use category::{Categorizer, PriceCategory, BREAKPOINTS, PRICE_CATEGORY_COLUMN};
pub use dataset::{
    Dataset, BRAND_COLUMN, ENGINE_SIZE_COLUMN, MODEL_COLUMN, PRICE_COLUMN, REQUIRED_COLUMNS,
};
pub use loader::{DataLoader, LoaderError};
pub use schema::{ColumnClassification, ColumnInfo, ColumnIntrospector, ColumnKind};

/// Small in-memory dataset shared by engine tests.
#[cfg(test)]
pub(crate) fn sample_dataset() -> Dataset {
    use polars::prelude::*;

    let df = DataFrame::new(vec![
        Column::new("brand".into(), ["A", "A", "B"]),
        Column::new("model".into(), ["a1", "a2", "b1"]),
        Column::new("price".into(), [50_000.0f64, 150_000.0, 600_000.0]),
        Column::new("engine_size".into(), [1.4f64, 2.0, 4.0]),
    ])
    .unwrap();
    Dataset::from_frame(df).unwrap()
}
