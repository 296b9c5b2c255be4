//! Dataset Module
//! The frozen, categorized listing table shared by every engine.

use super::category::{Categorizer, PriceCategory, PRICE_CATEGORY_COLUMN};
use super::loader::LoaderError;
use super::schema::{ColumnClassification, ColumnInfo, ColumnIntrospector, ColumnKind};
use polars::prelude::*;

pub const BRAND_COLUMN: &str = "brand";
pub const MODEL_COLUMN: &str = "model";
pub const PRICE_COLUMN: &str = "price";
pub const ENGINE_SIZE_COLUMN: &str = "engine_size";

/// Columns every source must carry, with the type each is coerced to.
pub const REQUIRED_COLUMNS: [(&str, DataType); 4] = [
    (BRAND_COLUMN, DataType::String),
    (MODEL_COLUMN, DataType::String),
    (PRICE_COLUMN, DataType::Float64),
    (ENGINE_SIZE_COLUMN, DataType::Float64),
];

/// Immutable table of vehicle listings with its derived price tier.
///
/// Built once per source; no method takes `&mut self`.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    schema: Vec<ColumnInfo>,
}

impl Dataset {
    /// Validate required columns, coerce them, and append `price_category`.
    pub fn from_frame(mut df: DataFrame) -> Result<Self, LoaderError> {
        for (name, _) in &REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(LoaderError::SchemaError {
                    column: name.to_string(),
                });
            }
        }

        if df.height() == 0 {
            return Err(LoaderError::EmptyDataset);
        }

        for (name, dtype) in &REQUIRED_COLUMNS {
            let coerced = coerce_required(&df, name, dtype)?;
            df.with_column(coerced)?;
        }

        let prices: Vec<f64> = df
            .column(PRICE_COLUMN)?
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        df.with_column(Column::new(
            PRICE_CATEGORY_COLUMN.into(),
            Categorizer::categorize_all(&prices),
        ))?;

        let schema = ColumnIntrospector::inspect(&df);
        log::debug!(
            "dataset ready: {} rows, {} columns",
            df.height(),
            schema.len()
        );

        Ok(Self { df, schema })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Typed schema computed at load, in column order.
    pub fn schema(&self) -> &[ColumnInfo] {
        &self.schema
    }

    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.schema
            .iter()
            .find(|info| info.name == name)
            .map(|info| info.kind)
    }

    pub fn classification(&self) -> ColumnClassification {
        ColumnIntrospector::classify(&self.schema)
    }

    /// Values of a column as text; nulls stay `None`.
    pub fn string_values(&self, name: &str) -> PolarsResult<Vec<Option<String>>> {
        let column = self.df.column(name)?.cast(&DataType::String)?;
        Ok(column
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }

    /// Values of a column as `f64`; nulls and NaN become `None`.
    pub fn numeric_values(&self, name: &str) -> PolarsResult<Vec<Option<f64>>> {
        let column = self.df.column(name)?.cast(&DataType::Float64)?;
        Ok(column
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Listing prices; never null after load.
    pub fn prices(&self) -> PolarsResult<Vec<f64>> {
        Ok(self
            .numeric_values(PRICE_COLUMN)?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect())
    }

    /// Tiers as stored in `price_category` at load.
    pub fn price_categories(&self) -> PolarsResult<Vec<PriceCategory>> {
        self.string_values(PRICE_CATEGORY_COLUMN)?
            .into_iter()
            .enumerate()
            .map(|(row, label)| {
                label
                    .as_deref()
                    .and_then(PriceCategory::from_label)
                    .ok_or_else(|| {
                        PolarsError::ComputeError(
                            format!("unknown price category at row {row}: {label:?}").into(),
                        )
                    })
            })
            .collect()
    }
}

fn coerce_required(df: &DataFrame, name: &str, dtype: &DataType) -> Result<Series, LoaderError> {
    let parse_error = |detail: String| LoaderError::parse(name, detail);

    let source = df.column(name)?.as_materialized_series();
    // strict_cast would turn booleans into 0.0/1.0
    if dtype == &DataType::Float64
        && source.dtype() != &DataType::String
        && ColumnIntrospector::kind_of(source.dtype()) != ColumnKind::Numeric
    {
        return Err(parse_error(format!("expected numbers, found {}", source.dtype())));
    }

    let coerced = source
        .strict_cast(dtype)
        .map_err(|e| parse_error(e.to_string()))?;

    if let Some(row) = coerced.is_null().into_iter().position(|v| v == Some(true)) {
        return Err(parse_error(format!("missing value at row {row}")));
    }

    if let Ok(values) = coerced.f64() {
        if let Some(row) = values.into_iter().position(|v| v.is_some_and(f64::is_nan)) {
            return Err(parse_error(format!("NaN at row {row}")));
        }
    }

    Ok(coerced)
}
