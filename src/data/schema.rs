//! Column Schema Module
//! Tags every column of a loaded frame as numeric or categorical, once.

use polars::prelude::*;
use serde::Serialize;

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Declared type of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
}

/// Column names split by kind, each in dataset column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnClassification {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

/// Derives the typed schema of a frame.
pub struct ColumnIntrospector;

impl ColumnIntrospector {
    /// A column is numeric when its physical type holds real numbers only.
    pub fn kind_of(dtype: &DataType) -> ColumnKind {
        if matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        ) {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }

    /// Build the schema of `df` in column order.
    pub fn inspect(df: &DataFrame) -> Vec<ColumnInfo> {
        df.get_columns()
            .iter()
            .map(|col| ColumnInfo {
                name: col.name().to_string(),
                kind: Self::kind_of(col.dtype()),
            })
            .collect()
    }

    pub fn classify(schema: &[ColumnInfo]) -> ColumnClassification {
        let mut out = ColumnClassification::default();
        for info in schema {
            match info.kind {
                ColumnKind::Numeric => out.numeric.push(info.name.clone()),
                ColumnKind::Categorical => out.categorical.push(info.name.clone()),
            }
        }
        out
    }
}
