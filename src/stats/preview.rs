//! Preview Module
//! Deterministic sample of records for the overview table.

use super::StatsError;
use crate::data::Dataset;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetPreview {
    pub columns: Vec<String>,
    /// Cell text per sampled record; missing values are empty strings.
    pub rows: Vec<Vec<String>>,
}

pub struct PreviewSampler;

impl PreviewSampler {
    /// Row indices of an evenly spaced sample of up to `n` records.
    pub fn sample_indices(height: usize, n: usize) -> Vec<usize> {
        if n >= height {
            return (0..height).collect();
        }
        (0..n).map(|i| i * height / n).collect()
    }

    pub fn sample(dataset: &Dataset, n: usize) -> Result<DatasetPreview, StatsError> {
        let indices = Self::sample_indices(dataset.height(), n);
        let columns: Vec<String> = dataset.schema().iter().map(|c| c.name.clone()).collect();

        let mut rows = vec![Vec::with_capacity(columns.len()); indices.len()];
        for name in &columns {
            let values = dataset.string_values(name)?;
            for (row, &idx) in rows.iter_mut().zip(&indices) {
                row.push(values[idx].clone().unwrap_or_default());
            }
        }

        Ok(DatasetPreview { columns, rows })
    }
}
