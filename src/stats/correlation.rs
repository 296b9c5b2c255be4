//! Correlation Module
//! Pairwise-complete Pearson correlation over numeric columns.

use super::{require_numeric, StatsError};
use crate::data::Dataset;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Square, symmetric matrix indexed by column name on both axes.
///
/// Entries are in [-1, 1], or NaN where the coefficient is undefined:
/// a constant column, or fewer than two records with both values present.
/// The diagonal is always 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Coefficient for a named pair.
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        Some(self.values[self.index_of(row)?][self.index_of(col)?])
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.columns.len();
        (0..n).all(|i| {
            (0..n).all(|j| {
                let (a, b) = (self.values[i][j], self.values[j][i]);
                a == b || (a.is_nan() && b.is_nan())
            })
        })
    }
}

/// Computes correlation matrices.
pub struct CorrelationEngine;

impl CorrelationEngine {
    /// Correlation of every pair in `columns`, each pair using only the
    /// records where both values are present.
    pub fn correlation_matrix(
        dataset: &Dataset,
        columns: &[String],
    ) -> Result<CorrelationMatrix, StatsError> {
        if columns.len() < 2 {
            return Err(StatsError::InsufficientColumns(columns.len()));
        }

        let mut data = Vec::with_capacity(columns.len());
        for name in columns {
            require_numeric(dataset, name)?;
            data.push(dataset.numeric_values(name)?);
        }

        let n = columns.len();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();

        let coefficients: Vec<(usize, usize, f64)> = pairs
            .par_iter()
            .map(|&(i, j)| (i, j, Self::pearson(&data[i], &data[j])))
            .collect();

        let mut values = vec![vec![1.0; n]; n];
        for (i, j, r) in coefficients {
            if r.is_nan() {
                log::debug!("correlation undefined for ({}, {})", columns[i], columns[j]);
            }
            values[i][j] = r;
            values[j][i] = r;
        }

        Ok(CorrelationMatrix {
            columns: columns.to_vec(),
            values,
        })
    }

    /// Correlation over every numeric column of the dataset.
    pub fn numeric_correlation(dataset: &Dataset) -> Result<CorrelationMatrix, StatsError> {
        Self::correlation_matrix(dataset, &dataset.classification().numeric)
    }

    /// Pearson coefficient over the complete pairs of `x` and `y`.
    pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
        let (xs, ys): (Vec<f64>, Vec<f64>) = x
            .iter()
            .zip(y)
            .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
            .unzip();

        if xs.len() < 2 || is_constant(&xs) || is_constant(&ys) {
            return f64::NAN;
        }

        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if sx == 0.0 || sy == 0.0 {
            return f64::NAN;
        }

        let cov = xs.iter().covariance(ys.iter());
        (cov / (sx * sy)).clamp(-1.0, 1.0)
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
