//! Scatter Series Module
//! Point series for the x/y explorer, grouped by a colour column.

use super::{require_column, require_numeric, StatsError};
use crate::data::{ColumnClassification, Dataset};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterGroup {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub x_column: String,
    pub y_column: String,
    pub color_column: String,
    /// Sorted by label.
    pub groups: Vec<ScatterGroup>,
}

impl ScatterSeries {
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }
}

/// Builds scatter series from a dataset.
pub struct ScatterBuilder;

impl ScatterBuilder {
    /// Points of `y` against `x`, one group per distinct `color` value.
    ///
    /// Records missing x, y or colour are left out.
    pub fn build(
        dataset: &Dataset,
        x: &str,
        y: &str,
        color: &str,
    ) -> Result<ScatterSeries, StatsError> {
        require_numeric(dataset, x)?;
        require_numeric(dataset, y)?;
        require_column(dataset, color)?;

        let xs = dataset.numeric_values(x)?;
        let ys = dataset.numeric_values(y)?;
        let labels = dataset.string_values(color)?;

        let mut groups: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
        for ((xv, yv), label) in xs.into_iter().zip(ys).zip(labels) {
            if let (Some(xv), Some(yv), Some(label)) = (xv, yv, label) {
                groups.entry(label).or_default().push([xv, yv]);
            }
        }

        Ok(ScatterSeries {
            x_column: x.to_string(),
            y_column: y.to_string(),
            color_column: color.to_string(),
            groups: groups
                .into_iter()
                .map(|(label, points)| ScatterGroup { label, points })
                .collect(),
        })
    }

    /// Default explorer axes: first two numeric columns, first categorical
    /// column for colour. `None` when the dataset lacks either.
    pub fn default_axes(classes: &ColumnClassification) -> Option<(String, String, String)> {
        match (classes.numeric.as_slice(), classes.categorical.first()) {
            ([x, y, ..], Some(color)) => Some((x.clone(), y.clone(), color.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_dataset;

    #[test]
    fn engine_size_vs_price_by_brand() {
        let series =
            ScatterBuilder::build(&sample_dataset(), "engine_size", "price", "brand").unwrap();

        assert_eq!(series.point_count(), 3);
        assert_eq!(series.groups.len(), 2);
        assert_eq!(series.groups[0].label, "A");
        assert_eq!(
            series.groups[0].points,
            vec![[1.4, 50_000.0], [2.0, 150_000.0]]
        );
        assert_eq!(series.groups[1].points, vec![[4.0, 600_000.0]]);
    }

    #[test]
    fn colour_by_price_category() {
        let series =
            ScatterBuilder::build(&sample_dataset(), "engine_size", "price", "price_category")
                .unwrap();
        let labels: Vec<&str> = series.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["Budget", "Luxury", "Mid-Range"]);
    }

    #[test]
    fn axes_must_be_numeric() {
        assert!(matches!(
            ScatterBuilder::build(&sample_dataset(), "brand", "price", "model"),
            Err(StatsError::NotNumeric(_))
        ));
        assert!(matches!(
            ScatterBuilder::build(&sample_dataset(), "price", "price", "colour"),
            Err(StatsError::MissingColumn(_))
        ));
    }

    #[test]
    fn default_axes_follow_schema() {
        let classes = sample_dataset().classification();
        assert_eq!(
            ScatterBuilder::default_axes(&classes),
            Some(("price".into(), "engine_size".into(), "brand".into()))
        );
        assert_eq!(
            ScatterBuilder::default_axes(&ColumnClassification::default()),
            None
        );
    }
}
