//! Aggregator Module
//! Grouped means and counts, headline summary and price spread per tier.

use super::{require_column, require_numeric, StatsError};
use crate::data::{Dataset, PriceCategory, BRAND_COLUMN, MODEL_COLUMN, PRICE_COLUMN};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Headline figures for the overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub total_records: usize,
    pub unique_brands: usize,
    pub average_price: f64,
}

/// Mean of a value column within one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupValue {
    pub key: String,
    pub value: f64,
}

/// Non-missing count of a column within one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandAggregates {
    pub mean_price: Vec<GroupValue>,
    pub model_count: Vec<GroupCount>,
}

/// Five-number summary plus mean, used for the per-tier box plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSpread {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBucket {
    pub category: PriceCategory,
    pub count: usize,
    /// `None` for a tier with no listings.
    pub price: Option<PriceSpread>,
}

/// One bucket per tier, Budget first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDistribution {
    pub buckets: Vec<CategoryBucket>,
}

impl CategoryDistribution {
    pub fn bucket(&self, category: PriceCategory) -> Option<&CategoryBucket> {
        self.buckets.iter().find(|b| b.category == category)
    }
}

/// Stateless grouped statistics over a frozen dataset.
pub struct Aggregator;

impl Aggregator {
    pub fn summary(dataset: &Dataset) -> Result<DatasetSummary, StatsError> {
        let prices = dataset.prices()?;
        let brands: BTreeSet<String> = dataset
            .string_values(BRAND_COLUMN)?
            .into_iter()
            .flatten()
            .collect();

        Ok(DatasetSummary {
            total_records: dataset.height(),
            unique_brands: brands.len(),
            average_price: mean(&prices),
        })
    }

    /// Mean of `value_key` per distinct `group_key`, highest mean first.
    ///
    /// Missing values are skipped; a group with no values has a NaN mean
    /// and sorts last. Equal means fall back to ascending key.
    pub fn group_mean(
        dataset: &Dataset,
        group_key: &str,
        value_key: &str,
    ) -> Result<Vec<GroupValue>, StatsError> {
        require_column(dataset, group_key)?;
        require_numeric(dataset, value_key)?;

        let keys = dataset.string_values(group_key)?;
        let values = dataset.numeric_values(value_key)?;

        let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for (key, value) in keys.into_iter().zip(values) {
            let Some(key) = key else { continue };
            let entry = sums.entry(key).or_insert((0.0, 0));
            if let Some(v) = value {
                entry.0 += v;
                entry.1 += 1;
            }
        }

        let mut out: Vec<GroupValue> = sums
            .into_iter()
            .map(|(key, (sum, n))| GroupValue {
                key,
                value: if n == 0 { f64::NAN } else { sum / n as f64 },
            })
            .collect();
        out.sort_by(|a, b| descending_nan_last(a.value, b.value).then_with(|| a.key.cmp(&b.key)));

        log::debug!("group_mean({group_key}, {value_key}): {} groups", out.len());
        Ok(out)
    }

    /// Number of non-missing `count_key` values per distinct `group_key`,
    /// largest first; ties by ascending key.
    pub fn group_count(
        dataset: &Dataset,
        group_key: &str,
        count_key: &str,
    ) -> Result<Vec<GroupCount>, StatsError> {
        require_column(dataset, group_key)?;
        require_column(dataset, count_key)?;

        let keys = dataset.string_values(group_key)?;
        let counted = dataset.string_values(count_key)?;

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for (key, value) in keys.into_iter().zip(counted) {
            let Some(key) = key else { continue };
            *counts.entry(key).or_insert(0) += usize::from(value.is_some());
        }

        let mut out: Vec<GroupCount> = counts
            .into_iter()
            .map(|(key, count)| GroupCount { key, count })
            .collect();
        out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));

        log::debug!("group_count({group_key}, {count_key}): {} groups", out.len());
        Ok(out)
    }

    /// Mean price and model count per brand.
    pub fn brand_aggregates(dataset: &Dataset) -> Result<BrandAggregates, StatsError> {
        Ok(BrandAggregates {
            mean_price: Self::group_mean(dataset, BRAND_COLUMN, PRICE_COLUMN)?,
            model_count: Self::group_count(dataset, BRAND_COLUMN, MODEL_COLUMN)?,
        })
    }

    /// Record count and price spread for each tier.
    pub fn category_distribution(dataset: &Dataset) -> Result<CategoryDistribution, StatsError> {
        let prices = dataset.prices()?;
        let categories = dataset.price_categories()?;

        let mut by_category: BTreeMap<PriceCategory, Vec<f64>> = BTreeMap::new();
        for (category, price) in categories.into_iter().zip(prices) {
            by_category.entry(category).or_default().push(price);
        }

        let buckets = PriceCategory::ALL
            .iter()
            .map(|&category| {
                let values = by_category.remove(&category).unwrap_or_default();
                CategoryBucket {
                    category,
                    count: values.len(),
                    price: Self::spread(values),
                }
            })
            .collect();

        Ok(CategoryDistribution { buckets })
    }

    fn spread(mut values: Vec<f64>) -> Option<PriceSpread> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        Some(PriceSpread {
            min: values[0],
            q1: percentile(&values, 25.0),
            median: percentile(&values, 50.0),
            q3: percentile(&values, 75.0),
            max: values[values.len() - 1],
            mean: mean(&values),
        })
    }
}

/// NaN for an empty slice.
fn mean(values: &[f64]) -> f64 {
    values.iter().mean()
}

/// Percentile with linear interpolation (NumPy compatible).
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_dataset;
    use polars::prelude::*;

    fn dataset(brands: &[&str], prices: &[Option<f64>]) -> Dataset {
        let n = brands.len();
        let models: Vec<String> = (0..n).map(|i| format!("m{i}")).collect();
        let df = DataFrame::new(vec![
            Column::new("brand".into(), brands),
            Column::new("model".into(), models),
            Column::new("price".into(), vec![100_000.0f64; n]),
            Column::new("engine_size".into(), vec![1.0f64; n]),
            Column::new("resale".into(), prices),
        ])
        .unwrap();
        Dataset::from_frame(df).unwrap()
    }

    #[test]
    fn scenario_summary_and_brand_mean() {
        let ds = sample_dataset();

        let summary = Aggregator::summary(&ds).unwrap();
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.unique_brands, 2);
        assert!((summary.average_price - 266_666.67).abs() < 0.01);

        let means = Aggregator::group_mean(&ds, "brand", "price").unwrap();
        assert_eq!(
            means,
            vec![
                GroupValue { key: "B".into(), value: 600_000.0 },
                GroupValue { key: "A".into(), value: 100_000.0 },
            ]
        );
    }

    #[test]
    fn group_count_covers_every_brand() {
        let ds = dataset(
            &["Audi", "BMW", "Audi", "Kia", "BMW", "Audi"],
            &[None; 6],
        );
        let counts = Aggregator::group_count(&ds, "brand", "model").unwrap();

        let keys: BTreeSet<&str> = counts.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, BTreeSet::from(["Audi", "BMW", "Kia"]));
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), ds.height());
        assert_eq!(counts[0], GroupCount { key: "Audi".into(), count: 3 });
    }

    #[test]
    fn ties_break_by_ascending_key() {
        let ds = dataset(&["Kia", "Audi", "BMW"], &[Some(5.0), Some(5.0), Some(5.0)]);
        let means = Aggregator::group_mean(&ds, "brand", "resale").unwrap();
        let keys: Vec<&str> = means.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["Audi", "BMW", "Kia"]);

        let counts = Aggregator::group_count(&ds, "brand", "model").unwrap();
        let keys: Vec<&str> = counts.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["Audi", "BMW", "Kia"]);
    }

    #[test]
    fn missing_values_are_skipped() {
        let ds = dataset(&["A", "A", "B"], &[Some(10.0), None, None]);

        let means = Aggregator::group_mean(&ds, "brand", "resale").unwrap();
        assert_eq!(means[0], GroupValue { key: "A".into(), value: 10.0 });
        assert_eq!(means[1].key, "B");
        assert!(means[1].value.is_nan());

        let counts = Aggregator::group_count(&ds, "brand", "resale").unwrap();
        assert_eq!(
            counts,
            vec![
                GroupCount { key: "A".into(), count: 1 },
                GroupCount { key: "B".into(), count: 0 },
            ]
        );
    }

    #[test]
    fn unknown_or_categorical_columns_fail_fast() {
        let ds = sample_dataset();
        assert!(matches!(
            Aggregator::group_mean(&ds, "colour", "price"),
            Err(StatsError::MissingColumn(c)) if c == "colour"
        ));
        assert!(matches!(
            Aggregator::group_mean(&ds, "brand", "model"),
            Err(StatsError::NotNumeric(c)) if c == "model"
        ));
        assert!(matches!(
            Aggregator::group_count(&ds, "brand", "doors"),
            Err(StatsError::MissingColumn(_))
        ));
    }

    #[test]
    fn category_distribution_has_all_tiers() {
        let dist = Aggregator::category_distribution(&sample_dataset()).unwrap();
        assert_eq!(dist.buckets.len(), 4);
        assert_eq!(dist.bucket(PriceCategory::Budget).unwrap().count, 1);
        assert_eq!(dist.bucket(PriceCategory::MidRange).unwrap().count, 1);

        let premium = dist.bucket(PriceCategory::Premium).unwrap();
        assert_eq!(premium.count, 0);
        assert!(premium.price.is_none());

        let luxury = dist.bucket(PriceCategory::Luxury).unwrap().price.clone().unwrap();
        assert_eq!(luxury.min, 600_000.0);
        assert_eq!(luxury.max, 600_000.0);
        assert_eq!(luxury.median, 600_000.0);
    }

    #[test]
    fn percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 50.0), 2.5);
        assert_eq!(percentile(&sorted, 25.0), 1.75);
        assert_eq!(percentile(&sorted, 100.0), 4.0);
    }
}
