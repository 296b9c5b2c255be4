//! Car Price Insights - analytics core for a vehicle listing dashboard
//!
//! Loads a listing table once, tags each record with a price tier and
//! derives the summaries, grouped aggregates and correlations a
//! presentation layer renders.

pub mod config;
pub mod data;
pub mod report;
pub mod stats;

pub use config::DashboardSettings;
pub use data::{DataLoader, Dataset, LoaderError, PriceCategory};
pub use report::DashboardReport;
pub use stats::StatsError;
