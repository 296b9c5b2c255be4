//! CSV Data Loader Module
//! Reads a listing table once per source and memoizes the frozen dataset.

use super::dataset::Dataset;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },
    #[error("Missing required column '{column}'")]
    SchemaError { column: String },
    /// `column` is `None` when the file itself is malformed.
    #[error("Cannot parse {}: {detail}", parse_target(column))]
    ParseError {
        column: Option<String>,
        detail: String,
    },
    #[error("Dataset has no records")]
    EmptyDataset,
}

fn parse_target(column: &Option<String>) -> String {
    match column {
        Some(name) => format!("column '{name}'"),
        None => "CSV source".to_string(),
    }
}

impl LoaderError {
    pub(crate) fn parse(column: &str, detail: impl Into<String>) -> Self {
        LoaderError::ParseError {
            column: Some(column.to_string()),
            detail: detail.into(),
        }
    }
}

impl From<PolarsError> for LoaderError {
    fn from(err: PolarsError) -> Self {
        LoaderError::ParseError {
            column: None,
            detail: err.to_string(),
        }
    }
}

/// Loads listing tables and keeps every successful load for the lifetime
/// of the loader. One loader per process is the intended use.
pub struct DataLoader {
    separator: u8,
    cache: HashMap<PathBuf, Arc<Dataset>>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            separator: b',',
            cache: HashMap::new(),
        }
    }

    /// Use a field delimiter other than `,`.
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Load `source`, or return the dataset already loaded from it.
    ///
    /// Repeated calls for the same file hand back the same `Arc`.
    pub fn load(&mut self, source: impl AsRef<Path>) -> Result<Arc<Dataset>, LoaderError> {
        let key = Self::resolve(source.as_ref())?;

        if let Some(dataset) = self.cache.get(&key) {
            log::debug!("dataset cache hit: {}", key.display());
            return Ok(Arc::clone(dataset));
        }

        log::debug!("dataset cache miss: {}", key.display());
        let df = self.read_csv(&key)?;
        let dataset = Arc::new(Dataset::from_frame(df)?);
        log::info!(
            "loaded {} records, {} columns from {}",
            dataset.height(),
            dataset.schema().len(),
            key.display()
        );

        self.cache.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Whether `source` has already been loaded.
    pub fn is_loaded(&self, source: impl AsRef<Path>) -> bool {
        Self::resolve(source.as_ref())
            .map(|key| self.cache.contains_key(&key))
            .unwrap_or(false)
    }

    /// Previously loaded dataset for `source`, without touching the disk.
    pub fn cached(&self, source: impl AsRef<Path>) -> Option<Arc<Dataset>> {
        let key = Self::resolve(source.as_ref()).ok()?;
        self.cache.get(&key).cloned()
    }

    fn resolve(path: &Path) -> Result<PathBuf, LoaderError> {
        let not_found = || LoaderError::SourceNotFound {
            path: path.to_path_buf(),
        };
        let key = std::fs::canonicalize(path).map_err(|_| not_found())?;
        if !key.is_file() {
            return Err(not_found());
        }
        Ok(key)
    }

    fn read_csv(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        let read_error = |err: PolarsError| match err {
            PolarsError::IO { .. } => {
                log::warn!("cannot read {}: {err}", path.display());
                LoaderError::SourceNotFound {
                    path: path.to_path_buf(),
                }
            }
            other => LoaderError::from(other),
        };

        // Whole-file inference so a late bad value fails at coercion, not mid-read
        LazyCsvReader::new(path)
            .with_separator(self.separator)
            .with_infer_schema_length(None)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(read_error)
    }
}
