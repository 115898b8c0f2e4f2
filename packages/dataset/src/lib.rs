#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV loader, normalization, and in-memory snapshot cache for ASRS
//! incident data.
//!
//! The [`loader::DatasetLoader`] reads the raw ASRS exports (each with a
//! throwaway category banner row above the real header), renames known
//! columns to canonical fields, and derives the parsed date, year, and
//! airport code. The [`cache::DatasetCache`] holds the resulting
//! [`Dataset`] as an immutable snapshot that is either reused for the life
//! of the process or rebuilt on every access.

pub mod cache;
pub mod columns;
pub mod loader;
pub mod parsing;

use std::path::PathBuf;

use asrs_dashboard_incident_models::IncidentRecord;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while loading the incident dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// None of the configured CSV files exist.
    #[error("No CSV files found in data directory (looked for: {})", join_paths(.searched))]
    NoDataSource {
        /// Every path that was checked.
        searched: Vec<PathBuf>,
    },

    /// A CSV file exists but could not be opened or read.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A CSV file could not be parsed.
    #[error("CSV parse error in {}: {source}", .path.display())]
    Csv {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The full normalized incident table.
///
/// Immutable once built; a reload produces a new `Dataset` rather than
/// mutating an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<IncidentRecord>,
    source_files: Vec<String>,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Wraps already-normalized records.
    #[must_use]
    pub fn new(records: Vec<IncidentRecord>, source_files: Vec<String>) -> Self {
        Self {
            records,
            source_files,
            loaded_at: Utc::now(),
        }
    }

    /// Builds an in-memory dataset with no backing files.
    #[must_use]
    pub fn from_records(records: Vec<IncidentRecord>) -> Self {
        Self::new(records, Vec::new())
    }

    /// All records in load order.
    #[must_use]
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    /// Iterates records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, IncidentRecord> {
        self.records.iter()
    }

    /// Number of records, including those without a parsed year.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record with the given ACN, in load order.
    #[must_use]
    pub fn find_by_acn(&self, acn: &str) -> Option<&IncidentRecord> {
        self.records.iter().find(|r| r.acn == acn)
    }

    /// File names that contributed rows, in load order.
    #[must_use]
    pub fn source_files(&self) -> &[String] {
        &self.source_files
    }

    /// When this snapshot was built.
    #[must_use]
    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a IncidentRecord;
    type IntoIter = std::slice::Iter<'a, IncidentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
