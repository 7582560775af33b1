//! Storage layer for Aureon
//!
//! Provides JSON file storage for raw report records with atomic writes and
//! automatic directory creation.

pub mod file_io;
pub mod reports;

pub use file_io::{read_report_file, write_json_atomic};
pub use reports::ReportRepository;

use crate::config::paths::AureonPaths;
use crate::error::AureonError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: AureonPaths,
    pub reports: ReportRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: AureonPaths) -> Result<Self, AureonError> {
        paths.ensure_directories()?;

        Ok(Self {
            reports: ReportRepository::new(paths.reports_dir()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &AureonPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), AureonError> {
        self.reports.load()
    }
}
