//! User settings for Aureon
//!
//! Manages display preferences, the default hotel, and how report sources
//! are queried.

use serde::{Deserialize, Serialize};

use super::paths::AureonPaths;
use crate::error::AureonError;
use crate::storage::file_io::write_json_atomic;

/// How the fetcher queries a report source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Fall back to one query per day when a period query comes back empty
    #[serde(default = "default_true")]
    pub daily_fallback: bool,

    /// Maximum number of per-day queries in flight at once
    #[serde(default = "default_max_parallel_requests")]
    pub max_parallel_requests: usize,

    /// Whether the source answers month/year queries itself
    ///
    /// When false, month and year queries return nothing, and every period
    /// is assembled from per-day queries.
    #[serde(default = "default_true")]
    pub aggregate_queries: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_parallel_requests() -> usize {
    8
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            daily_fallback: true,
            max_parallel_requests: default_max_parallel_requests(),
            aggregate_queries: true,
        }
    }
}

/// User settings for Aureon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol printed after amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Hotel used when a command does not name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_hotel: Option<String>,

    /// Report fetching behaviour
    #[serde(default)]
    pub fetch: FetchSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "FCFA".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_hotel: None,
            fetch: FetchSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &AureonPaths) -> Result<Self, AureonError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| AureonError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AureonError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AureonPaths) -> Result<(), AureonError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Check values that serde defaults cannot guard
    pub fn validate(&self) -> Result<(), AureonError> {
        if self.fetch.max_parallel_requests == 0 {
            return Err(AureonError::Config(
                "fetch.max_parallel_requests must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
