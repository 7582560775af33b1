//! Export module for Aureon
//!
//! Writes period summaries in several formats:
//! - CSV: summary rows and per-report rows (spreadsheet-compatible)
//! - JSON: machine-readable, schema-versioned summary
//! - YAML: human-readable summary with a header comment

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_reports_csv, export_summary_csv};
pub use json::{
    export_summary_json, import_summary_json, ExportMetadata, SummaryExport, EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_summary_yaml, import_summary_yaml};

use std::fmt;
use std::str::FromStr;

/// Output format of an exported summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_extension(path: &std::path::Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("Unknown format '{}'. Use csv, json or yaml", other)),
        }
    }
}
