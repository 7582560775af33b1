//! JSON Export functionality
//!
//! Exports a period summary to JSON with schema versioning.

use crate::error::{AureonError, AureonResult};
use crate::fetch::{FetchResult, FetchStrategy};
use crate::models::{PeriodSummary, ReportPeriod};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Period summary export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub hotel: String,

    pub period: ReportPeriod,

    /// Human-readable period label, e.g. `2025-01-W2`
    pub period_label: String,

    pub summary: PeriodSummary,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Whether the period was answered directly or rebuilt day by day
    pub strategy: FetchStrategy,

    /// Days left out because their query failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_days: Vec<NaiveDate>,
}

impl SummaryExport {
    /// Create a new export from a fetch result
    pub fn from_result(result: &FetchResult) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            hotel: result.hotel.clone(),
            period: result.period,
            period_label: result.period.to_string(),
            summary: result.summary.clone(),
            metadata: ExportMetadata {
                start_date: result.period.start_date(),
                end_date: result.period.end_date(),
                strategy: result.strategy,
                failed_days: result.failed_days.clone(),
            },
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if self.hotel.trim().is_empty() {
            return Err("Export has no hotel name".to_string());
        }

        if self.metadata.start_date != self.period.start_date()
            || self.metadata.end_date != self.period.end_date()
        {
            return Err(format!(
                "Date range {}..{} does not match period {}",
                self.metadata.start_date, self.metadata.end_date, self.period
            ));
        }

        if let Some(day) = self
            .metadata
            .failed_days
            .iter()
            .find(|day| !self.period.contains(**day))
        {
            return Err(format!("Failed day {} is outside period {}", day, self.period));
        }

        Ok(())
    }
}

/// Export a period summary to JSON
pub fn export_summary_json<W: Write>(
    result: &FetchResult,
    writer: &mut W,
    pretty: bool,
) -> AureonResult<()> {
    let export = SummaryExport::from_result(result);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| AureonError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a JSON export
pub fn import_summary_json(json_str: &str) -> AureonResult<SummaryExport> {
    let export: SummaryExport =
        serde_json::from_str(json_str).map_err(|e| AureonError::Export(e.to_string()))?;

    export.validate().map_err(AureonError::Validation)?;

    Ok(export)
}
