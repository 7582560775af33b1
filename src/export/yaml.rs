//! YAML Export functionality
//!
//! Exports a period summary to YAML for reading and archiving.

use crate::error::{AureonError, AureonResult};
use crate::export::json::SummaryExport;
use crate::fetch::FetchResult;
use std::io::Write;

/// Export a period summary to YAML format
pub fn export_summary_yaml<W: Write>(result: &FetchResult, writer: &mut W) -> AureonResult<()> {
    let export = SummaryExport::from_result(result);
    let export_err = |e: std::io::Error| AureonError::Export(e.to_string());

    writeln!(writer, "# Aureon Period Summary").map_err(export_err)?;
    writeln!(writer, "# Hotel: {}", export.hotel).map_err(export_err)?;
    writeln!(writer, "# Period: {}", export.period_label).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| AureonError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a YAML export
pub fn import_summary_yaml(yaml_str: &str) -> AureonResult<SummaryExport> {
    let export: SummaryExport =
        serde_yaml::from_str(yaml_str).map_err(|e| AureonError::Export(e.to_string()))?;

    export.validate().map_err(AureonError::Validation)?;

    Ok(export)
}
