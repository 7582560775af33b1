//! CLI commands for report data
//!
//! Lists the hotels present in the reports directory and imports report
//! files exported from the accounting backend.

use std::path::Path;

use crate::error::{AureonError, AureonResult};
use crate::storage::{read_report_file, Storage};

/// Handle the hotels command
pub fn handle_hotels_command(storage: &Storage) -> AureonResult<()> {
    let hotels = storage.reports.hotels()?;

    if hotels.is_empty() {
        println!("No reports found in {}", storage.reports.dir().display());
        println!("Run 'aureon import <file>' to add a report file.");
        return Ok(());
    }

    println!("Hotels ({} reports):", storage.reports.count()?);
    for hotel in hotels {
        println!("  {}", hotel);
    }
    Ok(())
}

/// Handle the import command
///
/// The file is copied into the reports directory under `name`, or under its
/// own file name when no name is given. Existing files are never replaced.
pub fn handle_import_command(
    storage: &Storage,
    file: &Path,
    name: Option<&str>,
) -> AureonResult<()> {
    if !file.exists() {
        return Err(AureonError::Io(format!("File not found: {}", file.display())));
    }

    let records = read_report_file(file)?;
    if records.is_empty() {
        println!("No reports found in {}", file.display());
        return Ok(());
    }

    let name = match name {
        Some(name) => name.to_string(),
        None => file
            .file_stem()
            .and_then(|s| s.to_str())
            .map(String::from)
            .ok_or_else(|| {
                AureonError::Validation(format!("Cannot derive a name from {}", file.display()))
            })?,
    };

    let path = storage.reports.import(&name, &records)?;
    tracing::info!(file = %path.display(), count = records.len(), "imported reports");
    println!("Imported {} report(s) to: {}", records.len(), path.display());
    Ok(())
}
