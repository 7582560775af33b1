//! CLI commands for reports
//!
//! Provides commands for summarizing one hotel over a period, and for the
//! rollup, breakdown and history views built on the same fetch.

use crate::config::Settings;
use crate::display::format_period_summary;
use crate::error::{AureonError, AureonResult};
use crate::export::{
    export_reports_csv, export_summary_csv, export_summary_json, export_summary_yaml,
    ExportFormat,
};
use crate::fetch::{
    FetchResult, JsonDirSource, PipelineOutcome, QuerySelection, ReportFetcher, ReportPipeline,
};
use crate::models::ReportPeriod;
use crate::reports::{fields, HistoryReport, PeriodRollup, RevenueBreakdown};
use crate::storage::Storage;
use clap::{Args, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Hotel and period selection shared by every report command
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Hotel name (case-insensitive); defaults to `default_hotel` from the config
    #[arg(short = 'H', long)]
    pub hotel: Option<String>,

    /// Period: YYYY, YYYY-MM, YYYY-MM-Wn (week 1-4), YYYY-MM-DD, or one of
    /// today, week, month, year
    #[arg(short, long)]
    pub period: Option<String>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Summarize one hotel over a period
    Summary {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Write the summary to a file instead of the terminal
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (csv, json, yaml); guessed from the output extension
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },

    /// Break a period down into its sub-periods
    Rollup {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show revenue sources and expense labels with their shares
    Breakdown {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Show the top N expense labels only
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the individual reports of a period, newest day first
    History {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Export the normalized reports to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> AureonResult<()> {
    match cmd {
        ReportCommands::Summary {
            selection,
            output,
            format,
        } => handle_summary(storage, settings, &selection, output, format),
        ReportCommands::Rollup { selection, output } => {
            handle_rollup(storage, settings, &selection, output)
        }
        ReportCommands::Breakdown {
            selection,
            top,
            output,
        } => handle_breakdown(storage, settings, &selection, top, output),
        ReportCommands::History { selection, output } => {
            handle_history(storage, settings, &selection, output)
        }
    }
}

/// Resolve the hotel and period of a command
///
/// The hotel falls back to the configured default and is returned with the
/// spelling found in the reports; the period falls back to the current month.
/// A hotel is rejected only when reports exist and none of them belongs to it.
pub fn resolve_selection(
    storage: &Storage,
    settings: &Settings,
    args: &SelectionArgs,
) -> AureonResult<QuerySelection> {
    let hotel = args
        .hotel
        .clone()
        .or_else(|| settings.default_hotel.clone())
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| {
            AureonError::Validation(
                "No hotel given. Use --hotel or set a default with 'aureon config --default-hotel'"
                    .into(),
            )
        })?;

    let known = storage.reports.hotels()?;
    let key = fields::hotel_key(&hotel);
    let hotel = match known.into_iter().find(|h| fields::hotel_key(h) == key) {
        Some(spelling) => spelling,
        None if storage.reports.count()? == 0 => hotel,
        None => return Err(AureonError::hotel_not_found(hotel)),
    };

    let period = match &args.period {
        Some(p) => parse_period(p)?,
        None => ReportPeriod::current_month(),
    };

    Ok(QuerySelection::new(hotel, period))
}

fn parse_period(s: &str) -> AureonResult<ReportPeriod> {
    match s.trim().to_ascii_lowercase().as_str() {
        "today" => return Ok(ReportPeriod::today()),
        "week" => return Ok(ReportPeriod::current_week()),
        "month" => return Ok(ReportPeriod::current_month()),
        "year" => return Ok(ReportPeriod::current_year()),
        _ => {}
    }

    ReportPeriod::parse(s).map_err(|e| {
        AureonError::Validation(format!(
            "Invalid period '{}': {}. Use YYYY, YYYY-MM, YYYY-MM-Wn or YYYY-MM-DD",
            s, e
        ))
    })
}

/// Fetch a selection through the request pipeline
///
/// Days the fallback could not read are logged by the fetcher and listed in
/// `failed_days`.
pub fn fetch_selection(
    storage: &Storage,
    settings: &Settings,
    selection: QuerySelection,
) -> AureonResult<FetchResult> {
    let source =
        JsonDirSource::new(&storage.reports).with_aggregate_queries(settings.fetch.aggregate_queries);
    let pipeline = ReportPipeline::new(ReportFetcher::new(source, &settings.fetch));

    match pipeline.load(selection)? {
        PipelineOutcome::Fresh(result) => Ok(result),
        PipelineOutcome::Stale { sequence, latest } => Err(AureonError::Source(format!(
            "Request {} was superseded by request {}",
            sequence, latest
        ))),
    }
}

fn create_output(path: &Path) -> AureonResult<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).map_err(|e| {
        AureonError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Write a summary in the given format
pub fn write_summary<W: Write>(
    result: &FetchResult,
    format: ExportFormat,
    writer: &mut W,
) -> AureonResult<()> {
    match format {
        ExportFormat::Csv => export_summary_csv(result, &mut *writer)?,
        ExportFormat::Json => {
            export_summary_json(result, writer, true)?;
            writeln!(writer)?;
        }
        ExportFormat::Yaml => export_summary_yaml(result, writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Handle the summary command
fn handle_summary(
    storage: &Storage,
    settings: &Settings,
    args: &SelectionArgs,
    output: Option<PathBuf>,
    format: Option<ExportFormat>,
) -> AureonResult<()> {
    let selection = resolve_selection(storage, settings, args)?;
    let result = fetch_selection(storage, settings, selection)?;

    match (output, format) {
        (Some(path), format) => {
            let format = format
                .or_else(|| ExportFormat::from_extension(&path))
                .unwrap_or_default();
            let mut writer = create_output(&path)?;
            write_summary(&result, format, &mut writer)?;
            println!("Summary exported to: {} ({})", path.display(), format);
        }
        (None, Some(format)) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_summary(&result, format, &mut handle)?;
        }
        (None, None) => {
            print!(
                "{}",
                format_period_summary(
                    &result.hotel,
                    &result.period,
                    &result.summary,
                    &settings.currency_symbol
                )
            );
        }
    }

    Ok(())
}

/// Handle the rollup command
fn handle_rollup(
    storage: &Storage,
    settings: &Settings,
    args: &SelectionArgs,
    output: Option<PathBuf>,
) -> AureonResult<()> {
    let selection = resolve_selection(storage, settings, args)?;
    let result = fetch_selection(storage, settings, selection)?;
    let rollup = PeriodRollup::generate(&result.records, &result.hotel, result.period);

    if let Some(path) = output {
        let mut writer = create_output(&path)?;
        rollup.export_csv(&mut writer)?;
        println!("Rollup exported to: {}", path.display());
    } else {
        println!("{}", rollup.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}

/// Handle the breakdown command
fn handle_breakdown(
    storage: &Storage,
    settings: &Settings,
    args: &SelectionArgs,
    top: Option<usize>,
    output: Option<PathBuf>,
) -> AureonResult<()> {
    let selection = resolve_selection(storage, settings, args)?;
    let result = fetch_selection(storage, settings, selection)?;
    let mut breakdown = RevenueBreakdown::from_summary(&result.summary);
    if let Some(limit) = top {
        breakdown.expenses = breakdown.top_expenses(limit).to_vec();
    }

    if let Some(path) = output {
        let mut writer = create_output(&path)?;
        breakdown.export_csv(&mut writer)?;
        println!("Breakdown exported to: {}", path.display());
    } else {
        println!("Breakdown for {}: {}", result.hotel, result.period);
        println!();
        println!("{}", breakdown.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}

/// Handle the history command
fn handle_history(
    storage: &Storage,
    settings: &Settings,
    args: &SelectionArgs,
    output: Option<PathBuf>,
) -> AureonResult<()> {
    let selection = resolve_selection(storage, settings, args)?;
    let result = fetch_selection(storage, settings, selection)?;

    if let Some(path) = output {
        let mut writer = create_output(&path)?;
        export_reports_csv(&result.records, &result.hotel, &mut writer)?;
        println!("Reports exported to: {}", path.display());
    } else {
        let history = HistoryReport::generate(&result.records, &result.hotel, result.period);
        println!(
            "{}",
            history.format_terminal(&settings.currency_symbol, &settings.date_format)
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AureonPaths;
    use crate::models::Money;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AureonPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        storage
            .reports
            .import(
                "january",
                &[
                    json!({ "hotelName": "Mbolo Hotel", "createdAt": "2025-01-03", "montantBar": 500 }),
                    json!({ "hotelName": "Mbolo Hotel", "createdAt": "2025-01-20", "montantBar": 250 }),
                    json!({ "hotelName": "Hotel la Dibamba", "createdAt": "2025-01-03", "montantBar": 99 }),
                ],
            )
            .unwrap();
        (temp_dir, storage)
    }

    fn args(hotel: Option<&str>, period: Option<&str>) -> SelectionArgs {
        SelectionArgs {
            hotel: hotel.map(String::from),
            period: period.map(String::from),
        }
    }

    #[test]
    fn test_resolve_selection() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();

        let selection =
            resolve_selection(&storage, &settings, &args(Some("mbolo hotel"), Some("2025-01")))
                .unwrap();
        assert_eq!(selection.hotel, "Mbolo Hotel");
        assert_eq!(selection.period, ReportPeriod::month(2025, 1).unwrap());

        let err = resolve_selection(&storage, &settings, &args(None, None)).unwrap_err();
        assert!(err.is_validation());

        let err =
            resolve_selection(&storage, &settings, &args(Some("Unknown Inn"), None)).unwrap_err();
        assert!(err.is_not_found());

        let err = resolve_selection(&storage, &settings, &args(Some("Mbolo Hotel"), Some("2025-13")))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_period_keywords() {
        assert_eq!(parse_period("Month").unwrap(), ReportPeriod::current_month());
        assert_eq!(parse_period("year").unwrap(), ReportPeriod::current_year());
        assert_eq!(parse_period("today").unwrap().kind(), crate::models::PeriodKind::Day);
        assert_eq!(parse_period("week").unwrap().kind(), crate::models::PeriodKind::Week);
        assert!(parse_period("fortnight").is_err());
    }

    #[test]
    fn test_default_hotel_used() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings {
            default_hotel: Some("Hotel la Dibamba".into()),
            ..Settings::default()
        };

        let selection =
            resolve_selection(&storage, &settings, &args(None, Some("2025-01-W1"))).unwrap();
        assert_eq!(selection.hotel, "Hotel la Dibamba");
    }

    #[test]
    fn test_fetch_selection_with_fallback() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        settings.fetch.aggregate_queries = false;

        let selection = QuerySelection::new("Mbolo Hotel", ReportPeriod::month(2025, 1).unwrap());
        let result = fetch_selection(&storage, &settings, selection).unwrap();

        assert_eq!(result.summary.count, 2);
        assert_eq!(result.summary.revenues.bar, Money::from_units(750));
    }

    #[test]
    fn test_write_summary_formats() {
        let (_temp_dir, storage) = create_test_storage();
        let selection = QuerySelection::new("Mbolo Hotel", ReportPeriod::month(2025, 1).unwrap());
        let result = fetch_selection(&storage, &Settings::default(), selection).unwrap();

        let mut csv_out = Vec::new();
        write_summary(&result, ExportFormat::Csv, &mut csv_out).unwrap();
        assert!(String::from_utf8(csv_out)
            .unwrap()
            .contains("Mbolo Hotel,2025-01,Revenue,Bar,750.00"));

        let mut json_out = Vec::new();
        write_summary(&result, ExportFormat::Json, &mut json_out).unwrap();
        assert!(String::from_utf8(json_out).unwrap().contains("\"count\": 2"));
    }
}
