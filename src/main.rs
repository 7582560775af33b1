use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use aureon_reports::cli::{
    handle_hotels_command, handle_import_command, handle_report_command, ReportCommands,
};
use aureon_reports::config::{paths::DATA_DIR_ENV, AureonPaths, Settings};
use aureon_reports::logging::init_tracing;
use aureon_reports::storage::Storage;

#[derive(Parser)]
#[command(
    name = "aureon",
    author = "Aureon Team",
    version,
    about = "Daily report aggregation for Aureon hotels",
    long_about = "Aureon reads the daily accounting reports of each hotel and \
                  summarizes them per day, week, month or year: revenue by \
                  source, expenses by label, and the cash left in hand."
)]
struct Cli {
    /// Data directory holding config.json and reports/
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// List the hotels found in the reports
    Hotels,

    /// Copy a report file into the reports directory
    Import {
        /// JSON file: an array of reports, one report, or {"data": [...]}
        file: PathBuf,

        /// Name to store it under (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show or change configuration
    Config {
        /// Hotel used when --hotel is not given
        #[arg(long)]
        default_hotel: Option<String>,

        /// Currency symbol printed after amounts
        #[arg(long)]
        currency: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => AureonPaths::with_base_dir(dir),
        None => AureonPaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Hotels) => {
            handle_hotels_command(&storage)?;
        }
        Some(Commands::Import { file, name }) => {
            handle_import_command(&storage, &file, name.as_deref())?;
        }
        Some(Commands::Config {
            default_hotel,
            currency,
        }) => {
            let changed = default_hotel.is_some() || currency.is_some();
            if let Some(hotel) = default_hotel {
                settings.default_hotel = Some(hotel).filter(|h| !h.trim().is_empty());
            }
            if let Some(symbol) = currency {
                settings.currency_symbol = symbol;
            }
            if changed {
                settings.save(&paths)?;
                println!("Configuration saved to: {}", paths.settings_file().display());
                println!();
            }

            println!("Aureon Configuration");
            println!("====================");
            println!("Data directory:    {}", paths.base_dir().display());
            println!("Reports directory: {}", paths.reports_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!(
                "  Default hotel:         {}",
                settings.default_hotel.as_deref().unwrap_or("(none)")
            );
            println!("  Currency symbol:       {}", settings.currency_symbol);
            println!("  Date format:           {}", settings.date_format);
            println!("  Daily fallback:        {}", settings.fetch.daily_fallback);
            println!("  Max parallel requests: {}", settings.fetch.max_parallel_requests);
            println!("  Aggregate queries:     {}", settings.fetch.aggregate_queries);
        }
        None => {
            println!("Aureon - hotel report aggregation");
            println!();
            println!("Run 'aureon --help' for usage information.");
            println!("Run 'aureon hotels' to list the hotels with reports.");
            if !paths.is_initialized() {
                println!("Run 'aureon config --default-hotel <name>' to create a config file.");
            }
        }
    }
    Ok(())
}
