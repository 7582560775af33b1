//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the report and fetch layers.

pub mod data;
pub mod report;

pub use data::{handle_hotels_command, handle_import_command};
pub use report::{handle_report_command, ReportCommands, SelectionArgs};
