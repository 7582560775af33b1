//! Display formatting for terminal output
//!
//! Provides utilities for formatting summaries and reports for terminal
//! display, including separators, bars, and colored amounts.

pub mod report;
pub mod summary;

pub use summary::format_period_summary;
