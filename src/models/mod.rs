//! Core data models for Aureon
//!
//! This module contains the data structures of the reporting domain: money
//! amounts, report periods, normalized daily reports, and period summaries.

pub mod money;
pub mod period;
pub mod report;
pub mod summary;

pub use money::Money;
pub use period::{PeriodKind, PeriodParseError, ReportPeriod, WEEKS_PER_MONTH};
pub use report::{ExpenseLine, NormalizedReport, Revenues, DEFAULT_EXPENSE_LABEL};
pub use summary::PeriodSummary;
