//! Reports module for Aureon
//!
//! Turns raw daily reports into period summaries, sub-period rollups,
//! revenue/expense breakdowns, and day-by-day history listings.

pub mod aggregator;
pub mod breakdown;
pub mod fields;
pub mod history;
pub mod rollup;

pub use aggregator::{aggregate, filter_by_hotel, normalize, normalize_aggregated_response};
pub use breakdown::{BreakdownLine, RevenueBreakdown};
pub use history::{HistoryDay, HistoryReport};
pub use rollup::{PeriodRollup, RollupRow};
