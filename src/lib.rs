//! Aureon Reports - daily report aggregation for hotel accounting
//!
//! This library turns the raw daily reports of the Aureon hotel accounting
//! backend into per-hotel, per-period summaries: revenue by source
//! (hebergement, bar, cuisine), expenses by label, and the cash left in hand
//! (reste en caisse).
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Money, report periods, normalized reports and summaries
//! - `reports`: Aggregation, rollups, breakdowns and history listings
//! - `fetch`: Report sources, the per-day fallback and stale-request guard
//! - `storage`: JSON report files on disk
//! - `export`: CSV, JSON and YAML output
//! - `display`: Terminal formatting
//! - `config`: Paths and settings
//! - `cli`: Command handlers for the `aureon` binary
//! - `logging`: Diagnostic logging setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use aureon_reports::reports::aggregate;
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({ "hotelName": "Mbolo Hotel", "montantBar": 500, "montantCuisine": 200 }),
//!     json!({ "hotelName": "Hotel la Dibamba", "montantBar": 900 }),
//! ];
//!
//! let summary = aggregate(&records, "mbolo hotel");
//! assert_eq!(summary.count, 1);
//! assert_eq!(summary.total_amount.units(), 700);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{AureonError, AureonResult};
