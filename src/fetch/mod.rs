//! Fetching report data for a period
//!
//! - [`source`]: the query types and the [`ReportSource`] trait
//! - [`json_dir`]: a source over the local reports directory
//! - [`fetcher`]: period queries with the per-day fallback
//! - [`pipeline`]: request sequencing that drops stale results

pub mod fetcher;
pub mod json_dir;
pub mod pipeline;
pub mod source;

pub use fetcher::{FetchResult, FetchStrategy, ReportFetcher};
pub use json_dir::JsonDirSource;
pub use pipeline::{PipelineOutcome, QuerySelection, ReportPipeline, RequestTicket};
pub use source::{QueryScope, ReportQuery, ReportSource};
