//! Request pipeline with stale-result protection
//!
//! Every selection change begins a new request. A request that completes
//! after a newer one was begun is reported as stale and its result is
//! dropped, so a slow answer for an old selection can never overwrite the
//! answer for the current one.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::fetcher::{FetchResult, ReportFetcher};
use super::source::ReportSource;
use crate::error::AureonResult;
use crate::models::ReportPeriod;

/// The hotel and period a caller currently wants to see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySelection {
    pub hotel: String,
    pub period: ReportPeriod,
}

impl QuerySelection {
    pub fn new(hotel: impl Into<String>, period: ReportPeriod) -> Self {
        Self {
            hotel: hotel.into(),
            period,
        }
    }
}

/// Handle for one begun request
#[derive(Debug, Clone)]
pub struct RequestTicket {
    sequence: u64,
    selection: QuerySelection,
}

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn selection(&self) -> &QuerySelection {
        &self.selection
    }
}

/// What became of a completed request
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Result for the most recent request
    Fresh(FetchResult),
    /// A newer request was begun; the result was discarded
    Stale { sequence: u64, latest: u64 },
}

impl PipelineOutcome {
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }

    /// The result, if it is still current
    pub fn into_fresh(self) -> Option<FetchResult> {
        match self {
            Self::Fresh(result) => Some(result),
            Self::Stale { .. } => None,
        }
    }
}

/// Fetcher plus a monotonically increasing request sequence
pub struct ReportPipeline<S> {
    fetcher: ReportFetcher<S>,
    latest: AtomicU64,
}

impl<S: ReportSource> ReportPipeline<S> {
    pub fn new(fetcher: ReportFetcher<S>) -> Self {
        Self {
            fetcher,
            latest: AtomicU64::new(0),
        }
    }

    pub fn fetcher(&self) -> &ReportFetcher<S> {
        &self.fetcher
    }

    /// Start a request for `selection`, superseding every earlier one
    pub fn begin(&self, selection: QuerySelection) -> RequestTicket {
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(
            sequence = sequence,
            hotel = %selection.hotel,
            period = %selection.period,
            "request begun"
        );
        RequestTicket {
            sequence,
            selection,
        }
    }

    /// Sequence number of the most recently begun request
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest() == ticket.sequence
    }

    /// Run the request and hand back its result if it is still current
    ///
    /// In-flight work is not interrupted when a newer request begins; the
    /// staleness check happens once the fetch has settled. A superseded
    /// request is reported as stale even if its fetch failed.
    pub fn complete(&self, ticket: &RequestTicket) -> AureonResult<PipelineOutcome> {
        let selection = &ticket.selection;
        let result = self
            .fetcher
            .fetch_period(&selection.hotel, selection.period);

        let latest = self.latest();
        if latest != ticket.sequence {
            tracing::debug!(sequence = ticket.sequence, latest = latest, "discarding stale result");
            return Ok(PipelineOutcome::Stale {
                sequence: ticket.sequence,
                latest,
            });
        }

        result.map(PipelineOutcome::Fresh)
    }

    /// Begin and complete a request in one step
    pub fn load(&self, selection: QuerySelection) -> AureonResult<PipelineOutcome> {
        let ticket = self.begin(selection);
        self.complete(&ticket)
    }
}
