//! Period fetching
//!
//! Asks a [`ReportSource`] for a whole period at once and, when that comes
//! back empty, rebuilds the period from one query per day.

use std::thread;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::source::{QueryScope, ReportQuery, ReportSource};
use crate::config::FetchSettings;
use crate::error::{AureonError, AureonResult};
use crate::models::{PeriodSummary, ReportPeriod};
use crate::reports::{aggregate, normalize_aggregated_response};
use crate::storage::file_io::flatten_payload;

/// How a fetch result was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStrategy {
    /// The period query answered on its own
    Direct,
    /// Assembled from one query per day
    DailyFallback,
}

/// Outcome of fetching one period for one hotel
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub hotel: String,
    pub period: ReportPeriod,
    pub summary: PeriodSummary,
    /// Raw records behind the summary, when the source returned records
    pub records: Vec<Value>,
    pub strategy: FetchStrategy,
    /// Days whose query failed and were left out
    pub failed_days: Vec<NaiveDate>,
}

/// Fetches period summaries from a report source
pub struct ReportFetcher<S> {
    source: S,
    daily_fallback: bool,
    max_parallel_requests: usize,
}

impl<S: ReportSource> ReportFetcher<S> {
    pub fn new(source: S, settings: &FetchSettings) -> Self {
        Self {
            source,
            daily_fallback: settings.daily_fallback,
            max_parallel_requests: settings.max_parallel_requests.max(1),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the summary of one hotel over one period
    ///
    /// Errors of the period query are returned as is. In the per-day
    /// fallback a failing day is logged and skipped; the other days still
    /// count.
    pub fn fetch_period(&self, hotel: &str, period: ReportPeriod) -> AureonResult<FetchResult> {
        let direct = match QueryScope::for_period(&period) {
            Some(scope) => {
                let payload = self.source.fetch(&ReportQuery::new(hotel, scope))?;
                let summary = normalize_aggregated_response(payload.as_ref(), hotel);
                let records = match payload {
                    Some(Value::Array(records)) => records,
                    _ => Vec::new(),
                };
                Some((summary, records))
            }
            None => None,
        };

        if let Some((summary, records)) = direct {
            let single_day = matches!(period, ReportPeriod::Day { .. });
            if !summary.is_empty() || !self.daily_fallback || single_day {
                return Ok(FetchResult {
                    hotel: hotel.to_string(),
                    period,
                    summary,
                    records,
                    strategy: FetchStrategy::Direct,
                    failed_days: Vec::new(),
                });
            }
            tracing::debug!(hotel = %hotel, period = %period, "period query empty, fetching day by day");
        }

        let (records, failed_days) = self.fetch_days(hotel, &period.days());
        let summary = aggregate(&records, hotel);

        Ok(FetchResult {
            hotel: hotel.to_string(),
            period,
            summary,
            records,
            strategy: FetchStrategy::DailyFallback,
            failed_days,
        })
    }

    /// Query each day, at most `max_parallel_requests` at a time
    fn fetch_days(&self, hotel: &str, days: &[NaiveDate]) -> (Vec<Value>, Vec<NaiveDate>) {
        let mut records = Vec::new();
        let mut failed_days = Vec::new();

        for chunk in days.chunks(self.max_parallel_requests) {
            let outcomes: Vec<(NaiveDate, AureonResult<Option<Value>>)> =
                thread::scope(|scope| {
                    let handles: Vec<_> = chunk
                        .iter()
                        .map(|&day| {
                            let query = ReportQuery::date(hotel, day);
                            (day, scope.spawn(move || self.source.fetch(&query)))
                        })
                        .collect();

                    handles
                        .into_iter()
                        .map(|(day, handle)| {
                            let outcome = handle.join().unwrap_or_else(|_| {
                                Err(AureonError::Source("report query panicked".into()))
                            });
                            (day, outcome)
                        })
                        .collect()
                });

            for (day, outcome) in outcomes {
                match outcome {
                    Ok(Some(payload)) => records.extend(flatten_payload(payload)),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!(hotel = %hotel, date = %day, error = %e, "skipping day");
                        failed_days.push(day);
                    }
                }
            }
        }

        (records, failed_days)
    }
}
