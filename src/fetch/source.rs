//! Report sources
//!
//! A source answers date-, month- or year-scoped queries for one hotel with
//! whatever JSON the backend returns: an array of raw records, a
//! pre-aggregated object, or nothing at all.

use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;

use crate::error::AureonResult;
use crate::models::ReportPeriod;

/// Time scope of a source query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryScope {
    Date(NaiveDate),
    Month { year: i32, month: u32 },
    Year(i32),
}

impl QueryScope {
    /// The scope a period can be queried with directly, if any
    ///
    /// Week buckets have no backend endpoint and are always assembled from
    /// their days.
    pub fn for_period(period: &ReportPeriod) -> Option<Self> {
        match *period {
            ReportPeriod::Day { date } => Some(Self::Date(date)),
            ReportPeriod::Week { .. } => None,
            ReportPeriod::Month { year, month } => Some(Self::Month { year, month }),
            ReportPeriod::Year { year } => Some(Self::Year(year)),
        }
    }

    /// The same span as a report period
    pub fn as_period(&self) -> ReportPeriod {
        match *self {
            Self::Date(date) => ReportPeriod::Day { date },
            Self::Month { year, month } => ReportPeriod::Month { year, month },
            Self::Year(year) => ReportPeriod::Year { year },
        }
    }
}

impl fmt::Display for QueryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "date={}", date.format("%Y-%m-%d")),
            Self::Month { year, month } => write!(f, "month={:04}-{:02}", year, month),
            Self::Year(year) => write!(f, "year={:04}", year),
        }
    }
}

/// A single query against a report source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportQuery {
    pub hotel: String,
    pub scope: QueryScope,
}

impl ReportQuery {
    pub fn new(hotel: impl Into<String>, scope: QueryScope) -> Self {
        Self {
            hotel: hotel.into(),
            scope,
        }
    }

    /// Query for a single day
    pub fn date(hotel: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(hotel, QueryScope::Date(date))
    }
}

impl fmt::Display for ReportQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hotel={:?} {}", self.hotel, self.scope)
    }
}

/// Anything that can answer report queries
///
/// Sources are shared across the threads of a per-day fallback, hence the
/// `Send + Sync` bound. `Ok(None)` means the source had nothing to say for
/// the query (an empty or absent response), which callers treat exactly like
/// an empty array.
pub trait ReportSource: Send + Sync {
    fn fetch(&self, query: &ReportQuery) -> AureonResult<Option<Value>>;
}

impl<S: ReportSource + ?Sized> ReportSource for &S {
    fn fetch(&self, query: &ReportQuery) -> AureonResult<Option<Value>> {
        (**self).fetch(query)
    }
}

impl<S: ReportSource + ?Sized> ReportSource for Box<S> {
    fn fetch(&self, query: &ReportQuery) -> AureonResult<Option<Value>> {
        (**self).fetch(query)
    }
}
