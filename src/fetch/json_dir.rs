//! Report source backed by the local reports directory
//!
//! Answers queries the way the accounting backend's reports endpoint does:
//! an array of the hotel's raw records dated within the queried span. It can
//! be told to ignore month and year queries, which reproduces a backend whose
//! aggregate endpoints return nothing and forces the per-day fallback.

use serde_json::Value;

use super::source::{QueryScope, ReportQuery, ReportSource};
use crate::error::AureonResult;
use crate::reports::filter_by_hotel;
use crate::storage::ReportRepository;

/// Report source reading from a loaded [`ReportRepository`]
pub struct JsonDirSource<'a> {
    reports: &'a ReportRepository,
    aggregate_queries: bool,
}

impl<'a> JsonDirSource<'a> {
    pub fn new(reports: &'a ReportRepository) -> Self {
        Self {
            reports,
            aggregate_queries: true,
        }
    }

    /// Whether month and year queries are answered
    pub fn with_aggregate_queries(mut self, enabled: bool) -> Self {
        self.aggregate_queries = enabled;
        self
    }
}

impl ReportSource for JsonDirSource<'_> {
    fn fetch(&self, query: &ReportQuery) -> AureonResult<Option<Value>> {
        if !self.aggregate_queries && !matches!(query.scope, QueryScope::Date(_)) {
            return Ok(None);
        }

        let period = query.scope.as_period();
        let records = self
            .reports
            .get_by_date_range(period.start_date(), period.end_date())?;
        let matching: Vec<Value> = filter_by_hotel(&records, &query.hotel)
            .into_iter()
            .cloned()
            .collect();

        Ok(Some(Value::Array(matching)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_repo() -> (TempDir, ReportRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ReportRepository::new(temp_dir.path().join("reports"));
        repo.import(
            "reports",
            &[
                json!({ "hotelName": "Mbolo Hotel", "createdAt": "2025-01-02", "montantBar": 10 }),
                json!({ "hotelName": "Mbolo Hotel", "createdAt": "2025-01-03", "montantBar": 20 }),
                json!({ "hotelName": "Hotel la Dibamba", "createdAt": "2025-01-02", "montantBar": 99 }),
            ],
        )
        .unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_date_query() {
        let (_temp_dir, repo) = create_repo();
        let source = JsonDirSource::new(&repo);
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();

        let payload = source.fetch(&ReportQuery::date("mbolo hotel", date)).unwrap();
        assert_eq!(payload.unwrap().as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_month_query_scoped_to_hotel() {
        let (_temp_dir, repo) = create_repo();
        let source = JsonDirSource::new(&repo);
        let query = ReportQuery::new("Mbolo Hotel", QueryScope::Month { year: 2025, month: 1 });

        let payload = source.fetch(&query).unwrap().unwrap();
        assert_eq!(payload.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_aggregate_queries_disabled() {
        let (_temp_dir, repo) = create_repo();
        let source = JsonDirSource::new(&repo).with_aggregate_queries(false);

        let month = ReportQuery::new("Mbolo Hotel", QueryScope::Month { year: 2025, month: 1 });
        assert!(source.fetch(&month).unwrap().is_none());
        assert!(source
            .fetch(&ReportQuery::new("Mbolo Hotel", QueryScope::Year(2025)))
            .unwrap()
            .is_none());

        let day = ReportQuery::date("Mbolo Hotel", NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        assert!(source.fetch(&day).unwrap().is_some());
    }
}
