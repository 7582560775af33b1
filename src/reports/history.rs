//! Transaction history report
//!
//! Lists one hotel's individual daily reports, grouped by day, newest day
//! first. Each day carries its own summary alongside the rows.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::aggregator::{filter_by_hotel, normalize};
use crate::display::report::separator;
use crate::models::{NormalizedReport, PeriodSummary, ReportPeriod};

/// The reports of a single day
#[derive(Debug, Clone, Serialize)]
pub struct HistoryDay {
    pub date: NaiveDate,
    pub reports: Vec<NormalizedReport>,
    pub summary: PeriodSummary,
}

/// History of a hotel over a period
#[derive(Debug, Clone, Serialize)]
pub struct HistoryReport {
    pub hotel: String,
    pub period: ReportPeriod,
    /// Days with at least one report, newest first
    pub days: Vec<HistoryDay>,
    /// Reports whose date could not be read
    pub undated: Vec<NormalizedReport>,
    /// Summary of every report listed in `days`
    pub total: PeriodSummary,
}

impl HistoryReport {
    /// Generate a history listing from raw records
    pub fn generate<'a, I>(records: I, hotel: &str, period: ReportPeriod) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut by_day: BTreeMap<NaiveDate, Vec<NormalizedReport>> = BTreeMap::new();
        let mut undated = Vec::new();

        for record in filter_by_hotel(records, hotel) {
            let report = normalize(record);
            match report.created_at {
                Some(date) if period.contains(date) => {
                    by_day.entry(date).or_default().push(report)
                }
                Some(_) => {}
                None => undated.push(report),
            }
        }

        let mut total = PeriodSummary::empty();
        let days: Vec<HistoryDay> = by_day
            .into_iter()
            .rev()
            .map(|(date, reports)| {
                let mut summary = PeriodSummary::empty();
                for report in &reports {
                    summary.add_report(report);
                }
                total.merge(&summary);
                HistoryDay {
                    date,
                    reports,
                    summary,
                }
            })
            .collect();

        Self {
            hotel: hotel.trim().to_string(),
            period,
            days,
            undated,
            total,
        }
    }

    /// Number of reports listed
    pub fn report_count(&self) -> usize {
        self.days.iter().map(|d| d.reports.len()).sum()
    }

    /// Format the history for terminal display
    pub fn format_terminal(&self, currency: &str, date_format: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("History for {}: {}\n", self.hotel, self.period));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.days.is_empty() {
            output.push_str("No reports found for this period.\n");
        }

        for day in &self.days {
            output.push_str(&format!(
                "\n{}  ({} report(s))\n",
                day.date.format(date_format),
                day.reports.len()
            ));
            for report in &day.reports {
                output.push_str(&format!(
                    "  {:<14} H {:>12}  B {:>12}  C {:>12}  Exp {:>12}  Net {:>12}\n",
                    report.id.as_deref().unwrap_or("-"),
                    report.revenues.hebergement.to_string(),
                    report.revenues.bar.to_string(),
                    report.revenues.cuisine.to_string(),
                    report.total_expenses.to_string(),
                    report.reste_en_caisse.to_string(),
                ));
                for expense in &report.expenses {
                    output.push_str(&format!(
                        "      - {:<30} {:>12}\n",
                        expense.label,
                        expense.amount.to_string()
                    ));
                }
            }
        }

        output.push('\n');
        output.push_str(&separator(72));
        output.push('\n');
        output.push_str(&format!(
            "Income: {}   Expenses: {}   Net: {}\n",
            self.total.total_amount.format_with_symbol(currency),
            self.total.total_expenses.format_with_symbol(currency),
            self.total.reste_en_caisse.format_with_symbol(currency)
        ));
        if !self.undated.is_empty() {
            output.push_str(&format!(
                "{} report(s) without a readable date not listed\n",
                self.undated.len()
            ));
        }

        output
    }
}
