//! Period rollup report
//!
//! Splits a period into its sub-periods (year into months, month into week
//! buckets, week into days) and summarizes one hotel's reports per row.

use serde::Serialize;
use serde_json::Value;
use std::io::Write;

use super::aggregator::{filter_by_hotel, normalize};
use crate::display::report::{format_bar, separator};
use crate::error::{AureonError, AureonResult};
use crate::models::{PeriodSummary, ReportPeriod};

/// One sub-period of a rollup
#[derive(Debug, Clone, Serialize)]
pub struct RollupRow {
    pub period: ReportPeriod,
    pub summary: PeriodSummary,
}

/// Rollup of one hotel's reports over a period
#[derive(Debug, Clone, Serialize)]
pub struct PeriodRollup {
    /// Hotel the rollup was requested for
    pub hotel: String,
    /// The period being rolled up
    pub period: ReportPeriod,
    /// Summary of every dated report inside the period
    pub total: PeriodSummary,
    /// One row per sub-period, in chronological order
    pub rows: Vec<RollupRow>,
    /// Reports of the hotel whose date could not be read
    pub undated_count: usize,
    /// Reports of the hotel dated outside the period
    pub outside_count: usize,
}

impl PeriodRollup {
    /// Generate a rollup from raw records
    ///
    /// Reports are placed by their `createdAt` date. A day period has no
    /// sub-periods, so its rollup only carries the total.
    pub fn generate<'a, I>(records: I, hotel: &str, period: ReportPeriod) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut rows: Vec<RollupRow> = period
            .children()
            .into_iter()
            .map(|child| RollupRow {
                period: child,
                summary: PeriodSummary::empty(),
            })
            .collect();
        let mut total = PeriodSummary::empty();
        let mut undated_count = 0;
        let mut outside_count = 0;

        for record in filter_by_hotel(records, hotel) {
            let report = normalize(record);
            let Some(date) = report.created_at else {
                undated_count += 1;
                continue;
            };
            if !period.contains(date) {
                outside_count += 1;
                continue;
            }

            total.add_report(&report);
            if let Some(row) = rows.iter_mut().find(|row| row.period.contains(date)) {
                row.summary.add_report(&report);
            }
        }

        Self {
            hotel: hotel.trim().to_string(),
            period,
            total,
            rows,
            undated_count,
            outside_count,
        }
    }

    /// The row with the highest income, if any row has income
    pub fn best_row(&self) -> Option<&RollupRow> {
        self.rows
            .iter()
            .filter(|row| row.summary.total_amount.is_positive())
            .max_by_key(|row| row.summary.total_amount)
    }

    /// Format the rollup for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} rollup for {}: {}\n",
            capitalize(&self.period.kind().to_string()),
            self.hotel,
            self.period
        ));
        output.push_str(&"=".repeat(86));
        output.push('\n');

        output.push_str(&format!(
            "{:<14} {:>16} {:>16} {:>16} {:>6}  {}\n",
            "Period", "Income", "Expenses", "Net", "Count", "Share"
        ));
        output.push_str(&separator(86));
        output.push('\n');

        let max_income = self
            .rows
            .iter()
            .map(|row| row.summary.total_amount.as_f64())
            .fold(0.0, f64::max);

        for row in &self.rows {
            output.push_str(&format!(
                "{:<14} {:>16} {:>16} {:>16} {:>6}  {}\n",
                row.period.to_string(),
                row.summary.total_amount.to_string(),
                row.summary.total_expenses.to_string(),
                row.summary.reste_en_caisse.to_string(),
                row.summary.count,
                format_bar(row.summary.total_amount.as_f64(), max_income, 12)
            ));
        }

        output.push_str(&separator(86));
        output.push('\n');
        output.push_str(&format!(
            "{:<14} {:>16} {:>16} {:>16} {:>6}\n",
            "TOTAL",
            self.total.total_amount.format_with_symbol(currency),
            self.total.total_expenses.format_with_symbol(currency),
            self.total.reste_en_caisse.format_with_symbol(currency),
            self.total.count
        ));

        if self.undated_count > 0 {
            output.push_str(&format!(
                "\n{} report(s) without a readable date were left out\n",
                self.undated_count
            ));
        }

        output
    }

    /// Export the rollup to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> AureonResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| AureonError::Export(e.to_string());

        csv.write_record([
            "Hotel",
            "Period",
            "Start Date",
            "End Date",
            "Income",
            "Expenses",
            "Net",
            "Hebergement",
            "Bar",
            "Cuisine",
            "Count",
        ])
        .map_err(export_err)?;

        let total_row = RollupRow {
            period: self.period,
            summary: self.total.clone(),
        };
        for row in self.rows.iter().chain(std::iter::once(&total_row)) {
            let s = &row.summary;
            csv.write_record([
                self.hotel.clone(),
                row.period.to_string(),
                row.period.start_date().to_string(),
                row.period.end_date().to_string(),
                format!("{:.2}", s.total_amount.as_f64()),
                format!("{:.2}", s.total_expenses.as_f64()),
                format!("{:.2}", s.reste_en_caisse.as_f64()),
                format!("{:.2}", s.revenues.hebergement.as_f64()),
                format!("{:.2}", s.revenues.bar.as_f64()),
                format!("{:.2}", s.revenues.cuisine.as_f64()),
                s.count.to_string(),
            ])
            .map_err(export_err)?;
        }

        csv.flush()
            .map_err(|e| AureonError::Export(e.to_string()))?;
        Ok(())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
