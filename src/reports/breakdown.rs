//! Revenue and expense breakdown
//!
//! Shares of each revenue source and each expense label within a
//! [`PeriodSummary`], as shown on the analytics charts.

use serde::Serialize;
use std::io::Write;

use crate::display::report::{format_bar, format_percentage};
use crate::error::{AureonError, AureonResult};
use crate::models::{Money, PeriodSummary};

/// One slice of a breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownLine {
    pub label: String,
    pub amount: Money,
    /// Share of the breakdown total, 0-100
    pub percentage: f64,
}

/// Revenue and expense shares of a summary
#[derive(Debug, Clone, Serialize)]
pub struct RevenueBreakdown {
    /// Hebergement, bar, cuisine, in that order
    pub revenues: Vec<BreakdownLine>,
    /// Expense labels, largest first
    pub expenses: Vec<BreakdownLine>,
    /// Sum of the three revenue sources
    pub total_revenue: Money,
    /// Sum of the itemized expense lines
    pub total_itemized_expenses: Money,
    /// Net carried by the summary
    pub net: Money,
}

impl RevenueBreakdown {
    /// Build the breakdown of a summary
    ///
    /// Revenue shares are relative to the sum of the three sources and
    /// expense shares to the sum of the itemized lines, so each side adds up
    /// to 100% whenever it is non-zero.
    pub fn from_summary(summary: &PeriodSummary) -> Self {
        let total_revenue = summary.revenues.total();
        let revenues = summary
            .revenues
            .sources()
            .into_iter()
            .map(|(label, amount)| BreakdownLine {
                label: label.to_string(),
                amount,
                percentage: amount.percentage_of(total_revenue),
            })
            .collect();

        let total_itemized_expenses: Money = summary.expenses.iter().map(|e| e.amount).sum();
        let mut expenses: Vec<BreakdownLine> = summary
            .expenses
            .iter()
            .map(|e| BreakdownLine {
                label: e.label.clone(),
                amount: e.amount,
                percentage: e.amount.percentage_of(total_itemized_expenses),
            })
            .collect();
        // Stable sort keeps first-seen order among equal amounts
        expenses.sort_by(|a, b| b.amount.cmp(&a.amount));

        Self {
            revenues,
            expenses,
            total_revenue,
            total_itemized_expenses,
            net: summary.reste_en_caisse,
        }
    }

    /// The largest expense lines
    pub fn top_expenses(&self, limit: usize) -> &[BreakdownLine] {
        &self.expenses[..limit.min(self.expenses.len())]
    }

    /// Format the breakdown for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("REVENUE\n");
        for line in &self.revenues {
            output.push_str(&format!(
                "  {:<24} {:>16} {:>7}  {}\n",
                line.label,
                line.amount.to_string(),
                format_percentage(line.percentage),
                format_bar(line.percentage, 100.0, 20)
            ));
        }
        output.push_str(&format!(
            "  {:<24} {:>16}\n",
            "Total",
            self.total_revenue.format_with_symbol(currency)
        ));

        output.push_str("\nEXPENSES\n");
        if self.expenses.is_empty() {
            output.push_str("  No itemized expenses.\n");
        }
        for line in &self.expenses {
            output.push_str(&format!(
                "  {:<24} {:>16} {:>7}  {}\n",
                line.label,
                line.amount.to_string(),
                format_percentage(line.percentage),
                format_bar(line.percentage, 100.0, 20)
            ));
        }
        output.push_str(&format!(
            "  {:<24} {:>16}\n",
            "Total",
            self.total_itemized_expenses.format_with_symbol(currency)
        ));

        output.push_str(&format!(
            "\nNet: {}\n",
            self.net.format_with_symbol(currency)
        ));
        output
    }

    /// Export the breakdown to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> AureonResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| AureonError::Export(e.to_string());

        csv.write_record(["Kind", "Label", "Amount", "Percentage"])
            .map_err(export_err)?;
        let revenue_rows = self.revenues.iter().map(|l| ("Revenue", l));
        let expense_rows = self.expenses.iter().map(|l| ("Expense", l));
        for (kind, line) in revenue_rows.chain(expense_rows) {
            csv.write_record([
                kind.to_string(),
                line.label.clone(),
                format!("{:.2}", line.amount.as_f64()),
                format!("{:.2}", line.percentage),
            ])
            .map_err(export_err)?;
        }

        csv.flush()
            .map_err(|e| AureonError::Export(e.to_string()))?;
        Ok(())
    }
}
