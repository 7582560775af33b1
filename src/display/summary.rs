//! Period summary display formatting
//!
//! Formats a [`PeriodSummary`] as the analytics card shown for a selected
//! hotel and period.

use super::report::{double_separator, format_header, format_money_colored, separator};
use crate::models::{PeriodSummary, ReportPeriod};

const WIDTH: usize = 48;

/// Format a period summary for terminal output
pub fn format_period_summary(
    hotel: &str,
    period: &ReportPeriod,
    summary: &PeriodSummary,
    currency: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format_header(&format!("{} - {}", hotel, period), WIDTH));
    output.push('\n');
    output.push_str(&double_separator(WIDTH));
    output.push('\n');

    if summary.is_empty() {
        output.push_str("No reports found for this hotel and period.\n");
        return output;
    }

    let row = |label: &str, value: String| format!("{:<20} {:>27}\n", label, value);

    output.push_str(&row("Hebergement", summary.revenues.hebergement.format_with_symbol(currency)));
    output.push_str(&row("Bar", summary.revenues.bar.format_with_symbol(currency)));
    output.push_str(&row("Cuisine", summary.revenues.cuisine.format_with_symbol(currency)));
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&row("Income", summary.total_amount.format_with_symbol(currency)));
    output.push_str(&row("Expenses", summary.total_expenses.format_with_symbol(currency)));

    for expense in &summary.expenses {
        output.push_str(&row(
            &format!("  {}", expense.label),
            expense.amount.format_with_symbol(currency),
        ));
    }

    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<20} {}\n",
        "Net",
        format_money_colored(summary.reste_en_caisse, currency)
    ));
    output.push_str(&format!("{:<20} {:>27}\n", "Reports", summary.count));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseLine, Money, Revenues};

    #[test]
    fn test_format_empty_summary() {
        let period = ReportPeriod::month(2025, 1).unwrap();
        let output = format_period_summary("Mbolo Hotel", &period, &PeriodSummary::empty(), "FCFA");
        assert!(output.contains("Mbolo Hotel - 2025-01"));
        assert!(output.contains("No reports found"));
    }

    #[test]
    fn test_format_summary() {
        let period = ReportPeriod::year(2025).unwrap();
        let summary = PeriodSummary {
            total_amount: Money::from_units(1000),
            total_expenses: Money::from_units(200),
            reste_en_caisse: Money::from_units(800),
            revenues: Revenues::new(Money::from_units(1000), Money::zero(), Money::zero()),
            expenses: vec![ExpenseLine::new("Fuel", Money::from_units(200))],
            count: 1,
        };
        let output = format_period_summary("Mbolo Hotel", &period, &summary, "FCFA");
        assert!(output.contains("1 000 FCFA"));
        assert!(output.contains("  Fuel"));
        assert!(output.contains("800 FCFA"));
    }
}
