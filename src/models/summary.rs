//! Period summary
//!
//! The aggregation output for one hotel over one period.

use serde::{Deserialize, Serialize};

use super::{ExpenseLine, Money, NormalizedReport, Revenues};

/// Totals of every report of one hotel over one period
///
/// `reste_en_caisse` is the sum of each record's own net. It is never
/// recomputed as `total_amount - total_expenses`, because individual records
/// may carry a net that diverges from revenue minus expenses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub total_amount: Money,
    pub total_expenses: Money,
    pub reste_en_caisse: Money,
    pub revenues: Revenues,
    /// Summed per distinct label, in first-seen label order
    pub expenses: Vec<ExpenseLine>,
    /// Number of reports that contributed
    pub count: usize,
}

impl PeriodSummary {
    /// The summary of no reports at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when nothing contributed and every total is zero
    pub fn is_empty(&self) -> bool {
        self.count == 0
            && self.total_amount.is_zero()
            && self.total_expenses.is_zero()
            && self.reste_en_caisse.is_zero()
            && self.revenues == Revenues::default()
            && self.expenses.is_empty()
    }

    /// Add one normalized report to the running sums
    pub fn add_report(&mut self, report: &NormalizedReport) {
        self.total_amount += report.total_amount;
        self.total_expenses += report.total_expenses;
        self.reste_en_caisse += report.reste_en_caisse;
        self.revenues += report.revenues;
        self.add_expenses(&report.expenses);
        self.count += 1;
    }

    /// Fold another summary into this one
    ///
    /// Merging summaries of disjoint record sets gives the same result as
    /// aggregating their union in one pass.
    pub fn merge(&mut self, other: &PeriodSummary) {
        self.total_amount += other.total_amount;
        self.total_expenses += other.total_expenses;
        self.reste_en_caisse += other.reste_en_caisse;
        self.revenues += other.revenues;
        self.add_expenses(&other.expenses);
        self.count += other.count;
    }

    /// Merge a sequence of summaries into a new one
    pub fn merged<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a PeriodSummary>,
    {
        let mut total = Self::empty();
        for part in parts {
            total.merge(part);
        }
        total
    }

    /// Amount recorded under an expense label, if any
    pub fn expense(&self, label: &str) -> Option<Money> {
        self.expenses
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.amount)
    }

    fn add_expenses(&mut self, lines: &[ExpenseLine]) {
        for line in lines {
            match self.expenses.iter_mut().find(|e| e.label == line.label) {
                Some(existing) => existing.amount += line.amount,
                None => self.expenses.push(line.clone()),
            }
        }
    }
}
