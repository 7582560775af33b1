//! Normalized daily report
//!
//! The backend stores one accounting record per hotel per day. Payloads are
//! not schema-validated upstream, so the raw form stays a
//! `serde_json::Value` until [`crate::reports::normalize`] turns it into a
//! [`NormalizedReport`] with every field populated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Money;

/// Label used for expense lines that arrive without one
pub const DEFAULT_EXPENSE_LABEL: &str = "Other";

/// A single expense line of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub label: String,
    pub amount: Money,
}

impl ExpenseLine {
    pub fn new(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Revenue split across the three income sources of a hotel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Revenues {
    /// Lodging
    pub hebergement: Money,
    pub bar: Money,
    /// Kitchen / food service
    pub cuisine: Money,
}

impl Revenues {
    pub fn new(hebergement: Money, bar: Money, cuisine: Money) -> Self {
        Self {
            hebergement,
            bar,
            cuisine,
        }
    }

    /// Sum of the three revenue sources
    pub fn total(&self) -> Money {
        self.hebergement + self.bar + self.cuisine
    }

    /// Each source with its display name
    pub fn sources(&self) -> [(&'static str, Money); 3] {
        [
            ("Hebergement", self.hebergement),
            ("Bar", self.bar),
            ("Cuisine", self.cuisine),
        ]
    }
}

impl std::ops::AddAssign for Revenues {
    fn add_assign(&mut self, other: Self) {
        self.hebergement += other.hebergement;
        self.bar += other.bar;
        self.cuisine += other.cuisine;
    }
}

/// A fully-populated report for one hotel on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReport {
    /// Backend identifier, if the record carried one
    pub id: Option<String>,
    /// Hotel name as sent by the backend (not case-folded)
    pub hotel_name: Option<String>,
    /// Report date, if `createdAt` could be read as a date
    pub created_at: Option<NaiveDate>,
    pub revenues: Revenues,
    /// Provided total when present, otherwise the sum of the revenues
    pub total_amount: Money,
    pub total_expenses: Money,
    /// Net: provided value when present, otherwise total minus expenses
    pub reste_en_caisse: Money,
    pub expenses: Vec<ExpenseLine>,
}

impl NormalizedReport {
    /// True when the record's net differs from revenue minus expenses
    pub fn has_adjusted_net(&self) -> bool {
        self.reste_en_caisse != self.total_amount - self.total_expenses
    }
}
