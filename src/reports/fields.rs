//! Lenient field extraction from backend JSON
//!
//! Report payloads changed shape over time, so each logical field is looked
//! up under a fixed list of names. For amounts the first name present with a
//! non-null value wins, even when that value is not a number; text, dates
//! and arrays take the first usable value. This is the single canonical list
//! used by every report in the crate. A dotted name (`revenues.bar`) walks
//! into a nested object.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::models::Money;

pub const ID: &[&str] = &["id", "_id"];
pub const HOTEL_NAME: &[&str] = &["hotelName", "hotel", "hotel_name"];
pub const CREATED_AT: &[&str] = &["createdAt", "date", "reportDate"];
pub const HEBERGEMENT: &[&str] = &["montantHebergement", "hebergement", "revenues.hebergement"];
pub const BAR: &[&str] = &["montantBar", "bar", "revenues.bar"];
pub const CUISINE: &[&str] = &["montantCuisine", "cuisine", "revenues.cuisine"];
pub const TOTAL_AMOUNT: &[&str] = &["totalAmount", "total", "montantTotal"];
pub const TOTAL_EXPENSES: &[&str] = &["totalExpenses", "totalDepenses"];
pub const RESTE_EN_CAISSE: &[&str] = &["resteEnCaisse", "net"];
pub const EXPENSES: &[&str] = &["expenses", "depenses"];
pub const EXPENSE_LABEL: &[&str] = &["label", "libelle", "name"];
pub const EXPENSE_AMOUNT: &[&str] = &["amount", "montant"];
pub const COUNT: &[&str] = &["count", "reportCount"];

/// Look up a (possibly dotted) key in a JSON object
fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_object()?.get(part))
}

/// Coerce a JSON value to a finite number
///
/// Numbers pass through, strings are trimmed and parsed. An empty string is
/// zero. Everything else (null, booleans, arrays, objects, unparseable or
/// non-finite text) yields `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().ok()?
            }
        }
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// First of `names` present with a non-null value, as money
///
/// Returns `None` only when every name is missing or null. A present value
/// that is not a number reads as zero rather than falling through to the
/// next name.
pub fn money(record: &Value, names: &[&str]) -> Option<Money> {
    names
        .iter()
        .filter_map(|name| lookup(record, name))
        .find(|value| !value.is_null())
        .map(|value| coerce_number(value).map(Money::from_f64).unwrap_or_default())
}

/// Like [`money`], with missing and non-numeric input read as zero
pub fn money_or_zero(record: &Value, names: &[&str]) -> Money {
    money(record, names).unwrap_or_default()
}

/// First of `names` holding a non-blank string (numbers are stringified)
pub fn text(record: &Value, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| lookup(record, name))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// First of `names` holding an array
pub fn array<'a>(record: &'a Value, names: &[&str]) -> Option<&'a Vec<Value>> {
    names
        .iter()
        .filter_map(|name| lookup(record, name))
        .find_map(Value::as_array)
}

/// First of `names` readable as a calendar date
///
/// Accepts RFC 3339 timestamps (`2025-01-15T08:30:00.000Z`), naive
/// timestamps, and plain `YYYY-MM-DD` dates. The date part is taken as-is,
/// without time zone conversion.
pub fn date(record: &Value, names: &[&str]) -> Option<NaiveDate> {
    names
        .iter()
        .filter_map(|name| lookup(record, name))
        .filter_map(Value::as_str)
        .find_map(parse_date)
}

/// Parse the date part of a backend timestamp
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.naive_local().date());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    // Anything else with a leading ISO date, e.g. "2025-01-15 08:30"
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Trimmed, case-folded hotel name used for matching
pub fn hotel_key(name: &str) -> String {
    name.trim().to_lowercase()
}
