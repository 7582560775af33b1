//! Report aggregation
//!
//! Turns raw report records, as returned by the accounting backend, into a
//! [`PeriodSummary`] for one hotel. Every function here is total: malformed,
//! missing or mistyped input degrades to zero values and empty sequences,
//! never to an error or a panic. Upstream data is not schema-validated, and
//! a best-effort summary is what the screens need.

use serde_json::Value;

use super::fields;
use crate::models::{ExpenseLine, NormalizedReport, PeriodSummary, Revenues, DEFAULT_EXPENSE_LABEL};

/// Keep only the records belonging to `hotel_name`
///
/// Names are compared trimmed and case-folded. Nulls, non-objects and
/// records without a hotel name are dropped silently.
pub fn filter_by_hotel<'a, I>(records: I, hotel_name: &str) -> Vec<&'a Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    let target = fields::hotel_key(hotel_name);
    records
        .into_iter()
        .filter(|record| record.is_object())
        .filter(|record| {
            fields::text(record, fields::HOTEL_NAME)
                .map(|name| fields::hotel_key(&name) == target)
                .unwrap_or(false)
        })
        .collect()
}

/// Turn one raw record into a fully-populated report
///
/// - revenue fields default to 0
/// - a field present with a non-null value is trusted, and reads as 0 when
///   it is not a number
/// - `totalAmount` is the provided value, else the sum of the revenues
/// - `totalExpenses` is the provided value, else 0
/// - `resteEnCaisse` is the provided value, else total minus expenses
/// - each expense gets `"Other"` for a missing label and 0 for a missing
///   amount; a non-array `expenses` field yields no lines
pub fn normalize(record: &Value) -> NormalizedReport {
    let revenues = Revenues::new(
        fields::money_or_zero(record, fields::HEBERGEMENT),
        fields::money_or_zero(record, fields::BAR),
        fields::money_or_zero(record, fields::CUISINE),
    );

    let total_amount =
        fields::money(record, fields::TOTAL_AMOUNT).unwrap_or_else(|| revenues.total());
    let total_expenses = fields::money_or_zero(record, fields::TOTAL_EXPENSES);
    let reste_en_caisse = fields::money(record, fields::RESTE_EN_CAISSE)
        .unwrap_or(total_amount - total_expenses);

    NormalizedReport {
        id: fields::text(record, fields::ID),
        hotel_name: fields::text(record, fields::HOTEL_NAME),
        created_at: fields::date(record, fields::CREATED_AT),
        revenues,
        total_amount,
        total_expenses,
        reste_en_caisse,
        expenses: expense_lines(record),
    }
}

fn expense_lines(record: &Value) -> Vec<ExpenseLine> {
    fields::array(record, fields::EXPENSES)
        .map(|items| items.iter().map(expense_line).collect())
        .unwrap_or_default()
}

fn expense_line(item: &Value) -> ExpenseLine {
    let label = fields::text(item, fields::EXPENSE_LABEL)
        .unwrap_or_else(|| DEFAULT_EXPENSE_LABEL.to_string());
    ExpenseLine::new(label, fields::money_or_zero(item, fields::EXPENSE_AMOUNT))
}

/// Summarize the records of one hotel
///
/// Sums are order-independent, so summaries of disjoint parts can be
/// combined with [`PeriodSummary::merge`] and match a single pass over the
/// union. No matching record gives the zero summary with `count == 0`.
pub fn aggregate<'a, I>(records: I, hotel_name: &str) -> PeriodSummary
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut summary = PeriodSummary::empty();
    for record in filter_by_hotel(records, hotel_name) {
        summary.add_report(&normalize(record));
    }
    summary
}

/// Summarize a payload as it came back from a period query
///
/// - `None` or `null` is the empty summary
/// - an array is passed to [`aggregate`]
/// - a single object is taken as a summary the server already computed and
///   is read with the same field fallbacks as [`normalize`]. It is **not**
///   filtered by hotel: the server is trusted to have scoped it to the
///   requested hotel, and a mixed-hotel object cannot be detected here.
/// - any other JSON value is the empty summary
pub fn normalize_aggregated_response(payload: Option<&Value>, hotel_name: &str) -> PeriodSummary {
    match payload {
        Some(Value::Array(records)) => aggregate(records, hotel_name),
        Some(object) if object.is_object() => summary_from_object(object),
        _ => PeriodSummary::empty(),
    }
}

fn summary_from_object(object: &Value) -> PeriodSummary {
    let report = normalize(object);
    let count = fields::money(object, fields::COUNT)
        .map(|m| m.units().max(0) as usize)
        .unwrap_or(0);

    let mut summary = PeriodSummary {
        total_amount: report.total_amount,
        total_expenses: report.total_expenses,
        reste_en_caisse: report.reste_en_caisse,
        revenues: report.revenues,
        expenses: Vec::new(),
        count,
    };
    // Route through merge so repeated labels collapse like in `aggregate`
    summary.merge(&PeriodSummary {
        expenses: report.expenses,
        ..PeriodSummary::empty()
    });
    summary
}
