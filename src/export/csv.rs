//! CSV Export functionality
//!
//! Exports period summaries and the normalized rows behind them to CSV.

use crate::error::{AureonError, AureonResult};
use crate::fetch::FetchResult;
use crate::reports::{filter_by_hotel, normalize};
use serde_json::Value;
use std::io::Write;

fn amount(m: crate::models::Money) -> String {
    format!("{:.2}", m.as_f64())
}

/// Export a period summary as `Section,Label,Amount` rows
///
/// Totals come first, then the three revenue sources, then one row per
/// expense label in first-seen order.
pub fn export_summary_csv<W: Write>(result: &FetchResult, writer: W) -> AureonResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| AureonError::Export(e.to_string());
    let summary = &result.summary;

    csv.write_record(["Hotel", "Period", "Section", "Label", "Amount"])
        .map_err(export_err)?;

    let hotel = result.hotel.as_str();
    let period = result.period.to_string();
    let mut row = |section: &str, label: &str, value: String| {
        csv.write_record([hotel, period.as_str(), section, label, value.as_str()])
            .map_err(export_err)
    };

    row("Total", "Income", amount(summary.total_amount))?;
    row("Total", "Expenses", amount(summary.total_expenses))?;
    row("Total", "Net", amount(summary.reste_en_caisse))?;
    row("Total", "Reports", summary.count.to_string())?;
    for (label, value) in summary.revenues.sources() {
        row("Revenue", label, amount(value))?;
    }
    for line in &summary.expenses {
        row("Expense", line.label.as_str(), amount(line.amount))?;
    }

    csv.flush().map_err(|e| AureonError::Export(e.to_string()))?;
    Ok(())
}

/// Export one normalized row per report of `hotel`
///
/// Records of other hotels are skipped. Undated records keep an empty date
/// cell.
pub fn export_reports_csv<W: Write>(records: &[Value], hotel: &str, writer: W) -> AureonResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| AureonError::Export(e.to_string());

    csv.write_record([
        "ID",
        "Date",
        "Hotel",
        "Hebergement",
        "Bar",
        "Cuisine",
        "Total",
        "Expenses",
        "Net",
        "Expense Lines",
    ])
    .map_err(export_err)?;

    for record in filter_by_hotel(records, hotel) {
        let report = normalize(record);
        csv.write_record([
            report.id.unwrap_or_default(),
            report
                .created_at
                .map(|d| d.to_string())
                .unwrap_or_default(),
            report.hotel_name.unwrap_or_default(),
            amount(report.revenues.hebergement),
            amount(report.revenues.bar),
            amount(report.revenues.cuisine),
            amount(report.total_amount),
            amount(report.total_expenses),
            amount(report.reste_en_caisse),
            report.expenses.len().to_string(),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(|e| AureonError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_result;
    use serde_json::json;

    #[test]
    fn test_export_summary_csv() {
        let mut output = Vec::new();
        export_summary_csv(&sample_result(), &mut output).unwrap();

        let csv_string = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv_string.lines().collect();

        assert_eq!(lines[0], "Hotel,Period,Section,Label,Amount");
        assert_eq!(lines[1], "Mbolo Hotel,2025-01,Total,Income,3700.00");
        assert_eq!(lines[3], "Mbolo Hotel,2025-01,Total,Net,3150.00");
        assert_eq!(lines[4], "Mbolo Hotel,2025-01,Total,Reports,2");
        assert_eq!(lines[5], "Mbolo Hotel,2025-01,Revenue,Hebergement,3000.00");
        assert_eq!(lines[8], "Mbolo Hotel,2025-01,Expense,Fuel,350.00");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_export_reports_csv() {
        let records = vec![
            json!({
                "_id": "r1", "hotelName": "Mbolo Hotel", "createdAt": "2025-01-03",
                "montantHebergement": 1000, "montantBar": 500, "montantCuisine": 200,
                "totalExpenses": 300, "expenses": [{ "label": "Fuel", "amount": 300 }]
            }),
            json!({ "hotelName": "Hotel la Dibamba", "montantBar": 10 }),
            json!({ "hotelName": "MBOLO HOTEL", "montantCuisine": "75.5" }),
        ];

        let mut output = Vec::new();
        export_reports_csv(&records, "mbolo hotel", &mut output).unwrap();

        let csv_string = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv_string.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "r1,2025-01-03,Mbolo Hotel,1000.00,500.00,200.00,1700.00,300.00,1400.00,1"
        );
        assert_eq!(lines[2], ",,MBOLO HOTEL,0.00,0.00,75.50,75.50,0.00,75.50,0");
    }
}
