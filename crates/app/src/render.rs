//! Plain-text rendering of records and reports.

use std::fmt::Write;

use engine::{EXPORT_HEADERS, ProductionRecord, Report};

fn cells(record: &ProductionRecord) -> [String; 10] {
    [
        record.id.to_string(),
        record.branch.clone(),
        record.collaborator.clone(),
        record.display_date(),
        record.tax_id.clone(),
        record.client.clone(),
        record.product.clone(),
        record.status.to_string(),
        record.amount.clone(),
        record.notes.clone().unwrap_or_default(),
    ]
}

fn push_row(out: &mut String, row: &[String], widths: &[usize]) {
    let line = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Aligned grid with the export column names as header.
pub fn records_table(records: &[ProductionRecord]) -> String {
    let header: Vec<String> = EXPORT_HEADERS.iter().map(|h| h.to_string()).collect();
    let rows: Vec<[String; 10]> = records.iter().map(cells).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    let _ = writeln!(out, "{} record(s)", records.len());
    out
}

/// One `name: value` line per field.
pub fn record_detail(record: &ProductionRecord) -> String {
    let mut out = String::new();
    for (header, cell) in EXPORT_HEADERS.iter().zip(cells(record)) {
        let _ = writeln!(out, "{header:<12} {cell}");
    }
    out
}

pub fn report(report: &Report) -> String {
    let mut out = String::new();
    if report.totals.is_empty() {
        let _ = writeln!(out, "no records match the filters");
        return out;
    }
    let width = report
        .totals
        .iter()
        .map(|line| line.collaborator.chars().count())
        .max()
        .unwrap_or(0)
        .max("TOTAL".len());
    for line in &report.totals {
        let _ = writeln!(out, "{:<width$}  R$ {}", line.collaborator, line.total);
    }
    let _ = writeln!(out, "{:<width$}  R$ {}", "TOTAL", report.grand_total);
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{CollaboratorTotal, MoneyCents, Status};

    use super::*;

    fn record() -> ProductionRecord {
        ProductionRecord {
            id: 3,
            branch: "PA01".to_string(),
            collaborator: "ALICE".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
            tax_id: "12345678901".to_string(),
            client: "ACME".to_string(),
            product: "SEGURO".to_string(),
            status: Status::InProgress,
            amount: "100.00".to_string(),
            notes: None,
        }
    }

    #[test]
    fn table_has_header_and_rows() {
        let text = records_table(&[record()]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  BRANCH  COLLABORATOR  DATE"));
        assert!(lines[1].starts_with("3   PA01    ALICE         15-05-2024"));
        assert!(lines[1].ends_with("IN PROGRESS  100.00"));
        assert_eq!(lines[2], "1 record(s)");
    }

    #[test]
    fn detail_lists_every_field() {
        let text = record_detail(&record());
        assert_eq!(text.lines().count(), 10);
        assert!(text.contains("DATE         15-05-2024"));
    }

    #[test]
    fn report_lines_and_total() {
        let report = Report {
            totals: vec![
                CollaboratorTotal {
                    collaborator: "ALICE".to_string(),
                    total: MoneyCents::new(12_500),
                },
                CollaboratorTotal {
                    collaborator: "BOB".to_string(),
                    total: MoneyCents::new(5_000),
                },
            ],
            grand_total: MoneyCents::new(17_500),
        };
        assert_eq!(
            super::report(&report),
            "ALICE  R$ 125.00\nBOB    R$ 50.00\nTOTAL  R$ 175.00\n"
        );
    }
}
