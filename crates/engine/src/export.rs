//! Spreadsheet export of production records as CSV.

use std::io;

use serde::Serialize;

use crate::{ProductionRecord, RecordId, ResultEngine};

/// Header row: the store column names, upper-cased.
pub const EXPORT_HEADERS: [&str; 10] = [
    "ID",
    "BRANCH",
    "COLLABORATOR",
    "DATE",
    "TAX_ID",
    "CLIENT",
    "PRODUCT",
    "STATUS",
    "AMOUNT",
    "NOTES",
];

#[derive(Serialize)]
struct ExportRow<'a> {
    id: RecordId,
    branch: &'a str,
    collaborator: &'a str,
    date: String,
    tax_id: &'a str,
    client: &'a str,
    product: &'a str,
    status: &'static str,
    amount: &'a str,
    notes: &'a str,
}

impl<'a> From<&'a ProductionRecord> for ExportRow<'a> {
    fn from(record: &'a ProductionRecord) -> Self {
        Self {
            id: record.id,
            branch: &record.branch,
            collaborator: &record.collaborator,
            date: record.display_date(),
            tax_id: &record.tax_id,
            client: &record.client,
            product: &record.product,
            status: record.status.as_str(),
            amount: &record.amount,
            notes: record.notes.as_deref().unwrap_or(""),
        }
    }
}

/// Writes a header row and one row per record. Returns the number of records
/// written.
pub fn write_csv<W: io::Write>(records: &[ProductionRecord], writer: W) -> ResultEngine<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(EXPORT_HEADERS)?;
    for record in records {
        csv_writer.serialize(ExportRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::Status;

    #[test]
    fn writes_header_even_without_rows() {
        let mut out = Vec::new();
        assert_eq!(write_csv(&[], &mut out).unwrap(), 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ID,BRANCH,COLLABORATOR,DATE,TAX_ID,CLIENT,PRODUCT,STATUS,AMOUNT,NOTES\n"
        );
    }

    #[test]
    fn rows_use_display_dates_and_quote_commas() {
        let record = ProductionRecord {
            id: 7,
            branch: "PA03".to_string(),
            collaborator: "ALICE".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
            tax_id: "12345678000190".to_string(),
            client: "ACME, LTDA".to_string(),
            product: "SEGURO".to_string(),
            status: Status::InProgress,
            amount: "1234.56".to_string(),
            notes: None,
        };
        let mut out = Vec::new();
        write_csv(&[record], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().nth(1),
            Some("7,PA03,ALICE,15-05-2024,12345678000190,\"ACME, LTDA\",SEGURO,IN PROGRESS,1234.56,")
        );
    }
}
