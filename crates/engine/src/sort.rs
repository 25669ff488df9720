//! Re-ordering of already fetched rows by one column.

use std::borrow::Cow;

use crate::{ProductionRecord, validation::DATE_STORAGE_FORMAT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Branch,
    Collaborator,
    Date,
    TaxId,
    Client,
    Product,
    Status,
    Amount,
    Notes,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Last column sorted and its direction.
///
/// Sorting the same column again flips the direction; any other column starts
/// ascending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    last: Option<(SortColumn, SortDirection)>,
}

impl SortState {
    /// Records a sort request on `column` and returns the direction to use.
    pub fn toggle(&mut self, column: SortColumn) -> SortDirection {
        let direction = match self.last {
            Some((last, direction)) if last == column => direction.reversed(),
            _ => SortDirection::Ascending,
        };
        self.last = Some((column, direction));
        direction
    }

    /// Toggles `column` and sorts `rows` accordingly.
    pub fn apply(&mut self, rows: &mut [ProductionRecord], column: SortColumn) -> SortDirection {
        let direction = self.toggle(column);
        sort_records(rows, column, direction);
        direction
    }
}

/// Text a column is compared by. Dates use `YYYY-MM-DD` so text order is
/// chronological.
pub fn sort_key(record: &ProductionRecord, column: SortColumn) -> Cow<'_, str> {
    match column {
        SortColumn::Id => Cow::Owned(format!("{:010}", record.id)),
        SortColumn::Branch => Cow::Borrowed(&record.branch),
        SortColumn::Collaborator => Cow::Borrowed(&record.collaborator),
        SortColumn::Date => Cow::Owned(record.date.format(DATE_STORAGE_FORMAT).to_string()),
        SortColumn::TaxId => Cow::Borrowed(&record.tax_id),
        SortColumn::Client => Cow::Borrowed(&record.client),
        SortColumn::Product => Cow::Borrowed(&record.product),
        SortColumn::Status => Cow::Borrowed(record.status.as_str()),
        SortColumn::Amount => Cow::Borrowed(&record.amount),
        SortColumn::Notes => Cow::Borrowed(record.notes.as_deref().unwrap_or("")),
    }
}

/// Stable sort by the column's text. Descending is the exact reverse of the
/// ascending order.
pub fn sort_records(rows: &mut [ProductionRecord], column: SortColumn, direction: SortDirection) {
    rows.sort_by(|a, b| sort_key(a, column).cmp(&sort_key(b, column)));
    if direction == SortDirection::Descending {
        rows.reverse();
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::Status;

    fn record(id: i32, collaborator: &str, day: u32, amount: &str) -> ProductionRecord {
        ProductionRecord {
            id,
            branch: "PA01".to_string(),
            collaborator: collaborator.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            tax_id: "12345678901".to_string(),
            client: "ACME".to_string(),
            product: "SEGURO".to_string(),
            status: Status::Completed,
            amount: amount.to_string(),
            notes: None,
        }
    }

    fn ids(rows: &[ProductionRecord]) -> Vec<i32> {
        rows.iter().map(|r| r.id).collect()
    }

    fn sample() -> Vec<ProductionRecord> {
        vec![
            record(1, "CAROL", 3, "10.00"),
            record(2, "ALICE", 12, "5.00"),
            record(3, "BOB", 1, "7.50"),
            record(4, "ALICE", 2, "1.00"),
            record(5, "BOB", 30, "2.00"),
        ]
    }

    #[test]
    fn ascending_is_stable() {
        let mut rows = sample();
        sort_records(&mut rows, SortColumn::Collaborator, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec![2, 4, 3, 5, 1]);
    }

    #[test]
    fn dates_sort_chronologically() {
        let mut rows = sample();
        sort_records(&mut rows, SortColumn::Date, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec![3, 4, 1, 2, 5]);
    }

    #[test]
    fn second_sort_on_same_column_reverses_first() {
        for column in [
            SortColumn::Collaborator,
            SortColumn::Date,
            SortColumn::Amount,
            SortColumn::Branch,
        ] {
            let mut state = SortState::default();
            let mut rows = sample();

            assert_eq!(state.apply(&mut rows, column), SortDirection::Ascending);
            let first = ids(&rows);

            assert_eq!(state.apply(&mut rows, column), SortDirection::Descending);
            let mut expected = first.clone();
            expected.reverse();
            assert_eq!(ids(&rows), expected, "{column:?}");
        }
    }

    #[test]
    fn switching_column_restarts_ascending() {
        let mut state = SortState::default();
        assert_eq!(state.toggle(SortColumn::Date), SortDirection::Ascending);
        assert_eq!(state.toggle(SortColumn::Date), SortDirection::Descending);
        assert_eq!(state.toggle(SortColumn::Client), SortDirection::Ascending);
        assert_eq!(state.toggle(SortColumn::Date), SortDirection::Ascending);
        assert_eq!(state.toggle(SortColumn::Date), SortDirection::Descending);
        assert_eq!(state.toggle(SortColumn::Date), SortDirection::Ascending);
    }
}
