//! Filter specification shared by listing, reporting and export.
//!
//! A [`FilterInput`] holds the raw strings typed in the filter form. Parsing
//! it yields a [`FilterSpec`]: an ordered list of [`Predicate`]s that are
//! AND-combined when applied to the store. An empty spec matches every record.

use chrono::{Datelike, NaiveDate};

use crate::{
    EngineError, ResultEngine,
    validation::{DATE_INPUT_FORMAT, DATE_STORAGE_FORMAT, parse_date},
};

/// Raw filter fields. Absent, empty and whitespace-only values are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterInput {
    pub branch: Option<String>,
    pub collaborator: Option<String>,
    pub client: Option<String>,
    pub product: Option<String>,
    /// A year, a month or a single day, see [`DateGranularity`].
    pub date: Option<String>,
    /// Inclusive range start, `DD-MM-YYYY`.
    pub from: Option<String>,
    /// Inclusive range end, `DD-MM-YYYY`.
    pub to: Option<String>,
}

/// Record fields a predicate can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Branch,
    Collaborator,
    Client,
    Product,
    Date,
}

/// How much of a date the date field pinned down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateGranularity {
    Year,
    Month,
    Day,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    /// Exact match on the upper-cased value.
    Equals(String),
    /// Case-insensitive substring match.
    Contains(String),
    /// Date inside the year, month or day given in the date field.
    Within {
        granularity: DateGranularity,
        first: NaiveDate,
        last: NaiveDate,
    },
    /// Inclusive range from the two range fields.
    Between(NaiveDate, NaiveDate),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate {
    pub field: Field,
    pub operator: Operator,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSpec {
    predicates: Vec<Predicate>,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

/// Whether the first or last `-` separated part is a four-digit year.
fn has_full_year(raw: &str) -> bool {
    let is_year = |part: &str| {
        part.len() == 4 && part.bytes().all(|b| b.is_ascii_digit()) && !part.starts_with('0')
    };
    raw.split('-').next().is_some_and(is_year) || raw.rsplit('-').next().is_some_and(is_year)
}

/// Reads the date field, most specific pattern first.
///
/// Accepted forms: `DD-MM-YYYY` or `YYYY-MM-DD` (day), `MM-YYYY` or `YYYY-MM`
/// (month), `YYYY` (year). The year is always written with four digits.
pub fn parse_date_field(raw: &str) -> Option<Operator> {
    let raw = raw.trim();
    if !has_full_year(raw) {
        return None;
    }

    let day = parse_date(raw, DATE_INPUT_FORMAT).or_else(|| parse_date(raw, DATE_STORAGE_FORMAT));
    if let Some(day) = day {
        return Some(Operator::Within {
            granularity: DateGranularity::Day,
            first: day,
            last: day,
        });
    }

    let month_start = parse_date(&format!("01-{raw}"), DATE_INPUT_FORMAT)
        .or_else(|| parse_date(&format!("{raw}-01"), DATE_STORAGE_FORMAT));
    if let Some(start) = month_start {
        let (first, last) = month_bounds(start.year(), start.month())?;
        return Some(Operator::Within {
            granularity: DateGranularity::Month,
            first,
            last,
        });
    }

    if !raw.contains('-') {
        let year: i32 = raw.parse().ok()?;
        return Some(Operator::Within {
            granularity: DateGranularity::Year,
            first: NaiveDate::from_ymd_opt(year, 1, 1)?,
            last: NaiveDate::from_ymd_opt(year, 12, 31)?,
        });
    }

    None
}

impl FilterSpec {
    /// A spec with no predicates, matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds the predicate list from raw filter fields.
    ///
    /// Fails with [`EngineError::InvalidDateFormat`] when the date field or a
    /// range bound cannot be read. Nothing is queried in that case. A reversed
    /// range is kept as is and matches no record.
    pub fn parse(input: &FilterInput) -> ResultEngine<Self> {
        let mut spec = Self::default();

        if let Some(branch) = present(input.branch.as_ref()) {
            spec = spec.with(Field::Branch, Operator::Equals(branch.to_uppercase()));
        }
        for (field, value) in [
            (Field::Collaborator, &input.collaborator),
            (Field::Client, &input.client),
            (Field::Product, &input.product),
        ] {
            if let Some(value) = present(value.as_ref()) {
                spec = spec.with(field, Operator::Contains(value.to_uppercase()));
            }
        }

        if let Some(raw) = present(input.date.as_ref()) {
            let operator = parse_date_field(raw).ok_or_else(|| {
                EngineError::InvalidDateFormat(format!(
                    "\"{raw}\": use YYYY, MM-YYYY, YYYY-MM, DD-MM-YYYY or YYYY-MM-DD"
                ))
            })?;
            spec = spec.with(Field::Date, operator);
        }

        match (present(input.from.as_ref()), present(input.to.as_ref())) {
            (Some(from), Some(to)) => {
                let bound = |raw: &str| {
                    parse_date(raw, DATE_INPUT_FORMAT).ok_or_else(|| {
                        EngineError::InvalidDateFormat(format!("\"{raw}\": use DD-MM-YYYY"))
                    })
                };
                let start = bound(from)?;
                let end = bound(to)?;
                if start > end {
                    tracing::warn!(%from, %to, "date range starts after it ends, nothing matches");
                }
                spec = spec.with(Field::Date, Operator::Between(start, end));
            }
            (Some(_), None) | (None, Some(_)) => {
                tracing::debug!("date range needs both bounds, ignoring the one given");
            }
            (None, None) => {}
        }

        Ok(spec)
    }

    /// Appends a predicate.
    pub fn with(mut self, field: Field, operator: Operator) -> Self {
        self.predicates.push(Predicate { field, operator });
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}
