use std::{io, path::Path};

use chrono::NaiveDate;
use sea_orm::{
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::*,
    sea_query::{LikeExpr, SimpleExpr},
};

use crate::{
    Field, FilterSpec, Operator, Predicate, ProductionRecord, Report, ResultEngine,
    production::{self, records_from_models},
    report::aggregate_by_collaborator,
    validation::DATE_STORAGE_FORMAT,
    write_csv,
};

use super::{Engine, with_tx};

const LIKE_ESCAPE: char = '\\';

fn column(field: Field) -> production::Column {
    match field {
        Field::Branch => production::Column::Branch,
        Field::Collaborator => production::Column::Collaborator,
        Field::Client => production::Column::Client,
        Field::Product => production::Column::Product,
        Field::Date => production::Column::Date,
    }
}

fn stored_date(date: &NaiveDate) -> String {
    date.format(DATE_STORAGE_FORMAT).to_string()
}

/// Escapes `LIKE` wildcards so user text is matched literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Turns one predicate into a bound-parameter condition.
fn condition(predicate: &Predicate) -> SimpleExpr {
    let column = column(predicate.field);
    match &predicate.operator {
        Operator::Equals(value) => column.eq(value.as_str()),
        Operator::Contains(value) => column
            .like(LikeExpr::new(format!("%{}%", escape_like(value))).escape(LIKE_ESCAPE)),
        Operator::Within { first, last, .. } if first == last => column.eq(stored_date(first)),
        Operator::Within { first, last, .. } | Operator::Between(first, last) => {
            column.between(stored_date(first), stored_date(last))
        }
    }
}

trait ApplyProductionFilter: QueryFilter + Sized {
    fn apply_production_filter(self, spec: &FilterSpec) -> Self;
}

impl<T> ApplyProductionFilter for T
where
    T: QueryFilter + Sized,
{
    fn apply_production_filter(mut self, spec: &FilterSpec) -> Self {
        for predicate in spec.predicates() {
            self = self.filter(condition(predicate));
        }
        self
    }
}

impl Engine {
    /// Lists the records matching `spec`, in insertion order.
    pub async fn list_records(&self, spec: &FilterSpec) -> ResultEngine<Vec<ProductionRecord>> {
        with_tx!(self, |db_tx| {
            let models = production::Entity::find()
                .apply_production_filter(spec)
                .order_by_asc(production::Column::Id)
                .all(&db_tx)
                .await?;
            tracing::debug!(
                predicates = spec.predicates().len(),
                rows = models.len(),
                "listed production records"
            );
            records_from_models(models)
        })
    }

    /// Fetches `(collaborator, amount)` pairs of the records matching `spec`.
    pub async fn report_rows(&self, spec: &FilterSpec) -> ResultEngine<Vec<(String, String)>> {
        with_tx!(self, |db_tx| {
            let rows: Vec<(String, String)> = production::Entity::find()
                .select_only()
                .column(production::Column::Collaborator)
                .column(production::Column::Amount)
                .apply_production_filter(spec)
                .order_by_asc(production::Column::Id)
                .into_tuple()
                .all(&db_tx)
                .await?;
            Ok(rows)
        })
    }

    /// Totals the amounts of the records matching `spec` per collaborator.
    pub async fn report(&self, spec: &FilterSpec) -> ResultEngine<Report> {
        let rows = self.report_rows(spec).await?;
        aggregate_by_collaborator(rows)
    }

    /// Writes the records matching `spec` as CSV. Returns the number of rows.
    pub async fn export_records<W: io::Write>(
        &self,
        spec: &FilterSpec,
        writer: W,
    ) -> ResultEngine<usize> {
        let records = self.list_records(spec).await?;
        write_csv(&records, writer)
    }

    /// Writes the records matching `spec` as CSV into a new file at `path`.
    pub async fn export_to_path(&self, spec: &FilterSpec, path: &Path) -> ResultEngine<usize> {
        let records = self.list_records(spec).await?;
        let file = std::fs::File::create(path)?;
        let written = write_csv(&records, io::BufWriter::new(file))?;
        tracing::info!(path = %path.display(), rows = written, "production records exported");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_OFF"), "50\\%\\_OFF");
        assert_eq!(escape_like("A\\B"), "A\\\\B");
        assert_eq!(escape_like("ALICE"), "ALICE");
    }
}
