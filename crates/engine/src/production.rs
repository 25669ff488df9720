//! Production records.
//!
//! A `ProductionRecord` is one sale or transaction made by a collaborator at a
//! branch, for a client identified by CPF/CNPJ.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{
    EngineError, MoneyCents, ResultEngine, ValidationError,
    validation::{self, DATE_INPUT_FORMAT, DATE_STORAGE_FORMAT},
};

/// Store-assigned record id.
pub type RecordId = i32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Completed,
    Cancelled,
}

impl Status {
    pub const ALL: [Status; 3] = [Self::InProgress, Self::Completed, Self::Cancelled];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "IN PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Status {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_uppercase().replace(['_', '-'], " ");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidStatus(value.trim().to_string()))
    }
}

/// A stored production record, always carrying its id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductionRecord {
    pub id: RecordId,
    pub branch: String,
    pub collaborator: String,
    pub date: NaiveDate,
    pub tax_id: String,
    pub client: String,
    pub product: String,
    pub status: Status,
    /// Normalized amount text, see [`MoneyCents`].
    pub amount: String,
    pub notes: Option<String>,
}

impl ProductionRecord {
    /// Date as typed and displayed (`DD-MM-YYYY`).
    pub fn display_date(&self) -> String {
        self.date.format(DATE_INPUT_FORMAT).to_string()
    }

    /// Copies the record back into raw form fields, ready to be edited.
    pub fn to_input(&self) -> ProductionInput {
        ProductionInput {
            branch: self.branch.clone(),
            collaborator: self.collaborator.clone(),
            date: self.display_date(),
            tax_id: self.tax_id.clone(),
            client: self.client.clone(),
            product: self.product.clone(),
            status: self.status.as_str().to_string(),
            amount: self.amount.clone(),
            notes: self.notes.clone().unwrap_or_default(),
        }
    }
}

/// Raw form fields, exactly as entered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductionInput {
    pub branch: String,
    pub collaborator: String,
    pub date: String,
    pub tax_id: String,
    pub client: String,
    pub product: String,
    pub status: String,
    pub amount: String,
    pub notes: String,
}

/// A validated and normalized record, ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewProduction {
    pub branch: String,
    pub collaborator: String,
    pub date: NaiveDate,
    pub tax_id: String,
    pub client: String,
    pub product: String,
    pub status: Status,
    pub amount: MoneyCents,
    pub notes: Option<String>,
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_uppercase())
}

impl ProductionInput {
    /// Checks every field and normalizes the accepted values.
    ///
    /// Required fields are checked first, in form order, then the tax id, the
    /// date and the amount. The input itself is left untouched so the caller
    /// can show it again for correction.
    pub fn validate(&self) -> Result<NewProduction, ValidationError> {
        let branch = required(&self.branch, "branch")?;
        let collaborator = required(&self.collaborator, "collaborator")?;
        let date_raw = required(&self.date, "date")?;
        let tax_id_raw = required(&self.tax_id, "tax_id")?;
        let client = required(&self.client, "client")?;
        let product = required(&self.product, "product")?;
        let status_raw = required(&self.status, "status")?;
        let amount_raw = required(&self.amount, "amount")?;

        if !validation::is_valid_tax_id(&tax_id_raw) {
            return Err(ValidationError::InvalidTaxId(tax_id_raw));
        }
        let date = validation::parse_date(&date_raw, DATE_INPUT_FORMAT)
            .ok_or(ValidationError::InvalidDate(date_raw))?;
        let amount = amount_raw.parse::<MoneyCents>()?;
        let status = Status::try_from(status_raw.as_str())?;

        let notes = Some(self.notes.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_uppercase);

        Ok(NewProduction {
            branch,
            collaborator,
            date,
            tax_id: validation::tax_id_digits(&tax_id_raw),
            client,
            product,
            status,
            amount,
            notes,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "production")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub branch: String,
    pub collaborator: String,
    pub date: String,
    pub tax_id: String,
    pub client: String,
    pub product: String,
    pub status: String,
    pub amount: String,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&NewProduction> for ActiveModel {
    fn from(record: &NewProduction) -> Self {
        Self {
            id: ActiveValue::NotSet,
            branch: ActiveValue::Set(record.branch.clone()),
            collaborator: ActiveValue::Set(record.collaborator.clone()),
            date: ActiveValue::Set(record.date.format(DATE_STORAGE_FORMAT).to_string()),
            tax_id: ActiveValue::Set(record.tax_id.clone()),
            client: ActiveValue::Set(record.client.clone()),
            product: ActiveValue::Set(record.product.clone()),
            status: ActiveValue::Set(record.status.as_str().to_string()),
            amount: ActiveValue::Set(record.amount.to_string()),
            notes: ActiveValue::Set(record.notes.clone()),
        }
    }
}

impl TryFrom<Model> for ProductionRecord {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let date = validation::parse_date(&model.date, DATE_STORAGE_FORMAT)
            .ok_or_else(|| EngineError::InvalidDateFormat(format!("stored date {}", model.date)))?;
        Ok(Self {
            id: model.id,
            branch: model.branch,
            collaborator: model.collaborator,
            date,
            tax_id: model.tax_id,
            client: model.client,
            product: model.product,
            status: Status::try_from(model.status.as_str())?,
            amount: model.amount,
            notes: model.notes,
        })
    }
}

pub(crate) fn records_from_models(models: Vec<Model>) -> ResultEngine<Vec<ProductionRecord>> {
    models.into_iter().map(ProductionRecord::try_from).collect()
}
