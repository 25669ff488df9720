//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when a record input is incomplete or malformed.
//! - [`InvalidDateFormat`] thrown when a filter carries an unparsable date.
//! - [`MalformedAmount`] thrown when a stored amount cannot be parsed.
//! - [`AmountOverflow`] thrown when a report total leaves the `i64` cents range.
//! - [`RecordNotFound`] thrown when an id does not match any record.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`InvalidDateFormat`]: EngineError::InvalidDateFormat
//!  [`MalformedAmount`]: EngineError::MalformedAmount
//!  [`AmountOverflow`]: EngineError::AmountOverflow
//!  [`RecordNotFound`]: EngineError::RecordNotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Reasons a record input is rejected before any write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid CPF/CNPJ: {0}")]
    InvalidTaxId(String),
    #[error("invalid date \"{0}\": use DD-MM-YYYY")]
    InvalidDate(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid status: {0}")]
    InvalidStatus(String),
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),
    #[error("Malformed amount \"{value}\" for collaborator {collaborator}")]
    MalformedAmount { collaborator: String, value: String },
    #[error("Total for collaborator {collaborator} is out of range")]
    AmountOverflow { collaborator: String },
    #[error("record {0} not found!")]
    RecordNotFound(i32),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InvalidDateFormat(a), Self::InvalidDateFormat(b)) => a == b,
            (
                Self::MalformedAmount {
                    collaborator: ca,
                    value: va,
                },
                Self::MalformedAmount {
                    collaborator: cb,
                    value: vb,
                },
            ) => ca == cb && va == vb,
            (
                Self::AmountOverflow { collaborator: a },
                Self::AmountOverflow { collaborator: b },
            ) => a == b,
            (Self::RecordNotFound(a), Self::RecordNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
