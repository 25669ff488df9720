//! Production ledger engine.
//!
//! Records collaborator production (sales tied to a branch, a client CPF/CNPJ,
//! a product, a status and an amount) in a SQLite store, and answers filtered
//! listings, per-collaborator reports and CSV exports. All three read paths
//! share one [`FilterSpec`].

pub use backup::{backup_file_name, create_backup};
pub use branches::DEFAULT_BRANCHES;
pub use error::{EngineError, ValidationError};
pub use export::{EXPORT_HEADERS, write_csv};
pub use filter::{
    DateGranularity, Field, FilterInput, FilterSpec, Operator, Predicate, parse_date_field,
};
pub use money::MoneyCents;
pub use ops::{EditSession, Engine, EngineBuilder};
pub use production::{NewProduction, ProductionInput, ProductionRecord, RecordId, Status};
pub use report::{CollaboratorTotal, Report, aggregate_by_collaborator};
pub use sort::{SortColumn, SortDirection, SortState, sort_key, sort_records};
pub use validation::{
    DATE_INPUT_FORMAT, DATE_STORAGE_FORMAT, is_valid_amount, is_valid_date, is_valid_tax_id,
};

mod backup;
mod branches;
mod error;
mod export;
mod filter;
mod money;
mod ops;
mod production;
mod report;
mod schema;
mod sort;
pub mod validation;

pub type ResultEngine<T> = Result<T, EngineError>;
