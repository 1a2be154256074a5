//! REST boundary support for the ward view.
//!
//! This crate provides **wire models** and **translation helpers** for the JSON documents the
//! ward view consumes:
//! - the admission-location bed layout (`AdmissionLocationDoc`)
//! - paginated inpatient admissions (`InpatientAdmissionDoc`)
//! - paginated inpatient requests (`InpatientRequestDoc`)
//!
//! Wire structs accept the server's camelCase field names and ignore fields the ward view does
//! not use. Translation validates identifiers and timestamps and produces `ward-core` types.

pub mod admission;
pub mod location;
pub mod request;
mod wire;

pub use admission::InpatientAdmissionDoc;
pub use location::AdmissionLocationDoc;
pub use request::InpatientRequestDoc;

/// Errors returned by the `ward-openmrs` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum OpenmrsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("invalid datetime: {0}")]
    InvalidDatetime(String),
}

/// Type alias for Results that can fail with an [`OpenmrsError`].
pub type OpenmrsResult<T> = Result<T, OpenmrsError>;

/// One page of a paginated collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub results: Vec<T>,
    /// True when the server advertised a `next` link.
    pub has_more: bool,
}
