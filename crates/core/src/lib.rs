//! # Ward Core
//!
//! Core logic for the inpatient ward view.
//!
//! This crate contains pure data operations:
//! - Domain types for beds, admissions, disposition requests and the derived view models
//! - Bed/patient reconciliation (`reconcile`)
//! - Bed filtering and natural bed-number ordering
//! - Pending request filtering
//! - A pagination cursor abstraction for admissions and a memoising view session
//!
//! **No I/O**: fetching from the upstream REST API, HTTP serving and rendering belong in
//! `ward-openmrs`, `ward-api-rest` and `ward-cli`.

pub mod beds;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod pagination;
pub mod reconcile;
pub mod requests;
pub mod session;

#[cfg(test)]
mod test_support;

pub use beds::filter_beds;
pub use config::WardConfig;
pub use error::{WardError, WardResult};
pub use model::{
    AdmissionLocation, Bed, BedLayout, BedStatus, BedType, BedViewModel, DispositionType,
    InpatientAdmission, InpatientRequest, LayoutPosition, LocationRef, Patient, Visit,
    WardCensus, WardPatient, WardView,
};
pub use pagination::{AdmissionCursor, LoadState, PagedAdmissions};
pub use reconcile::{reconcile, AdmissionIndex};
pub use requests::filter_requests;
pub use session::WardSession;

pub use ward_types::{BedUuid, NonEmptyText, PatientUuid, TextError};
