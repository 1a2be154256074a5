//! Domain types for the ward view.
//!
//! Input types (`BedLayout`, `InpatientAdmission`, ...) are produced by the boundary crate from
//! REST payloads. Output types (`WardPatient`, `BedViewModel`, `WardView`) are what the rendering
//! layer consumes, so they serialise with camelCase field names.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use ward_types::{BedUuid, NonEmptyText, PatientUuid};

use crate::WardError;

// ============================================================================
// Clinical references
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub uuid: PatientUuid,
    pub display: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
}

impl Patient {
    /// A patient known only by identifier.
    pub fn from_uuid(uuid: PatientUuid) -> Self {
        Self {
            uuid,
            display: None,
            gender: None,
            age: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRef {
    pub uuid: String,
    pub display: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub uuid: String,
    pub display: Option<String>,
    pub start_datetime: Option<DateTime<FixedOffset>>,
    pub location: Option<LocationRef>,
}

/// The kind of movement a disposition request asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DispositionType {
    Admit,
    Transfer,
    Discharge,
}

impl DispositionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispositionType::Admit => "ADMIT",
            DispositionType::Transfer => "TRANSFER",
            DispositionType::Discharge => "DISCHARGE",
        }
    }
}

impl fmt::Display for DispositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DispositionType {
    type Err = WardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIT" => Ok(DispositionType::Admit),
            "TRANSFER" => Ok(DispositionType::Transfer),
            "DISCHARGE" => Ok(DispositionType::Discharge),
            other => Err(WardError::InvalidInput(format!(
                "unknown disposition type: '{other}'"
            ))),
        }
    }
}

/// A pending admit/transfer/discharge request attached to a patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InpatientRequest {
    pub patient: Patient,
    pub visit: Option<Visit>,
    pub disposition_type: DispositionType,
    pub disposition: Option<String>,
    pub disposition_location: Option<LocationRef>,
}

/// A patient's active inpatient record at the ward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InpatientAdmission {
    pub patient: Patient,
    pub visit: Option<Visit>,
    pub current_inpatient_request: Option<InpatientRequest>,
}

impl InpatientAdmission {
    pub fn patient_uuid(&self) -> &PatientUuid {
        &self.patient.uuid
    }
}

// ============================================================================
// Beds
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BedStatus {
    Available,
    Occupied,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedType {
    pub name: String,
    pub display_name: Option<String>,
}

/// Bed identity as attached to a `WardPatient`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    pub id: u64,
    pub uuid: BedUuid,
    pub bed_number: NonEmptyText,
    pub bed_type: Option<BedType>,
    pub status: BedStatus,
}

/// A real bed in the ward layout together with the patients occupying it.
///
/// `patients` keeps the occupancy order reported by the location endpoint. A shared bed can hold
/// more than one patient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BedLayout {
    pub bed: Bed,
    pub location: Option<String>,
    pub patients: Vec<Patient>,
}

impl BedLayout {
    pub fn to_bed(&self) -> Bed {
        self.bed.clone()
    }
}

/// One cell of the ward grid. Cells without a bed are layout filler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutPosition {
    pub row: Option<u32>,
    pub column: Option<u32>,
    pub bed: Option<BedLayout>,
}

/// The bed-layout tree for one admission location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdmissionLocation {
    pub ward: LocationRef,
    pub total_beds: u32,
    pub occupied_beds: u32,
    pub positions: Vec<LayoutPosition>,
}

// ============================================================================
// View models
// ============================================================================

/// The unit the rendering layer draws as a patient card.
///
/// `bed` is `None` for unassigned patients. `inpatient_admission` is `None` for degraded entries:
/// occupants the admissions snapshot does not (yet) contain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WardPatient {
    pub patient: Patient,
    pub visit: Option<Visit>,
    pub bed: Option<Bed>,
    pub inpatient_admission: Option<InpatientAdmission>,
    pub inpatient_request: Option<InpatientRequest>,
}

impl WardPatient {
    pub fn patient_uuid(&self) -> &PatientUuid {
        &self.patient.uuid
    }

    pub fn is_assigned(&self) -> bool {
        self.bed.is_some()
    }

    pub fn is_degraded(&self) -> bool {
        self.inpatient_admission.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedViewModel {
    pub bed: Bed,
    pub ward_patients: Vec<WardPatient>,
}

/// Counts shown in the ward header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WardCensus {
    pub beds: usize,
    pub occupied_beds: usize,
    pub empty_beds: usize,
    pub assigned_patients: usize,
    pub unassigned_patients: usize,
    pub degraded_patients: usize,
}

/// Output of one reconciliation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WardView {
    pub beds: Vec<BedViewModel>,
    /// Every patient placed in some bed during this pass.
    pub seated: BTreeSet<PatientUuid>,
    pub unassigned: Vec<WardPatient>,
}

impl WardView {
    /// Bed occupants missing from the admissions snapshot, in bed order.
    pub fn degraded(&self) -> impl Iterator<Item = &WardPatient> {
        self.beds
            .iter()
            .flat_map(|b| b.ward_patients.iter())
            .filter(|wp| wp.is_degraded())
    }

    /// Every patient in output order: bed occupants first, then unassigned.
    pub fn all_patients(&self) -> impl Iterator<Item = &WardPatient> {
        self.beds
            .iter()
            .flat_map(|b| b.ward_patients.iter())
            .chain(self.unassigned.iter())
    }

    pub fn census(&self) -> WardCensus {
        let occupied_beds = self
            .beds
            .iter()
            .filter(|b| !b.ward_patients.is_empty())
            .count();
        let assigned_patients = self.beds.iter().map(|b| b.ward_patients.len()).sum();

        WardCensus {
            beds: self.beds.len(),
            occupied_beds,
            empty_beds: self.beds.len() - occupied_beds,
            assigned_patients,
            unassigned_patients: self.unassigned.len(),
            degraded_patients: self.degraded().count(),
        }
    }
}
