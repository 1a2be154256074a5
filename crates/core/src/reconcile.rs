//! Bed/patient reconciliation.
//!
//! Merges the bed layout of a ward (which beds exist and who occupies them) with the inpatient
//! admissions snapshot (who is admitted, with which visit and pending request) into the per-bed
//! view models the ward view renders, plus the admitted patients who have no bed.
//!
//! The two inputs are fetched independently and can disagree, most often while admissions are
//! still paginating. Disagreement is never an error:
//! - an occupant without an admission becomes a degraded `WardPatient` (no visit, no admission),
//! - an admission whose patient is in no bed becomes an unassigned `WardPatient`.
//!
//! Reconciliation is a pure function of its inputs. The admission index is rebuilt on every call.

use std::collections::{BTreeSet, HashMap, HashSet};

use ward_types::PatientUuid;

use crate::model::{BedLayout, BedViewModel, InpatientAdmission, WardPatient, WardView};

/// Lookup from patient uuid to that patient's admission.
///
/// Built fresh from one admissions snapshot and never mutated afterwards.
#[derive(Debug, Default)]
pub struct AdmissionIndex<'a> {
    by_patient: HashMap<&'a PatientUuid, &'a InpatientAdmission>,
}

impl<'a> AdmissionIndex<'a> {
    /// Index `admissions` by patient uuid.
    ///
    /// When a patient appears more than once the later entry wins.
    pub fn build(admissions: &'a [InpatientAdmission]) -> Self {
        let mut by_patient = HashMap::with_capacity(admissions.len());
        for admission in admissions {
            if by_patient
                .insert(admission.patient_uuid(), admission)
                .is_some()
            {
                tracing::debug!(
                    patient = %admission.patient_uuid(),
                    "duplicate inpatient admission, keeping the later entry"
                );
            }
        }
        Self { by_patient }
    }

    pub fn get(&self, patient: &PatientUuid) -> Option<&'a InpatientAdmission> {
        self.by_patient.get(patient).copied()
    }

    pub fn len(&self) -> usize {
        self.by_patient.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_patient.is_empty()
    }
}

/// Reconcile bed layouts against admissions.
///
/// Output ordering follows input ordering: beds in `bed_layouts` order, occupants in per-bed
/// order, unassigned patients in `admissions` order.
///
/// A patient listed in several beds is placed in the first one only. A patient admitted more
/// than once is listed at most once as unassigned, at its first position, carrying the indexed
/// (last) admission.
pub fn reconcile(bed_layouts: &[BedLayout], admissions: &[InpatientAdmission]) -> WardView {
    let index = AdmissionIndex::build(admissions);

    let mut seated: BTreeSet<PatientUuid> = BTreeSet::new();
    let mut beds = Vec::with_capacity(bed_layouts.len());

    for layout in bed_layouts {
        let bed = layout.to_bed();
        let mut ward_patients = Vec::with_capacity(layout.patients.len());

        for occupant in &layout.patients {
            if !seated.insert(occupant.uuid.clone()) {
                tracing::warn!(
                    patient = %occupant.uuid,
                    bed = %bed.bed_number,
                    "patient already placed in an earlier bed, skipping"
                );
                continue;
            }

            let ward_patient = match index.get(&occupant.uuid) {
                Some(admission) => WardPatient {
                    patient: admission.patient.clone(),
                    visit: admission.visit.clone(),
                    bed: Some(bed.clone()),
                    inpatient_admission: Some(admission.clone()),
                    inpatient_request: admission.current_inpatient_request.clone(),
                },
                None => {
                    tracing::debug!(
                        patient = %occupant.uuid,
                        bed = %bed.bed_number,
                        "bed occupant has no inpatient admission yet"
                    );
                    WardPatient {
                        patient: occupant.clone(),
                        visit: None,
                        bed: Some(bed.clone()),
                        inpatient_admission: None,
                        inpatient_request: None,
                    }
                }
            };
            ward_patients.push(ward_patient);
        }

        beds.push(BedViewModel { bed, ward_patients });
    }

    let mut listed: HashSet<&PatientUuid> = HashSet::new();
    let mut unassigned = Vec::new();
    for admission in admissions {
        let patient = admission.patient_uuid();
        if seated.contains(patient) || !listed.insert(patient) {
            continue;
        }
        if let Some(indexed) = index.get(patient) {
            unassigned.push(WardPatient {
                patient: indexed.patient.clone(),
                visit: indexed.visit.clone(),
                bed: None,
                inpatient_admission: Some(indexed.clone()),
                inpatient_request: None,
            });
        }
    }

    WardView {
        beds,
        seated,
        unassigned,
    }
}
