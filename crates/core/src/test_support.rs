//! Fixture builders shared by the unit tests in this crate.

use ward_types::{BedUuid, NonEmptyText, PatientUuid};

use crate::model::{
    Bed, BedLayout, BedStatus, DispositionType, InpatientAdmission, InpatientRequest,
    LocationRef, Patient, Visit,
};

pub(crate) fn pid(uuid: &str) -> PatientUuid {
    PatientUuid::new(uuid).expect("fixture patient uuid")
}

pub(crate) fn patient(uuid: &str) -> Patient {
    Patient {
        uuid: pid(uuid),
        display: Some(format!("Patient {uuid}")),
        gender: None,
        age: None,
    }
}

pub(crate) fn visit(uuid: &str) -> Visit {
    Visit {
        uuid: uuid.to_string(),
        display: None,
        start_datetime: None,
        location: None,
    }
}

pub(crate) fn ward_location() -> LocationRef {
    LocationRef {
        uuid: "ward-a".into(),
        display: Some("Ward A".into()),
    }
}

pub(crate) fn admission(patient_uuid: &str, visit_uuid: Option<&str>) -> InpatientAdmission {
    InpatientAdmission {
        patient: patient(patient_uuid),
        visit: visit_uuid.map(visit),
        current_inpatient_request: None,
    }
}

pub(crate) fn request(
    patient_uuid: &str,
    disposition_type: DispositionType,
    location: Option<LocationRef>,
) -> InpatientRequest {
    InpatientRequest {
        patient: patient(patient_uuid),
        visit: None,
        disposition_type,
        disposition: None,
        disposition_location: location,
    }
}

pub(crate) fn admission_with_request(
    patient_uuid: &str,
    disposition_type: DispositionType,
) -> InpatientAdmission {
    InpatientAdmission {
        current_inpatient_request: Some(request(
            patient_uuid,
            disposition_type,
            Some(ward_location()),
        )),
        ..admission(patient_uuid, Some(&format!("v-{patient_uuid}")))
    }
}

pub(crate) fn bed_layout(id: u64, bed_number: &str, occupants: &[&str]) -> BedLayout {
    BedLayout {
        bed: Bed {
            id,
            uuid: BedUuid::new(format!("bed-{id}")).expect("fixture bed uuid"),
            bed_number: NonEmptyText::new(bed_number).expect("fixture bed number"),
            bed_type: None,
            status: if occupants.is_empty() {
                BedStatus::Available
            } else {
                BedStatus::Occupied
            },
        },
        location: Some("Ward A".into()),
        patients: occupants.iter().map(|uuid| patient(uuid)).collect(),
    }
}
