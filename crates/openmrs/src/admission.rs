//! Inpatient admission documents.

use serde::Deserialize;
use serde_json::Value;
use ward_core::InpatientAdmission;

use crate::wire::{self, InpatientRequestWire, PatientWire, VisitWire};
use crate::{OpenmrsResult, Page};

/// Inpatient admission operations.
pub struct InpatientAdmissionDoc;

impl InpatientAdmissionDoc {
    /// Parse a page of admissions from JSON text.
    ///
    /// Accepts either a `{ "results": [...], "links": [...] }` page or a bare array. A bare array
    /// is treated as a complete, final page.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OpenmrsError`] if the JSON is malformed or any admission fails to
    /// translate.
    pub fn parse(json_text: &str) -> OpenmrsResult<Page<InpatientAdmission>> {
        Self::from_value(wire::parse_value(json_text)?)
    }

    /// Translate an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// As for [`InpatientAdmissionDoc::parse`].
    pub fn from_value(value: Value) -> OpenmrsResult<Page<InpatientAdmission>> {
        let page = wire::decode_page::<InpatientAdmissionWire>("inpatient admissions", value)?;
        let results = page
            .results
            .into_iter()
            .map(wire_to_domain)
            .collect::<OpenmrsResult<Vec<_>>>()?;

        Ok(Page {
            results,
            has_more: page.has_more,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InpatientAdmissionWire {
    patient: PatientWire,
    #[serde(default)]
    visit: Option<VisitWire>,
    #[serde(default)]
    current_inpatient_request: Option<InpatientRequestWire>,
}

fn wire_to_domain(wire: InpatientAdmissionWire) -> OpenmrsResult<InpatientAdmission> {
    Ok(InpatientAdmission {
        patient: wire::patient_to_domain(wire.patient)?,
        visit: wire.visit.map(wire::visit_to_domain).transpose()?,
        current_inpatient_request: wire
            .current_inpatient_request
            .map(wire::request_to_domain)
            .transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpenmrsError;
    use ward_core::DispositionType;

    #[test]
    fn parses_page_with_next_link() {
        let json = r#"{
            "results": [
                {
                    "patient": { "uuid": "p1", "display": "Jane" },
                    "visit": { "uuid": "v1", "startDatetime": "2024-08-01T10:15:30.000+0000" },
                    "currentInpatientRequest": null,
                    "encounterAssigningToCurrentInpatientLocation": { "uuid": "e1" }
                },
                {
                    "patient": { "uuid": "p2" },
                    "visit": null,
                    "currentInpatientRequest": {
                        "patient": { "uuid": "p2" },
                        "dispositionType": "TRANSFER",
                        "disposition": { "display": "Transfer within hospital" },
                        "dispositionLocation": { "uuid": "ward-b" }
                    }
                }
            ],
            "links": [ { "rel": "next", "uri": "/ws/rest/v1/emrapi/inpatient/admission?startIndex=2" } ],
            "totalCount": 5
        }"#;

        let page = InpatientAdmissionDoc::parse(json).expect("parse admissions");
        assert!(page.has_more);
        assert_eq!(page.results.len(), 2);

        let first = &page.results[0];
        assert_eq!(first.patient_uuid().as_str(), "p1");
        assert!(first.visit.as_ref().unwrap().start_datetime.is_some());

        let request = page.results[1].current_inpatient_request.as_ref().unwrap();
        assert_eq!(request.disposition_type, DispositionType::Transfer);
        assert_eq!(request.disposition.as_deref(), Some("Transfer within hospital"));
    }

    #[test]
    fn unparseable_start_time_keeps_the_page() {
        let json = r#"[
            { "patient": { "uuid": "p1" }, "visit": { "uuid": "v1", "startDatetime": "not a date" } },
            { "patient": { "uuid": "p2" }, "visit": { "uuid": "v2", "startDatetime": "2024-08-01T10:15:30.000+0000" } }
        ]"#;
        let page = InpatientAdmissionDoc::parse(json).expect("page still loads");

        assert_eq!(page.results.len(), 2);
        let first = page.results[0].visit.as_ref().unwrap();
        assert_eq!(first.uuid, "v1");
        assert!(first.start_datetime.is_none());
        assert!(page.results[1].visit.as_ref().unwrap().start_datetime.is_some());
    }

    #[test]
    fn bare_array_is_final_page() {
        let page = InpatientAdmissionDoc::parse(r#"[ { "patient": { "uuid": "p1" } } ]"#).unwrap();
        assert!(!page.has_more);
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn unknown_disposition_type_fails_translation() {
        let json = r#"[ {
            "patient": { "uuid": "p1" },
            "currentInpatientRequest": { "patient": { "uuid": "p1" }, "dispositionType": "BOARD" }
        } ]"#;
        assert!(matches!(
            InpatientAdmissionDoc::parse(json),
            Err(OpenmrsError::Translation(_))
        ));
    }

    #[test]
    fn missing_patient_reports_index_path() {
        let err = InpatientAdmissionDoc::parse(r#"[ { "patient": { "uuid": "p1" } }, { "visit": null } ]"#)
            .expect_err("second admission lacks patient");
        match err {
            OpenmrsError::Translation(msg) => assert!(msg.contains("[1]"), "{msg}"),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }
}
