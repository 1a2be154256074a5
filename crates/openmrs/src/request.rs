//! Inpatient request documents.

use serde_json::Value;
use ward_core::InpatientRequest;

use crate::wire::{self, InpatientRequestWire};
use crate::{OpenmrsResult, Page};

/// Inpatient request operations.
pub struct InpatientRequestDoc;

impl InpatientRequestDoc {
    /// Parse a page of inpatient requests from JSON text (page object or bare array).
    ///
    /// # Errors
    ///
    /// Returns [`crate::OpenmrsError`] if the JSON is malformed or a request fails to translate.
    pub fn parse(json_text: &str) -> OpenmrsResult<Page<InpatientRequest>> {
        Self::from_value(wire::parse_value(json_text)?)
    }

    /// Translate an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// As for [`InpatientRequestDoc::parse`].
    pub fn from_value(value: Value) -> OpenmrsResult<Page<InpatientRequest>> {
        let page = wire::decode_page::<InpatientRequestWire>("inpatient requests", value)?;
        let results = page
            .results
            .into_iter()
            .map(wire::request_to_domain)
            .collect::<OpenmrsResult<Vec<_>>>()?;

        Ok(Page {
            results,
            has_more: page.has_more,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_core::DispositionType;

    #[test]
    fn parses_requests_page() {
        let json = r#"{
            "results": [
                {
                    "patient": { "uuid": "p1" },
                    "visit": { "uuid": "v1" },
                    "dispositionType": "ADMIT",
                    "dispositionLocation": { "uuid": "ward-a", "display": "Ward A" },
                    "dispositionEncounter": { "uuid": "e1" }
                }
            ]
        }"#;

        let page = InpatientRequestDoc::parse(json).expect("parse requests");
        assert!(!page.has_more);

        let request = &page.results[0];
        assert_eq!(request.disposition_type, DispositionType::Admit);
        assert_eq!(request.disposition_location.as_ref().unwrap().uuid, "ward-a");
        assert_eq!(request.visit.as_ref().unwrap().uuid, "v1");
    }
}
