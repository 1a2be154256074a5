//! Admission-location bed layout document.
//!
//! The endpoint reports the ward as a grid of `bedLayouts`. Cells without a bed carry a null
//! `bedId`/`bedUuid` and translate to a `LayoutPosition` with no bed.

use serde::Deserialize;
use serde_json::Value;
use ward_core::{AdmissionLocation, Bed, BedLayout, BedStatus, BedType, LayoutPosition};
use ward_types::{BedUuid, NonEmptyText};

use crate::wire::{self, LocationWire, PatientWire};
use crate::{OpenmrsError, OpenmrsResult};

/// Admission-location operations.
///
/// This is a zero-sized type used for namespacing; all methods are associated functions.
pub struct AdmissionLocationDoc;

impl AdmissionLocationDoc {
    /// Parse an admission-location document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`OpenmrsError`] if the JSON is malformed, does not match the wire schema, or a
    /// bed has a blank uuid. A bed with no bed number is labelled with its id.
    pub fn parse(json_text: &str) -> OpenmrsResult<AdmissionLocation> {
        Self::from_value(wire::parse_value(json_text)?)
    }

    /// Translate an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// As for [`AdmissionLocationDoc::parse`].
    pub fn from_value(value: Value) -> OpenmrsResult<AdmissionLocation> {
        let wire: AdmissionLocationWire = wire::decode("admission location", value)?;
        wire_to_domain(wire)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdmissionLocationWire {
    ward: LocationWire,
    #[serde(default)]
    total_beds: u32,
    #[serde(default)]
    occupied_beds: u32,
    #[serde(default)]
    bed_layouts: Vec<BedLayoutWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BedLayoutWire {
    #[serde(default)]
    row_number: Option<u32>,
    #[serde(default)]
    column_number: Option<u32>,
    #[serde(default)]
    bed_number: Option<String>,
    #[serde(default)]
    bed_id: Option<u64>,
    #[serde(default)]
    bed_uuid: Option<String>,
    #[serde(default)]
    status: Option<BedStatusWire>,
    #[serde(default)]
    bed_type: Option<BedTypeWire>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    patients: Vec<PatientWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum BedStatusWire {
    Available,
    Occupied,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BedTypeWire {
    name: String,
    #[serde(default)]
    display_name: Option<String>,
}

fn wire_to_domain(wire: AdmissionLocationWire) -> OpenmrsResult<AdmissionLocation> {
    let positions = wire
        .bed_layouts
        .into_iter()
        .map(position_to_domain)
        .collect::<OpenmrsResult<Vec<_>>>()?;

    Ok(AdmissionLocation {
        ward: wire::location_to_domain(wire.ward),
        total_beds: wire.total_beds,
        occupied_beds: wire.occupied_beds,
        positions,
    })
}

fn position_to_domain(wire: BedLayoutWire) -> OpenmrsResult<LayoutPosition> {
    let bed = match (wire.bed_id, wire.bed_uuid) {
        (Some(id), Some(uuid)) => {
            let uuid = BedUuid::new(&uuid).map_err(|_| {
                OpenmrsError::InvalidUuid(format!("bed {id} has an empty uuid"))
            })?;
            let bed_number = match wire.bed_number.as_deref().map(NonEmptyText::new) {
                Some(Ok(number)) => number,
                _ => {
                    tracing::warn!(bed = %uuid, "bed has no bed number, labelling it by id");
                    NonEmptyText::new(id.to_string()).map_err(|e| {
                        OpenmrsError::InvalidInput(format!("bed {uuid}: {e}"))
                    })?
                }
            };
            let patients = wire
                .patients
                .into_iter()
                .map(wire::patient_to_domain)
                .collect::<OpenmrsResult<Vec<_>>>()?;

            // Older servers omit status; occupancy tells us.
            let status = match wire.status {
                Some(BedStatusWire::Available) => BedStatus::Available,
                Some(BedStatusWire::Occupied) => BedStatus::Occupied,
                None if patients.is_empty() => BedStatus::Available,
                None => BedStatus::Occupied,
            };

            Some(BedLayout {
                bed: Bed {
                    id,
                    uuid,
                    bed_number,
                    bed_type: wire.bed_type.map(|t| BedType {
                        name: t.name,
                        display_name: t.display_name,
                    }),
                    status,
                },
                location: wire.location,
                patients,
            })
        }
        _ => None,
    };

    Ok(LayoutPosition {
        row: wire.row_number,
        column: wire.column_number,
        bed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "ward": { "uuid": "ward-a", "display": "Inpatient Ward" },
        "totalBeds": 2,
        "occupiedBeds": 1,
        "bedLayouts": [
            {
                "rowNumber": 1, "columnNumber": 1,
                "bedNumber": "10", "bedId": 10, "bedUuid": "bed-10",
                "status": "OCCUPIED",
                "bedType": { "name": "ICU", "displayName": "ICU bed" },
                "location": "Inpatient Ward",
                "patients": [ { "uuid": "p1", "person": { "display": "Jane Doe" } } ]
            },
            { "rowNumber": 1, "columnNumber": 2, "bedNumber": null, "bedId": null, "bedUuid": null, "patients": [] },
            {
                "rowNumber": 2, "columnNumber": 1,
                "bedNumber": "2", "bedId": 2, "bedUuid": "bed-2",
                "patients": [], "bedTagMap": []
            }
        ]
    }"#;

    #[test]
    fn parses_layout_grid() {
        let location = AdmissionLocationDoc::parse(SAMPLE).expect("parse location");

        assert_eq!(location.ward.uuid, "ward-a");
        assert_eq!(location.total_beds, 2);
        assert_eq!(location.positions.len(), 3);
        assert!(location.positions[1].bed.is_none());

        let first = location.positions[0].bed.as_ref().unwrap();
        assert_eq!(first.bed.bed_number.as_str(), "10");
        assert_eq!(first.bed.status, BedStatus::Occupied);
        assert_eq!(first.bed.bed_type.as_ref().unwrap().name, "ICU");
        assert_eq!(first.patients[0].display.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn missing_status_is_inferred_from_occupancy() {
        let location = AdmissionLocationDoc::parse(SAMPLE).unwrap();
        let empty_bed = location.positions[2].bed.as_ref().unwrap();
        assert_eq!(empty_bed.bed.status, BedStatus::Available);
    }

    #[test]
    fn bed_without_number_is_labelled_by_id() {
        let json = r#"{ "ward": { "uuid": "w" },
            "bedLayouts": [
                { "bedId": 7, "bedUuid": "b7", "bedNumber": null, "patients": [ { "uuid": "p1" } ] },
                { "bedId": 8, "bedUuid": "b8", "bedNumber": " " },
                { "bedId": 9, "bedUuid": "b9", "bedNumber": "9A" }
            ] }"#;
        let location = AdmissionLocationDoc::parse(json).expect("other beds still load");

        let numbers: Vec<_> = location
            .positions
            .iter()
            .map(|p| p.bed.as_ref().unwrap().bed.bed_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["7", "8", "9A"]);
        assert_eq!(location.positions[0].bed.as_ref().unwrap().patients.len(), 1);
    }

    #[test]
    fn bed_with_blank_uuid_is_rejected() {
        let json = r#"{ "ward": { "uuid": "w" },
            "bedLayouts": [ { "bedId": 1, "bedUuid": " ", "bedNumber": "1" } ] }"#;
        let err = AdmissionLocationDoc::parse(json).expect_err("blank bed uuid");
        assert!(matches!(err, OpenmrsError::InvalidUuid(_)));
    }

    #[test]
    fn missing_ward_reports_root_path() {
        let err = AdmissionLocationDoc::parse(r#"{ "totalBeds": 1 }"#).expect_err("no ward");
        match err {
            OpenmrsError::Translation(msg) => assert!(msg.contains("ward"), "{msg}"),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_invalid_json() {
        assert!(matches!(
            AdmissionLocationDoc::parse("{ not json"),
            Err(OpenmrsError::InvalidJson(_))
        ));
    }
}
