//! Wire types shared across documents and their translation into domain types.

use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use ward_core::{DispositionType, InpatientRequest, LocationRef, Patient, Visit};
use ward_types::PatientUuid;

use crate::{OpenmrsError, OpenmrsResult, Page};

/// Timestamp format used by the REST API, e.g. `2024-08-01T10:15:00.000+0000`.
const SERVER_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

// ============================================================================
// Decoding
// ============================================================================

/// Deserialize `value` into `T`, reporting the JSON path of the first mismatch.
pub(crate) fn decode<T: DeserializeOwned>(what: &str, value: Value) -> OpenmrsResult<T> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() || path == "." {
            "<root>"
        } else {
            path.as_str()
        };
        OpenmrsError::Translation(format!("{what} schema mismatch at {path}: {source}"))
    })
}

/// Parse JSON text into a `Value`, rejecting trailing content.
pub(crate) fn parse_value(json_text: &str) -> OpenmrsResult<Value> {
    Ok(serde_json::from_str(json_text)?)
}

#[derive(Debug, Deserialize)]
struct LinkWire {
    rel: String,
}

#[derive(Debug, Deserialize)]
struct PageWire<T> {
    results: Vec<T>,
    #[serde(default)]
    links: Vec<LinkWire>,
}

/// Decode either a bare JSON array or a `{ "results": [...], "links": [...] }` page.
pub(crate) fn decode_page<W: DeserializeOwned>(what: &str, value: Value) -> OpenmrsResult<Page<W>> {
    match value {
        Value::Array(_) => Ok(Page {
            results: decode(what, value)?,
            has_more: false,
        }),
        Value::Object(_) => {
            let page: PageWire<W> = decode(what, value)?;
            Ok(Page {
                has_more: page.links.iter().any(|l| l.rel == "next"),
                results: page.results,
            })
        }
        other => Err(OpenmrsError::InvalidInput(format!(
            "{what} must be an array or a results page, got {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Shared wire types
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LocationWire {
    pub uuid: String,
    #[serde(default)]
    pub display: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PersonWire {
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PatientWire {
    pub uuid: String,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub person: Option<PersonWire>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VisitWire {
    pub uuid: String,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub start_datetime: Option<String>,
    #[serde(default)]
    pub location: Option<LocationWire>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConceptWire {
    #[serde(default)]
    pub display: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InpatientRequestWire {
    pub patient: PatientWire,
    #[serde(default)]
    pub visit: Option<VisitWire>,
    pub disposition_type: String,
    #[serde(default)]
    pub disposition: Option<ConceptWire>,
    #[serde(default)]
    pub disposition_location: Option<LocationWire>,
}

// ============================================================================
// Translation
// ============================================================================

pub(crate) fn location_to_domain(wire: LocationWire) -> LocationRef {
    LocationRef {
        uuid: wire.uuid,
        display: wire.display,
    }
}

pub(crate) fn patient_to_domain(wire: PatientWire) -> OpenmrsResult<Patient> {
    let uuid = PatientUuid::new(&wire.uuid)
        .map_err(|_| OpenmrsError::InvalidUuid("patient uuid cannot be empty".into()))?;

    let (person_display, gender, age) = match wire.person {
        Some(p) => (p.display, p.gender, p.age),
        None => (None, None, None),
    };

    Ok(Patient {
        uuid,
        display: person_display.or(wire.display),
        gender,
        age,
    })
}

pub(crate) fn visit_to_domain(wire: VisitWire) -> OpenmrsResult<Visit> {
    if wire.uuid.trim().is_empty() {
        return Err(OpenmrsError::InvalidUuid("visit uuid cannot be empty".into()));
    }

    // A bad timestamp loses the start time, not the visit.
    let start_datetime = wire.start_datetime.as_deref().and_then(|text| {
        parse_server_datetime(text)
            .map_err(|e| {
                tracing::warn!(visit = %wire.uuid, "ignoring visit start: {e}");
            })
            .ok()
    });

    Ok(Visit {
        uuid: wire.uuid,
        display: wire.display,
        start_datetime,
        location: wire.location.map(location_to_domain),
    })
}

pub(crate) fn request_to_domain(wire: InpatientRequestWire) -> OpenmrsResult<InpatientRequest> {
    let disposition_type = wire
        .disposition_type
        .parse::<DispositionType>()
        .map_err(|e| OpenmrsError::Translation(e.to_string()))?;

    Ok(InpatientRequest {
        patient: patient_to_domain(wire.patient)?,
        visit: wire.visit.map(visit_to_domain).transpose()?,
        disposition_type,
        disposition: wire.disposition.and_then(|c| c.display),
        disposition_location: wire.disposition_location.map(location_to_domain),
    })
}

/// Parse a server timestamp, also accepting RFC 3339.
pub(crate) fn parse_server_datetime(text: &str) -> OpenmrsResult<DateTime<FixedOffset>> {
    DateTime::parse_from_str(text, SERVER_DATETIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(text))
        .map_err(|e| OpenmrsError::InvalidDatetime(format!("'{text}': {e}")))
}
