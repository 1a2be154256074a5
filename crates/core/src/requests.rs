//! Pending disposition requests for a ward.

use crate::model::{DispositionType, InpatientRequest};

/// Requests targeting `ward_location_uuid` whose disposition type is one of `disposition_types`.
///
/// Requests without a disposition location never match. Input order is preserved.
pub fn filter_requests<'a>(
    requests: &'a [InpatientRequest],
    ward_location_uuid: &str,
    disposition_types: &[DispositionType],
) -> Vec<&'a InpatientRequest> {
    requests
        .iter()
        .filter(|r| disposition_types.contains(&r.disposition_type))
        .filter(|r| {
            r.disposition_location
                .as_ref()
                .is_some_and(|loc| loc.uuid == ward_location_uuid)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LocationRef;
    use crate::test_support::{request, ward_location};

    #[test]
    fn keeps_matching_types_at_ward_in_order() {
        let elsewhere = LocationRef {
            uuid: "ward-b".into(),
            display: None,
        };
        let requests = vec![
            request("p1", DispositionType::Transfer, Some(ward_location())),
            request("p2", DispositionType::Discharge, Some(ward_location())),
            request("p3", DispositionType::Admit, Some(elsewhere)),
            request("p4", DispositionType::Admit, None),
            request("p5", DispositionType::Admit, Some(ward_location())),
        ];

        let kept: Vec<_> = filter_requests(
            &requests,
            "ward-a",
            &[DispositionType::Admit, DispositionType::Transfer],
        )
        .into_iter()
        .map(|r| r.patient.uuid.as_str())
        .collect();

        assert_eq!(kept, vec!["p1", "p5"]);
    }

    #[test]
    fn discharge_only_filter() {
        let requests = vec![
            request("p1", DispositionType::Admit, Some(ward_location())),
            request("p2", DispositionType::Discharge, Some(ward_location())),
        ];
        let kept = filter_requests(&requests, "ward-a", &[DispositionType::Discharge]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].patient.uuid.as_str(), "p2");
    }
}
