//! Preparing bed layouts for reconciliation.
//!
//! The admission-location endpoint reports the ward as a grid. Grid cells without a bed are
//! dropped here and the remaining beds are put in bed-number order.

use std::cmp::Ordering;

use crate::model::{AdmissionLocation, BedLayout};

/// Real beds of `location`, ordered by bed number.
///
/// Bed numbers compare with numeric awareness, so `"2"` sorts before `"10"` and `"A2"` before
/// `"A10"`. The sort is stable, so beds with equal numbers keep their grid order.
pub fn filter_beds(location: &AdmissionLocation) -> Vec<BedLayout> {
    let mut beds: Vec<BedLayout> = location
        .positions
        .iter()
        .filter_map(|position| position.bed.clone())
        .collect();

    beds.sort_by(|a, b| natural_cmp(a.bed.bed_number.as_str(), b.bed.bed_number.as_str()));
    beds
}

/// Compare two strings, treating runs of ASCII digits as numbers.
///
/// Letters compare case-insensitively. Case only breaks ties between otherwise equal labels.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    folded_cmp(a, b).then_with(|| a.cmp(b))
}

fn folded_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ord = cmp_digit_runs(&l_run, &r_run);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

// Runs can exceed any integer width, so compare by significant length then lexically.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a_sig = a.trim_start_matches('0');
    let b_sig = b.trim_start_matches('0');
    a_sig
        .len()
        .cmp(&b_sig.len())
        .then_with(|| a_sig.cmp(b_sig))
        .then_with(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LayoutPosition;
    use crate::test_support::{bed_layout, ward_location};

    fn position(row: u32, column: u32, bed: Option<BedLayout>) -> LayoutPosition {
        LayoutPosition {
            row: Some(row),
            column: Some(column),
            bed,
        }
    }

    #[test]
    fn drops_positions_without_beds_and_sorts_numerically() {
        let location = AdmissionLocation {
            ward: ward_location(),
            total_beds: 3,
            occupied_beds: 1,
            positions: vec![
                position(1, 1, Some(bed_layout(10, "10", &[]))),
                position(1, 2, None),
                position(2, 1, Some(bed_layout(2, "2", &["p1"]))),
                position(2, 2, Some(bed_layout(1, "1", &[]))),
            ],
        };

        let numbers: Vec<_> = filter_beds(&location)
            .iter()
            .map(|b| b.bed.bed_number.as_str().to_string())
            .collect();
        assert_eq!(numbers, vec!["1", "2", "10"]);
    }

    #[test]
    fn empty_grid_yields_no_beds() {
        let location = AdmissionLocation {
            ward: ward_location(),
            total_beds: 0,
            occupied_beds: 0,
            positions: vec![position(1, 1, None)],
        };
        assert!(filter_beds(&location).is_empty());
    }

    #[test]
    fn natural_cmp_orders_mixed_labels() {
        let mut labels = vec!["A10", "a2", "B1", "A1", "10", "9"];
        labels.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(labels, vec!["9", "10", "A1", "a2", "A10", "B1"]);
    }

    #[test]
    fn natural_cmp_handles_leading_zeros_and_long_runs() {
        assert_eq!(natural_cmp("007", "7"), Ordering::Greater);
        assert_eq!(natural_cmp("08", "10"), Ordering::Less);
        assert_eq!(
            natural_cmp("99999999999999999999999", "100000000000000000000000"),
            Ordering::Less
        );
    }
}
