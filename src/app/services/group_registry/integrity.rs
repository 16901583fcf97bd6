//! Position-index integrity checking
//!
//! A station's attached series carry position indices that control display
//! sequence. The indices of one station must be exactly {1, 2, ..., N}: no
//! duplicates, no gaps, numbering starting at 1. Any configuration load that
//! would break this aborts with an integrity violation; there is no silent
//! correction. Station orders within a group must be unique but are not
//! required to be contiguous.

use crate::app::models::{SynopticGroup, SynopticGroupStation};
use crate::{Error, Result};
use std::collections::HashSet;

/// Verify that position indices form the exact sequence 1..N
///
/// The input order is irrelevant; only the set of indices matters. An empty
/// slice is valid (N = 0). On failure the returned reason names the first
/// fault found: a duplicate index, numbering that does not start at 1, or a
/// gap in the sequence.
pub fn verify_position_sequence(orders: &[u16]) -> std::result::Result<(), String> {
    let mut sorted = orders.to_vec();
    sorted.sort_unstable();

    let mut expected: u16 = 1;
    for (i, &order) in sorted.iter().enumerate() {
        if i > 0 && sorted[i - 1] == order {
            return Err(format!("duplicate position index {}", order));
        }
        if order != expected {
            if expected == 1 {
                return Err(format!(
                    "position indices do not start at 1 (first is {})",
                    order
                ));
            }
            return Err(format!(
                "gap in position indices: expected {} but found {}",
                expected, order
            ));
        }
        expected += 1;
    }

    Ok(())
}

/// Check the series ordering invariant of one station
///
/// Invoked on every configuration load and after any programmatic change to a
/// station's series membership or ordering.
pub fn check_timeseries_integrity(
    station_name: &str,
    station: &SynopticGroupStation,
) -> Result<()> {
    verify_position_sequence(&station.timeseries_orders())
        .map_err(|reason| Error::integrity_violation(station_name, reason))
}

/// Check all position-index invariants of a group
///
/// Covers, per station: the 1..N series invariant, uniqueness of attached
/// series, and resolvable `group_with` references. Across the group: unique
/// station orders.
pub fn check_group_integrity(group: &SynopticGroup) -> Result<()> {
    let mut station_orders = HashSet::new();

    for station in &group.stations {
        let station_label = format!("station {} in group '{}'", station.station_id, group.slug);

        if !station_orders.insert(station.order) {
            return Err(Error::integrity_violation(
                format!("group '{}'", group.slug),
                format!("duplicate station position index {}", station.order),
            ));
        }

        check_timeseries_integrity(&station_label, station)?;

        let mut seen_series = HashSet::new();
        for sts in &station.timeseries {
            if !seen_series.insert(sts.timeseries_id) {
                return Err(Error::integrity_violation(
                    station_label.clone(),
                    format!("time series {} is attached more than once", sts.timeseries_id),
                ));
            }

            if let Some(target) = sts.group_with {
                if station.timeseries_by_order(target).is_none() {
                    return Err(Error::integrity_violation(
                        station_label.clone(),
                        format!(
                            "time series {} groups with order {} which does not exist",
                            sts.timeseries_id, target
                        ),
                    ));
                }
            }
        }
    }

    Ok(())
}
