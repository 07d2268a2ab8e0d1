//! Waypoint satisfaction checks against a telemetry log.

use std::collections::BTreeMap;

use crate::models::{TelemetrySample, Waypoint};

/// Determine which mission waypoints the UAS satisfied.
///
/// A waypoint is satisfied when any telemetry sample lies strictly within
/// `distance_max_ft` of it (3D distance). The whole log is scanned, not just
/// samples inside flight periods, and waypoints are scored independently:
/// satisfying waypoint 3 never requires having satisfied 1 or 2.
///
/// Returns traversal order -> satisfied, one entry per waypoint. Empty
/// telemetry scores every waypoint false.
pub fn satisfied_waypoints(
    waypoints: &[Waypoint],
    distance_max_ft: f64,
    telemetry: &[TelemetrySample],
) -> BTreeMap<u32, bool> {
    let mut satisfied = BTreeMap::new();

    for waypoint in waypoints {
        // First qualifying sample ends the scan for this waypoint.
        let hit = telemetry
            .iter()
            .any(|sample| sample.position.distance_ft(&waypoint.position) < distance_max_ft);
        satisfied.insert(waypoint.order, hit);
    }

    satisfied
}
