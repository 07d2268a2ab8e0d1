//! Core data models for mission evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::spatial;

/// A surveyed point: latitude/longitude in decimal degrees, altitude MSL in
/// feet.
///
/// Altitude is optional. Ground hardware without a barometric fix omits it,
/// and every consumer reads a missing altitude as 0 ft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub altitude_ft: Option<f64>,
}

impl Position {
    /// Create a position with no altitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            altitude_ft: None,
        }
    }

    /// Create a position with an altitude in feet MSL.
    pub fn with_altitude(lat: f64, lon: f64, altitude_ft: f64) -> Self {
        Self {
            lat,
            lon,
            altitude_ft: Some(altitude_ft),
        }
    }

    /// Altitude in feet, 0 when unknown.
    pub fn altitude_or_zero(&self) -> f64 {
        self.altitude_ft.unwrap_or(0.0)
    }

    /// Great-circle distance to another position in feet, ignoring altitude.
    pub fn horizontal_distance_ft(&self, other: &Position) -> f64 {
        spatial::haversine_distance_ft(self.lat, self.lon, other.lat, other.lon)
    }

    /// 3D distance to another position in feet.
    ///
    /// Horizontal component is great-circle, vertical is the altitude
    /// difference. Total for any pair of positions.
    pub fn distance_ft(&self, other: &Position) -> f64 {
        let horizontal_ft = self.horizontal_distance_ft(other);
        let vertical_ft = self.altitude_or_zero() - other.altitude_or_zero();
        (horizontal_ft.powi(2) + vertical_ft.powi(2)).sqrt()
    }
}

/// A mission waypoint: a position plus its traversal order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: u32,
    /// Traversal order, 1-based and unique within a mission.
    pub order: u32,
    pub position: Position,
}

/// The active mission definition: path, targets, and scoring thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionConfig {
    /// Reference point for the ground station area.
    pub home_pos: Position,
    /// Maximum distance at which a waypoint counts as satisfied, in feet.
    pub waypoint_distance_max_ft: f64,
    /// Waypoints defining the mission path.
    pub mission_waypoints: Vec<Waypoint>,
    /// Vertices of the search grid the UAS must cover.
    pub search_grid: Vec<Waypoint>,
    /// Last known position of the emergent target.
    pub emergent_last_known_pos: Position,
    /// Position of the off-axis target.
    pub off_axis_target_pos: Position,
    /// Position of the SRIC station.
    pub sric_pos: Position,
    /// Position of the primary IR target.
    pub ir_primary_target_pos: Position,
    /// Position of the secondary IR target.
    pub ir_secondary_target_pos: Position,
    /// Position of the air drop.
    pub air_drop_pos: Position,
}

impl MissionConfig {
    /// Mission waypoints sorted by traversal order.
    pub fn ordered_waypoints(&self) -> Vec<&Waypoint> {
        let mut waypoints: Vec<&Waypoint> = self.mission_waypoints.iter().collect();
        waypoints.sort_by_key(|waypoint| waypoint.order);
        waypoints
    }

    /// Validate the mission definition.
    /// Returns list of validation errors (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.waypoint_distance_max_ft.is_finite() || self.waypoint_distance_max_ft <= 0.0 {
            errors.push(format!(
                "Waypoint distance threshold must be a positive number of feet, got {}",
                self.waypoint_distance_max_ft
            ));
        }

        if self.mission_waypoints.is_empty() {
            errors.push("Mission must define at least one waypoint".to_string());
        }

        let mut orders: Vec<u32> = self
            .mission_waypoints
            .iter()
            .map(|waypoint| waypoint.order)
            .collect();
        orders.sort_unstable();
        for (idx, order) in orders.iter().enumerate() {
            let expected = idx as u32 + 1;
            if *order != expected {
                errors.push(format!(
                    "Waypoint orders must be unique and contiguous from 1, got {:?}",
                    orders
                ));
                break;
            }
        }

        if self.search_grid.len() < 3 {
            errors.push(format!(
                "Search grid needs at least 3 vertices, got {}",
                self.search_grid.len()
            ));
        }

        errors
    }

    /// Check if the mission definition is valid.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// One recorded UAS position report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub timestamp: DateTime<Utc>,
    pub position: Position,
}

/// Legal airspace: a boundary polygon plus an altitude band.
///
/// The UAS is in bounds while at least one zone contains it; the union of
/// all zones defines legal airspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlyZone {
    pub id: u32,
    /// Polygon vertices in path order. A closing vertex is optional.
    pub boundary: Vec<Position>,
    pub altitude_floor_ft: f64,
    pub altitude_ceiling_ft: f64,
}

impl FlyZone {
    /// Check if a position is inside this zone.
    ///
    /// The boundary polygon and both altitude limits are inclusive. A missing
    /// altitude reads as 0 ft, which a zone with a floor above ground
    /// excludes.
    pub fn contains(&self, position: &Position) -> bool {
        let altitude_ft = position.altitude_or_zero();
        if altitude_ft < self.altitude_floor_ft || altitude_ft > self.altitude_ceiling_ft {
            return false;
        }
        spatial::inside_polygon(position.lat, position.lon, &self.boundary)
    }

    /// Validate zone geometry.
    /// Returns list of validation errors (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.boundary.len() < 3 {
            errors.push(format!(
                "Zone {} boundary needs at least 3 vertices, got {}",
                self.id,
                self.boundary.len()
            ));
        }

        if self.altitude_floor_ft >= self.altitude_ceiling_ft {
            errors.push(format!(
                "Zone {} altitude floor ({} ft) must be below ceiling ({} ft)",
                self.id, self.altitude_floor_ft, self.altitude_ceiling_ft
            ));
        }

        errors
    }

    /// Check if the zone geometry is valid.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// A fixed obstacle: a vertical cylinder reaching from the ground to its
/// height.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationaryObstacle {
    pub id: u32,
    /// Center of the cylinder. Altitude is ignored; the cylinder always
    /// starts at the ground.
    pub pos: Position,
    pub cylinder_radius_ft: f64,
    pub cylinder_height_ft: f64,
}

/// One recorded sample of a moving obstacle's track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSample {
    pub timestamp: DateTime<Utc>,
    /// Cylinder center; the sample altitude is the cylinder top.
    pub position: Position,
    pub radius_ft: f64,
}

/// An obstacle whose cylinder follows a recorded track.
///
/// The obstacle's position at an arbitrary time is the recorded sample
/// nearest in time. The track is never interpolated across gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingObstacle {
    pub id: u32,
    /// Track samples in chronological order.
    pub samples: Vec<ObstacleSample>,
}

/// Type of a recorded flight event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightEventKind {
    Takeoff,
    Landing,
}

/// A recorded takeoff or landing for one team.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: FlightEventKind,
}

impl FlightEvent {
    pub fn takeoff(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            kind: FlightEventKind::Takeoff,
        }
    }

    pub fn landing(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            kind: FlightEventKind::Landing,
        }
    }
}

/// Interoperability access-log category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    /// Server information queries.
    ServerInfo,
    /// Obstacle information queries.
    ObstacleInfo,
    /// Telemetry submissions.
    Telemetry,
}

/// A competition account. Administrative accounts are never scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    /// Create a regular team account.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_admin: false,
        }
    }

    /// Create an administrative account.
    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_admin: true,
        }
    }
}

/// Every log recorded for one team, materialized before evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserLogs {
    /// Position reports, chronological.
    #[serde(default)]
    pub telemetry: Vec<TelemetrySample>,
    /// Takeoff and landing events, chronological.
    #[serde(default)]
    pub flight_events: Vec<FlightEvent>,
    /// Server information request times.
    #[serde(default)]
    pub server_info_requests: Vec<DateTime<Utc>>,
    /// Obstacle information request times.
    #[serde(default)]
    pub obstacle_requests: Vec<DateTime<Utc>>,
    /// Telemetry submission times.
    #[serde(default)]
    pub telemetry_requests: Vec<DateTime<Utc>>,
}

impl UserLogs {
    /// Access-log timestamps for one category.
    pub fn requests(&self, kind: AccessKind) -> &[DateTime<Utc>] {
        match kind {
            AccessKind::ServerInfo => &self.server_info_requests,
            AccessKind::ObstacleInfo => &self.obstacle_requests,
            AccessKind::Telemetry => &self.telemetry_requests,
        }
    }

    /// Sort every sequence by timestamp.
    pub(crate) fn sort(&mut self) {
        self.telemetry.sort_by_key(|sample| sample.timestamp);
        self.flight_events.sort_by_key(|event| event.timestamp);
        self.server_info_requests.sort_unstable();
        self.obstacle_requests.sort_unstable();
        self.telemetry_requests.sort_unstable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_mission() -> MissionConfig {
        let home = Position::new(38.1478, -76.4275);
        MissionConfig {
            home_pos: home,
            waypoint_distance_max_ft: 100.0,
            mission_waypoints: vec![
                Waypoint {
                    id: 1,
                    order: 1,
                    position: Position::with_altitude(38.1489, -76.4280, 200.0),
                },
                Waypoint {
                    id: 2,
                    order: 2,
                    position: Position::with_altitude(38.1500, -76.4290, 300.0),
                },
            ],
            search_grid: vec![
                Waypoint {
                    id: 10,
                    order: 1,
                    position: Position::new(38.14, -76.43),
                },
                Waypoint {
                    id: 11,
                    order: 2,
                    position: Position::new(38.15, -76.43),
                },
                Waypoint {
                    id: 12,
                    order: 3,
                    position: Position::new(38.15, -76.42),
                },
            ],
            emergent_last_known_pos: Position::new(38.145, -76.425),
            off_axis_target_pos: Position::new(38.146, -76.426),
            sric_pos: Position::new(38.147, -76.427),
            ir_primary_target_pos: Position::new(38.148, -76.428),
            ir_secondary_target_pos: Position::new(38.149, -76.429),
            air_drop_pos: Position::new(38.150, -76.430),
        }
    }

    #[test]
    fn valid_mission_passes_validation() {
        let mission = minimal_mission();
        assert!(mission.is_valid(), "{:?}", mission.validate());
    }

    #[test]
    fn duplicate_waypoint_orders_fail_validation() {
        let mut mission = minimal_mission();
        mission.mission_waypoints[1].order = 1;
        assert!(!mission.is_valid());
    }

    #[test]
    fn non_positive_threshold_fails_validation() {
        let mut mission = minimal_mission();
        mission.waypoint_distance_max_ft = 0.0;
        assert!(!mission.is_valid());
    }

    #[test]
    fn ordered_waypoints_sorts_by_order() {
        let mut mission = minimal_mission();
        mission.mission_waypoints.swap(0, 1);
        let ordered = mission.ordered_waypoints();
        assert_eq!(ordered[0].order, 1);
        assert_eq!(ordered[1].order, 2);
    }

    #[test]
    fn fly_zone_rejects_altitude_outside_band() {
        let zone = FlyZone {
            id: 1,
            boundary: vec![
                Position::new(38.0, -76.0),
                Position::new(38.0, -76.1),
                Position::new(38.1, -76.1),
                Position::new(38.1, -76.0),
            ],
            altitude_floor_ft: 100.0,
            altitude_ceiling_ft: 750.0,
        };

        let inside = Position::with_altitude(38.05, -76.05, 400.0);
        let too_low = Position::with_altitude(38.05, -76.05, 50.0);
        let too_high = Position::with_altitude(38.05, -76.05, 800.0);
        let no_altitude = Position::new(38.05, -76.05);

        assert!(zone.contains(&inside));
        assert!(!zone.contains(&too_low));
        assert!(!zone.contains(&too_high));
        // Missing altitude reads as 0 ft, below the 100 ft floor.
        assert!(!zone.contains(&no_altitude));
    }

    #[test]
    fn fly_zone_band_limits_are_inclusive() {
        let zone = FlyZone {
            id: 1,
            boundary: vec![
                Position::new(38.0, -76.0),
                Position::new(38.0, -76.1),
                Position::new(38.1, -76.1),
                Position::new(38.1, -76.0),
            ],
            altitude_floor_ft: 0.0,
            altitude_ceiling_ft: 750.0,
        };

        assert!(zone.contains(&Position::with_altitude(38.05, -76.05, 0.0)));
        assert!(zone.contains(&Position::with_altitude(38.05, -76.05, 750.0)));
    }

    #[test]
    fn inverted_altitude_band_fails_validation() {
        let zone = FlyZone {
            id: 7,
            boundary: vec![
                Position::new(38.0, -76.0),
                Position::new(38.0, -76.1),
                Position::new(38.1, -76.1),
            ],
            altitude_floor_ft: 500.0,
            altitude_ceiling_ft: 100.0,
        };
        assert!(!zone.is_valid());
    }
}
