//! Immutable input snapshots and the data access contract.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    AccessKind, FlightEvent, FlyZone, MissionConfig, MovingObstacle, StationaryObstacle,
    TelemetrySample, User, UserLogs,
};

/// Read-only queries the evaluation engine makes against stored competition
/// data.
///
/// Implementations materialize results eagerly; the engine performs no I/O
/// while computing. Mission-wide data is queried once per batch, per-user
/// data once per team. All sequences come back chronological.
pub trait MissionDataSource {
    /// The single active mission definition, if one exists.
    fn active_mission(&self) -> Option<MissionConfig>;

    /// Every fly zone.
    fn fly_zones(&self) -> Vec<FlyZone>;

    /// Every stationary obstacle.
    fn stationary_obstacles(&self) -> Vec<StationaryObstacle>;

    /// Every moving obstacle.
    fn moving_obstacles(&self) -> Vec<MovingObstacle>;

    /// Telemetry log for one user. Unknown users have empty logs.
    fn telemetry(&self, username: &str) -> Vec<TelemetrySample>;

    /// Access-log timestamps for one user and category.
    fn access_log(&self, username: &str, kind: AccessKind) -> Vec<DateTime<Utc>>;

    /// Takeoff and landing events for one user.
    fn flight_events(&self, username: &str) -> Vec<FlightEvent>;
}

/// Every input to one evaluation run, frozen in memory.
///
/// A snapshot is assembled once, normalized, then shared immutably across
/// evaluation workers. It also serves as the on-disk fixture format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionSnapshot {
    #[serde(default)]
    pub mission: Option<MissionConfig>,
    #[serde(default)]
    pub fly_zones: Vec<FlyZone>,
    #[serde(default)]
    pub stationary_obstacles: Vec<StationaryObstacle>,
    #[serde(default)]
    pub moving_obstacles: Vec<MovingObstacle>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub logs: BTreeMap<String, UserLogs>,
}

impl MissionSnapshot {
    /// Register a user together with their logs.
    ///
    /// Log sequences are sorted on the way in, so consumers can rely on
    /// chronological order.
    pub fn insert_user(&mut self, user: User, mut logs: UserLogs) {
        logs.sort();
        self.logs.insert(user.username.clone(), logs);
        self.users.push(user);
    }

    /// Sort every time sequence in the snapshot.
    ///
    /// Deserialized snapshots call this once before evaluation; the engine
    /// assumes chronological inputs everywhere.
    pub fn normalize(&mut self) {
        for obstacle in &mut self.moving_obstacles {
            obstacle.samples.sort_by_key(|sample| sample.timestamp);
        }
        for logs in self.logs.values_mut() {
            logs.sort();
        }
    }
}

impl MissionDataSource for MissionSnapshot {
    fn active_mission(&self) -> Option<MissionConfig> {
        self.mission.clone()
    }

    fn fly_zones(&self) -> Vec<FlyZone> {
        self.fly_zones.clone()
    }

    fn stationary_obstacles(&self) -> Vec<StationaryObstacle> {
        self.stationary_obstacles.clone()
    }

    fn moving_obstacles(&self) -> Vec<MovingObstacle> {
        self.moving_obstacles.clone()
    }

    fn telemetry(&self, username: &str) -> Vec<TelemetrySample> {
        self.logs
            .get(username)
            .map(|logs| logs.telemetry.clone())
            .unwrap_or_default()
    }

    fn access_log(&self, username: &str, kind: AccessKind) -> Vec<DateTime<Utc>> {
        self.logs
            .get(username)
            .map(|logs| logs.requests(kind).to_vec())
            .unwrap_or_default()
    }

    fn flight_events(&self, username: &str) -> Vec<FlightEvent> {
        self.logs
            .get(username)
            .map(|logs| logs.flight_events.clone())
            .unwrap_or_default()
    }
}
