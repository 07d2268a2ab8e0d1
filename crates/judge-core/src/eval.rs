//! Per-team mission evaluation and batch orchestration.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bounds::out_of_bounds_time_s;
use crate::collision::{moving_collisions, stationary_collisions};
use crate::flight::flight_periods;
use crate::interop::{access_log_rates, InteropTimes};
use crate::models::{
    AccessKind, FlyZone, MissionConfig, MovingObstacle, StationaryObstacle, User, UserLogs,
};
use crate::snapshot::MissionDataSource;
use crate::waypoint::satisfied_waypoints;

/// Errors that abort a batch evaluation.
///
/// Per-team data problems (missing logs, malformed event sequences) never
/// abort; they degrade to zero scores for the team in question.
#[derive(Debug, Error)]
pub enum EvalError {
    /// No active mission definition. Without waypoints and thresholds
    /// nothing can be scored for anyone.
    #[error("no active mission configuration")]
    ConfigurationMissing,
}

/// Objective scores for one team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Waypoint traversal order -> satisfied.
    pub waypoints_satisfied: BTreeMap<u32, bool>,
    /// Seconds spent outside every fly zone.
    pub out_of_bounds_time_s: f64,
    /// Interop gap statistics per access-log category.
    pub interop_times: InteropTimes,
    /// Stationary obstacle id -> collided.
    pub stationary_obst_collision: BTreeMap<u32, bool>,
    /// Moving obstacle id -> collided.
    pub moving_obst_collision: BTreeMap<u32, bool>,
}

/// Evaluate one team against frozen mission inputs.
///
/// Pure computation over the given logs. A team with no recorded activity
/// produces the all-zero/false result rather than an error.
pub fn evaluate_team(
    mission: &MissionConfig,
    fly_zones: &[FlyZone],
    stationary_obstacles: &[StationaryObstacle],
    moving_obstacles: &[MovingObstacle],
    logs: &UserLogs,
) -> EvaluationResult {
    let periods = flight_periods(&logs.flight_events);

    EvaluationResult {
        waypoints_satisfied: satisfied_waypoints(
            &mission.mission_waypoints,
            mission.waypoint_distance_max_ft,
            &logs.telemetry,
        ),
        out_of_bounds_time_s: out_of_bounds_time_s(fly_zones, &logs.telemetry),
        interop_times: InteropTimes {
            server_info: access_log_rates(&periods, &logs.server_info_requests),
            obstacle_info: access_log_rates(&periods, &logs.obstacle_requests),
            telemetry: access_log_rates(&periods, &logs.telemetry_requests),
        },
        stationary_obst_collision: stationary_collisions(stationary_obstacles, &logs.telemetry),
        moving_obst_collision: moving_collisions(moving_obstacles, &logs.telemetry),
    }
}

/// Evaluate every non-administrative user against the active mission.
///
/// Mission-wide data is fetched once and shared immutably across rayon
/// workers; per-user logs are fetched by the worker that scores that user.
/// Teams are independent, so the report is identical for any worker count.
/// Returns one result per team, keyed by username.
pub fn evaluate_teams<S>(
    source: &S,
    users: &[User],
) -> Result<BTreeMap<String, EvaluationResult>, EvalError>
where
    S: MissionDataSource + Sync,
{
    let mission = source
        .active_mission()
        .ok_or(EvalError::ConfigurationMissing)?;
    let fly_zones = source.fly_zones();
    let stationary_obstacles = source.stationary_obstacles();
    let moving_obstacles = source.moving_obstacles();

    tracing::info!("Starting team evaluations for {} users", users.len());

    let report = users
        .par_iter()
        .filter(|user| !user.is_admin)
        .map(|user| {
            tracing::info!("Evaluation starting for user: {}", user.username);

            let logs = UserLogs {
                telemetry: source.telemetry(&user.username),
                flight_events: source.flight_events(&user.username),
                server_info_requests: source.access_log(&user.username, AccessKind::ServerInfo),
                obstacle_requests: source.access_log(&user.username, AccessKind::ObstacleInfo),
                telemetry_requests: source.access_log(&user.username, AccessKind::Telemetry),
            };
            tracing::debug!(
                "User {}: {} telemetry samples, {} flight events",
                user.username,
                logs.telemetry.len(),
                logs.flight_events.len()
            );

            let result = evaluate_team(
                &mission,
                &fly_zones,
                &stationary_obstacles,
                &moving_obstacles,
                &logs,
            );
            (user.username.clone(), result)
        })
        .collect();

    Ok(report)
}
