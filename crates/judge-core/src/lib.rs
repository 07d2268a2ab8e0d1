pub mod bounds;
pub mod collision;
pub mod eval;
pub mod flight;
pub mod interop;
pub mod models;
pub mod snapshot;
pub mod spatial;
pub mod waypoint;

pub use bounds::out_of_bounds_time_s;
pub use collision::{moving_collisions, stationary_collisions};
pub use eval::{evaluate_team, evaluate_teams, EvalError, EvaluationResult};
pub use flight::{flight_periods, FlightPeriod};
pub use interop::{access_log_rates, InteropTimes, RateStats};
pub use models::{
    AccessKind, FlightEvent, FlightEventKind, FlyZone, MissionConfig, MovingObstacle,
    ObstacleSample, Position, StationaryObstacle, TelemetrySample, User, UserLogs, Waypoint,
};
pub use snapshot::{MissionDataSource, MissionSnapshot};
pub use spatial::haversine_distance;
pub use waypoint::satisfied_waypoints;
