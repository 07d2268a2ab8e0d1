//! Synthetic mission snapshots with simulated team flights.
//!
//! Fixtures are deterministic for a given seed and option set, so generated
//! files can be checked in and re-derived.

use std::f64::consts::TAU;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use judge_core::spatial::offset_by_bearing_ft;
use judge_core::{
    FlightEvent, FlyZone, MissionConfig, MissionSnapshot, MovingObstacle, ObstacleSample,
    Position, StationaryObstacle, TelemetrySample, User, UserLogs, Waypoint,
};

/// 2024-06-01T12:00:00Z, the base time every fixture starts from.
const MISSION_EPOCH_S: i64 = 1_717_243_200;

const CRUISE_SPEED_FTPS: f64 = 50.0;
const WAYPOINT_RING_RADIUS_FT: f64 = 2000.0;
const WAYPOINT_THRESHOLD_FT: f64 = 100.0;
const ZONE_CORNER_DISTANCE_FT: f64 = 8000.0;
const ZONE_CEILING_FT: f64 = 750.0;
/// Horizontal GPS jitter applied to every telemetry sample, in feet.
const JITTER_MAX_FT: f64 = 12.0;
/// Wall time between consecutive team flights.
const FLIGHT_STAGGER_S: i64 = 600;

/// Parameters for a synthesized snapshot.
#[derive(Debug, Clone)]
pub struct SimOptions {
    pub home_lat: f64,
    pub home_lon: f64,
    /// Team usernames. Even-indexed teams fly clean; odd-indexed teams bust
    /// the ceiling mid-flight.
    pub teams: Vec<String>,
    pub waypoint_count: u32,
    pub telemetry_rate_hz: f64,
    pub seed: u64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            home_lat: 38.1478,
            home_lon: -76.4275,
            teams: vec!["team_alpha".to_string(), "team_bravo".to_string()],
            waypoint_count: 6,
            telemetry_rate_hz: 1.0,
            seed: 427,
        }
    }
}

/// Build a complete snapshot: mission, fly zone, obstacles, and one
/// simulated flight per team.
pub fn generate_snapshot(options: &SimOptions) -> MissionSnapshot {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let t0 = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(MISSION_EPOCH_S);
    let home = Position::new(options.home_lat, options.home_lon);

    let mission = build_mission(&mut rng, &home, options.waypoint_count);
    let span_s = FLIGHT_STAGGER_S * (options.teams.len() as i64 + 1);

    let mut snapshot = MissionSnapshot {
        mission: Some(mission.clone()),
        fly_zones: vec![build_fly_zone(&home)],
        stationary_obstacles: build_towers(&home),
        moving_obstacles: vec![orbiting_obstacle(7, &home, t0, span_s)],
        ..Default::default()
    };

    for (idx, team) in options.teams.iter().enumerate() {
        let takeoff = t0 + Duration::seconds(FLIGHT_STAGGER_S * idx as i64);
        let sloppy = idx % 2 == 1;
        let logs = simulate_flight(
            &mut rng,
            &mission,
            takeoff,
            options.telemetry_rate_hz,
            sloppy,
        );
        snapshot.insert_user(User::new(team.clone()), logs);
    }
    snapshot.insert_user(User::admin("judge-admin"), UserLogs::default());

    snapshot
}

/// Waypoints on a ring around home, search grid to the south, targets
/// scattered inside the zone.
fn build_mission(rng: &mut StdRng, home: &Position, waypoint_count: u32) -> MissionConfig {
    let count = waypoint_count.max(1);
    let mission_waypoints = (0..count)
        .map(|i| {
            let angle = TAU * f64::from(i) / f64::from(count);
            let (lat, lon) =
                offset_by_bearing_ft(home.lat, home.lon, WAYPOINT_RING_RADIUS_FT, angle);
            let altitude_ft = (200.0 + 30.0 * f64::from(i)).min(600.0);
            Waypoint {
                id: i + 1,
                order: i + 1,
                position: Position::with_altitude(lat, lon, altitude_ft),
            }
        })
        .collect();

    let (grid_lat, grid_lon) =
        offset_by_bearing_ft(home.lat, home.lon, 2500.0, 180.0_f64.to_radians());
    let search_grid = [45.0_f64, 135.0, 225.0, 315.0]
        .iter()
        .enumerate()
        .map(|(i, bearing_deg)| {
            let (lat, lon) =
                offset_by_bearing_ft(grid_lat, grid_lon, 1100.0, bearing_deg.to_radians());
            Waypoint {
                id: 100 + i as u32,
                order: i as u32 + 1,
                position: Position::new(lat, lon),
            }
        })
        .collect();

    MissionConfig {
        home_pos: *home,
        waypoint_distance_max_ft: WAYPOINT_THRESHOLD_FT,
        mission_waypoints,
        search_grid,
        emergent_last_known_pos: random_target(rng, home),
        off_axis_target_pos: random_target(rng, home),
        sric_pos: random_target(rng, home),
        ir_primary_target_pos: random_target(rng, home),
        ir_secondary_target_pos: random_target(rng, home),
        air_drop_pos: random_target(rng, home),
    }
}

fn random_target(rng: &mut StdRng, home: &Position) -> Position {
    let distance_ft = rng.random_range(500.0..3000.0);
    let bearing_rad = rng.random_range(0.0..TAU);
    let (lat, lon) = offset_by_bearing_ft(home.lat, home.lon, distance_ft, bearing_rad);
    Position::new(lat, lon)
}

/// Square zone centered on home, ground to the ceiling.
fn build_fly_zone(home: &Position) -> FlyZone {
    let boundary = [45.0_f64, 135.0, 225.0, 315.0]
        .iter()
        .map(|bearing_deg| {
            let (lat, lon) = offset_by_bearing_ft(
                home.lat,
                home.lon,
                ZONE_CORNER_DISTANCE_FT,
                bearing_deg.to_radians(),
            );
            Position::new(lat, lon)
        })
        .collect();

    FlyZone {
        id: 1,
        boundary,
        altitude_floor_ft: 0.0,
        altitude_ceiling_ft: ZONE_CEILING_FT,
    }
}

/// Two towers inside the waypoint ring.
fn build_towers(home: &Position) -> Vec<StationaryObstacle> {
    let tower = |id: u32, bearing_rad: f64, distance_ft: f64, radius_ft: f64, height_ft: f64| {
        let (lat, lon) = offset_by_bearing_ft(home.lat, home.lon, distance_ft, bearing_rad);
        StationaryObstacle {
            id,
            pos: Position::new(lat, lon),
            cylinder_radius_ft: radius_ft,
            cylinder_height_ft: height_ft,
        }
    };

    vec![
        tower(1, 1.0, 1200.0, 60.0, 200.0),
        tower(2, 4.0, 2600.0, 40.0, 300.0),
    ]
}

/// Obstacle orbiting home at 1500 ft, one revolution every 300 s, sampled
/// every 10 s across the whole session.
fn orbiting_obstacle(
    id: u32,
    home: &Position,
    t0: DateTime<Utc>,
    span_s: i64,
) -> MovingObstacle {
    let samples = (0..=span_s / 10)
        .map(|step| {
            let elapsed_s = step * 10;
            let angle = TAU * (elapsed_s as f64 / 300.0).fract();
            let (lat, lon) = offset_by_bearing_ft(home.lat, home.lon, 1500.0, angle);
            ObstacleSample {
                timestamp: t0 + Duration::seconds(elapsed_s),
                position: Position::with_altitude(lat, lon, 250.0),
                radius_ft: 50.0,
            }
        })
        .collect();

    MovingObstacle { id, samples }
}

/// Fly home -> each waypoint in order -> home at cruise speed, recording
/// telemetry and interop requests along the way.
fn simulate_flight(
    rng: &mut StdRng,
    mission: &MissionConfig,
    takeoff: DateTime<Utc>,
    rate_hz: f64,
    sloppy: bool,
) -> UserLogs {
    let mut route: Vec<Position> = Vec::new();
    route.push(mission.home_pos);
    route.extend(mission.ordered_waypoints().iter().map(|w| w.position));
    route.push(mission.home_pos);

    let dt_s = 1.0 / rate_hz.max(0.1);
    let mut telemetry: Vec<TelemetrySample> = Vec::new();
    let mut elapsed_s = 0.0;

    for leg in route.windows(2) {
        let from = leg[0];
        let to = leg[1];
        let duration_s = from.horizontal_distance_ft(&to).max(1.0) / CRUISE_SPEED_FTPS;

        let mut leg_t = 0.0;
        while leg_t < duration_s {
            let frac = leg_t / duration_s;
            let lat = from.lat + (to.lat - from.lat) * frac;
            let lon = from.lon + (to.lon - from.lon) * frac;
            let altitude_ft = from.altitude_or_zero()
                + (to.altitude_or_zero() - from.altitude_or_zero()) * frac;
            let (lat, lon) = offset_by_bearing_ft(
                lat,
                lon,
                rng.random_range(0.0..JITTER_MAX_FT),
                rng.random_range(0.0..TAU),
            );

            telemetry.push(TelemetrySample {
                timestamp: offset_time(takeoff, elapsed_s + leg_t),
                position: Position::with_altitude(lat, lon, altitude_ft),
            });
            leg_t += dt_s;
        }
        elapsed_s += duration_s;
    }
    telemetry.push(TelemetrySample {
        timestamp: offset_time(takeoff, elapsed_s),
        position: mission.home_pos,
    });

    if sloppy {
        bust_ceiling(rng, &mut telemetry, rate_hz);
    }

    let landing = telemetry.last().map(|s| s.timestamp).unwrap_or(takeoff);
    let telemetry_requests = telemetry.iter().map(|s| s.timestamp).collect();

    UserLogs {
        telemetry,
        flight_events: vec![FlightEvent::takeoff(takeoff), FlightEvent::landing(landing)],
        server_info_requests: jittered_times(rng, takeoff, landing, 2.0),
        obstacle_requests: jittered_times(rng, takeoff, landing, 1.0),
        telemetry_requests,
    }
}

/// Overwrite roughly 20 s of mid-flight samples with altitudes above the
/// zone ceiling.
fn bust_ceiling(rng: &mut StdRng, telemetry: &mut [TelemetrySample], rate_hz: f64) {
    let n = telemetry.len();
    let start = n * 2 / 5;
    let end = (start + (20.0 * rate_hz).max(1.0) as usize).min(n);

    for sample in &mut telemetry[start..end] {
        sample.position.altitude_ft = Some(ZONE_CEILING_FT + rng.random_range(80.0..220.0));
    }
}

/// Request timestamps from `start` to `end` at roughly the given interval.
fn jittered_times(
    rng: &mut StdRng,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval_s: f64,
) -> Vec<DateTime<Utc>> {
    let mut times = Vec::new();
    let mut cursor = start;

    while cursor <= end {
        times.push(cursor);
        let step_s = interval_s * rng.random_range(0.8..1.25);
        cursor += Duration::milliseconds((step_s * 1000.0) as i64);
    }

    times
}

fn offset_time(base: DateTime<Utc>, offset_s: f64) -> DateTime<Utc> {
    base + Duration::milliseconds((offset_s * 1000.0) as i64)
}
