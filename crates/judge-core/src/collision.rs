//! Obstacle collision checks against a telemetry log.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::{MovingObstacle, ObstacleSample, StationaryObstacle, TelemetrySample};
use crate::spatial::inside_cylinder;

impl StationaryObstacle {
    /// True when any telemetry sample enters the obstacle cylinder.
    pub fn hit_by(&self, telemetry: &[TelemetrySample]) -> bool {
        telemetry.iter().any(|sample| {
            inside_cylinder(
                &sample.position,
                &self.pos,
                self.cylinder_radius_ft,
                self.cylinder_height_ft,
            )
        })
    }
}

impl MovingObstacle {
    /// Track sample nearest to `t` by absolute time difference.
    ///
    /// With the track in chronological order, ties go to the earlier sample.
    /// Returns None for an empty track.
    pub fn sample_at(&self, t: DateTime<Utc>) -> Option<&ObstacleSample> {
        let mut best: Option<(&ObstacleSample, i64)> = None;

        for sample in &self.samples {
            let delta_ms = (sample.timestamp - t).num_milliseconds().abs();
            let closer = match best {
                Some((_, best_ms)) => delta_ms < best_ms,
                None => true,
            };
            if closer {
                best = Some((sample, delta_ms));
            }
        }

        best.map(|(sample, _)| sample)
    }

    /// True when any telemetry sample enters the cylinder of the track
    /// sample nearest in time.
    ///
    /// The cylinder reaches from the ground up to the sampled altitude. An
    /// obstacle with no track samples can never collide.
    pub fn hit_by(&self, telemetry: &[TelemetrySample]) -> bool {
        telemetry.iter().any(|sample| {
            self.sample_at(sample.timestamp)
                .map(|nearest| {
                    inside_cylinder(
                        &sample.position,
                        &nearest.position,
                        nearest.radius_ft,
                        nearest.position.altitude_or_zero(),
                    )
                })
                .unwrap_or(false)
        })
    }
}

/// Collision flag for every stationary obstacle, keyed by obstacle id.
pub fn stationary_collisions(
    obstacles: &[StationaryObstacle],
    telemetry: &[TelemetrySample],
) -> BTreeMap<u32, bool> {
    obstacles
        .iter()
        .map(|obstacle| (obstacle.id, obstacle.hit_by(telemetry)))
        .collect()
}

/// Collision flag for every moving obstacle, keyed by obstacle id.
pub fn moving_collisions(
    obstacles: &[MovingObstacle],
    telemetry: &[TelemetrySample],
) -> BTreeMap<u32, bool> {
    obstacles
        .iter()
        .map(|obstacle| (obstacle.id, obstacle.hit_by(telemetry)))
        .collect()
}
