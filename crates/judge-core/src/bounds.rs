//! Out-of-bounds time accumulation against fly zones.

use crate::models::{FlyZone, TelemetrySample};

/// Seconds the UAS spent outside every fly zone.
///
/// A sample is out of bounds when no zone contains it. Each consecutive
/// sample pair whose leading sample is out of bounds charges the pair's time
/// delta; the final sample never charges anything because no later sample
/// bounds its interval. Sparse logs therefore under-report a violation that
/// starts between samples. Telemetry must be chronological.
pub fn out_of_bounds_time_s(zones: &[FlyZone], telemetry: &[TelemetrySample]) -> f64 {
    let mut total_s = 0.0;

    for pair in telemetry.windows(2) {
        let in_bounds = zones.iter().any(|zone| zone.contains(&pair[0].position));
        if !in_bounds {
            total_s += (pair[1].timestamp - pair[0].timestamp).num_milliseconds() as f64 / 1000.0;
        }
    }

    total_s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_500_000_000 + secs, 0).unwrap()
    }

    fn sample(secs: i64, altitude_ft: f64) -> TelemetrySample {
        TelemetrySample {
            timestamp: at(secs),
            position: Position::with_altitude(38.05, -76.05, altitude_ft),
        }
    }

    fn zone(floor_ft: f64, ceiling_ft: f64) -> FlyZone {
        FlyZone {
            id: 1,
            boundary: vec![
                Position::new(38.0, -76.0),
                Position::new(38.0, -76.1),
                Position::new(38.1, -76.1),
                Position::new(38.1, -76.0),
            ],
            altitude_floor_ft: floor_ft,
            altitude_ceiling_ft: ceiling_ft,
        }
    }

    #[test]
    fn charges_interval_led_by_out_of_bounds_sample() {
        // Altitude excursion above a 400 ft ceiling: samples at t=0s, 10s,
        // 20s with the middle sample out of bounds charge exactly the
        // 10s..20s interval.
        let zones = vec![zone(0.0, 400.0)];
        let telemetry = vec![sample(0, 100.0), sample(10, 500.0), sample(20, 100.0)];

        let oob = out_of_bounds_time_s(&zones, &telemetry);
        assert!((oob - 10.0).abs() < 1e-9, "expected 10s, got {oob}");
    }

    #[test]
    fn fully_in_bounds_flight_charges_nothing() {
        let zones = vec![zone(0.0, 750.0)];
        let telemetry = vec![sample(0, 100.0), sample(10, 200.0), sample(20, 300.0)];

        assert_eq!(out_of_bounds_time_s(&zones, &telemetry), 0.0);
    }

    #[test]
    fn final_sample_charges_nothing() {
        let zones = vec![zone(0.0, 400.0)];
        // The trailing sample is out of bounds but has no following sample.
        let telemetry = vec![sample(0, 100.0), sample(10, 500.0)];

        let oob = out_of_bounds_time_s(&zones, &telemetry);
        assert!((oob - 10.0).abs() < 1e-9);

        let only_last_bad = vec![sample(0, 100.0), sample(10, 100.0), sample(20, 500.0)];
        assert_eq!(out_of_bounds_time_s(&zones, &only_last_bad), 0.0);
    }

    #[test]
    fn union_of_zones_defines_legal_airspace() {
        // Disjoint altitude bands; a sample in either band is in bounds.
        let zones = vec![zone(0.0, 300.0), zone(400.0, 750.0)];
        let telemetry = vec![
            sample(0, 100.0),  // low band
            sample(10, 500.0), // high band
            sample(20, 350.0), // the gap between bands
            sample(30, 100.0),
        ];

        let oob = out_of_bounds_time_s(&zones, &telemetry);
        assert!((oob - 10.0).abs() < 1e-9);
    }

    #[test]
    fn no_zones_means_everything_is_out_of_bounds() {
        let telemetry = vec![sample(0, 100.0), sample(30, 100.0)];
        let oob = out_of_bounds_time_s(&[], &telemetry);
        assert!((oob - 30.0).abs() < 1e-9);
    }

    #[test]
    fn short_logs_charge_nothing() {
        let zones = vec![zone(0.0, 400.0)];
        assert_eq!(out_of_bounds_time_s(&zones, &[]), 0.0);
        assert_eq!(out_of_bounds_time_s(&zones, &[sample(0, 500.0)]), 0.0);
    }
}
