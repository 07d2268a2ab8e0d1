//! Interoperability request-rate statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flight::FlightPeriod;

/// Gap statistics in seconds between consecutive in-flight requests.
///
/// The all-zero `Default` is the defined no-data value, reported whenever
/// fewer than two requests fall inside the flight periods. Consumers must
/// read zeros as insufficient data, not as instant turnaround.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RateStats {
    pub min_s: f64,
    pub max_s: f64,
    pub avg_s: f64,
}

/// Per-category interop rates for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InteropTimes {
    pub server_info: RateStats,
    pub obstacle_info: RateStats,
    pub telemetry: RateStats,
}

/// Gap statistics over one access-log category.
///
/// Requests outside every flight period are discarded; the team is only
/// accountable for its interop rate while airborne. Gaps form between
/// consecutive requests within a single period and pool across periods, so
/// the idle stretch between a landing and the next takeoff never becomes a
/// gap.
pub fn access_log_rates(periods: &[FlightPeriod], requests: &[DateTime<Utc>]) -> RateStats {
    let mut gaps_s: Vec<f64> = Vec::new();

    for period in periods {
        let mut in_period: Vec<DateTime<Utc>> = requests
            .iter()
            .copied()
            .filter(|t| period.contains(*t))
            .collect();
        in_period.sort_unstable();

        for pair in in_period.windows(2) {
            gaps_s.push((pair[1] - pair[0]).num_milliseconds() as f64 / 1000.0);
        }
    }

    if gaps_s.is_empty() {
        return RateStats::default();
    }

    let min_s = gaps_s.iter().copied().fold(f64::INFINITY, f64::min);
    let max_s = gaps_s.iter().copied().fold(0.0, f64::max);
    let avg_s = gaps_s.iter().sum::<f64>() / gaps_s.len() as f64;

    RateStats { min_s, max_s, avg_s }
}
