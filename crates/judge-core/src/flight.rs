//! Flight period extraction from takeoff and landing events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{FlightEvent, FlightEventKind};

/// A closed interval from a takeoff to its matching landing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightPeriod {
    pub takeoff_time: DateTime<Utc>,
    pub landing_time: DateTime<Utc>,
}

impl FlightPeriod {
    /// Whether `t` falls inside this period. Both endpoints are inclusive.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.takeoff_time <= t && t <= self.landing_time
    }
}

/// Pair takeoff events with the next landing into closed flight periods.
///
/// Events must be chronological. Malformed sequences degrade instead of
/// failing: a landing with no pending takeoff is skipped, a takeoff that
/// never lands is dropped, and a second takeoff before any landing
/// supersedes the first.
pub fn flight_periods(events: &[FlightEvent]) -> Vec<FlightPeriod> {
    let mut periods = Vec::new();
    let mut pending_takeoff: Option<DateTime<Utc>> = None;

    for event in events {
        match event.kind {
            FlightEventKind::Takeoff => {
                pending_takeoff = Some(event.timestamp);
            }
            FlightEventKind::Landing => {
                if let Some(takeoff_time) = pending_takeoff.take() {
                    periods.push(FlightPeriod {
                        takeoff_time,
                        landing_time: event.timestamp,
                    });
                }
            }
        }
    }

    periods
}
