//! Timed steps and leg geometry for an expanded itinerary.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{GeoPoint, format_duration};

/// How a step is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepMode {
    Walk,
    Ride,
    Arrive,
}

/// One line of turn-by-turn directions.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// When the step starts.
    pub time: NaiveDateTime,
    pub label: String,
    pub address: Option<String>,
    pub duration: Option<Duration>,
    pub mode: StepMode,
    /// Names of the stops ridden past (ride steps only).
    pub stop_names: Option<Vec<String>>,
    pub location: GeoPoint,
}

impl Step {
    /// Clock time as "HH:MM".
    pub fn clock_time(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// Duration as abbreviated text, if the step has one.
    pub fn formatted_duration(&self) -> Option<String> {
        self.duration.map(format_duration)
    }
}

/// Directions-provider transport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Driving,
}

impl TravelMode {
    /// Routing profile name used by OSRM-style services.
    pub fn profile(&self) -> &'static str {
        match self {
            TravelMode::Walking => "foot",
            TravelMode::Driving => "driving",
        }
    }
}

/// Where a leg's geometry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSource {
    /// Returned by the directions provider.
    Provider,
    /// Provider unavailable; straight segments between known points.
    StraightLine,
}

/// Polyline of one leg, for map rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegPath {
    pub mode: TravelMode,
    pub points: Vec<GeoPoint>,
    pub source: PathSource,
}

impl LegPath {
    pub fn is_fallback(&self) -> bool {
        self.source == PathSource::StraightLine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn clock_time_and_duration_text() {
        let time = NaiveDate::from_ymd_opt(2025, 4, 10)
            .unwrap()
            .and_hms_opt(14, 5, 30)
            .unwrap();
        let step = Step {
            time,
            label: "Walk to Intermoda".into(),
            address: None,
            duration: Some(Duration::seconds(7 * 60 + 40)),
            mode: StepMode::Walk,
            stop_names: None,
            location: GeoPoint::new(-6.32, 106.64),
        };
        assert_eq!(step.clock_time(), "14:05");
        assert_eq!(step.formatted_duration().as_deref(), Some("7m"));
    }

    #[test]
    fn travel_mode_profiles() {
        assert_eq!(TravelMode::Walking.profile(), "foot");
        assert_eq!(TravelMode::Driving.profile(), "driving");
        assert_eq!(serde_json::to_string(&TravelMode::Walking).unwrap(), "\"walking\"");
    }

    #[test]
    fn leg_path_fallback_flag() {
        let leg = LegPath {
            mode: TravelMode::Walking,
            points: vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.001)],
            source: PathSource::StraightLine,
        };
        assert!(leg.is_fallback());
        let json = serde_json::to_value(&leg).unwrap();
        assert_eq!(json["source"], "straight_line");
    }
}
