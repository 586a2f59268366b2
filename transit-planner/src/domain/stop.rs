//! Bus stop types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// Stable identifier of a stop (e.g. `BS01`).
///
/// Identity of a stop is its id; two stops may share a display name.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::StopId;
///
/// let id = StopId::parse(" BS01 ").unwrap();
/// assert_eq!(id.as_str(), "BS01");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("BS 01").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id. Surrounding whitespace is trimmed; the remainder must
    /// be non-empty and contain no whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(InvalidStopId {
                reason: "must not contain whitespace",
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopId {
    type Error = InvalidStopId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A physical boarding location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub location: GeoPoint,
}

impl Stop {
    pub fn new(id: StopId, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id,
            name: name.into(),
            location,
        }
    }

    /// Great-circle distance from this stop to `point`, in metres.
    pub fn distance_to(&self, point: &GeoPoint) -> f64 {
        self.location.distance_to(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert_eq!(StopId::parse("BS01").unwrap().as_str(), "BS01");
        assert_eq!(StopId::parse("\tBS82\n").unwrap().as_str(), "BS82");
    }

    #[test]
    fn reject_empty_and_spaces() {
        assert!(StopId::parse("").is_err());
        assert!(StopId::parse("   ").is_err());
        assert!(StopId::parse("BS 1").is_err());
    }

    #[test]
    fn display_and_debug() {
        let id = StopId::parse("BS07").unwrap();
        assert_eq!(id.to_string(), "BS07");
        assert_eq!(format!("{id:?}"), "StopId(BS07)");
    }

    #[test]
    fn serde_validates() {
        let id: StopId = serde_json::from_str("\"BS10\"").unwrap();
        assert_eq!(id.as_str(), "BS10");
        assert!(serde_json::from_str::<StopId>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"BS10\"");
    }

    #[test]
    fn stops_with_same_name_differ_by_id() {
        let loc = GeoPoint::new(-6.30, 106.64);
        let a = Stop::new(StopId::parse("BS39").unwrap(), "CBD Barat 2", loc);
        let b = Stop::new(StopId::parse("BS72").unwrap(), "CBD Barat 2", loc);
        assert_ne!(a, b);
        assert_eq!(a.distance_to(&b.location), 0.0);
    }
}
