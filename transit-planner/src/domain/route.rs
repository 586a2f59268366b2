//! Bus route types.
//!
//! A route is an ordered, directional sequence of stops. Riders may only
//! travel from a lower sequence index to an equal-or-higher one. Loop routes
//! may visit the same stop id more than once, so every lookup works on
//! sequence indices, and locating a stop by id uses its first occurrence.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{DomainError, GeoPoint, Stop, StopId};

/// Error returned when parsing an invalid route colour.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route colour {input:?}: {reason}")]
pub struct InvalidColor {
    input: String,
    reason: &'static str,
}

/// Display colour of a route, as sRGB bytes.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::RouteColor;
///
/// let c = RouteColor::parse("#213284").unwrap();
/// assert_eq!(c.rgb(), (0x21, 0x32, 0x84));
/// assert_eq!(c.to_string(), "#213284");
///
/// // The leading '#' is optional and case does not matter
/// assert_eq!(RouteColor::parse("eb5b00").unwrap().to_string(), "#EB5B00");
/// assert!(RouteColor::parse("#12345").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteColor([u8; 3]);

impl RouteColor {
    /// Parse a `#RRGGBB` hex colour.
    pub fn parse(s: &str) -> Result<Self, InvalidColor> {
        let err = |reason| InvalidColor {
            input: s.to_string(),
            reason,
        };

        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 {
            return Err(err("expected 6 hex digits"));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err("expected hex digits 0-9, A-F"));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err("expected hex digits 0-9, A-F"))
        };

        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Returns the (red, green, blue) channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.0[0], self.0[1], self.0[2])
    }
}

impl TryFrom<String> for RouteColor {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RouteColor> for String {
    fn from(color: RouteColor) -> Self {
        color.to_string()
    }
}

impl fmt::Debug for RouteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteColor({self})")
    }
}

impl fmt::Display for RouteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

/// Identifier of a route (e.g. `R01`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteId(String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of a stop within a route's stop sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StopIndex(pub usize);

impl StopIndex {
    /// Number of stops travelled from `self` to `later`.
    ///
    /// Returns `None` if `later` comes before `self`.
    pub fn stops_until(self, later: StopIndex) -> Option<usize> {
        later.0.checked_sub(self.0)
    }
}

/// A directional bus route.
///
/// # Invariants
///
/// - The stop sequence is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    id: RouteId,
    name: String,
    stops: Vec<Arc<Stop>>,
    color: RouteColor,
}

impl Route {
    /// Create a route.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyRoute` if `stops` is empty.
    pub fn new(
        id: RouteId,
        name: impl Into<String>,
        stops: Vec<Arc<Stop>>,
        color: RouteColor,
    ) -> Result<Self, DomainError> {
        if stops.is_empty() {
            return Err(DomainError::EmptyRoute(id));
        }
        Ok(Self {
            id,
            name: name.into(),
            stops,
            color,
        })
    }

    pub fn id(&self) -> &RouteId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> RouteColor {
        self.color
    }

    /// The full stop sequence, in travel order.
    pub fn stops(&self) -> &[Arc<Stop>] {
        &self.stops
    }

    /// Number of entries in the stop sequence (repeat visits counted).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false: `Route::new` rejects an empty stop sequence.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The stop at a sequence position.
    pub fn stop_at(&self, index: StopIndex) -> Option<&Arc<Stop>> {
        self.stops.get(index.0)
    }

    /// First position in the sequence that visits `stop`.
    pub fn first_index(&self, stop: &StopId) -> Option<StopIndex> {
        self.stops
            .iter()
            .position(|s| &s.id == stop)
            .map(StopIndex)
    }

    /// Check whether the route visits `stop` at all.
    pub fn serves(&self, stop: &StopId) -> bool {
        self.first_index(stop).is_some()
    }

    /// Locate a ride from `board` to `alight`.
    ///
    /// Both stops are matched by first occurrence. Returns `None` if either
    /// is not on the route or if the alight stop comes before the board stop
    /// (routes are never ridden backwards). Equal indices are allowed.
    pub fn ride_indices(&self, board: &StopId, alight: &StopId) -> Option<(StopIndex, StopIndex)> {
        let board_idx = self.first_index(board)?;
        let alight_idx = self.first_index(alight)?;
        (board_idx <= alight_idx).then_some((board_idx, alight_idx))
    }

    /// Stops from `board` to `alight`, both inclusive.
    ///
    /// Returns an empty slice if the indices are reversed or out of range.
    pub fn stops_between(&self, board: StopIndex, alight: StopIndex) -> &[Arc<Stop>] {
        if board > alight || alight.0 >= self.stops.len() {
            return &[];
        }
        &self.stops[board.0..=alight.0]
    }

    /// Coordinates of the stops from `board` to `alight`, both inclusive.
    pub fn path_between(&self, board: StopIndex, alight: StopIndex) -> Vec<GeoPoint> {
        self.stops_between(board, alight)
            .iter()
            .map(|s| s.location)
            .collect()
    }
}
