//! models.rs - Core data structures for the fare tracker
//!
//! Snapshots, parsed fares, lowest-fare state, diffs, series points and
//! alert types.

use chrono::{DateTime, Utc};
use std::fmt;

/// Route parameters handed to the fare fetcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteQuery {
    pub origin: String,
    pub destination: String,
    pub leave_date: String,
    pub return_date: String,
    pub passengers: Option<u32>,
}

impl RouteQuery {
    pub fn new(origin: &str, destination: &str, leave_date: &str, return_date: &str) -> Self {
        RouteQuery {
            origin: origin.to_string(),
            destination: destination.to_string(),
            leave_date: leave_date.to_string(),
            return_date: return_date.to_string(),
            passengers: None,
        }
    }

    pub fn with_passengers(mut self, passengers: Option<u32>) -> Self {
        self.passengers = passengers;
        self
    }
}

impl fmt::Display for RouteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({} / {})",
            self.origin, self.destination, self.leave_date, self.return_date
        )
    }
}

/// One raw sample as returned by a fetcher, before any parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FareSnapshot {
    pub outbound_raw: String,
    pub inbound_raw: String,
}

impl FareSnapshot {
    pub fn new(outbound_raw: &str, inbound_raw: &str) -> Self {
        FareSnapshot {
            outbound_raw: outbound_raw.to_string(),
            inbound_raw: inbound_raw.to_string(),
        }
    }
}

/// Parse a price out of free text by keeping only its digits.
///
/// `"$1,234"` becomes `1234`. Returns `None` when no digits remain or the
/// number does not fit in a `u64`.
pub fn parse_price(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Parsed prices; `None` marks an invalid direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedFare {
    pub outbound: Option<u64>,
    pub inbound: Option<u64>,
}

impl From<&FareSnapshot> for ParsedFare {
    fn from(snapshot: &FareSnapshot) -> Self {
        ParsedFare {
            outbound: parse_price(&snapshot.outbound_raw),
            inbound: parse_price(&snapshot.inbound_raw),
        }
    }
}

/// Best fares seen so far in this session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FareState {
    pub lowest_outbound: Option<u64>,
    pub lowest_inbound: Option<u64>,
}

impl FareState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both lowest fares, once both directions have a baseline
    pub fn lowest(&self) -> Option<(u64, u64)> {
        Some((self.lowest_outbound?, self.lowest_inbound?))
    }
}

/// Which way a fare moved relative to the lowest known fare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffDirection {
    Down,
    Up,
    NoChange,
    NoBaseline,
    Invalid,
}

/// Classified comparison for one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareDiff {
    pub direction: DiffDirection,
    pub magnitude: u64,
}

impl FareDiff {
    pub fn new(direction: DiffDirection, magnitude: u64) -> Self {
        FareDiff { direction, magnitude }
    }

    pub fn invalid() -> Self {
        Self::new(DiffDirection::Invalid, 0)
    }

    pub fn is_valid(&self) -> bool {
        self.direction != DiffDirection::Invalid
    }
}

impl fmt::Display for FareDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            DiffDirection::Down => write!(f, "(down ${})", self.magnitude),
            DiffDirection::Up => write!(f, "(up ${})", self.magnitude),
            DiffDirection::NoChange => write!(f, "(no change)"),
            DiffDirection::NoBaseline | DiffDirection::Invalid => Ok(()),
        }
    }
}

/// One recorded pair of lowest fares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub outbound_lowest: u64,
    pub inbound_lowest: u64,
}

impl SeriesPoint {
    pub fn new(outbound_lowest: u64, inbound_lowest: u64) -> Self {
        SeriesPoint {
            timestamp: Utc::now(),
            outbound_lowest,
            inbound_lowest,
        }
    }
}

/// Deal ceilings, fixed at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertThresholds {
    pub individual: Option<u64>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertReason {
    Individual,
    Total,
    None,
}

impl fmt::Display for AlertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertReason::Individual => write!(f, "individual"),
            AlertReason::Total => write!(f, "total"),
            AlertReason::None => write!(f, "none"),
        }
    }
}

/// Outcome of a threshold check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertDecision {
    pub fired: bool,
    pub reason: AlertReason,
    pub total: u64,
    pub per_passenger: u64,
}

impl AlertDecision {
    pub fn quiet(total: u64, per_passenger: u64) -> Self {
        AlertDecision {
            fired: false,
            reason: AlertReason::None,
            total,
            per_passenger,
        }
    }

    pub fn fire(reason: AlertReason, total: u64, per_passenger: u64) -> Self {
        AlertDecision {
            fired: true,
            reason,
            total,
            per_passenger,
        }
    }
}
