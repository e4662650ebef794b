//! diff.rs - Lowest-fare comparison engine
//!
//! Classifies every new sample against the best fares seen so far and keeps
//! `FareState` pointing at the historical minimum.

use log::debug;

use crate::models::{DiffDirection, FareDiff, FareSnapshot, FareState, ParsedFare};

/// Result of diffing one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDiff {
    pub outbound: FareDiff,
    pub inbound: FareDiff,
    pub parsed: ParsedFare,
}

impl CycleDiff {
    /// Both directions parsed
    pub fn is_valid(&self) -> bool {
        self.outbound.is_valid() && self.inbound.is_valid()
    }
}

/// Compare one parsed price against the current lowest fare.
///
/// Returns the classified diff and the lowest fare that results from it.
pub fn classify(previous: Option<u64>, current: Option<u64>) -> (FareDiff, Option<u64>) {
    let Some(current) = current else {
        return (FareDiff::invalid(), previous);
    };

    match previous {
        None => (FareDiff::new(DiffDirection::NoBaseline, 0), Some(current)),
        Some(prev) if current < prev => (
            FareDiff::new(DiffDirection::Down, prev - current),
            Some(current),
        ),
        Some(prev) if current > prev => {
            (FareDiff::new(DiffDirection::Up, current - prev), Some(prev))
        }
        Some(prev) => (FareDiff::new(DiffDirection::NoChange, 0), Some(prev)),
    }
}

/// Owns the lowest-fare state for a single route
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    state: FareState,
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known state
    pub fn with_state(state: FareState) -> Self {
        DiffEngine { state }
    }

    pub fn state(&self) -> &FareState {
        &self.state
    }

    /// Diff a snapshot and update the lowest fares.
    ///
    /// Each direction is committed on its own. An invalid side keeps its
    /// previous lowest fare while a valid side still moves.
    pub fn apply(&mut self, snapshot: &FareSnapshot) -> CycleDiff {
        let parsed = ParsedFare::from(snapshot);

        let (outbound, next_outbound) = classify(self.state.lowest_outbound, parsed.outbound);
        let (inbound, next_inbound) = classify(self.state.lowest_inbound, parsed.inbound);

        let diff = CycleDiff {
            outbound,
            inbound,
            parsed,
        };

        self.state.lowest_outbound = next_outbound;
        self.state.lowest_inbound = next_inbound;

        if !diff.is_valid() {
            debug!(
                "Unparsable fares: outbound={:?} inbound={:?}",
                snapshot.outbound_raw, snapshot.inbound_raw
            );
        }
        debug!(
            "Lowest fares now outbound={:?} inbound={:?}",
            self.state.lowest_outbound, self.state.lowest_inbound
        );

        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_at(outbound: u64, inbound: u64) -> DiffEngine {
        DiffEngine::with_state(FareState {
            lowest_outbound: Some(outbound),
            lowest_inbound: Some(inbound),
        })
    }

    #[test]
    fn test_lower_price_moves_down() {
        for (prev, curr) in [(500, 450), (1000, 1), (2, 1)] {
            let (diff, lowest) = classify(Some(prev), Some(curr));
            assert_eq!(diff.direction, DiffDirection::Down);
            assert_eq!(diff.magnitude, prev - curr);
            assert_eq!(lowest, Some(curr));
        }
    }

    #[test]
    fn test_higher_price_keeps_lowest() {
        for (prev, curr) in [(450, 480), (1, 1000)] {
            let (diff, lowest) = classify(Some(prev), Some(curr));
            assert_eq!(diff.direction, DiffDirection::Up);
            assert_eq!(diff.magnitude, curr - prev);
            assert_eq!(lowest, Some(prev));
        }
    }

    #[test]
    fn test_equal_price_no_change() {
        let (diff, lowest) = classify(Some(600), Some(600));
        assert_eq!(diff, FareDiff::new(DiffDirection::NoChange, 0));
        assert_eq!(lowest, Some(600));
    }

    #[test]
    fn test_first_sample_becomes_baseline() {
        for curr in [0, 1, 9_999] {
            let (diff, lowest) = classify(None, Some(curr));
            assert_eq!(diff, FareDiff::new(DiffDirection::NoBaseline, 0));
            assert_eq!(lowest, Some(curr));
        }
    }

    #[test]
    fn test_apply_updates_state() {
        let mut engine = engine_at(500, 600);
        let diff = engine.apply(&FareSnapshot::new("$450", "$610"));

        assert!(diff.is_valid());
        assert_eq!(diff.outbound, FareDiff::new(DiffDirection::Down, 50));
        assert_eq!(diff.inbound, FareDiff::new(DiffDirection::Up, 10));
        assert_eq!(engine.state().lowest(), Some((450, 600)));
    }

    #[test]
    fn test_invalid_direction_only_skips_that_direction() {
        let mut engine = engine_at(500, 600);
        let diff = engine.apply(&FareSnapshot::new("$400", "N/A"));

        assert!(!diff.is_valid());
        assert_eq!(diff.outbound, FareDiff::new(DiffDirection::Down, 100));
        assert_eq!(diff.inbound, FareDiff::invalid());
        assert_eq!(engine.state().lowest(), Some((400, 600)));
    }

    #[test]
    fn test_half_valid_first_sample_sets_baseline() {
        let mut engine = DiffEngine::new();
        let diff = engine.apply(&FareSnapshot::new("$500", "N/A"));

        assert_eq!(diff.outbound.direction, DiffDirection::NoBaseline);
        assert_eq!(engine.state().lowest_outbound, Some(500));
        assert_eq!(engine.state().lowest_inbound, None);

        let diff = engine.apply(&FareSnapshot::new("$520", "$610"));
        assert!(diff.is_valid());
        assert_eq!(diff.outbound, FareDiff::new(DiffDirection::Up, 20));
        assert_eq!(diff.inbound.direction, DiffDirection::NoBaseline);
        assert_eq!(engine.state().lowest(), Some((500, 610)));
    }

    #[test]
    fn test_invalid_first_sample_sets_no_baseline() {
        let mut engine = DiffEngine::new();
        let diff = engine.apply(&FareSnapshot::new("", ""));

        assert!(!diff.is_valid());
        assert_eq!(*engine.state(), FareState::new());
    }

    #[test]
    fn test_lowest_never_increases() {
        let mut engine = DiffEngine::new();
        let mut last = u64::MAX;
        for price in ["700", "650", "800", "640", "900", "640"] {
            engine.apply(&FareSnapshot::new(price, price));
            let lowest = engine.state().lowest_outbound.unwrap();
            assert!(lowest <= last);
            last = lowest;
        }
        assert_eq!(last, 640);
    }
}
