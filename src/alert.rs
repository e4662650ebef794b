//! alert.rs - Deal threshold evaluation and notification sinks

use log::warn;

use crate::models::{AlertDecision, AlertReason, AlertThresholds, RouteQuery};

/// Check the lowest fares against the configured deal thresholds.
///
/// Stateless: the same inputs always produce the same decision, and a deal
/// that keeps holding fires again on every call.
pub fn evaluate(
    lowest_outbound: u64,
    lowest_inbound: u64,
    passengers: u32,
    thresholds: &AlertThresholds,
) -> AlertDecision {
    let passengers = u64::from(passengers.max(1));
    let total = lowest_outbound.saturating_add(lowest_inbound);
    let per_passenger = total / passengers;

    if let Some(limit) = thresholds.total {
        if total <= limit {
            return AlertDecision::fire(AlertReason::Total, total, per_passenger);
        }
    }

    if let Some(limit) = thresholds.individual {
        // Compare without truncating the per-passenger price
        if u128::from(total) <= u128::from(limit) * u128::from(passengers) {
            return AlertDecision::fire(AlertReason::Individual, total, per_passenger);
        }
    }

    AlertDecision::quiet(total, per_passenger)
}

/// Evaluator bound to one session's thresholds and passenger count
#[derive(Debug, Clone, Copy)]
pub struct AlertEvaluator {
    thresholds: AlertThresholds,
    passengers: u32,
}

impl AlertEvaluator {
    pub fn new(thresholds: AlertThresholds, passengers: Option<u32>) -> Self {
        AlertEvaluator {
            thresholds,
            passengers: passengers.unwrap_or(1),
        }
    }

    pub fn evaluate(&self, lowest_outbound: u64, lowest_inbound: u64) -> AlertDecision {
        evaluate(lowest_outbound, lowest_inbound, self.passengers, &self.thresholds)
    }
}

/// Everything a notifier needs to describe a deal
#[derive(Debug, Clone)]
pub struct AlertNotice {
    pub route: RouteQuery,
    pub lowest_outbound: u64,
    pub lowest_inbound: u64,
    pub decision: AlertDecision,
}

impl AlertNotice {
    pub fn message(&self) -> String {
        format!(
            "Deal alert for {}: ${} total (${} per passenger, {} threshold) - outbound ${}, return ${}",
            self.route,
            self.decision.total,
            self.decision.per_passenger,
            self.decision.reason,
            self.lowest_outbound,
            self.lowest_inbound
        )
    }
}

/// Sink for fired deal alerts
pub trait Notifier: Send {
    fn notify(&mut self, notice: &AlertNotice);
}

/// Notifier that writes deals to the log
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: &AlertNotice) {
        warn!("💰 {}", notice.message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_individual_threshold_fires() {
        let thresholds = AlertThresholds {
            individual: Some(300),
            total: None,
        };
        let decision = evaluate(250, 260, 2, &thresholds);

        assert!(decision.fired);
        assert_eq!(decision.reason, AlertReason::Individual);
        assert_eq!(decision.total, 510);
        assert_eq!(decision.per_passenger, 255);
    }

    #[test]
    fn test_no_thresholds_never_fire() {
        let thresholds = AlertThresholds::default();
        for (out, inb) in [(0, 0), (1, 1), (250, 260), (u64::MAX, u64::MAX)] {
            let decision = evaluate(out, inb, 1, &thresholds);
            assert!(!decision.fired);
            assert_eq!(decision.reason, AlertReason::None);
        }
    }

    #[test]
    fn test_total_takes_precedence() {
        let thresholds = AlertThresholds {
            individual: Some(1000),
            total: Some(600),
        };
        let decision = evaluate(250, 260, 1, &thresholds);
        assert_eq!(decision.reason, AlertReason::Total);
    }

    #[test]
    fn test_total_threshold_is_inclusive() {
        let thresholds = AlertThresholds {
            individual: None,
            total: Some(510),
        };
        assert!(evaluate(250, 260, 3, &thresholds).fired);
        assert!(!evaluate(250, 261, 3, &thresholds).fired);
    }

    #[test]
    fn test_zero_passengers_treated_as_one() {
        let thresholds = AlertThresholds {
            individual: Some(500),
            total: None,
        };
        let decision = evaluate(250, 260, 0, &thresholds);
        assert_eq!(decision.per_passenger, 510);
        assert!(!decision.fired);
    }

    #[test]
    fn test_fractional_per_passenger_not_rounded_into_deal() {
        let thresholds = AlertThresholds {
            individual: Some(255),
            total: None,
        };
        // 511 / 2 = 255.5
        assert!(!evaluate(251, 260, 2, &thresholds).fired);
        assert!(evaluate(250, 260, 2, &thresholds).fired);
    }

    #[test]
    fn test_evaluator_is_idempotent() {
        let evaluator = AlertEvaluator::new(
            AlertThresholds {
                individual: Some(300),
                total: None,
            },
            Some(2),
        );
        let first = evaluator.evaluate(250, 260);
        let second = evaluator.evaluate(250, 260);
        assert_eq!(first, second);
        assert!(second.fired);
    }

    #[test]
    fn test_notice_message_mentions_route() {
        let notice = AlertNotice {
            route: RouteQuery::new("YYZ", "LHR", "2026-12-01", "2026-12-15"),
            lowest_outbound: 250,
            lowest_inbound: 260,
            decision: AlertDecision::fire(AlertReason::Total, 510, 510),
        };
        let message = notice.message();
        assert!(message.contains("YYZ -> LHR"));
        assert!(message.contains("$510 total"));
    }
}
