//! monitor.rs - One monitoring session for a single route
//!
//! Owns the lowest-fare state, the price history and the collaborators, and
//! runs one fetch -> diff -> store -> alert -> present cycle at a time.

use async_trait::async_trait;
use log::{debug, info};

use crate::alert::{AlertEvaluator, AlertNotice, Notifier};
use crate::diff::{CycleDiff, DiffEngine};
use crate::error::CycleError;
use crate::fare_feed::FareFetcher;
use crate::models::{AlertDecision, AlertThresholds, FareDiff, FareState, RouteQuery, SeriesPoint};
use crate::presenter::Presenter;
use crate::scheduler::Cycle;
use crate::series::SeriesStore;

/// What a successful cycle produced
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    pub diff: CycleDiff,
    pub decision: AlertDecision,
    pub series_len: usize,
}

fn fare_line(leg: &str, price: u64, diff: &FareDiff) -> String {
    let suffix = diff.to_string();
    if suffix.is_empty() {
        format!("Lowest fare for {} is currently ${}", leg, price)
    } else {
        format!("Lowest fare for {} is currently ${} {}", leg, price, suffix)
    }
}

pub struct FareMonitor {
    route: RouteQuery,
    fetcher: Box<dyn FareFetcher>,
    presenter: Box<dyn Presenter>,
    notifier: Box<dyn Notifier>,
    engine: DiffEngine,
    series: SeriesStore,
    evaluator: AlertEvaluator,
}

impl FareMonitor {
    pub fn new(
        route: RouteQuery,
        thresholds: AlertThresholds,
        fetcher: Box<dyn FareFetcher>,
        presenter: Box<dyn Presenter>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let evaluator = AlertEvaluator::new(thresholds, route.passengers);
        FareMonitor {
            route,
            fetcher,
            presenter,
            notifier,
            engine: DiffEngine::new(),
            series: SeriesStore::new(),
            evaluator,
        }
    }

    pub fn state(&self) -> &FareState {
        self.engine.state()
    }

    pub fn series(&self) -> &SeriesStore {
        &self.series
    }

    fn log(&mut self, line: impl Into<String>) {
        self.presenter.log(&[line.into()]);
    }

    /// Run a single cycle.
    ///
    /// The fetch is the only await; nothing is mutated until it returns, so
    /// dropping this future mid-fetch leaves the session unchanged. Only a
    /// fully parsed snapshot is recorded and checked for deals.
    pub async fn run_once(&mut self) -> Result<CycleReport, CycleError> {
        self.log("Searching...");

        let snapshot = match self.fetcher.fetch(&self.route).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.log(format!("Search failed: {}", e));
                self.presenter.render();
                return Err(e.into());
            }
        };

        let had_baseline = self.engine.state().lowest().is_some();
        let diff = self.engine.apply(&snapshot);

        let (Some(outbound), Some(inbound), Some((lowest_outbound, lowest_inbound))) = (
            diff.parsed.outbound,
            diff.parsed.inbound,
            self.engine.state().lowest().filter(|_| diff.is_valid()),
        ) else {
            self.log("Fares are invalid.");
            self.presenter.render();
            return Err(CycleError::Parse {
                outbound: snapshot.outbound_raw,
                inbound: snapshot.inbound_raw,
            });
        };

        let mut lines = Vec::with_capacity(3);
        if had_baseline {
            lines.push("Checking for difference".to_string());
        }
        lines.push(fare_line("an outbound flight", outbound, &diff.outbound));
        lines.push(fare_line("a return flight", inbound, &diff.inbound));
        self.presenter.log(&lines);

        self.series
            .append(SeriesPoint::new(lowest_outbound, lowest_inbound));
        self.presenter.plot(&self.series.plot_series());

        let decision = self.evaluator.evaluate(lowest_outbound, lowest_inbound);
        if decision.fired {
            let notice = AlertNotice {
                route: self.route.clone(),
                lowest_outbound,
                lowest_inbound,
                decision,
            };
            self.log(format!(
                "Deal found! ${} total (${} per passenger) meets the {} price threshold",
                decision.total, decision.per_passenger, decision.reason
            ));
            self.notifier.notify(&notice);
        }

        self.presenter.render();

        Ok(CycleReport {
            diff,
            decision,
            series_len: self.series.len(),
        })
    }
}

#[async_trait]
impl Cycle for FareMonitor {
    type Error = CycleError;

    async fn run_cycle(&mut self) -> Result<(), CycleError> {
        let report = self.run_once().await?;
        debug!(
            "Outbound {:?}, return {:?}, {} points recorded",
            report.diff.outbound, report.diff.inbound, report.series_len
        );
        if report.decision.fired {
            info!("Deal threshold met ({})", report.decision.reason);
        }
        Ok(())
    }
}
