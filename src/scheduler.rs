//! scheduler.rs - Serial, self-rescheduling cycle loop
//!
//! The next cycle is only started `interval` after the previous one settled,
//! so two cycles never overlap. A shutdown signal stops the loop at once and
//! drops whatever cycle is in flight.

use async_trait::async_trait;
use log::{debug, info, warn};
use std::fmt;
use std::time::Duration;
use tokio::sync::watch;

/// One unit of work driven by the scheduler
#[async_trait]
pub trait Cycle: Send {
    type Error: fmt::Display + Send;

    async fn run_cycle(&mut self) -> Result<(), Self::Error>;
}

/// Resolves once `true` has been sent. A dropped sender never resolves.
async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Scheduler { interval }
    }

    /// Run `job` until shutdown is signalled.
    ///
    /// Returns the number of cycles that settled, failed ones included.
    pub async fn run<C: Cycle>(&self, job: &mut C, mut shutdown: watch::Receiver<bool>) -> u64 {
        let mut cycles: u64 = 0;

        info!("🔄 Starting monitor loop (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                biased;
                _ = wait_for_shutdown(&mut shutdown) => {
                    info!("Shutdown requested, abandoning in-flight cycle");
                    break;
                }
                result = job.run_cycle() => {
                    cycles += 1;
                    match result {
                        Ok(()) => debug!("Cycle #{} complete", cycles),
                        Err(e) => warn!("Cycle #{} failed: {}", cycles, e),
                    }
                }
            }

            tokio::select! {
                biased;
                _ = wait_for_shutdown(&mut shutdown) => {
                    info!("Shutdown requested");
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        cycles
    }
}
