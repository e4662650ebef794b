//! Fare Watch
//!
//! Samples the cheapest round-trip airfare for one route on a fixed interval,
//! keeps the lowest fare ever seen in each direction, and flags deals.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    Scheduler                         │
//! │  (one cycle at a time, interval between cycles)      │
//! └────────────────────────┬────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                   FareMonitor                        │
//! │  fetch -> DiffEngine -> SeriesStore / AlertEvaluator │
//! └───────┬─────────────────┬──────────────────┬────────┘
//!         │                 │                  │
//!         ▼                 ▼                  ▼
//! ┌───────────────┐ ┌───────────────┐ ┌─────────────────┐
//! │  FareFetcher  │ │   Presenter   │ │    Notifier     │
//! │ Http / Mock   │ │  Terminal     │ │  Log            │
//! └───────────────┘ └───────────────┘ └─────────────────┘
//! ```

pub mod alert;
pub mod config;
pub mod diff;
pub mod error;
pub mod fare_feed;
pub mod models;
pub mod monitor;
pub mod presenter;
pub mod scheduler;
pub mod series;

// Re-export commonly used types
pub use models::{
    AlertDecision,
    AlertReason,
    AlertThresholds,
    DiffDirection,
    FareDiff,
    FareSnapshot,
    FareState,
    ParsedFare,
    RouteQuery,
    SeriesPoint,
};

pub use alert::{AlertEvaluator, LogNotifier, Notifier};
pub use config::{Args, MonitorConfig};
pub use diff::DiffEngine;
pub use error::{CycleError, FetchError};
pub use fare_feed::{FareFetcher, HttpFareFetcher, MockFareFetcher};
pub use monitor::{CycleReport, FareMonitor};
pub use presenter::{Presenter, TerminalPresenter};
pub use scheduler::{Cycle, Scheduler};
pub use series::SeriesStore;

/// Version of the fare tracker
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the package
pub const NAME: &str = env!("CARGO_PKG_NAME");
