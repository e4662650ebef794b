//! fare_feed.rs - Fare sources for the monitor
//!
//! `HttpFareFetcher` asks a fare lookup service for the cheapest outbound and
//! return prices of a route. `MockFareFetcher` replays a scripted sequence.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::error::FetchError;
use crate::models::{FareSnapshot, RouteQuery};

/// Trait defining the interface for fare sources
#[async_trait]
pub trait FareFetcher: Send + Sync {
    /// Retrieve the current lowest outbound and return prices as raw text
    async fn fetch(&self, route: &RouteQuery) -> Result<FareSnapshot, FetchError>;
}

// ============================================================================
// Fare lookup API response
// ============================================================================

#[derive(Debug, Deserialize)]
struct FareResponse {
    #[serde(default)]
    outbound: Value,

    #[serde(default)]
    inbound: Value,
}

/// Prices may come back as text ("$1,234") or as bare numbers
fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

impl From<FareResponse> for FareSnapshot {
    fn from(response: FareResponse) -> Self {
        FareSnapshot {
            outbound_raw: raw_text(&response.outbound),
            inbound_raw: raw_text(&response.inbound),
        }
    }
}

// ============================================================================
// HttpFareFetcher
// ============================================================================

/// Fetches fares from an HTTP endpoint answering
/// `GET <endpoint>?from=..&to=..&leave_date=..&return_date=..&passengers=..`
/// with `{"outbound": .., "inbound": ..}`.
#[derive(Debug, Clone)]
pub struct HttpFareFetcher {
    client: Client,
    endpoint: String,
}

impl HttpFareFetcher {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(HttpFareFetcher {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query_params(route: &RouteQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("from", route.origin.clone()),
            ("to", route.destination.clone()),
            ("leave_date", route.leave_date.clone()),
            ("return_date", route.return_date.clone()),
        ];
        if let Some(passengers) = route.passengers {
            params.push(("passengers", passengers.to_string()));
        }
        params
    }
}

#[async_trait]
impl FareFetcher for HttpFareFetcher {
    async fn fetch(&self, route: &RouteQuery) -> Result<FareSnapshot, FetchError> {
        debug!("Fetching fares from {} for {}", self.endpoint, route);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&Self::query_params(route))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let data: FareResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Payload(e.to_string())
            } else {
                FetchError::Http(e)
            }
        })?;

        Ok(data.into())
    }
}

// ============================================================================
// MockFareFetcher - For testing purposes
// ============================================================================

/// Replays scripted results in order, then reports the source as unavailable
#[derive(Debug, Default)]
pub struct MockFareFetcher {
    script: Mutex<VecDeque<Result<FareSnapshot, FetchError>>>,
}

impl MockFareFetcher {
    pub fn new(script: Vec<Result<FareSnapshot, FetchError>>) -> Self {
        MockFareFetcher {
            script: Mutex::new(script.into()),
        }
    }

    /// Script of successful snapshots from (outbound, inbound) pairs
    pub fn from_prices(prices: &[(&str, &str)]) -> Self {
        Self::new(
            prices
                .iter()
                .map(|(out, inb)| Ok(FareSnapshot::new(out, inb)))
                .collect(),
        )
    }

    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }
}

#[async_trait]
impl FareFetcher for MockFareFetcher {
    async fn fetch(&self, route: &RouteQuery) -> Result<FareSnapshot, FetchError> {
        debug!("MockFareFetcher fetch for {}", route);
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Unavailable("script exhausted".to_string())))
    }
}
