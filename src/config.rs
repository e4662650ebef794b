//! config.rs - Command line options
//!
//! Arguments are not validated. Numeric options are read leniently and
//! anything that does not parse is treated as if it had not been given.

use clap::Parser;
use std::time::Duration;

use crate::models::{AlertThresholds, RouteQuery};

/// Minutes between cycles when `--interval` is absent or unusable
pub const DEFAULT_INTERVAL_MINUTES: f64 = 30.0;

/// Seconds before a fare lookup is abandoned
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_FARE_ENDPOINT: &str = "http://localhost:8080/fares";

#[derive(Parser, Debug, Clone)]
#[command(name = "fare-watch")]
#[command(about = "Watch a round-trip airfare and flag deals")]
pub struct Args {
    /// Origin airport code
    #[arg(long = "from")]
    pub from: Option<String>,

    /// Destination airport code
    #[arg(long = "to")]
    pub to: Option<String>,

    /// Outbound date
    #[arg(long = "leave-date")]
    pub leave_date: Option<String>,

    /// Return date
    #[arg(long = "return-date")]
    pub return_date: Option<String>,

    /// Adult passenger count
    #[arg(long)]
    pub passengers: Option<String>,

    /// Alert when the price per passenger is at or below this
    #[arg(long = "individual-deal-price")]
    pub individual_deal_price: Option<String>,

    /// Alert when the total price is at or below this
    #[arg(long = "total-deal-price")]
    pub total_deal_price: Option<String>,

    /// Minutes between searches
    #[arg(long)]
    pub interval: Option<String>,

    /// Fare lookup endpoint
    #[arg(long = "fare-endpoint", default_value = DEFAULT_FARE_ENDPOINT)]
    pub fare_endpoint: String,

    /// Seconds before a fare lookup times out
    #[arg(long = "request-timeout")]
    pub request_timeout: Option<String>,
}

/// Leading integer of `text`, the way a loose `parseInt` reads it
pub fn lenient_int(text: &str) -> Option<u64> {
    let digits: String = text
        .trim_start()
        .trim_start_matches('+')
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Longest numeric prefix of `text` as a float
pub fn lenient_float(text: &str) -> Option<f64> {
    let text = text.trim();
    (1..=text.len())
        .rev()
        .filter(|&end| text.is_char_boundary(end))
        .find_map(|end| text[..end].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Resolved settings for one monitoring session
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub route: RouteQuery,
    pub thresholds: AlertThresholds,
    pub interval: Duration,
    pub fare_endpoint: String,
    pub request_timeout: Duration,
}

impl From<Args> for MonitorConfig {
    fn from(args: Args) -> Self {
        let passengers = args
            .passengers
            .as_deref()
            .and_then(lenient_int)
            .and_then(|n| u32::try_from(n).ok());

        let route = RouteQuery {
            origin: args.from.unwrap_or_default(),
            destination: args.to.unwrap_or_default(),
            leave_date: args.leave_date.unwrap_or_default(),
            return_date: args.return_date.unwrap_or_default(),
            passengers,
        };

        let thresholds = AlertThresholds {
            individual: args.individual_deal_price.as_deref().and_then(lenient_int),
            total: args.total_deal_price.as_deref().and_then(lenient_int),
        };

        let minutes = args
            .interval
            .as_deref()
            .and_then(lenient_float)
            .unwrap_or(DEFAULT_INTERVAL_MINUTES);
        let interval = Duration::try_from_secs_f64(minutes * 60.0).unwrap_or_else(|_| {
            Duration::from_secs_f64(DEFAULT_INTERVAL_MINUTES * 60.0)
        });

        let request_timeout = Duration::from_secs(
            args.request_timeout
                .as_deref()
                .and_then(lenient_int)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );

        MonitorConfig {
            route,
            thresholds,
            interval,
            fare_endpoint: args.fare_endpoint,
            request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> MonitorConfig {
        let mut full = vec!["fare-watch"];
        full.extend_from_slice(argv);
        Args::parse_from(full).into()
    }

    #[test]
    fn test_full_command_line() {
        let config = parse(&[
            "--from", "YYZ",
            "--to", "YVR",
            "--leave-date", "11/02/2026",
            "--return-date", "11/09/2026",
            "--passengers", "2",
            "--individual-deal-price", "300",
            "--total-deal-price", "550",
            "--interval", "0.5",
        ]);

        assert_eq!(config.route.origin, "YYZ");
        assert_eq!(config.route.destination, "YVR");
        assert_eq!(config.route.passengers, Some(2));
        assert_eq!(config.thresholds.individual, Some(300));
        assert_eq!(config.thresholds.total, Some(550));
        assert_eq!(config.interval, Duration::from_secs(30));
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);

        assert_eq!(config.route, RouteQuery::default());
        assert_eq!(config.thresholds, AlertThresholds::default());
        assert_eq!(config.interval, Duration::from_secs(30 * 60));
        assert_eq!(config.fare_endpoint, DEFAULT_FARE_ENDPOINT);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_malformed_numbers_are_absent() {
        let config = parse(&[
            "--passengers", "two",
            "--individual-deal-price", "cheap",
            "--total-deal-price=-5",
            "--interval", "soon",
        ]);

        assert_eq!(config.route.passengers, None);
        assert_eq!(config.thresholds, AlertThresholds::default());
        assert_eq!(config.interval, Duration::from_secs(30 * 60));
    }

    #[test]
    fn test_lenient_prefix_parsing() {
        assert_eq!(lenient_int("300abc"), Some(300));
        assert_eq!(lenient_int("  42"), Some(42));
        assert_eq!(lenient_int("$300"), None);
        assert_eq!(lenient_float("1.5min"), Some(1.5));
        assert_eq!(lenient_float("abc"), None);
    }
}
