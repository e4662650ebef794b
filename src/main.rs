//! main.rs - Entry point for Fare Watch
//!
//! Parses the route and thresholds, then searches for fares every interval
//! until `q` is entered or Ctrl-C is pressed.

use clap::Parser;
use fare_watch::{
    Args, FareMonitor, HttpFareFetcher, LogNotifier, MonitorConfig, Scheduler, TerminalPresenter,
    NAME, VERSION,
};
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

fn is_quit_command(line: &str) -> bool {
    matches!(line.trim(), "q" | "Q" | "quit" | "exit")
}

/// Flip the shutdown flag on Ctrl-C or a quit command on stdin
fn spawn_quit_listeners(shutdown: watch::Sender<bool>) {
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received");
                let _ = on_signal.send(true);
            }
            Err(e) => error!("Failed to listen for Ctrl-C: {}", e),
        }
    });

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if is_quit_command(&line) {
                info!("Quit requested");
                let _ = shutdown.send(true);
                break;
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the dashboard on stdout
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .init();

    let config = MonitorConfig::from(Args::parse());

    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║     ✈  Fare Watch v{:<38}║", VERSION);
    println!("║     Type q + Enter or press Ctrl-C to quit               ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    info!("Starting {} v{}", NAME, VERSION);
    info!("Route: {} ({:?} passengers)", config.route, config.route.passengers);
    info!(
        "Deal thresholds: individual={:?} total={:?}",
        config.thresholds.individual, config.thresholds.total
    );

    let fetcher = HttpFareFetcher::new(&config.fare_endpoint, config.request_timeout)?;
    info!("✓ Fare source: {}", fetcher.endpoint());

    let mut monitor = FareMonitor::new(
        config.route.clone(),
        config.thresholds,
        Box::new(fetcher),
        Box::new(TerminalPresenter::stdout()),
        Box::new(LogNotifier),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    spawn_quit_listeners(shutdown_tx);

    let cycles = Scheduler::new(config.interval)
        .run(&mut monitor, shutdown_rx)
        .await;

    info!(
        "Shutdown complete after {} cycles ({} points recorded)",
        cycles,
        monitor.series().len()
    );

    // The stdin reader sits on a blocking read; exit without waiting for it
    std::process::exit(0)
}
