//! presenter.rs - Dashboard output
//!
//! The monitor pushes log lines and the full price series into a
//! `Presenter` and asks it to render once per cycle.

use chrono::Local;
use log::warn;
use std::io::{self, Write};

use crate::series::PlotSeries;

/// Rows of price history shown under the log
const MAX_TABLE_ROWS: usize = 10;

/// Display sink for the monitor
pub trait Presenter: Send {
    /// Append log lines, in order
    fn log(&mut self, lines: &[String]);

    /// Replace the plotted series
    fn plot(&mut self, series: &PlotSeries);

    /// Flush pending output to the display
    fn render(&mut self);
}

/// Plain terminal dashboard writing to stdout (or any writer)
pub struct TerminalPresenter<W: Write + Send = io::Stdout> {
    out: W,
    pending: Vec<String>,
    series: PlotSeries,
    plotted: usize,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        TerminalPresenter {
            out,
            pending: Vec::new(),
            series: PlotSeries::default(),
            plotted: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_table(&mut self) -> io::Result<()> {
        let start = self.series.len().saturating_sub(MAX_TABLE_ROWS);

        writeln!(self.out)?;
        writeln!(self.out, "┌───────────────────┬──────────────────┬──────────────────┐")?;
        writeln!(self.out, "│ Time              │ Origin/Outbound  │ Destination/Rtn  │")?;
        writeln!(self.out, "├───────────────────┼──────────────────┼──────────────────┤")?;
        for i in start..self.series.len() {
            writeln!(
                self.out,
                "│ {:17} │ {:>16} │ {:>16} │",
                self.series.labels[i],
                format!("${}", self.series.outbound[i]),
                format!("${}", self.series.inbound[i]),
            )?;
        }
        writeln!(self.out, "└───────────────────┴──────────────────┴──────────────────┘")?;
        if start > 0 {
            writeln!(self.out, "  ... {} earlier points", start)?;
        }
        writeln!(self.out)
    }

    fn flush(&mut self) -> io::Result<()> {
        for line in std::mem::take(&mut self.pending) {
            writeln!(self.out, "{}", line)?;
        }

        // Only redraw the table when the series changed
        if self.series.len() != self.plotted && !self.series.is_empty() {
            self.write_table()?;
            self.plotted = self.series.len();
        }

        self.out.flush()
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn log(&mut self, lines: &[String]) {
        let now = Local::now().format("%m/%d/%y-%H:%M:%S");
        self.pending
            .extend(lines.iter().map(|line| format!("{}: {}", now, line)));
    }

    fn plot(&mut self, series: &PlotSeries) {
        self.series = series.clone();
    }

    fn render(&mut self) {
        if let Err(e) = self.flush() {
            warn!("Failed to render dashboard: {}", e);
        }
    }
}
