//! series.rs - Append-only history of lowest fares for plotting

use crate::models::SeriesPoint;

/// Outbound and inbound lines, one entry per recorded point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlotSeries {
    pub labels: Vec<String>,
    pub outbound: Vec<u64>,
    pub inbound: Vec<u64>,
}

impl PlotSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Ordered log of series points. Points are never removed or rewritten.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    points: Vec<SeriesPoint>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, point: SeriesPoint) {
        self.points.push(point);
    }

    /// Read-only view in arrival order
    pub fn snapshot(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Split the history into plot lines labelled with local timestamps
    pub fn plot_series(&self) -> PlotSeries {
        let mut series = PlotSeries::default();
        for point in &self.points {
            series.labels.push(
                point
                    .timestamp
                    .with_timezone(&chrono::Local)
                    .format("%m/%d/%y-%H:%M:%S")
                    .to_string(),
            );
            series.outbound.push(point.outbound_lowest);
            series.inbound.push(point.inbound_lowest);
        }
        series
    }
}
