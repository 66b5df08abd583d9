use serde::Serialize;

/// How a fetched table is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// Point-in-time metrics: one tile per column.
    Snapshot,
    /// Charted history with descriptive statistics.
    Timeseries,
}

/// A single view requested from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    LineChart,
    AreaChart,
    Statistics,
    MetricTiles,
    RawTable,
}

impl PresentationMode {
    /// Views to render, in display order. The raw table is always last.
    pub fn views(&self) -> &'static [View] {
        match self {
            Self::Timeseries => &[View::LineChart, View::AreaChart, View::Statistics, View::RawTable],
            Self::Snapshot => &[View::MetricTiles, View::RawTable],
        }
    }
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::LineChart => "Line Chart",
            Self::AreaChart => "Area Chart",
            Self::Statistics => "Statistics",
            Self::MetricTiles => "Bitcoin Metrics",
            Self::RawTable => "Raw Data",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_table_is_always_requested() {
        for mode in [PresentationMode::Snapshot, PresentationMode::Timeseries] {
            assert_eq!(mode.views().last(), Some(&View::RawTable));
        }
        assert!(!PresentationMode::Snapshot.views().contains(&View::LineChart));
    }
}
