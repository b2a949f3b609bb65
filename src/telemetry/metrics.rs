//! Board counters
//!
//! Recorded through the `metrics` facade; a no-op unless a recorder is
//! installed by the embedding application.

/// Counter metric types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMetric {
    /// Bookmaker left out of a consensus estimate
    QuotesExcluded,
    /// Bookmaker cell computed
    CellsComputed,
    /// Bookmaker cell rendered as N/A
    CellsUnavailable,
    /// Cell flagged as actionable value bet
    ValueBetsFlagged,
}

impl CounterMetric {
    /// Exported metric name
    pub fn name(&self) -> &'static str {
        match self {
            CounterMetric::QuotesExcluded => "oddsboard_quotes_excluded_total",
            CounterMetric::CellsComputed => "oddsboard_cells_computed_total",
            CounterMetric::CellsUnavailable => "oddsboard_cells_unavailable_total",
            CounterMetric::ValueBetsFlagged => "oddsboard_value_bets_total",
        }
    }
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric) {
    ::metrics::counter!(metric.name()).increment(1);
    tracing::trace!(metric = metric.name(), "Counter incremented");
}
