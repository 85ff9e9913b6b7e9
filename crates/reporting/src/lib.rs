//! Campaign aggregation and ranking engine: summary metrics, status and
//! platform distributions, the sortable table view, and display formatting.
//!
//! Every entry point is a pure function over a borrowed campaign slice.

pub mod dashboard;
pub mod defaults;
pub mod distribution;
pub mod engagement;
pub mod format;
pub mod summary;
pub mod table;

pub use dashboard::{DashboardSnapshot, DataState, SummaryCard};
pub use defaults::MetricDefaults;
pub use distribution::{PieSlice, PlatformDistribution, StatusDistribution};
pub use engagement::EngagementChart;
pub use summary::{PerformanceMetrics, SummaryMetrics};
pub use table::{next_sort_state, SortDirection, SortKey, SortState, StatusFilter, TableQuery, TableView};

/// `numerator / denominator * 100`, or `0.0` when the denominator is zero.
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}
