//! Render-ready structures derived from backend payloads.
//!
//! Each module is a set of pure functions: the same input always yields the
//! same view, so the rendering layer can rebuild on every state change.

pub mod chart;
pub mod comparison;
pub mod market_actions;

pub use chart::{build_chart, ChartSeries, ChartType, ChartView};
pub use comparison::{build_view, industries, Cell, ComparisonView, TableRow};
pub use market_actions::{date_status, filter_and_sort, DateStatus, SortDirection, SortSpec};
