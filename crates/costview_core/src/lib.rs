//! # costview_core
//!
//! Cost data model and view derivation for costview.
//!
//! This crate holds the entities served by the cost backend and the pure
//! functions that turn them into the views a dashboard renders.
//!
//! # Architecture
//!
//! - **Models**: `CostRecord`, `CostSummary` and the ordered `CostBreakdown`
//! - **Derive**: search filter, pagination, currency/date formatting, colour
//!   lookup and chart series
//! - **View**: table, chart and summary-card structs built from the above
//!
//! Nothing in here performs I/O or fails on malformed-but-present data.
//!
//! # Example
//!
//! ```rust,ignore
//! use costview_core::{DashboardView, TableState};
//!
//! let state = TableState::default().with_search("ec2");
//! let view = DashboardView::build(&records, &summary, &state);
//! println!("Cost Records ({})", view.table.filtered_count);
//! ```

pub mod derive;
pub mod error;
pub mod models;
pub mod view;

// Re-export main types for convenience
pub use derive::{
    color_for, filter_records, format_currency, format_date, format_thousands_tick,
    grouped_series, page_count, paginate, palette_color, share_label, top_n, top_name,
    try_format_currency, CloudProvider, DeploymentEnvironment, Dimension, FractionDigits,
    SeriesPoint, StyleToken, Tone, CHART_PALETTE, DEFAULT_PROVIDER_COLOR, INVALID_DATE,
    NOT_AVAILABLE,
};
pub use error::{CoreError, CoreResult};
pub use models::{CostBreakdown, CostRecord, CostSnapshot, CostSummary, HIGH_COST_THRESHOLD};
pub use view::{
    ChartView, DashboardView, ProviderSlice, ServiceBar, SummaryCards, TableRow, TableState,
    TableView, PAGE_SIZE_OPTIONS, TOP_SERVICES,
};
