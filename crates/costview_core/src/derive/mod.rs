//! Pure transformations from raw cost entities to display-ready values.
//!
//! Every function here is synchronous, deterministic and total: malformed
//! input degrades to a fallback rendering, never to an error or a panic.

pub mod format;
pub mod series;
pub mod style;
pub mod table;

pub use format::{
    format_currency, format_date, format_thousands_tick, try_format_currency, FractionDigits,
    INVALID_DATE,
};
pub use series::{
    grouped_series, palette_color, share_label, top_n, top_name, SeriesPoint, CHART_PALETTE,
    NOT_AVAILABLE,
};
pub use style::{
    color_for, CloudProvider, DeploymentEnvironment, Dimension, StyleToken, Tone,
    DEFAULT_PROVIDER_COLOR,
};
pub use table::{filter_records, page_count, paginate};
