//! Chart series and top-N selection over grouped cost totals.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::CostBreakdown;

/// Shown when there is nothing to rank.
pub const NOT_AVAILABLE: &str = "N/A";

/// Slice/bar colours, cycled by position.
pub const CHART_PALETTE: [&str; 8] = [
    "#1976d2", "#2e7d32", "#ed6c02", "#9c27b0", "#d32f2f", "#0288d1", "#7b1fa2", "#c2185b",
];

/// One labelled value of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub name: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// The breakdown as a series, in mapping order.
pub fn grouped_series(breakdown: &CostBreakdown) -> Vec<SeriesPoint> {
    breakdown
        .iter()
        .map(|(name, value)| SeriesPoint::new(name, value))
        .collect()
}

/// The `n` largest entries, descending. Ties keep mapping order.
pub fn top_n(breakdown: &CostBreakdown, n: usize) -> Vec<SeriesPoint> {
    let mut series = grouped_series(breakdown);
    // sort_by is stable
    series.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    series.truncate(n);
    series
}

/// Name of the largest entry; the first one wins a tie.
pub fn top_name(breakdown: &CostBreakdown) -> String {
    top_n(breakdown, 1)
        .into_iter()
        .next()
        .map(|point| point.name)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn palette_color(index: usize) -> &'static str {
    CHART_PALETTE[index % CHART_PALETTE.len()]
}

/// Pie slice label, e.g. "AWS (45%)".
pub fn share_label(name: &str, part: f64, total: f64) -> String {
    let percent = if total > 0.0 { part / total * 100.0 } else { 0.0 };
    format!("{} ({:.0}%)", name, percent.round())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn providers() -> CostBreakdown {
        CostBreakdown::new()
            .with("AWS", 100.0)
            .with("GCP", 100.0)
            .with("Azure", 50.0)
    }

    #[test]
    fn test_grouped_series_keeps_mapping_order() {
        let series = grouped_series(&providers());
        let names: Vec<&str> = series.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["AWS", "GCP", "Azure"]);
    }

    #[test]
    fn test_top_one_prefers_first_on_tie() {
        assert_eq!(top_n(&providers(), 1), vec![SeriesPoint::new("AWS", 100.0)]);
        assert_eq!(top_name(&providers()), "AWS");
    }

    #[test]
    fn test_top_n_sorts_descending_and_is_stable() {
        let services = CostBreakdown::new()
            .with("S3", 10.0)
            .with("EC2", 300.0)
            .with("Lambda", 10.0)
            .with("RDS", 200.0);

        let names: Vec<String> = top_n(&services, 8).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["EC2", "RDS", "S3", "Lambda"]);
        assert_eq!(top_n(&services, 2).len(), 2);
        assert!(top_n(&services, 0).is_empty());
    }

    #[test]
    fn test_empty_breakdown_yields_sentinel() {
        let empty = CostBreakdown::new();
        assert!(top_n(&empty, 1).is_empty());
        assert_eq!(top_name(&empty), NOT_AVAILABLE);
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), "#1976d2");
        assert_eq!(palette_color(8), "#1976d2");
        assert_eq!(palette_color(10), "#ed6c02");
    }

    #[test]
    fn test_share_label() {
        assert_eq!(share_label("AWS", 45.4, 100.0), "AWS (45%)");
        assert_eq!(share_label("GCP", 2.0, 3.0), "GCP (67%)");
        assert_eq!(share_label("Azure", 10.0, 0.0), "Azure (0%)");
    }
}
