//! Plain-text rendering of the dashboard views.

use std::fmt::Write;

use costview_core::{
    format_currency, format_date, format_thousands_tick, ChartView, CostRecord, FractionDigits,
    SummaryCards, TableView,
};

const BAR_WIDTH: usize = 30;

/// Summary cards as a four-line block.
pub fn render_cards(cards: &SummaryCards) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "💰 Total Cost:     {}", cards.total_cost);
    let _ = writeln!(out, "🧾 Total Records:  {}", cards.total_records);
    let _ = writeln!(out, "☁️  Top Provider:   {}", cards.top_provider);
    let _ = writeln!(out, "🗄️  Top Service:    {}", cards.top_service);
    out
}

/// Provider shares and the top services as horizontal bars.
pub fn render_charts(charts: &ChartView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Cost by Cloud Provider");
    if charts.providers.is_empty() {
        let _ = writeln!(out, "   (no data)");
    }
    let provider_max = charts.providers.iter().map(|p| p.value).fold(0.0, f64::max);
    for slice in &charts.providers {
        let _ = writeln!(
            out,
            "   {:<16} {:<width$} {:>12}",
            truncate(&slice.label, 16),
            bar(slice.value, provider_max),
            slice.display,
            width = BAR_WIDTH
        );
    }

    let _ = writeln!(out);
    let service_max = charts.top_services.first().map(|s| s.value).unwrap_or(0.0);
    let _ = writeln!(
        out,
        "Top Services by Cost (scale {})",
        format_thousands_tick(service_max, &charts.currency)
    );
    if charts.top_services.is_empty() {
        let _ = writeln!(out, "   (no data)");
    }
    for service in &charts.top_services {
        let _ = writeln!(
            out,
            "   {:<16} {:<width$} {:>12}",
            truncate(&service.name, 16),
            bar(service.value, service_max),
            service.display,
            width = BAR_WIDTH
        );
    }
    out
}

/// Records table with a header line and a paging footer.
pub fn render_table(table: &TableView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Cost Records ({})", table.filtered_count);
    let _ = writeln!(
        out,
        "{:>6}  {:<8} {:<18} {:<26} {:>14}  {:<12} {:<12} {:<12} {}",
        "ID", "Provider", "Service", "Resource", "Cost", "Region", "Department", "Environment",
        "Usage Date"
    );

    for row in &table.rows {
        let cost = if row.high_cost {
            format!("▲ {}", row.cost)
        } else {
            row.cost.clone()
        };
        let _ = writeln!(
            out,
            "{:>6}  {:<8} {:<18} {:<26} {:>14}  {:<12} {:<12} {:<12} {}",
            row.id,
            truncate(&row.provider, 8),
            truncate(&row.service, 18),
            truncate(&row.resource_name, 26),
            cost,
            truncate(&row.region, 12),
            truncate(&row.department, 12),
            truncate(&row.environment, 12),
            row.usage_date
        );
    }

    if table.filtered_count == 0 {
        let _ = writeln!(out, "   No matching cost records.");
    } else if table.rows.is_empty() {
        let _ = writeln!(out, "   No records on this page.");
    }

    let _ = writeln!(
        out,
        "Page {} of {} · {} per page",
        table.page + 1,
        table.page_count.max(1),
        table.page_size
    );
    out
}

/// Every field of one record.
pub fn render_record(record: &CostRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Cost record #{}", record.id);
    let _ = writeln!(out, "   Provider:     {}", record.cloud_provider);
    let _ = writeln!(out, "   Service:      {}", record.service_name);
    let _ = writeln!(out, "   Resource:     {} ({})", record.resource_name, record.resource_id);
    let _ = writeln!(
        out,
        "   Cost:         {}{}",
        format_currency(record.amount(), &record.currency, FractionDigits::Table),
        if record.is_high_cost() { "  ▲ high" } else { "" }
    );
    let _ = writeln!(out, "   Region:       {}", record.region);
    let _ = writeln!(out, "   Account:      {}", record.account_id);
    let _ = writeln!(out, "   Department:   {}", record.department);
    let _ = writeln!(out, "   Environment:  {}", record.environment);
    let _ = writeln!(out, "   Usage date:   {}", format_date(&record.usage_date));
    let _ = writeln!(out, "   Created:      {}", format_date(&record.created_at));
    out
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.clamp(1, BAR_WIDTH))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use costview_core::{CostBreakdown, CostSummary, TableState};

    fn summary() -> CostSummary {
        CostSummary {
            total_cost: 1250.0,
            currency: "USD".into(),
            total_records: 2,
            cost_by_provider: CostBreakdown::new().with("AWS", 1200.0).with("GCP", 50.0),
            cost_by_service: CostBreakdown::new().with("EC2", 1200.0).with("BigQuery", 50.0),
        }
    }

    #[test]
    fn test_render_cards() {
        let text = render_cards(&SummaryCards::build(&summary()));
        assert!(text.contains("$1,250.00"));
        assert!(text.contains("Top Provider:   AWS"));
        assert!(text.contains("Top Service:    EC2"));
    }

    #[test]
    fn test_render_charts() {
        let text = render_charts(&ChartView::build(&summary()));
        assert!(text.contains("AWS (96%)"));
        assert!(text.contains("$1,200"));
        assert!(text.contains("scale $1k"));
        assert!(text.contains(&"█".repeat(BAR_WIDTH)));
    }

    #[test]
    fn test_render_table_marks_high_cost() {
        let records = vec![
            CostRecord {
                id: 1,
                cloud_provider: "AWS".into(),
                service_name: "EC2".into(),
                cost: Some(1200.0),
                currency: "USD".into(),
                ..Default::default()
            },
            CostRecord {
                id: 2,
                cloud_provider: "GCP".into(),
                cost: Some(50.0),
                currency: "USD".into(),
                ..Default::default()
            },
        ];
        let text = render_table(&TableView::build(&records, &TableState::default()));
        assert!(text.starts_with("Cost Records (2)"));
        assert!(text.contains("▲ $1,200.00"));
        assert!(!text.contains("▲ $50.00"));
        assert!(text.contains("Page 1 of 1 · 10 per page"));
    }

    #[test]
    fn test_render_empty_table() {
        let text = render_table(&TableView::build(&[], &TableState::default()));
        assert!(text.contains("No matching cost records."));
        assert!(text.contains("Page 1 of 1"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("production-web-server-1", 10), "productio…");
        assert_eq!(truncate("EC2", 10), "EC2");
    }
}
