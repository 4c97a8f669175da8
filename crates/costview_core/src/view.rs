//! Display-ready views assembled from the derivation functions.
//!
//! These structs are what a front end renders: the CLI prints them as text or
//! serializes them as JSON. They are rebuilt from scratch on every change of
//! records, summary or table state.

use serde::Serialize;

use crate::derive::{
    color_for, filter_records, format_currency, format_date, page_count, paginate, palette_color,
    share_label, top_n, top_name, Dimension, FractionDigits, StyleToken,
};
use crate::models::{CostRecord, CostSummary};

/// Page sizes a table offers.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

/// How many services the service chart shows.
pub const TOP_SERVICES: usize = 8;

const DEFAULT_PAGE_SIZE: usize = 10;

/// Search and paging state of the records table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableState {
    pub search_term: String,
    /// Zero-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableState {
    /// Update the search term. The current page is kept, so a page past the
    /// end of the narrowed result renders empty.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change the page size and go back to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
        self.page = 0;
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.set_search(term);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.set_page_size(page_size);
        self
    }
}

/// One rendered row of the records table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: i64,
    pub provider: String,
    pub provider_color: StyleToken,
    pub service: String,
    pub resource_name: String,
    /// Hover text for the resource name
    pub resource_tooltip: String,
    pub cost: String,
    pub high_cost: bool,
    pub region: String,
    pub department: String,
    pub environment: String,
    pub environment_tone: StyleToken,
    pub usage_date: String,
}

impl TableRow {
    pub fn from_record(record: &CostRecord) -> Self {
        Self {
            id: record.id,
            provider: record.cloud_provider.clone(),
            provider_color: color_for(&record.cloud_provider, Dimension::Provider),
            service: record.service_name.clone(),
            resource_name: record.resource_name.clone(),
            resource_tooltip: format!("ID: {}", record.resource_id),
            cost: format_currency(record.amount(), &record.currency, FractionDigits::Table),
            high_cost: record.is_high_cost(),
            region: record.region.clone(),
            department: record.department.clone(),
            environment: record.environment.clone(),
            environment_tone: color_for(&record.environment, Dimension::Environment),
            usage_date: format_date(&record.usage_date),
        }
    }
}

/// The searchable, paginated records table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    /// Records matching the search, across all pages
    pub filtered_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn build(records: &[CostRecord], state: &TableState) -> Self {
        let filtered = filter_records(records, &state.search_term);
        let rows = paginate(&filtered, state.page, state.page_size)
            .iter()
            .map(|record| TableRow::from_record(record))
            .collect();

        Self {
            filtered_count: filtered.len(),
            page: state.page,
            page_size: state.page_size,
            page_count: page_count(filtered.len(), state.page_size),
            rows,
        }
    }
}

/// One slice of the provider pie (also a bar of the provider breakdown).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSlice {
    pub name: String,
    pub value: f64,
    pub color: &'static str,
    /// e.g. "AWS (45%)"
    pub label: String,
    /// Tooltip value, whole currency units
    pub display: String,
}

/// One bar of the top-services chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceBar {
    pub name: String,
    pub value: f64,
    pub display: String,
}

/// Chart series derived from the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub currency: String,
    pub providers: Vec<ProviderSlice>,
    pub top_services: Vec<ServiceBar>,
}

impl ChartView {
    pub fn build(summary: &CostSummary) -> Self {
        let provider_total = summary.cost_by_provider.total();

        let providers = summary
            .cost_by_provider
            .iter()
            .enumerate()
            .map(|(index, (name, value))| ProviderSlice {
                name: name.to_string(),
                value,
                color: palette_color(index),
                label: share_label(name, value, provider_total),
                display: format_currency(value, &summary.currency, FractionDigits::Chart),
            })
            .collect();

        let top_services = top_n(&summary.cost_by_service, TOP_SERVICES)
            .into_iter()
            .map(|point| ServiceBar {
                display: format_currency(point.value, &summary.currency, FractionDigits::Chart),
                name: point.name,
                value: point.value,
            })
            .collect();

        Self {
            currency: summary.currency.clone(),
            providers,
            top_services,
        }
    }
}

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCards {
    pub total_cost: String,
    pub total_records: u64,
    pub top_provider: String,
    pub top_service: String,
}

impl SummaryCards {
    pub fn build(summary: &CostSummary) -> Self {
        Self {
            total_cost: format_currency(summary.total_cost, &summary.currency, FractionDigits::Table),
            total_records: summary.total_records,
            top_provider: top_name(&summary.cost_by_provider),
            top_service: top_name(&summary.cost_by_service),
        }
    }
}

/// Everything the dashboard renders for one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: SummaryCards,
    pub charts: ChartView,
    pub table: TableView,
    /// No records were returned at all
    pub is_empty: bool,
}

impl DashboardView {
    pub fn build(records: &[CostRecord], summary: &CostSummary, state: &TableState) -> Self {
        Self {
            cards: SummaryCards::build(summary),
            charts: ChartView::build(summary),
            table: TableView::build(records, state),
            is_empty: records.is_empty(),
        }
    }
}
