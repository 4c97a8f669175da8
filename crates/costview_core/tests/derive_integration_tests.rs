//! Integration tests for the derivation pipeline, from backend JSON to views.

use serde_json::json;

use costview_core::{
    filter_records, grouped_series, paginate, top_n, CostRecord, CostSummary, DashboardView,
    SeriesPoint, TableState,
};

fn backend_records() -> Vec<CostRecord> {
    serde_json::from_value(json!([
        {
            "id": 1,
            "cloudProvider": "AWS",
            "serviceName": "EC2",
            "resourceId": "i-1234567890abcdef0",
            "resourceName": "production-web-server-1",
            "cost": 1200,
            "currency": "USD",
            "region": "us-east-1",
            "accountId": "123456789012",
            "department": "Engineering",
            "environment": "production",
            "usageDate": "2024-01-05T15:45:00",
            "createdAt": "2024-01-06T08:00:00"
        },
        {
            "id": 2,
            "cloudProvider": "GCP",
            "serviceName": "BigQuery",
            "resourceId": "bigquery-analytics",
            "resourceName": "analytics-warehouse",
            "cost": 50,
            "currency": "USD",
            "region": "us-central1",
            "accountId": "project-gcp-001",
            "department": "Data",
            "environment": "development",
            "usageDate": "2024-01-05T09:00:00",
            "createdAt": "2024-01-06T08:00:00"
        }
    ]))
    .unwrap()
}

fn backend_summary() -> CostSummary {
    serde_json::from_value(json!({
        "totalCost": 1250,
        "currency": "USD",
        "totalRecords": 2,
        "costByProvider": {"AWS": 1200, "GCP": 50},
        "costByService": {"EC2": 1200, "BigQuery": 50}
    }))
    .unwrap()
}

/// High-cost flag and provider grouping for a two-record fixture.
#[test]
fn test_end_to_end_dashboard() {
    let records = backend_records();
    let summary = backend_summary();

    let view = DashboardView::build(&records, &summary, &TableState::default());

    let high: Vec<i64> = view
        .table
        .rows
        .iter()
        .filter(|row| row.high_cost)
        .map(|row| row.id)
        .collect();
    assert_eq!(high, vec![1]);

    assert_eq!(
        grouped_series(&summary.cost_by_provider),
        vec![SeriesPoint::new("AWS", 1200.0), SeriesPoint::new("GCP", 50.0)]
    );
    let slices: Vec<(&str, f64)> = view
        .charts
        .providers
        .iter()
        .map(|slice| (slice.name.as_str(), slice.value))
        .collect();
    assert_eq!(slices, vec![("AWS", 1200.0), ("GCP", 50.0)]);

    assert_eq!(view.cards.total_cost, "$1,250.00");
    assert_eq!(view.cards.top_provider, "AWS");
    assert_eq!(view.cards.top_service, "EC2");
    assert!(!view.is_empty);
}

/// Search narrows the table and the count shown above it.
#[test]
fn test_search_through_dashboard() {
    let records = backend_records();
    let summary = backend_summary();
    let state = TableState::default().with_search("BIGQUERY");

    let view = DashboardView::build(&records, &summary, &state);
    assert_eq!(view.table.filtered_count, 1);
    assert_eq!(view.table.rows[0].id, 2);
    assert_eq!(view.table.rows[0].cost, "$50.00");
    // Cards and charts follow the summary, not the search.
    assert_eq!(view.cards.total_records, 2);
}

/// Filtered pages concatenate back to the filtered list.
#[test]
fn test_filter_then_paginate() {
    let mut records = Vec::new();
    for i in 0..17 {
        let mut record = backend_records().remove((i % 2) as usize);
        record.id = i + 1;
        records.push(record);
    }

    let filtered = filter_records(&records, "aws");
    assert_eq!(filtered.len(), 9);

    let pages: Vec<&CostRecord> = (0..4)
        .flat_map(|page| paginate(&filtered, page, 4).iter().copied())
        .collect();
    assert_eq!(pages, filtered);
    assert!(paginate(&filtered, 3, 4).is_empty());
}

#[test]
fn test_top_n_ties_follow_backend_order() {
    let summary: CostSummary = serde_json::from_str(
        r#"{"costByProvider": {"AWS": 100, "GCP": 100, "Azure": 50}}"#,
    )
    .unwrap();

    assert_eq!(
        top_n(&summary.cost_by_provider, 1),
        vec![SeriesPoint::new("AWS", 100.0)]
    );
}
