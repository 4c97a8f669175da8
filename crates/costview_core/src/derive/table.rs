//! Search filtering and pagination for the cost records table.

use crate::models::CostRecord;

/// Keep the records where any field contains `term`, ignoring case.
///
/// An empty term keeps everything. Order is preserved.
pub fn filter_records<'a>(records: &'a [CostRecord], term: &str) -> Vec<&'a CostRecord> {
    if term.is_empty() {
        return records.iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| matches_term(record, &needle))
        .collect()
}

fn matches_term(record: &CostRecord, needle: &str) -> bool {
    record
        .searchable_values()
        .iter()
        .any(|value| value.to_lowercase().contains(needle))
}

/// Zero-based page of `items`.
///
/// Out-of-range pages come back empty rather than clamped; resetting the
/// page when the page size changes is the caller's job.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let Some(start) = page.checked_mul(page_size) else {
        return &[];
    };
    if page_size == 0 || start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed to show `len` items.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        len.div_ceil(page_size)
    }
}
