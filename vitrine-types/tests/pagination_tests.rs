use proptest::prelude::*;
use vitrine_types::{DEFAULT_PAGE_LIMIT, PageSummary, PaginationState};

// ── Construction ────────────────────────────────────────────────

#[test]
fn default_is_empty_first_page() {
    let state = PaginationState::default();
    assert_eq!(state.page, 1);
    assert_eq!(state.total, 0);
    assert_eq!(state.total_pages, 0);
    assert_eq!(state.limit, DEFAULT_PAGE_LIMIT);
}

#[test]
fn new_derives_total_pages() {
    assert_eq!(PaginationState::new(30, 1, 12).total_pages, 3);
    assert_eq!(PaginationState::new(24, 1, 12).total_pages, 2);
    assert_eq!(PaginationState::new(0, 1, 12).total_pages, 0);
    assert_eq!(PaginationState::new(5, 1, 0).total_pages, 0);
}

#[test]
fn normalized_clamps_page_into_range() {
    let state = PaginationState {
        total: 20,
        page: 9,
        limit: 10,
        total_pages: 2,
    }
    .normalized();
    assert_eq!(state.page, 2);

    let zero = PaginationState {
        page: 0,
        ..Default::default()
    }
    .normalized();
    assert_eq!(zero.page, 1);
}

#[test]
fn normalized_fills_missing_total_pages() {
    let state: PaginationState =
        serde_json::from_str(r#"{"total": 25, "page": 2, "limit": 10}"#).unwrap();
    assert_eq!(state.total_pages, 0);
    assert_eq!(state.normalized().total_pages, 3);
}

#[test]
fn deserializes_camel_case() {
    let state: PaginationState =
        serde_json::from_str(r#"{"total": 40, "page": 3, "limit": 12, "totalPages": 4}"#).unwrap();
    assert_eq!(state, PaginationState::new(40, 3, 12));
}

// ── Navigation ──────────────────────────────────────────────────

#[test]
fn contains_page_bounds() {
    let state = PaginationState::new(20, 1, 10);
    assert!(!state.contains_page(0));
    assert!(state.contains_page(1));
    assert!(state.contains_page(2));
    assert!(!state.contains_page(3));
}

#[test]
fn previous_and_next() {
    let first = PaginationState::new(30, 1, 10);
    assert!(!first.has_previous());
    assert!(first.has_next());

    let last = PaginationState::new(30, 3, 10);
    assert!(last.has_previous());
    assert!(!last.has_next());
}

// ── Summary footer ──────────────────────────────────────────────

#[test]
fn summary_on_full_page() {
    let summary = PaginationState::new(30, 2, 12).summary();
    assert_eq!(summary, PageSummary { first: 13, last: 24, total: 30 });
}

#[test]
fn summary_on_partial_last_page() {
    let summary = PaginationState::new(30, 3, 12).summary();
    assert_eq!(summary, PageSummary { first: 25, last: 30, total: 30 });
}

#[test]
fn summary_when_total_is_exact_multiple() {
    let summary = PaginationState::new(24, 2, 12).summary();
    assert_eq!(summary, PageSummary { first: 13, last: 24, total: 24 });
}

#[test]
fn summary_of_empty_listing() {
    let summary = PaginationState::first(12).summary();
    assert_eq!(summary, PageSummary { first: 0, last: 0, total: 0 });
    assert_eq!(summary.to_string(), "Showing 0-0 of 0");
}

// ── Properties ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn normalized_page_is_in_range(total in 0u64..10_000, page in 0u64..2_000, limit in 0u64..100) {
        let state = PaginationState { total, page, limit, total_pages: 0 }.normalized();
        prop_assert!(state.page >= 1);
        prop_assert!(state.page <= state.total_pages.max(1));
    }

    #[test]
    fn summary_never_exceeds_total(total in 1u64..10_000, limit in 1u64..100, page in 1u64..200) {
        let state = PaginationState::new(total, page, limit);
        let summary = state.summary();
        prop_assert!(summary.first >= 1);
        prop_assert!(summary.first <= summary.last);
        prop_assert!(summary.last <= total);
        prop_assert!(summary.last - summary.first < limit);
    }

    #[test]
    fn pages_sum_to_total(total in 0u64..5_000, limit in 1u64..60) {
        let pages = PaginationState::new(total, 1, limit).total_pages;
        let sum: u64 = (1..=pages)
            .map(|page| PaginationState::new(total, page, limit).items_on_page())
            .sum();
        prop_assert_eq!(sum, total);
    }
}
