mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{cat_and_dog, record};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vitrine_types::{ImageId, ImageRecord};
use vitrine_view::{FilterState, PrimaryFilter, SortKey, apply_filters};

fn ids(records: &[ImageRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

// ── Scenarios ───────────────────────────────────────────────────

#[test]
fn primary_sort_puts_primary_first() {
    let filter = FilterState::new("", SortKey::Primary, PrimaryFilter::All);
    let out = apply_filters(&cat_and_dog(), &filter);
    assert_eq!(ids(&out), vec!["2", "1"]);
}

#[test]
fn search_is_substring_on_public_id() {
    let filter = FilterState::new("ca", SortKey::CreatedAt, PrimaryFilter::All);
    let out = apply_filters(&cat_and_dog(), &filter);
    assert_eq!(ids(&out), vec!["1"]);
}

#[test]
fn search_is_case_insensitive() {
    let filter = FilterState::new("DO", SortKey::CreatedAt, PrimaryFilter::All);
    assert_eq!(ids(&apply_filters(&cat_and_dog(), &filter)), vec!["2"]);
}

#[test]
fn search_without_match_is_empty() {
    let filter = FilterState::new("zebra", SortKey::CreatedAt, PrimaryFilter::All);
    assert!(apply_filters(&cat_and_dog(), &filter).is_empty());
}

#[test]
fn created_at_sort_is_newest_first() {
    let filter = FilterState::default();
    assert_eq!(filter.sort_key, SortKey::CreatedAt);
    assert_eq!(ids(&apply_filters(&cat_and_dog(), &filter)), vec!["2", "1"]);
}

#[test]
fn public_id_sort_is_ascending() {
    let records = vec![
        record("1", "zebra", false, "2024-01-01"),
        record("2", "Ant", false, "2024-01-02"),
        record("3", "mole", true, "2024-01-03"),
    ];
    let filter = FilterState::new("", SortKey::PublicId, PrimaryFilter::All);
    assert_eq!(ids(&apply_filters(&records, &filter)), vec!["2", "3", "1"]);
}

#[test]
fn primary_sort_keeps_page_order_within_groups() {
    let records = vec![
        record("a", "a", false, "2024-01-01"),
        record("b", "b", true, "2024-01-01"),
        record("c", "c", false, "2024-01-01"),
        record("d", "d", true, "2024-01-01"),
    ];
    let filter = FilterState::new("", SortKey::Primary, PrimaryFilter::All);
    assert_eq!(ids(&apply_filters(&records, &filter)), vec!["b", "d", "a", "c"]);
}

#[test]
fn partition_primary_and_secondary() {
    let primary = FilterState::new("", SortKey::CreatedAt, PrimaryFilter::Primary);
    let secondary = FilterState::new("", SortKey::CreatedAt, PrimaryFilter::Secondary);
    assert_eq!(ids(&apply_filters(&cat_and_dog(), &primary)), vec!["2"]);
    assert_eq!(ids(&apply_filters(&cat_and_dog(), &secondary)), vec!["1"]);
}

#[test]
fn empty_input_is_empty_output() {
    assert!(apply_filters(&[], &FilterState::default()).is_empty());
}

// ── Parsing ─────────────────────────────────────────────────────

#[test]
fn sort_key_from_str() {
    assert_eq!("createdAt".parse::<SortKey>().unwrap(), SortKey::CreatedAt);
    assert_eq!("public-id".parse::<SortKey>().unwrap(), SortKey::PublicId);
    assert_eq!("PRIMARY".parse::<SortKey>().unwrap(), SortKey::Primary);
    assert!("size".parse::<SortKey>().is_err());
}

#[test]
fn primary_filter_from_str() {
    assert_eq!("all".parse::<PrimaryFilter>().unwrap(), PrimaryFilter::All);
    assert_eq!("Secondary".parse::<PrimaryFilter>().unwrap(), PrimaryFilter::Secondary);
    assert!("both".parse::<PrimaryFilter>().is_err());
}

#[test]
fn filter_state_serde_uses_camel_case() {
    let filter = FilterState::new("ca", SortKey::PublicId, PrimaryFilter::Secondary);
    let json = serde_json::to_value(&filter).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"searchQuery": "ca", "sortKey": "publicId", "primaryFilter": "secondary"})
    );
    let back: FilterState = serde_json::from_value(json).unwrap();
    assert_eq!(back, filter);
}

// ── Properties ──────────────────────────────────────────────────

fn records_strategy() -> impl Strategy<Value = Vec<ImageRecord>> {
    prop::collection::vec(
        (
            "[a-zA-Z]{0,6}",
            any::<bool>(),
            0i64..1_000,
        ),
        0..25,
    )
    .prop_map(|rows| {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        rows.into_iter()
            .enumerate()
            .map(|(i, (public_id, primary, hours))| {
                let mut r = record(&i.to_string(), &public_id, primary, "2024-01-01");
                r.created_at = base + Duration::hours(hours);
                r.updated_at = r.created_at;
                r
            })
            .collect()
    })
}

fn filter_strategy() -> impl Strategy<Value = FilterState> {
    (
        "[a-zA-Z]{0,2}",
        prop_oneof![Just(SortKey::CreatedAt), Just(SortKey::PublicId), Just(SortKey::Primary)],
        prop_oneof![
            Just(PrimaryFilter::All),
            Just(PrimaryFilter::Primary),
            Just(PrimaryFilter::Secondary)
        ],
    )
        .prop_map(|(q, sort, partition)| FilterState::new(q, sort, partition))
}

proptest! {
    #[test]
    fn output_is_subset_of_input(records in records_strategy(), filter in filter_strategy()) {
        let out = apply_filters(&records, &filter);
        prop_assert!(out.len() <= records.len());
        for r in &out {
            prop_assert!(records.contains(r));
        }
        let unique: std::collections::HashSet<&ImageId> = out.iter().map(|r| &r.id).collect();
        prop_assert_eq!(unique.len(), out.len());
    }

    #[test]
    fn is_idempotent(records in records_strategy(), filter in filter_strategy()) {
        let once = apply_filters(&records, &filter);
        let twice = apply_filters(&once, &filter);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn every_output_matches_filter(records in records_strategy(), filter in filter_strategy()) {
        let out = apply_filters(&records, &filter);
        prop_assert!(out.iter().all(|r| filter.matches(r)));
        let expected = records.iter().filter(|r| filter.matches(r)).count();
        prop_assert_eq!(out.len(), expected);
    }

    #[test]
    fn public_id_sort_is_non_decreasing(records in records_strategy()) {
        let filter = FilterState::new("", SortKey::PublicId, PrimaryFilter::All);
        let out = apply_filters(&records, &filter);
        for pair in out.windows(2) {
            prop_assert!(pair[0].public_id <= pair[1].public_id);
        }
    }

    #[test]
    fn created_at_sort_is_non_increasing(records in records_strategy()) {
        let filter = FilterState::new("", SortKey::CreatedAt, PrimaryFilter::All);
        let out = apply_filters(&records, &filter);
        for pair in out.windows(2) {
            prop_assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn primary_sort_has_no_primary_after_secondary(records in records_strategy()) {
        let filter = FilterState::new("", SortKey::Primary, PrimaryFilter::All);
        let out = apply_filters(&records, &filter);
        for pair in out.windows(2) {
            prop_assert!(pair[0].primary || !pair[1].primary);
        }
    }
}
