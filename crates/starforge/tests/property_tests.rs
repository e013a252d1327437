//! Property-based tests for the inference pipeline.
//!
//! These tests use proptest to generate random inputs and verify that
//! profiling, classification, naming and calendar generation maintain
//! their invariants under all conditions.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use starforge::calendar::CalendarGenerator;
use starforge::inference::{parse_numeric, suggest_primary_key, ColumnProfiler, RoleClassifier};
use starforge::synthesis::{derive_dimension_name, fact_table_name};
use starforge::DataTable;

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary cell content, including null markers and junk.
fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,12}",
        "[0-9]{1,6}",
        "[0-9]{1,4},[0-9]{2}",
        "[0-3][0-9]/[0-1][0-9]/20[0-9][0-9]",
        Just(String::new()),
        Just("NA".to_string()),
        Just("-".to_string()),
    ]
}

/// A random rectangular table with 1-5 columns and 0-30 rows.
fn arbitrary_table() -> impl Strategy<Value = DataTable> {
    (1usize..=5, 0usize..=30).prop_flat_map(|(cols, rows)| {
        let headers: Vec<String> = (0..cols).map(|i| format!("col_{}", i)).collect();
        proptest::collection::vec(proptest::collection::vec(cell(), cols), rows)
            .prop_map(move |data| DataTable::new(headers.clone(), data, b';'))
    })
}

/// Raw column names as they arrive from real exports.
fn raw_column_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z_ ]{1,20}",
        "id_[a-z]{1,12}",
        "[a-z]{1,12}_id",
        "C[oó]d\\. [A-Za-z]{1,10}",
        Just(String::new()),
    ]
}

// =============================================================================
// Profiling and Classification
// =============================================================================

proptest! {
    #[test]
    fn prop_profile_ratios_stay_bounded(table in arbitrary_table()) {
        let profiles = ColumnProfiler::new().profile_table(&table);
        prop_assert_eq!(profiles.len(), table.column_count());

        for profile in &profiles {
            prop_assert!((0.0..=1.0).contains(&profile.uniqueness_ratio));
            prop_assert!((0.0..=1.0).contains(&profile.null_ratio));
            prop_assert!(profile.cardinality <= table.row_count());
        }
    }

    #[test]
    fn prop_every_column_gets_exactly_one_verdict(table in arbitrary_table()) {
        let profiles = ColumnProfiler::new().profile_table(&table);
        let verdicts = RoleClassifier::new().classify_all(&profiles);
        prop_assert_eq!(verdicts.len(), profiles.len());
    }

    #[test]
    fn prop_primary_key_selection_is_deterministic(table in arbitrary_table()) {
        let profiles = ColumnProfiler::new().profile_table(&table);
        let verdicts = RoleClassifier::new().classify_all(&profiles);

        let first = suggest_primary_key(&profiles, &verdicts);
        let second = suggest_primary_key(&profiles, &verdicts);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_parse_numeric_never_panics(s in "\\PC{0,20}") {
        let _ = parse_numeric(&s);
    }

    #[test]
    fn prop_parse_numeric_accepts_brazilian_decimals(
        int_part in 0u32..100_000,
        cents in 0u32..100,
    ) {
        let formatted = format!("{},{:02}", int_part, cents);
        let parsed = parse_numeric(&formatted).expect("comma decimal must parse");
        let expected = int_part as f64 + cents as f64 / 100.0;
        prop_assert!((parsed - expected).abs() < 1e-9);
    }
}

// =============================================================================
// Naming
// =============================================================================

proptest! {
    #[test]
    fn prop_dimension_names_are_identifier_safe(name in raw_column_name()) {
        let derived = derive_dimension_name(&name);

        prop_assert!(derived.starts_with("dim_"));
        let stem = &derived["dim_".len()..];
        prop_assert!(!stem.is_empty());
        prop_assert!(stem.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!stem.starts_with('_'));
        prop_assert!(!stem.ends_with('_'));
    }

    #[test]
    fn prop_fact_names_carry_the_prefix(name in raw_column_name()) {
        prop_assert!(fact_table_name(&name).starts_with("fato_"));
    }
}

// =============================================================================
// Calendar
// =============================================================================

proptest! {
    #[test]
    fn prop_calendar_is_gapless_and_counts_monotonically(
        start_offset in 0i64..2000,
        span in 0i64..400,
    ) {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let start = base + chrono::Duration::days(start_offset);
        let end = start + chrono::Duration::days(span);

        let rows = CalendarGenerator::new().generate_range(start, end);
        prop_assert_eq!(rows.len(), (span + 1) as usize);

        for pair in rows.windows(2) {
            prop_assert_eq!(pair[1].date, pair[0].date + chrono::Duration::days(1));

            if pair[1].date.year() == pair[0].date.year() {
                // Within a year the business counter never decreases and
                // never grows by more than one day.
                prop_assert!(pair[1].business_day_of_year >= pair[0].business_day_of_year);
                prop_assert!(pair[1].business_day_of_year <= pair[0].business_day_of_year + 1);
            } else {
                prop_assert!(pair[1].business_day_of_year <= 1);
            }

            if pair[1].is_weekend {
                prop_assert_eq!(
                    pair[1].business_day_of_year,
                    pair[0].business_day_of_year
                );
            }
        }
    }

    #[test]
    fn prop_calendar_generation_is_idempotent(
        start_offset in 0i64..1000,
        span in 0i64..200,
    ) {
        let base = NaiveDate::from_ymd_opt(2022, 6, 15).unwrap();
        let start = base + chrono::Duration::days(start_offset);
        let end = start + chrono::Duration::days(span);

        let generator = CalendarGenerator::new();
        prop_assert_eq!(generator.generate_range(start, end), generator.generate_range(start, end));
    }
}
