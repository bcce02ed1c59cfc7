//! Monthly report property tests
//!
//! Tests for the report matrix and export encoder including:
//! - Day range matches the length of the month
//! - Closing stock = opening + purchases - usage
//! - Purchases only count for purchase entries
//! - Description filter is case-insensitive and blank-term identity
//! - CSV output parses back to the same cells

use chrono::NaiveDate;
use proptest::prelude::*;
use shared::{
    build_zip, generate_csv, parse_csv, CsvVariant, Description, EntryKind, MonthlyMatrix,
    StockEntry, YearMonth, LEGACY_PURCHASE_REASON, MAX_REPORT_DAYS,
};

fn description(id: i64, name: &str, opening_stock: i64) -> Description {
    Description {
        id,
        name: name.to_string(),
        opening_stock,
        active: true,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Empty month renders an explicit no-data state upstream
    #[test]
    fn test_no_descriptions_is_empty() {
        let month = YearMonth::new(2024, 3).unwrap();
        let matrix = MonthlyMatrix::from_entries(month, &[], &[]);
        assert!(matrix.is_empty());
        assert_eq!(matrix.days, 31);
    }

    /// One entry per reason, only the legacy purchase marker counts
    #[test]
    fn test_mixed_reasons() {
        let month = YearMonth::new(2024, 3).unwrap();
        let d = description(1, "A4 White Ream", 100);
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let entries = vec![
            StockEntry {
                id: 1,
                entry_date: date,
                description_id: 1,
                color_id: 1,
                purchase_qty: 50,
                usage_qty: 0,
                reason: Some(LEGACY_PURCHASE_REASON.to_string()),
                kind: None,
            },
            StockEntry {
                id: 2,
                entry_date: date,
                description_id: 1,
                color_id: 1,
                purchase_qty: 30,
                usage_qty: 0,
                reason: Some("Returned".to_string()),
                kind: None,
            },
            StockEntry {
                id: 3,
                entry_date: date,
                description_id: 1,
                color_id: 1,
                purchase_qty: 0,
                usage_qty: 12,
                reason: None,
                kind: Some(EntryKind::Usage),
            },
        ];

        let matrix = MonthlyMatrix::from_entries(month, &[d], &entries);
        let row = &matrix.rows[0];
        assert_eq!(row.total_purchase, 50);
        assert_eq!(row.total_usage, 12);
        assert_eq!(row.closing, 138);
    }

    /// Archive is produced even for a single row
    #[test]
    fn test_zip_not_empty() {
        let month = YearMonth::new(2024, 3).unwrap();
        let matrix =
            MonthlyMatrix::from_entries(month, &[description(1, "A4 White Ream", 100)], &[]);
        let bytes = build_zip(&matrix).unwrap();
        // local file header signature
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    /// A description made only of digits is still written as text
    #[test]
    fn test_numeric_description_stays_text() {
        let month = YearMonth::new(2024, 2).unwrap();
        let matrix = MonthlyMatrix::from_entries(month, &[description(1, "500", 40)], &[]);

        for variant in CsvVariant::ALL {
            let csv = generate_csv(variant, &matrix).unwrap();
            let line = csv.lines().nth(1).unwrap();
            assert!(line.starts_with("1,\"500\",40,"), "{}", line);

            let parsed = parse_csv(&csv).unwrap();
            assert_eq!(parsed[1][1], "500");
            assert_eq!(parsed[0].len(), parsed[1].len());
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating a valid month
    fn month_strategy() -> impl Strategy<Value = YearMonth> {
        (1990i32..=2100, 1u32..=12).prop_map(|(y, m)| YearMonth::new(y, m).unwrap())
    }

    /// Strategy for generating entries inside a month for descriptions 1..=3
    fn entry_strategy(month: YearMonth) -> impl Strategy<Value = StockEntry> {
        let days = month.days_in_month();
        (
            1u32..=days,
            1i64..=3,
            0i64..500,
            0i64..500,
            prop_oneof![
                Just(None),
                Just(Some(LEGACY_PURCHASE_REASON.to_string())),
                Just(Some("Daily usage".to_string())),
                Just(Some("new stock received".to_string())),
            ],
            prop_oneof![
                Just(None),
                Just(Some(EntryKind::Purchase)),
                Just(Some(EntryKind::Usage))
            ],
        )
            .prop_map(move |(day, description_id, purchase_qty, usage_qty, reason, kind)| {
                StockEntry {
                    id: 0,
                    entry_date: NaiveDate::from_ymd_opt(month.year(), month.month(), day).unwrap(),
                    description_id,
                    color_id: 1,
                    purchase_qty,
                    usage_qty,
                    reason,
                    kind,
                }
            })
    }

    fn month_with_entries() -> impl Strategy<Value = (YearMonth, Vec<StockEntry>)> {
        month_strategy().prop_flat_map(|month| {
            (
                Just(month),
                prop::collection::vec(entry_strategy(month), 0..40),
            )
        })
    }

    fn descriptions() -> Vec<Description> {
        vec![
            description(1, "A4 White Ream", 100),
            description(2, "A4 Pink Ream", 0),
            description(3, "Packing, Large", 20),
        ]
    }

    /// Plain text for CSV round trips, numeric-looking names included
    fn plain_name() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z0-9][A-Za-z0-9 ]{0,30}[A-Za-z0-9]",
            "[0-9]{1,6}",
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Day range has exactly days_in_month entries numbered 1..=d
        #[test]
        fn prop_day_range_matches_month(month in month_strategy()) {
            let matrix = MonthlyMatrix::from_entries(month, &descriptions(), &[]);
            let days: Vec<u32> = matrix.day_range().collect();
            let expected: Vec<u32> = (1..=month.days_in_month()).collect();

            prop_assert_eq!(days, expected);
            for row in &matrix.rows {
                prop_assert_eq!(row.daily_usage.len(), month.days_in_month() as usize);
                prop_assert_eq!(row.daily_purchase.len(), month.days_in_month() as usize);
            }
        }

        /// Closing = opening + purchase - usage for every row
        #[test]
        fn prop_balance_identity((month, entries) in month_with_entries()) {
            let matrix = MonthlyMatrix::from_entries(month, &descriptions(), &entries);
            for row in &matrix.rows {
                prop_assert_eq!(row.closing, row.opening + row.total_purchase - row.total_usage);
                prop_assert_eq!(row.total_usage, row.daily_usage.iter().sum::<i64>());
                prop_assert_eq!(row.total_purchase, row.daily_purchase.iter().sum::<i64>());
            }
        }

        /// Purchase quantities never count unless the entry is a purchase
        #[test]
        fn prop_purchase_requires_purchase_kind((month, entries) in month_with_entries()) {
            let matrix = MonthlyMatrix::from_entries(month, &descriptions(), &entries);
            for row in &matrix.rows {
                let expected: i64 = entries
                    .iter()
                    .filter(|e| Some(e.description_id) == row.description_id)
                    .filter(|e| match e.kind {
                        Some(kind) => kind == EntryKind::Purchase,
                        None => e.reason.as_deref() == Some(LEGACY_PURCHASE_REASON),
                    })
                    .map(|e| e.purchase_qty)
                    .sum();
                prop_assert_eq!(row.total_purchase, expected);
            }
        }

        /// Blank search terms are the identity, any case matches
        #[test]
        fn prop_filter_case_insensitive(
            (month, entries) in month_with_entries(),
            blank in "[ ]{0,3}",
        ) {
            let matrix = MonthlyMatrix::from_entries(month, &descriptions(), &entries);
            prop_assert_eq!(&matrix.filtered(&blank).rows, &matrix.rows);

            let lower = matrix.filtered("ream");
            let upper = matrix.filtered("REAM");
            prop_assert_eq!(&lower.rows, &upper.rows);
            prop_assert_eq!(lower.rows.len(), 2);
        }

        /// generate -> parse gives back the header and the row cells
        #[test]
        fn prop_csv_round_trip(
            name in plain_name(),
            opening in 0i64..10_000,
            usage in 0i64..1_000,
            day in 1u32..=28,
            month in month_strategy(),
        ) {
            let entry = StockEntry {
                id: 1,
                entry_date: NaiveDate::from_ymd_opt(month.year(), month.month(), day).unwrap(),
                description_id: 1,
                color_id: 1,
                purchase_qty: 0,
                usage_qty: usage,
                reason: None,
                kind: Some(EntryKind::Usage),
            };
            let matrix = MonthlyMatrix::from_entries(
                month,
                &[description(1, &name, opening)],
                &[entry],
            );

            for variant in CsvVariant::ALL {
                let csv = generate_csv(variant, &matrix).unwrap();
                let parsed = parse_csv(&csv).unwrap();
                prop_assert_eq!(parsed.len(), 2);
                prop_assert_eq!(&parsed[0], &variant.headers(MAX_REPORT_DAYS));
                prop_assert_eq!(&parsed[1], &variant.record(&matrix.rows[0], MAX_REPORT_DAYS));

                // the description cell is quoted even when it looks like a number
                let data_line = csv.lines().nth(1).unwrap();
                let expected_prefix = format!("1,\"{}\",", name);
                prop_assert!(data_line.starts_with(&expected_prefix));
            }
        }
    }
}
