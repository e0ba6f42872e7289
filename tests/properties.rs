//! Property tests for the normalization and resolution core

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use panchang_scraper::domain::date::locale_to_iso;
use panchang_scraper::domain::{DateSpec, LocaleDateFormat, RawField};
use panchang_scraper::infrastructure::parsing::{build_field_table, merge, normalize_label, resolve, Collection};
use panchang_scraper::infrastructure::Document;
use panchang_scraper::{CanonicalSchema, NOT_AVAILABLE};

fn label() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z ]{0,16}[:.]{0,2}",
        "(सूर्योदय|तिथि|नक्षत्र|चन्द्र राशि|वार)[ :।]{0,2}",
        "\\PC{0,24}",
    ]
}

proptest! {
    #[test]
    fn normalize_label_is_idempotent(raw in label()) {
        let once = normalize_label(&raw);
        prop_assert_eq!(normalize_label(&once), once.clone());
        prop_assert_eq!(once.trim(), once.as_str());
    }

    #[test]
    fn resolved_record_always_covers_schema(
        pairs in prop::collection::vec((label(), "\\PC{0,20}"), 0..24)
    ) {
        let fields: Vec<RawField> = pairs.iter().map(|(l, v)| RawField::new(l.clone(), v.clone())).collect();
        let schema = CanonicalSchema::panchang();
        let record = resolve(&schema, &build_field_table(&fields));

        prop_assert_eq!(record.len(), schema.len());
        for (name, value) in record.iter() {
            prop_assert!(schema.field(name).is_some());
            prop_assert!(!value.is_empty());
            prop_assert!(value == NOT_AVAILABLE || value.trim() == value);
        }
    }

    #[test]
    fn collection_keeps_first_value_per_label(
        first in prop::collection::vec(("[a-z]{1,6}", "[a-z0-9]{1,6}"), 0..12),
        second in prop::collection::vec(("[a-z]{1,6}", "[a-z0-9]{1,6}"), 0..12),
    ) {
        let to_fields = |pairs: &[(String, String)]| -> Vec<RawField> {
            pairs.iter().map(|(l, v)| RawField::new(l.clone(), v.clone())).collect()
        };
        let acc = merge(Collection::default(), "first", to_fields(&first));
        let acc = merge(acc, "second", to_fields(&second));
        let table = acc.table();

        for (label, value) in first.iter().chain(second.iter()) {
            let expected = first
                .iter()
                .chain(second.iter())
                .find(|(l, _)| l == label)
                .map(|(_, v)| v.as_str());
            prop_assert_eq!(table.get(label), expected, "label {} value {}", label, value);
        }
    }

    #[test]
    fn document_parse_never_panics(markup in "\\PC{0,200}") {
        let _ = Document::parse(&markup);
    }

    #[test]
    fn locale_rendering_matches_iso(year in 1900i32..2100, ordinal in 1u32..=366) {
        let Some(calendar) = NaiveDate::from_yo_opt(year, ordinal) else {
            // day 366 of a common year
            return Ok(());
        };
        let (month, day) = (calendar.month(), calendar.day());
        let iso = format!("{year:04}-{month:02}-{day:02}");
        let date = DateSpec::parse_iso(&iso).unwrap();

        prop_assert_eq!(date.to_iso(), iso.clone());
        for format in [LocaleDateFormat::DD_MM_YYYY, LocaleDateFormat::D_M_YYYY] {
            prop_assert_eq!(locale_to_iso(&date.to_locale(format), format).unwrap(), iso.clone());
        }
        prop_assert_eq!(
            date.to_locale(LocaleDateFormat::DD_MM_YYYY),
            format!("{day:02}/{month:02}/{year:04}")
        );
        prop_assert_eq!(DateSpec::from_input(Some(&date.to_locale(LocaleDateFormat::D_M_YYYY))).unwrap(), date);
    }
}
