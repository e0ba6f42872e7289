//! Label Normalizer
//!
//! Turns raw labels such as `"  Sunrise :"` or `"सूर्योदय:"` into comparison
//! keys. Latin labels are case-folded; labels containing Devanagari are kept
//! byte-for-byte. `normalize_label` is idempotent.

use crate::domain::{FieldTable, RawField};
use crate::infrastructure::document::collapse_whitespace;

/// Punctuation stripped from the end of a label
const TERMINAL_PUNCTUATION: &[char] = &[':', '.', '：', '।'];

pub fn normalize_label(raw: &str) -> String {
    let mut label = collapse_whitespace(raw);

    loop {
        let stripped = label
            .trim_end_matches(TERMINAL_PUNCTUATION)
            .trim_end()
            .to_string();
        if stripped == label {
            break;
        }
        label = stripped;
    }

    if contains_devanagari(&label) {
        label
    } else {
        label.to_lowercase()
    }
}

/// Values only get whitespace cleanup
pub fn normalize_value(raw: &str) -> String {
    collapse_whitespace(raw)
}

pub fn contains_devanagari(text: &str) -> bool {
    text.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}

/// Fold collected pairs into a [`FieldTable`], keeping the first value per normalized label
pub fn build_field_table(fields: &[RawField]) -> FieldTable {
    FieldTable::from_normalized(fields.iter().filter_map(|field| {
        let label = normalize_label(&field.label);
        let value = normalize_value(&field.value);
        (!label.is_empty() && !value.is_empty()).then_some((label, value))
    }))
}
