//! Bilingual Field Resolver
//!
//! Maps a [`FieldTable`] onto a [`CanonicalSchema`]. For each schema field the
//! rules are tried in order, and within a rule the table is scanned in its
//! iteration order, so ties go to the higher-priority strategy:
//!
//! 1. a normalized label equals one of the field's terms
//! 2. a normalized label contains an English term (case-insensitive)
//! 3. a normalized label contains a Hindi term (as written)
//!
//! A field nothing matches resolves to `"N/A"`.

use tracing::debug;

use super::normalizer::normalize_label;
use crate::domain::{CanonicalRecord, CanonicalSchema, FieldTable, SchemaField};

/// Which rule produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Exact,
    EnglishContains,
    HindiContains,
}

/// A successful match for one schema field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch<'a> {
    pub rule: MatchRule,
    pub label: &'a str,
    pub value: &'a str,
}

pub fn resolve(schema: &CanonicalSchema, table: &FieldTable) -> CanonicalRecord {
    let record = CanonicalRecord::resolve_with(schema, |field| {
        resolve_field(field, table).map(|found| {
            debug!(
                "Resolved {} via {:?} on label '{}'",
                field.name, found.rule, found.label
            );
            found.value.to_string()
        })
    });
    debug!(
        "Schema {} resolved {}/{} fields",
        schema.name,
        record.available_count(),
        record.len()
    );
    record
}

pub fn resolve_field<'a>(field: &SchemaField, table: &'a FieldTable) -> Option<FieldMatch<'a>> {
    let exact_terms: Vec<String> = field
        .terms()
        .map(normalize_label)
        .filter(|term| !term.is_empty())
        .collect();
    let english_terms: Vec<String> = field
        .english
        .iter()
        .map(|term| normalize_label(term).to_lowercase())
        .filter(|term| !term.is_empty())
        .collect();
    let hindi_terms: Vec<String> = field
        .hindi
        .iter()
        .map(|term| normalize_label(term))
        .filter(|term| !term.is_empty())
        .collect();

    let find = |rule: MatchRule, matches: &dyn Fn(&str) -> bool| {
        table
            .iter()
            .find(|(label, value)| !value.is_empty() && matches(label))
            .map(|(label, value)| FieldMatch { rule, label, value })
    };

    find(MatchRule::Exact, &|label| exact_terms.iter().any(|term| term == label))
        .or_else(|| {
            find(MatchRule::EnglishContains, &|label| {
                let folded = label.to_lowercase();
                english_terms.iter().any(|term| folded.contains(term.as_str()))
            })
        })
        .or_else(|| {
            find(MatchRule::HindiContains, &|label| {
                hindi_terms.iter().any(|term| label.contains(term.as_str()))
            })
        })
}
