//! Candidate Row Collector
//!
//! Runs every strategy of a source, in priority order, and folds their pairs
//! into one stable union. Sources mix structural styles on the same page, so
//! there is no short-circuit: a later strategy can only add labels an earlier
//! one did not produce.

use std::collections::HashSet;
use tracing::debug;

use super::normalizer::{normalize_label, normalize_value};
use super::strategy::RowStrategy;
use crate::domain::{FieldTable, RawField};
use crate::infrastructure::document::Document;

/// Everything one collection pass produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    /// Surviving pairs, first occurrence per normalized label, in priority order
    pub fields: Vec<RawField>,
    /// Every strategy that ran
    pub attempted: Vec<String>,
    /// Strategies that contributed at least one candidate pair
    pub productive: Vec<String>,
    /// Normalized labels of `fields`
    seen: HashSet<String>,
}

impl Collection {
    /// Normalized view of the collected pairs
    pub fn table(&self) -> FieldTable {
        FieldTable::from_normalized(
            self.fields
                .iter()
                .map(|field| (normalize_label(&field.label), normalize_value(&field.value))),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Collect candidate pairs from `doc` using `strategies` in order
pub fn collect(doc: &Document, strategies: &[RowStrategy]) -> Collection {
    collect_from(Collection::default(), doc, strategies)
}

/// Like [`collect`], on top of pairs a driver already derived
pub fn collect_from(initial: Collection, doc: &Document, strategies: &[RowStrategy]) -> Collection {
    strategies.iter().fold(initial, |acc, strategy| {
        let found = strategy.extract(doc);
        merge(acc, strategy.name(), found)
    })
}

/// Fold one strategy's output into the running collection.
///
/// Pairs with an empty label or value are discarded; a label already seen
/// (after normalization) keeps its earlier value.
pub fn merge(mut acc: Collection, strategy: &str, found: Vec<RawField>) -> Collection {
    acc.attempted.push(strategy.to_string());

    let mut contributed = 0usize;
    for field in found {
        let label = normalize_label(&field.label);
        if label.is_empty() || normalize_value(&field.value).is_empty() {
            continue;
        }
        contributed += 1;
        if acc.seen.insert(label) {
            acc.fields.push(field);
        }
    }

    if contributed > 0 {
        acc.productive.push(strategy.to_string());
    }
    debug!(
        "Collector merged {} usable pairs from {} ({} unique so far)",
        contributed,
        strategy,
        acc.fields.len()
    );
    acc
}
