//! Rahu-kaal driver
//!
//! The rahu-kaal card is read as a timed segment first; start, end, duration
//! and weekday are derived from it under fixed labels, then the source's
//! remaining strategies add anything else (the city header, label blocks).
//! The schema resolves the derived labels by exact match.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::domain::{CanonicalRecord, RawField, TimedSegment};
use crate::infrastructure::document::Document;
use crate::infrastructure::parsing::{
    collect_from, merge, resolve, Collection, ExtractionContext, RecordExtractor, RowStrategy,
};
use crate::infrastructure::{ExtractionError, ExtractionResult, SourceDescriptor};

static WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(Sunday|Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|रविवार|सोमवार|मंगलवार|बुधवार|गुरुवार|बृहस्पतिवार|शुक्रवार|शनिवार)",
    )
    .expect("static weekday pattern")
});

static DURATION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*[:：\-]?\s*(duration|अवधि)\s*[:：\-]?\s*").expect("static duration marker pattern")
});

/// Labels the card values are published under; matched exactly by the schema
pub const START_LABEL: &str = "Rahu Kaal Begins";
pub const END_LABEL: &str = "Rahu Kaal Ends";
pub const DURATION_LABEL: &str = "Rahu Kaal Duration";

pub struct RahuKaalDriver<'a> {
    source: &'a SourceDescriptor,
}

impl<'a> RahuKaalDriver<'a> {
    pub const fn new(source: &'a SourceDescriptor) -> Self {
        Self { source }
    }

    fn card(&self, doc: &Document) -> Option<TimedSegment> {
        self.source.strategies().iter().find_map(|strategy| match strategy {
            RowStrategy::MuhurtaCards(cards) => cards.segments(doc).into_iter().next(),
            _ => None,
        })
    }
}

/// Fixed-label pairs derived from the rahu-kaal card
pub fn derive_fields(card: &TimedSegment) -> Vec<RawField> {
    let mut fields = vec![
        RawField::new(START_LABEL, card.start.clone()),
        RawField::new(END_LABEL, card.end.clone()),
    ];
    if let Some(note) = &card.note {
        fields.push(RawField::new(DURATION_LABEL, strip_duration_label(note)));
    }
    let weekday_source = card.info.as_deref().unwrap_or(card.name.as_str());
    if let Some(weekday) = WEEKDAY.find(weekday_source) {
        fields.push(RawField::new("weekday", weekday.as_str()));
    }
    fields
}

/// "Duration: 01 Hour 28 Mins" -> "01 Hour 28 Mins"; the label may sit at either end
pub fn strip_duration_label(note: &str) -> String {
    DURATION_MARKER.replace_all(note.trim(), " ").trim().to_string()
}

impl RecordExtractor for RahuKaalDriver<'_> {
    type Output = CanonicalRecord;

    fn extract(&self, doc: &Document, context: &ExtractionContext) -> ExtractionResult<Self::Output> {
        let derived = match self.card(doc) {
            Some(card) => {
                debug!("Rahu-kaal card '{}': {}", card.name, card.span());
                derive_fields(&card)
            }
            None => Vec::new(),
        };

        let initial = merge(Collection::default(), "rahu_kaal_card", derived);
        let collection = collect_from(initial, doc, self.source.strategies());
        if collection.is_empty() {
            warn!("No rahu-kaal fields found for {}", context.describe());
            return Err(ExtractionError::extraction_empty(
                self.source.kind(),
                collection.attempted,
            ));
        }

        Ok(resolve(self.source.schema(), &collection.table()))
    }
}
