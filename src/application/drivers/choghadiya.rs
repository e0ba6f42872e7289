//! Choghadiya driver
//!
//! Produces the ordered list of muhurta windows, day slots then night slots as
//! the page lists them. Names repeat across the day legitimately, so slots
//! are never deduplicated.

use tracing::{debug, warn};

use crate::domain::TimedSegment;
use crate::infrastructure::document::Document;
use crate::infrastructure::parsing::{ExtractionContext, RecordExtractor, RowStrategy};
use crate::infrastructure::{ExtractionError, ExtractionResult, SourceDescriptor};

pub struct ChoghadiyaDriver<'a> {
    source: &'a SourceDescriptor,
}

impl<'a> ChoghadiyaDriver<'a> {
    pub const fn new(source: &'a SourceDescriptor) -> Self {
        Self { source }
    }
}

impl RecordExtractor for ChoghadiyaDriver<'_> {
    type Output = Vec<TimedSegment>;

    fn extract(&self, doc: &Document, context: &ExtractionContext) -> ExtractionResult<Self::Output> {
        let mut attempted = Vec::new();
        let mut slots = Vec::new();

        for strategy in self.source.strategies() {
            let RowStrategy::MuhurtaCards(cards) = strategy else {
                continue;
            };
            attempted.push(strategy.name().to_string());
            let segments = cards.segments(doc);
            let found = segments.len();
            slots.extend(segments.into_iter().filter(TimedSegment::is_complete));
            debug!("{} card rows read, {} complete slots so far", found, slots.len());
        }

        if slots.is_empty() {
            warn!("No choghadiya slots found for {}", context.describe());
            return Err(ExtractionError::extraction_empty(self.source.kind(), attempted));
        }
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateSpec, Language, SourceKind};
    use crate::infrastructure::SourceRegistry;

    const ROW: &str = r#"<div class="dpMuhurtaRow">
        <div class="dpMuhurtaName"><span class="dpVerticalMiddleText">{name}</span></div>
        <div class="dpMuhurtaTime"><span class="dpVerticalMiddleText">{start}<span class="dpInlineBlock">{end}</span></span></div>
      </div>"#;

    fn row(name: &str, start: &str, end: &str) -> String {
        ROW.replace("{name}", name).replace("{start}", start).replace("{end}", end)
    }

    #[test]
    fn test_slots_keep_page_order_and_repeats() {
        let markup = format!(
            r#"<div class="dpMuhurtaCard">{}{}{}{}</div>"#,
            row("Amrit", "06:12 AM", "07:45 AM"),
            row("Kaal", "07:45 AM", "09:18 AM"),
            row("Labh", "", ""),
            row("Amrit", "03:00 PM", "04:33 PM"),
        );
        let registry = SourceRegistry::builtin().unwrap();
        let driver = ChoghadiyaDriver::new(registry.get(SourceKind::Choghadiya));
        let context = ExtractionContext::new(SourceKind::Choghadiya, DateSpec::today(), Language::En);

        let slots = driver.extract_markup(&markup, &context).unwrap();
        let names: Vec<_> = slots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Amrit", "Kaal", "Amrit"]);
        assert_eq!(slots[0].start, "06:12 AM");
        assert_eq!(slots[0].end, "07:45 AM");
    }

    #[test]
    fn test_row_matching_every_card_selector_is_read_once() {
        let markup = format!(
            r#"<div class="dpMuhurtaCard">{}{}</div>"#,
            row("Shubh", "09:18 AM", "10:45 AM").replace("dpMuhurtaRow", "dpMuhurtaRow dpChoghadiyaRow"),
            row("Rog", "10:45 AM", "12:12 PM").replace("dpMuhurtaRow", "dpMuhurtaRow dpChoghadiyaRow"),
        );
        let registry = SourceRegistry::builtin().unwrap();
        let driver = ChoghadiyaDriver::new(registry.get(SourceKind::Choghadiya));
        let context = ExtractionContext::new(SourceKind::Choghadiya, DateSpec::today(), Language::En);

        let slots = driver.extract_markup(&markup, &context).unwrap();
        let names: Vec<_> = slots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Shubh", "Rog"]);
    }
}
