//! Daily horoscope driver
//!
//! The page is prose, not label/value data, so this driver uses the
//! body-text sniffer instead of the collector and resolver. The schema has a
//! single `body_text` field.

use tracing::{debug, warn};

use crate::domain::CanonicalRecord;
use crate::infrastructure::document::Document;
use crate::infrastructure::parsing::{ExtractionContext, RecordExtractor};
use crate::infrastructure::{ExtractionError, ExtractionResult, SourceDescriptor};

/// Schema field filled by the sniffer
pub const BODY_TEXT_FIELD: &str = "body_text";

pub struct HoroscopeDriver<'a> {
    source: &'a SourceDescriptor,
}

impl<'a> HoroscopeDriver<'a> {
    pub const fn new(source: &'a SourceDescriptor) -> Self {
        Self { source }
    }
}

impl RecordExtractor for HoroscopeDriver<'_> {
    type Output = CanonicalRecord;

    fn extract(&self, doc: &Document, context: &ExtractionContext) -> ExtractionResult<Self::Output> {
        let body = self.source.body_text().and_then(|sniffer| sniffer.sniff(doc));
        let Some(body) = body else {
            warn!("No horoscope paragraph found for {}", context.describe());
            return Err(ExtractionError::extraction_empty(
                self.source.kind(),
                vec!["body_text".to_string()],
            ));
        };

        debug!("Horoscope body of {} chars", body.chars().count());
        Ok(CanonicalRecord::resolve_with(self.source.schema(), |field| {
            (field.name == BODY_TEXT_FIELD).then(|| body.clone())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateSpec, Language, SourceKind};
    use crate::infrastructure::SourceRegistry;

    #[test]
    fn test_first_long_paragraph_wins() {
        let long = "Ganesha says the day favours steady work. ".repeat(4);
        let markup = format!("<div><p>Daily Rashiphal</p><p>{long}</p><p>{long} again</p></div>");
        let registry = SourceRegistry::builtin().unwrap();
        let driver = HoroscopeDriver::new(registry.get(SourceKind::Horoscope));
        let context = ExtractionContext::new(SourceKind::Horoscope, DateSpec::today(), Language::En);

        let record = driver.extract_markup(&markup, &context).unwrap();
        assert_eq!(record.get(BODY_TEXT_FIELD), Some(long.trim()));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_short_paragraphs_only() {
        let registry = SourceRegistry::builtin().unwrap();
        let driver = HoroscopeDriver::new(registry.get(SourceKind::Horoscope));
        let context = ExtractionContext::new(SourceKind::Horoscope, DateSpec::today(), Language::En);
        let err = driver
            .extract_markup("<p>Too short.</p><p>Also short.</p>", &context)
            .unwrap_err();
        assert!(matches!(err, ExtractionError::ExtractionEmpty { .. }));
    }
}
