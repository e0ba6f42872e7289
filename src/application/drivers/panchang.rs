//! Day panchang driver

use tracing::{debug, warn};

use crate::domain::{CanonicalRecord, FieldTable};
use crate::infrastructure::document::Document;
use crate::infrastructure::parsing::{collect, resolve, ExtractionContext, RecordExtractor};
use crate::infrastructure::{ExtractionError, ExtractionResult, SourceDescriptor};

/// Resolved record plus every pair the page offered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanchangExtraction {
    pub record: CanonicalRecord,
    pub all_fields: FieldTable,
}

pub struct PanchangDriver<'a> {
    source: &'a SourceDescriptor,
}

impl<'a> PanchangDriver<'a> {
    pub const fn new(source: &'a SourceDescriptor) -> Self {
        Self { source }
    }
}

impl RecordExtractor for PanchangDriver<'_> {
    type Output = PanchangExtraction;

    fn extract(&self, doc: &Document, context: &ExtractionContext) -> ExtractionResult<Self::Output> {
        let collection = collect(doc, self.source.strategies());
        if collection.is_empty() {
            warn!(
                "No panchang fields found for {} ({} bytes)",
                context.describe(),
                doc.byte_len()
            );
            return Err(ExtractionError::extraction_empty(
                self.source.kind(),
                collection.attempted,
            ));
        }

        let all_fields = collection.table();
        let record = resolve(self.source.schema(), &all_fields);
        debug!(
            "Panchang {}: {} pairs from {:?}, {} fields resolved",
            context.describe(),
            all_fields.len(),
            collection.productive,
            record.available_count()
        );

        Ok(PanchangExtraction { record, all_fields })
    }
}
