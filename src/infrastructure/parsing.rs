//! HTML extraction pipeline
//!
//! Strategy-list and schema-as-data extraction: compiled structural strategies
//! feed the candidate row collector, the label normalizer turns the collected
//! pairs into a field table, and the bilingual resolver maps that table onto a
//! canonical schema. Free-text pages use a content-sniffing strategy instead.

pub mod collector;
pub mod config;
pub mod context;
pub mod normalizer;
pub mod resolver;
pub mod strategy;

// Re-export public types
pub use collector::{collect, collect_from, merge, Collection};
pub use config::{
    BodyTextConfig, LanguageParam, MuhurtaCardConfig, ParsingConfig, QueryParamConfig, SourceConfig,
    StrategyConfig,
};
pub use context::ExtractionContext;
pub use normalizer::{build_field_table, normalize_label, normalize_value};
pub use resolver::{resolve, resolve_field, FieldMatch, MatchRule};
pub use strategy::{compile_selectors, BodyTextStrategy, MuhurtaCardStrategy, RowStrategy};

use super::document::Document;
use super::ExtractionResult;

/// Turns one parsed document into a typed result for one source
pub trait RecordExtractor {
    type Output;

    fn extract(&self, doc: &Document, context: &ExtractionContext) -> ExtractionResult<Self::Output>;

    /// Parse markup and extract in one step
    fn extract_markup(&self, markup: &str, context: &ExtractionContext) -> ExtractionResult<Self::Output> {
        let doc = Document::parse(markup)?;
        self.extract(&doc, context)
    }
}
