//! Per-request extraction context
//!
//! Carries what a driver needs to know about the request it is serving. It is
//! built per call and never shared, so concurrent requests for the same source
//! cannot see each other's state.

use crate::domain::{DateSpec, Language, SourceKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionContext {
    pub source: SourceKind,
    pub date: DateSpec,
    pub language: Language,
    /// URL the markup came from, when it was fetched
    pub url: Option<String>,
}

impl ExtractionContext {
    pub fn new(source: SourceKind, date: DateSpec, language: Language) -> Self {
        Self {
            source,
            date,
            language,
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Short tag for log lines
    pub fn describe(&self) -> String {
        format!("{}@{}/{}", self.source, self.date.to_iso(), self.language)
    }
}
