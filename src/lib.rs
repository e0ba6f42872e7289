//! Panchang Scraper - resilient extraction of almanac data from public web pages
//!
//! Turns raw markup of drifting shape (table rows, label/value blocks, muhurta
//! cards, free paragraphs; English or Hindi labels) into fixed canonical records.
//!
//! Layers:
//! - `domain`: records, schemas, dates and request selectors (pure data)
//! - `infrastructure`: document adapter, extraction strategies, transport, config, logging
//! - `application`: per-source drivers, service orchestration and the API facade

// Module declarations
pub mod domain;
pub mod infrastructure;
pub mod application;

// Re-export the types most callers need
pub use application::{ApiHandler, ApiResponse, AstroService, Endpoint};
pub use domain::{CanonicalRecord, CanonicalSchema, DateSpec, FieldTable, Language, NOT_AVAILABLE};
pub use infrastructure::{ExtractionError, ExtractionResult, SourceRegistry};
