//! Domain module - canonical records, schemas and request selectors
//!
//! Everything here is plain data: no I/O, no markup handling. Records and
//! field tables live for one extraction call; schemas are built once and shared.

pub mod record;
pub mod schema;
pub mod date;
pub mod selectors;

// Re-export commonly used items for convenience
pub use record::{CanonicalRecord, FieldTable, RawField, TimedSegment, NOT_AVAILABLE};
pub use schema::{CanonicalSchema, SchemaField};
pub use date::{DateSpec, LocaleDateFormat};
pub use selectors::{Language, PredictionDay, SourceKind, ZodiacSign};
