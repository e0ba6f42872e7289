//! Infrastructure layer: markup handling, extraction pipeline and external integrations
//!
//! This module provides the document adapter over `scraper`, the strategy-based
//! extraction pipeline, compiled source descriptors, the HTTP transport,
//! configuration loading and logging.

pub mod document;
pub mod extraction_error;
pub mod parsing;
pub mod sources;
pub mod http_client;
pub mod config;
pub mod logging;

// Re-export commonly used items
pub use document::{ChildPart, Document, Node};
pub use extraction_error::{ExtractionError, ExtractionResult};
pub use parsing::{ExtractionContext, ParsingConfig, RecordExtractor};
pub use sources::{SourceDescriptor, SourceRegistry, UrlParams};
pub use http_client::{DocumentFetcher, FetchRequest, HttpClient};
pub use config::{drik, AppConfig, CacheConfig, ConfigManager, HttpClientConfig, LoggingConfig};
pub use logging::{init_logging, init_logging_with_config, get_log_directory};
