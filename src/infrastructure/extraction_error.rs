//! Extraction error taxonomy
//!
//! Every failure a request can hit maps to one variant here, and every variant
//! maps to a stable kind string, an HTTP-style status class and a public
//! message that carries no internal detail.

use thiserror::Error;

use crate::domain::SourceKind;

/// Longest markup excerpt kept in a parse error
const SNIPPET_CHARS: usize = 120;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Fetch failed for {url}: {message}")]
    Fetch {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Document could not be parsed ({byte_len} bytes): {snippet:?}")]
    DocumentParse { byte_len: usize, snippet: String },

    #[error("No candidate fields found on {origin} page (tried: {})", .strategies.join(", "))]
    ExtractionEmpty {
        origin: SourceKind,
        strategies: Vec<String>,
    },

    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("Invalid parameter {name}='{value}': {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ExtractionError {
    pub fn fetch(url: &str, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.to_string(),
            status,
            message: message.into(),
        }
    }

    /// Parse failure with a short, char-boundary-safe excerpt of the markup
    pub fn document_parse(markup: &str) -> Self {
        let snippet: String = markup.trim().chars().take(SNIPPET_CHARS).collect();
        Self::DocumentParse {
            byte_len: markup.len(),
            snippet,
        }
    }

    pub fn extraction_empty(origin: SourceKind, strategies: Vec<String>) -> Self {
        Self::ExtractionEmpty { origin, strategies }
    }

    pub fn invalid_date(input: &str, reason: &str) -> Self {
        Self::InvalidDate {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_parameter(name: &str, value: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Stable machine-readable kind
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "fetch_error",
            Self::DocumentParse { .. } => "document_parse_error",
            Self::ExtractionEmpty { .. } => "extraction_empty",
            Self::InvalidDate { .. } => "invalid_date",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::Configuration { .. } => "configuration_error",
        }
    }

    /// Caller input problems; these never reach the source
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidDate { .. } | Self::InvalidParameter { .. })
    }

    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidDate { .. } | Self::InvalidParameter { .. } => 400,
            Self::Fetch { .. } | Self::ExtractionEmpty { .. } => 502,
            Self::DocumentParse { .. } | Self::Configuration { .. } => 500,
        }
    }

    /// Message safe to hand to an unauthenticated caller
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidDate { input, .. } => format!("Invalid date '{input}', expected YYYY-MM-DD"),
            Self::InvalidParameter { name, .. } => format!("Invalid value for '{name}'"),
            Self::Fetch { .. } => "Failed to fetch source page".to_string(),
            Self::ExtractionEmpty { .. } => "Source page layout not recognised".to_string(),
            Self::DocumentParse { .. } | Self::Configuration { .. } => "Server error".to_string(),
        }
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        assert_eq!(ExtractionError::invalid_date("13-13-2025", "x").status_code(), 400);
        assert_eq!(ExtractionError::fetch("u", Some(503), "down").status_code(), 502);
        assert_eq!(ExtractionError::document_parse("").status_code(), 500);
        assert!(ExtractionError::invalid_parameter("sign", "x", "y").is_client_error());
        assert!(!ExtractionError::extraction_empty(SourceKind::Panchang, vec![]).is_client_error());
    }

    #[test]
    fn test_public_message_hides_detail() {
        let err = ExtractionError::fetch("https://origin.example/x", Some(503), "upstream said no");
        let message = err.public_message();
        assert!(!message.contains("origin.example"));
        assert!(!message.contains("503"));
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let markup = "सूर्योदय".repeat(60);
        let ExtractionError::DocumentParse { byte_len, snippet } = ExtractionError::document_parse(&markup)
        else {
            panic!("wrong variant");
        };
        assert_eq!(byte_len, markup.len());
        assert_eq!(snippet.chars().count(), SNIPPET_CHARS);
    }
}
