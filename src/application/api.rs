//! Framework-agnostic API facade
//!
//! Whatever HTTP layer sits in front hands over an [`Endpoint`] and the raw
//! query parameters and gets back a status, headers and a JSON body. Input is
//! validated before the service is called, errors are rendered with their
//! public message only, and every response carries open CORS headers.

use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use tracing::{error, info, warn};

use super::cache::ResponseCache;
use super::dto::{DailyRequest, HoroscopeRequest};
use super::service::AstroService;
use crate::infrastructure::{DocumentFetcher, ExtractionError, ExtractionResult};

pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Panchang,
    Choghadiya,
    RahuKaal,
    Horoscope,
}

impl Endpoint {
    pub const ALL: [Self; 4] = [Self::Panchang, Self::Choghadiya, Self::RahuKaal, Self::Horoscope];

    pub const fn path(&self) -> &'static str {
        match self {
            Self::Panchang => "/api/panchang",
            Self::Choghadiya => "/api/choghadiya",
            Self::RahuKaal => "/api/rahu-kaal",
            Self::Horoscope => "/api/horoscope",
        }
    }

    /// Route lookup, ignoring a trailing slash
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        Self::ALL.into_iter().find(|endpoint| endpoint.path() == path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ApiResponse {
    fn with_body(status: u16, body: String) -> Self {
        let mut headers = cors_headers();
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        Self { status, headers, body }
    }

    /// Error body: `{"success": false, "error": <public message>, "kind": <kind>}`
    pub fn from_error(err: &ExtractionError) -> Self {
        #[derive(Serialize)]
        struct ErrorBody<'a> {
            success: bool,
            error: String,
            kind: &'a str,
        }

        let body = ErrorBody {
            success: false,
            error: err.public_message(),
            kind: err.kind(),
        };
        match serde_json::to_string(&body) {
            Ok(json) => Self::with_body(err.status_code(), json),
            Err(e) => {
                error!("Failed to serialize error body: {}", e);
                Self::with_body(500, r#"{"success":false,"error":"Server error","kind":"internal"}"#.to_string())
            }
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn cors_headers() -> Vec<(String, String)> {
    CORS_HEADERS
        .iter()
        .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
        .collect()
}

/// Success body: the report with `"success": true` in front
fn success_body<T: Serialize>(report: &T) -> ExtractionResult<String> {
    #[derive(Serialize)]
    struct SuccessBody<'a, T> {
        success: bool,
        #[serde(flatten)]
        report: &'a T,
    }

    serde_json::to_string(&SuccessBody { success: true, report })
        .map_err(|e| ExtractionError::configuration(format!("Failed to serialize report: {e}")))
}

pub struct ApiHandler<F> {
    service: AstroService<F>,
    cache: Option<ResponseCache>,
}

impl<F: DocumentFetcher> ApiHandler<F> {
    pub fn new(service: AstroService<F>, cache: Option<ResponseCache>) -> Self {
        Self { service, cache }
    }

    pub fn service(&self) -> &AstroService<F> {
        &self.service
    }

    /// `OPTIONS` answer
    pub fn preflight(&self) -> ApiResponse {
        ApiResponse {
            status: 204,
            headers: cors_headers(),
            body: String::new(),
        }
    }

    pub async fn handle(&self, endpoint: Endpoint, query: &HashMap<String, String>) -> ApiResponse {
        match self.dispatch(endpoint, query).await {
            Ok(body) => ApiResponse::with_body(200, body),
            Err(err) => {
                if err.is_client_error() {
                    info!("Rejected {} request: {}", endpoint.path(), err);
                } else {
                    warn!("{} failed: {}", endpoint.path(), err);
                }
                ApiResponse::from_error(&err)
            }
        }
    }

    /// Validate, then serve from cache or the service
    async fn dispatch(&self, endpoint: Endpoint, query: &HashMap<String, String>) -> ExtractionResult<String> {
        match endpoint {
            Endpoint::Horoscope => {
                let request = HoroscopeRequest::from_query(query)?;
                self.cached(endpoint, request.cache_key(), || self.service.horoscope(&request))
                    .await
            }
            Endpoint::Panchang => {
                let request = DailyRequest::from_query(query)?;
                self.cached(endpoint, request.cache_key(), || self.service.panchang(&request))
                    .await
            }
            Endpoint::Choghadiya => {
                let request = DailyRequest::from_query(query)?;
                self.cached(endpoint, request.cache_key(), || self.service.choghadiya(&request))
                    .await
            }
            Endpoint::RahuKaal => {
                let request = DailyRequest::from_query(query)?;
                self.cached(endpoint, request.cache_key(), || self.service.rahu_kaal(&request))
                    .await
            }
        }
    }

    async fn cached<T, Fut>(&self, endpoint: Endpoint, key: String, produce: impl FnOnce() -> Fut) -> ExtractionResult<String>
    where
        T: Serialize,
        Fut: Future<Output = ExtractionResult<T>>,
    {
        let key = format!("{}|{key}", endpoint.path());
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(&key).await {
                return Ok(body);
            }
        }

        let body = success_body(&produce().await?)?;
        if let Some(cache) = &self.cache {
            cache.insert(key, body.clone()).await;
        }
        Ok(body)
    }
}
