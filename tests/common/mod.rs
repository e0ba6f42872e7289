//! Shared helpers for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use panchang_scraper::application::{ApiHandler, AstroService, ResponseCache};
use panchang_scraper::infrastructure::{DocumentFetcher, FetchRequest};
use panchang_scraper::{ExtractionError, ExtractionResult, SourceRegistry};

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {}: {e}", path.display()))
}

pub fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Canned response for every fetch, with a call counter and a URL log
#[derive(Clone)]
pub struct StubFetcher {
    response: Result<String, u16>,
    calls: Arc<AtomicUsize>,
    urls: Arc<Mutex<Vec<String>>>,
}

impl StubFetcher {
    pub fn serving(body: impl Into<String>) -> Self {
        Self::with_response(Ok(body.into()))
    }

    pub fn failing(status: u16) -> Self {
        Self::with_response(Err(status))
    }

    fn with_response(response: Result<String, u16>) -> Self {
        Self {
            response,
            calls: Arc::new(AtomicUsize::new(0)),
            urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentFetcher for StubFetcher {
    async fn fetch(&self, request: &FetchRequest) -> ExtractionResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(request.url.clone());
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(ExtractionError::fetch(
                &request.url,
                Some(*status),
                format!("HTTP {status}"),
            )),
        }
    }
}

pub fn service(fetcher: StubFetcher) -> AstroService<StubFetcher> {
    AstroService::new(fetcher, Arc::new(SourceRegistry::builtin().unwrap()))
}

pub fn handler(fetcher: StubFetcher, cache: Option<ResponseCache>) -> ApiHandler<StubFetcher> {
    ApiHandler::new(service(fetcher), cache)
}
