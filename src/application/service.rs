//! Extraction service
//!
//! Composes validate → URL → fetch → extract for each source. Requests arrive
//! already validated (see [`crate::application::dto`]), so nothing here can
//! reach the network with bad input. The service never retries; a failed
//! fetch is reported as-is.

use std::sync::Arc;
use tracing::{info, instrument};

use super::drivers::{ChoghadiyaDriver, HoroscopeDriver, PanchangDriver, RahuKaalDriver};
use super::dto::{
    ChoghadiyaReport, ChoghadiyaSlot, DailyRequest, HoroscopeReport, HoroscopeRequest, PanchangReport,
    RahuKaalReport,
};
use crate::domain::SourceKind;
use crate::infrastructure::parsing::{ExtractionContext, RecordExtractor};
use crate::infrastructure::{
    AppConfig, DocumentFetcher, ExtractionResult, FetchRequest, HttpClient, SourceRegistry, UrlParams,
};

pub struct AstroService<F> {
    fetcher: F,
    registry: Arc<SourceRegistry>,
}

impl AstroService<HttpClient> {
    /// Production service: reqwest transport over the configured sources
    pub fn from_config(config: &AppConfig) -> ExtractionResult<Self> {
        let fetcher = HttpClient::with_config(config.http.clone())?;
        let registry = SourceRegistry::from_config(&config.parsing)?;
        Ok(Self::new(fetcher, Arc::new(registry)))
    }
}

impl<F: DocumentFetcher> AstroService<F> {
    pub fn new(fetcher: F, registry: Arc<SourceRegistry>) -> Self {
        Self { fetcher, registry }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    async fn fetch(&self, kind: SourceKind, params: &UrlParams) -> ExtractionResult<(String, String)> {
        let url = self.registry.get(kind).build_url(params)?;
        info!("Fetching {} page: {}", kind, url);
        let body = self.fetcher.fetch(&FetchRequest::new(url.as_str())).await?;
        Ok((url.into(), body))
    }

    #[instrument(skip(self), fields(date = %request.date.to_iso(), lang = %request.language))]
    pub async fn panchang(&self, request: &DailyRequest) -> ExtractionResult<PanchangReport> {
        let params = UrlParams::new(request.date, request.language);
        let (url, body) = self.fetch(SourceKind::Panchang, &params).await?;
        self.panchang_from_markup(request, &body, Some(url))
    }

    #[instrument(skip(self), fields(date = %request.date.to_iso(), lang = %request.language))]
    pub async fn choghadiya(&self, request: &DailyRequest) -> ExtractionResult<ChoghadiyaReport> {
        let params = UrlParams::new(request.date, request.language);
        let (url, body) = self.fetch(SourceKind::Choghadiya, &params).await?;
        self.choghadiya_from_markup(request, &body, Some(url))
    }

    #[instrument(skip(self), fields(date = %request.date.to_iso(), lang = %request.language))]
    pub async fn rahu_kaal(&self, request: &DailyRequest) -> ExtractionResult<RahuKaalReport> {
        let params = UrlParams::new(request.date, request.language);
        let (url, body) = self.fetch(SourceKind::RahuKaal, &params).await?;
        self.rahu_kaal_from_markup(request, &body, Some(url))
    }

    #[instrument(skip(self), fields(sign = request.sign.name(), day = request.day.as_str()))]
    pub async fn horoscope(&self, request: &HoroscopeRequest) -> ExtractionResult<HoroscopeReport> {
        let params = UrlParams::new(request.daily.date, request.daily.language)
            .with_slug(request.sign.rashi_slug())
            .with_day(request.day);
        let (url, body) = self.fetch(SourceKind::Horoscope, &params).await?;
        self.horoscope_from_markup(request, &body, Some(url))
    }

    pub fn panchang_from_markup(
        &self,
        request: &DailyRequest,
        markup: &str,
        url: Option<String>,
    ) -> ExtractionResult<PanchangReport> {
        let context = context(SourceKind::Panchang, request, url);
        let extraction = PanchangDriver::new(self.registry.get(SourceKind::Panchang)).extract_markup(markup, &context)?;
        Ok(PanchangReport {
            date: request.date.to_iso(),
            lang: request.language,
            data: extraction.record,
            all_fields: extraction.all_fields,
        })
    }

    pub fn choghadiya_from_markup(
        &self,
        request: &DailyRequest,
        markup: &str,
        url: Option<String>,
    ) -> ExtractionResult<ChoghadiyaReport> {
        let context = context(SourceKind::Choghadiya, request, url);
        let segments =
            ChoghadiyaDriver::new(self.registry.get(SourceKind::Choghadiya)).extract_markup(markup, &context)?;
        Ok(ChoghadiyaReport {
            date: request.date.to_iso(),
            lang: request.language,
            data: segments.into_iter().map(ChoghadiyaSlot::from).collect(),
        })
    }

    pub fn rahu_kaal_from_markup(
        &self,
        request: &DailyRequest,
        markup: &str,
        url: Option<String>,
    ) -> ExtractionResult<RahuKaalReport> {
        let context = context(SourceKind::RahuKaal, request, url);
        let record = RahuKaalDriver::new(self.registry.get(SourceKind::RahuKaal)).extract_markup(markup, &context)?;
        Ok(RahuKaalReport {
            date: request.date.to_iso(),
            lang: request.language,
            data: record,
        })
    }

    pub fn horoscope_from_markup(
        &self,
        request: &HoroscopeRequest,
        markup: &str,
        url: Option<String>,
    ) -> ExtractionResult<HoroscopeReport> {
        let context = context(SourceKind::Horoscope, &request.daily, url);
        let record = HoroscopeDriver::new(self.registry.get(SourceKind::Horoscope)).extract_markup(markup, &context)?;
        Ok(HoroscopeReport {
            sign: request.sign,
            day: request.day,
            date: request.daily.date.to_iso(),
            lang: request.daily.language,
            data: record,
        })
    }
}

fn context(source: SourceKind, request: &DailyRequest, url: Option<String>) -> ExtractionContext {
    let context = ExtractionContext::new(source, request.date, request.language);
    match url {
        Some(url) => context.with_url(url),
        None => context,
    }
}
