//! Source descriptors
//!
//! A [`SourceDescriptor`] is the compiled, read-only form of one
//! [`SourceConfig`]: parsed origin, compiled strategies and the schema. The
//! [`SourceRegistry`] is built once at start-up and shared across requests.

use tracing::{debug, info};
use url::Url;

use super::parsing::{BodyTextStrategy, LanguageParam, QueryParamConfig, RowStrategy, SourceConfig};
use super::parsing::ParsingConfig;
use super::{ExtractionError, ExtractionResult};
use crate::domain::{CanonicalSchema, DateSpec, Language, LocaleDateFormat, PredictionDay, SourceKind};

/// Request values substituted into a source URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParams {
    pub date: DateSpec,
    pub language: Language,
    /// Path slug, e.g. the rashi slug for horoscopes
    pub slug: Option<String>,
    pub day: PredictionDay,
}

impl UrlParams {
    pub fn new(date: DateSpec, language: Language) -> Self {
        Self {
            date,
            language,
            slug: None,
            day: PredictionDay::default(),
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_day(mut self, day: PredictionDay) -> Self {
        self.day = day;
        self
    }
}

/// Static configuration for one third-party page
#[derive(Debug)]
pub struct SourceDescriptor {
    kind: SourceKind,
    origin: Url,
    path_template: String,
    query: Vec<QueryParamConfig>,
    date_format: LocaleDateFormat,
    language: LanguageParam,
    strategies: Vec<RowStrategy>,
    body_text: Option<BodyTextStrategy>,
    schema: CanonicalSchema,
}

impl SourceDescriptor {
    pub fn compile(kind: SourceKind, config: &SourceConfig) -> ExtractionResult<Self> {
        let origin = Url::parse(&config.origin)
            .map_err(|e| ExtractionError::configuration(format!("{kind}: invalid origin '{}': {e}", config.origin)))?;

        let strategies = config
            .strategies
            .iter()
            .map(RowStrategy::compile)
            .collect::<ExtractionResult<Vec<_>>>()?;
        let body_text = config.body_text.as_ref().map(BodyTextStrategy::compile).transpose()?;

        if strategies.is_empty() && body_text.is_none() {
            return Err(ExtractionError::configuration(format!(
                "{kind}: no extraction strategy configured"
            )));
        }

        debug!(
            "Compiled {} source: {} strategies, schema {} ({} fields)",
            kind,
            strategies.len(),
            config.schema.name,
            config.schema.len()
        );

        Ok(Self {
            kind,
            origin,
            path_template: config.path_template.clone(),
            query: config.query.clone(),
            date_format: config.date_format,
            language: config.language.clone(),
            strategies,
            body_text,
            schema: config.schema.clone(),
        })
    }

    pub const fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn strategies(&self) -> &[RowStrategy] {
        &self.strategies
    }

    pub fn body_text(&self) -> Option<&BodyTextStrategy> {
        self.body_text.as_ref()
    }

    pub fn schema(&self) -> &CanonicalSchema {
        &self.schema
    }

    pub const fn date_format(&self) -> LocaleDateFormat {
        self.date_format
    }

    pub fn strategy_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.strategies.iter().map(|s| s.name().to_string()).collect();
        if self.body_text.is_some() {
            names.push("body_text".to_string());
        }
        names
    }

    /// Render the page URL for one request
    pub fn build_url(&self, params: &UrlParams) -> ExtractionResult<Url> {
        let lang_path = match (&self.language, params.language) {
            (LanguageParam::PathPrefix { hindi }, Language::Hi) => hindi.as_str(),
            _ => "",
        };
        let path = self
            .path_template
            .replace("{lang_path}", lang_path)
            .replace("{slug}", params.slug.as_deref().unwrap_or_default());

        let mut url = self
            .origin
            .join(&path)
            .map_err(|e| ExtractionError::configuration(format!("{}: bad path '{path}': {e}", self.kind)))?;

        let date = params.date.to_locale(self.date_format);
        {
            let mut pairs = url.query_pairs_mut();
            for param in &self.query {
                let value = param
                    .value
                    .replace("{date}", &date)
                    .replace("{lang}", params.language.code())
                    .replace("{day}", params.day.as_str());
                pairs.append_pair(&param.name, &value);
            }
            if let LanguageParam::QueryParam { name } = &self.language {
                pairs.append_pair(name, params.language.code());
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(url)
    }
}

/// All configured sources, compiled
#[derive(Debug)]
pub struct SourceRegistry {
    horoscope: SourceDescriptor,
    panchang: SourceDescriptor,
    choghadiya: SourceDescriptor,
    rahu_kaal: SourceDescriptor,
}

impl SourceRegistry {
    pub fn from_config(config: &ParsingConfig) -> ExtractionResult<Self> {
        let registry = Self {
            horoscope: SourceDescriptor::compile(SourceKind::Horoscope, &config.horoscope)?,
            panchang: SourceDescriptor::compile(SourceKind::Panchang, &config.panchang)?,
            choghadiya: SourceDescriptor::compile(SourceKind::Choghadiya, &config.choghadiya)?,
            rahu_kaal: SourceDescriptor::compile(SourceKind::RahuKaal, &config.rahu_kaal)?,
        };
        info!("Source registry ready ({} sources)", SourceKind::ALL.len());
        Ok(registry)
    }

    /// Registry over the built-in Drik Panchang configuration
    pub fn builtin() -> ExtractionResult<Self> {
        Self::from_config(&ParsingConfig::default())
    }

    pub fn get(&self, kind: SourceKind) -> &SourceDescriptor {
        match kind {
            SourceKind::Horoscope => &self.horoscope,
            SourceKind::Panchang => &self.panchang,
            SourceKind::Choghadiya => &self.choghadiya,
            SourceKind::RahuKaal => &self.rahu_kaal,
        }
    }
}
