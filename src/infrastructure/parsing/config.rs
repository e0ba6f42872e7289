//! Parsing configuration for HTML extraction
//!
//! Centralized, serializable description of every source: where it lives, how
//! it wants dates and languages, which structural strategies to try (as CSS
//! selector lists with fallbacks) and which schema to resolve into. Adapting to
//! a layout change is an edit here.

use serde::{Deserialize, Serialize};

use crate::domain::{CanonicalSchema, LocaleDateFormat};
use crate::infrastructure::config::drik;

/// Main parsing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    pub horoscope: SourceConfig,
    pub panchang: SourceConfig,
    pub choghadiya: SourceConfig,
    pub rahu_kaal: SourceConfig,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            horoscope: SourceConfig::horoscope(),
            panchang: SourceConfig::panchang(),
            choghadiya: SourceConfig::choghadiya(),
            rahu_kaal: SourceConfig::rahu_kaal(),
        }
    }
}

/// How a source is told which language to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LanguageParam {
    /// Hindi pages live under a path prefix, e.g. `/hindi`
    PathPrefix { hindi: String },
    /// Language goes into a query parameter
    QueryParam { name: String },
    /// The source ignores language
    Ignored,
}

/// One query parameter; `{date}`, `{lang}` and `{day}` are substituted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParamConfig {
    pub name: String,
    pub value: String,
}

impl QueryParamConfig {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Everything needed to fetch and read one third-party page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub origin: String,
    /// Path template; `{lang_path}` and `{slug}` are substituted
    pub path_template: String,
    #[serde(default)]
    pub query: Vec<QueryParamConfig>,
    #[serde(default)]
    pub date_format: LocaleDateFormat,
    pub language: LanguageParam,
    /// Structural strategies, highest priority first
    #[serde(default)]
    pub strategies: Vec<StrategyConfig>,
    pub schema: CanonicalSchema,
    #[serde(default)]
    pub body_text: Option<BodyTextConfig>,
}

/// Structural pattern that yields label/value pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Rows of cells read pairwise: (0,1) and, in dense layouts, (2,3)
    TableRows { rows: Vec<String>, cells: Vec<String> },
    /// Repeated widgets with a left (label) block and a right (value) block
    LabelBlocks {
        blocks: Vec<String>,
        left: Vec<String>,
        right: Vec<String>,
    },
    /// `<dl>` term/definition pairs
    DefinitionList { lists: Vec<String> },
    /// Repeated muhurta cards with a name and a start/end timing cell
    MuhurtaCards(MuhurtaCardConfig),
    /// A fixed label whose value is the text of the first matching selector
    Anchored { label: String, selectors: Vec<String> },
}

impl StrategyConfig {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TableRows { .. } => "table_rows",
            Self::LabelBlocks { .. } => "label_blocks",
            Self::DefinitionList { .. } => "definition_list",
            Self::MuhurtaCards(_) => "muhurta_cards",
            Self::Anchored { .. } => "anchored",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuhurtaCardConfig {
    pub cards: Vec<String>,
    #[serde(default)]
    pub name: Vec<String>,
    pub timing: Vec<String>,
    /// Element nested inside the timing cell that holds the end time
    #[serde(default)]
    pub end: Vec<String>,
    #[serde(default)]
    pub info: Vec<String>,
    #[serde(default)]
    pub note: Vec<String>,
    /// Name used when a card has no name element
    #[serde(default)]
    pub default_name: Option<String>,
    /// Connector words/glyphs trimmed off the inner edges of start and end
    #[serde(default = "default_connectors")]
    pub connectors: Vec<String>,
}

fn default_connectors() -> Vec<String> {
    ["to", "से", "-", "–", "—", "~"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

/// Content-sniffing strategy: first paragraph longer than `min_chars`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyTextConfig {
    pub paragraphs: Vec<String>,
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

const fn default_min_chars() -> usize {
    drik::HOROSCOPE_MIN_CHARS
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl SourceConfig {
    pub fn horoscope() -> Self {
        Self {
            origin: drik::ORIGIN.to_string(),
            path_template: drik::HOROSCOPE_PATH.to_string(),
            query: vec![QueryParamConfig::new("prediction-day", "{day}")],
            date_format: LocaleDateFormat::DD_MM_YYYY,
            language: LanguageParam::QueryParam {
                name: "lang".to_string(),
            },
            strategies: Vec::new(),
            schema: CanonicalSchema::horoscope(),
            body_text: Some(BodyTextConfig {
                paragraphs: strings(&[".Rashifal p", ".dpPrediction p", "article p", "p"]),
                min_chars: drik::HOROSCOPE_MIN_CHARS,
            }),
        }
    }

    pub fn panchang() -> Self {
        Self {
            origin: drik::ORIGIN.to_string(),
            path_template: drik::PANCHANG_PATH.to_string(),
            query: vec![QueryParamConfig::new("date", "{date}")],
            date_format: LocaleDateFormat::DD_MM_YYYY,
            language: LanguageParam::PathPrefix {
                hindi: "/hindi".to_string(),
            },
            strategies: vec![
                StrategyConfig::TableRows {
                    rows: strings(&["div.dpTableRow", ".panchang-table tr", "table tr"]),
                    cells: strings(&["div.dpTableCell", "th, td"]),
                },
                StrategyConfig::LabelBlocks {
                    blocks: strings(&[".dpCardRow", ".dpPanchangBlock", ".key-value"]),
                    left: strings(&[".dpLeft", ".dpCardKey", ".key"]),
                    right: strings(&[".dpRight", ".dpCardValue", ".value"]),
                },
                StrategyConfig::DefinitionList {
                    lists: strings(&["dl"]),
                },
            ],
            schema: CanonicalSchema::panchang(),
            body_text: None,
        }
    }

    pub fn choghadiya() -> Self {
        Self {
            origin: drik::ORIGIN.to_string(),
            path_template: drik::CHOGHADIYA_PATH.to_string(),
            query: vec![QueryParamConfig::new("date", "{date}")],
            date_format: LocaleDateFormat::DD_MM_YYYY,
            language: LanguageParam::QueryParam {
                name: "lang".to_string(),
            },
            strategies: vec![StrategyConfig::MuhurtaCards(MuhurtaCardConfig {
                cards: strings(&["div.dpMuhurtaCard div.dpMuhurtaRow", ".dpChoghadiyaRow"]),
                name: strings(&[".dpMuhurtaName .dpVerticalMiddleText", ".dpMuhurtaName"]),
                timing: strings(&[".dpMuhurtaTime .dpVerticalMiddleText", ".dpMuhurtaTime"]),
                end: strings(&[".dpInlineBlock"]),
                info: Vec::new(),
                note: Vec::new(),
                default_name: None,
                connectors: default_connectors(),
            })],
            schema: CanonicalSchema::new("choghadiya", Vec::new()),
            body_text: None,
        }
    }

    pub fn rahu_kaal() -> Self {
        Self {
            origin: drik::ORIGIN.to_string(),
            path_template: drik::RAHU_KAAL_PATH.to_string(),
            query: vec![QueryParamConfig::new("date", "{date}")],
            date_format: LocaleDateFormat::DD_MM_YYYY,
            language: LanguageParam::QueryParam {
                name: "lang".to_string(),
            },
            strategies: vec![
                StrategyConfig::MuhurtaCards(MuhurtaCardConfig {
                    cards: strings(&[".dpMuhurtaCard"]),
                    name: strings(&[".dpMuhurtaCardTitle"]),
                    timing: strings(&[".dpMuhurtaCardTiming"]),
                    end: strings(&[".dpInlineBlock", "span"]),
                    info: strings(&[".dpMuhurtaCardInfo"]),
                    note: strings(&[".dpMuhurtaCardMessage"]),
                    default_name: Some("Rahu Kaal".to_string()),
                    connectors: default_connectors(),
                }),
                StrategyConfig::Anchored {
                    label: "city".to_string(),
                    selectors: strings(&[".dpPHeaderLeftWrapper > div:last-child", ".dpLocationName"]),
                },
                StrategyConfig::LabelBlocks {
                    blocks: strings(&[".dpCardRow", ".key-value"]),
                    left: strings(&[".dpLeft", ".key"]),
                    right: strings(&[".dpRight", ".value"]),
                },
            ],
            schema: CanonicalSchema::rahu_kaal(),
            body_text: None,
        }
    }
}
