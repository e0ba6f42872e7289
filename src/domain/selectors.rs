//! Request selectors: which source, which language, which sign, which day

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::infrastructure::{ExtractionError, ExtractionResult};

/// The four third-party pages the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Horoscope,
    Panchang,
    Choghadiya,
    RahuKaal,
}

impl SourceKind {
    pub const ALL: [Self; 4] = [Self::Horoscope, Self::Panchang, Self::Choghadiya, Self::RahuKaal];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Horoscope => "horoscope",
            Self::Panchang => "panchang",
            Self::Choghadiya => "choghadiya",
            Self::RahuKaal => "rahu_kaal",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output language requested from the source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    /// Absent or blank input selects English
    pub fn from_input(input: Option<&str>) -> ExtractionResult<Self> {
        match input.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("en") => Ok(Self::En),
            Some("hi") => Ok(Self::Hi),
            Some(other) => Err(ExtractionError::invalid_parameter(
                "lang",
                other,
                "expected 'en' or 'hi'",
            )),
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Western sign names accepted from callers, mapped to the source's rashi slugs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    #[default]
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [Self; 12] = [
        Self::Aries,
        Self::Taurus,
        Self::Gemini,
        Self::Cancer,
        Self::Leo,
        Self::Virgo,
        Self::Libra,
        Self::Scorpio,
        Self::Sagittarius,
        Self::Capricorn,
        Self::Aquarius,
        Self::Pisces,
    ];

    pub fn from_input(input: Option<&str>) -> ExtractionResult<Self> {
        let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };
        let wanted = raw.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|sign| sign.name() == wanted)
            .ok_or_else(|| ExtractionError::invalid_parameter("sign", raw, "unknown zodiac sign"))
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Aries => "aries",
            Self::Taurus => "taurus",
            Self::Gemini => "gemini",
            Self::Cancer => "cancer",
            Self::Leo => "leo",
            Self::Virgo => "virgo",
            Self::Libra => "libra",
            Self::Scorpio => "scorpio",
            Self::Sagittarius => "sagittarius",
            Self::Capricorn => "capricorn",
            Self::Aquarius => "aquarius",
            Self::Pisces => "pisces",
        }
    }

    /// Path slug used by the horoscope pages
    pub const fn rashi_slug(&self) -> &'static str {
        match self {
            Self::Aries => "mesha-rashi",
            Self::Taurus => "vrishabha-rashi",
            Self::Gemini => "mithuna-rashi",
            Self::Cancer => "karka-rashi",
            Self::Leo => "simha-rashi",
            Self::Virgo => "kanya-rashi",
            Self::Libra => "tula-rashi",
            Self::Scorpio => "vrishchika-rashi",
            Self::Sagittarius => "dhanu-rashi",
            Self::Capricorn => "makara-rashi",
            Self::Aquarius => "kumbha-rashi",
            Self::Pisces => "meen-rashi",
        }
    }
}

/// Which day's prediction the horoscope page should render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionDay {
    Yesterday,
    #[default]
    Today,
    Tomorrow,
}

impl PredictionDay {
    pub fn from_input(input: Option<&str>) -> ExtractionResult<Self> {
        match input.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("today") => Ok(Self::Today),
            Some("yesterday") => Ok(Self::Yesterday),
            Some("tomorrow") => Ok(Self::Tomorrow),
            Some(other) => Err(ExtractionError::invalid_parameter(
                "day",
                other,
                "expected 'yesterday', 'today' or 'tomorrow'",
            )),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yesterday => "yesterday",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
        }
    }
}
