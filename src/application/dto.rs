//! Data Transfer Objects for the extraction service
//!
//! Validated request parameters going in and serializable reports coming out.
//! Validation happens here, before any URL is built or any fetch is attempted.

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::{
    CanonicalRecord, DateSpec, FieldTable, Language, PredictionDay, TimedSegment, ZodiacSign,
};
use crate::infrastructure::ExtractionResult;

// ============================================================================
// Requests
// ============================================================================

/// Date and language, shared by every endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRequest {
    pub date: DateSpec,
    pub language: Language,
}

impl DailyRequest {
    pub fn new(date: DateSpec, language: Language) -> Self {
        Self { date, language }
    }

    pub fn parse(date: Option<&str>, lang: Option<&str>) -> ExtractionResult<Self> {
        Ok(Self {
            date: DateSpec::from_input(date)?,
            language: Language::from_input(lang)?,
        })
    }

    /// Validate from raw query parameters (`date`, `lang`)
    pub fn from_query(query: &HashMap<String, String>) -> ExtractionResult<Self> {
        Self::parse(
            query.get("date").map(String::as_str),
            query.get("lang").map(String::as_str),
        )
    }

    /// Stable key for caching
    pub fn cache_key(&self) -> String {
        format!("{}|{}", self.date.to_iso(), self.language)
    }
}

/// Daily horoscope for one sign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoroscopeRequest {
    pub daily: DailyRequest,
    pub sign: ZodiacSign,
    pub day: PredictionDay,
}

impl HoroscopeRequest {
    /// Validate from raw query parameters (`sign`, `day`, `date`, `lang`)
    pub fn from_query(query: &HashMap<String, String>) -> ExtractionResult<Self> {
        Ok(Self {
            sign: ZodiacSign::from_input(query.get("sign").map(String::as_str))?,
            day: PredictionDay::from_input(query.get("day").map(String::as_str))?,
            daily: DailyRequest::from_query(query)?,
        })
    }

    pub fn cache_key(&self) -> String {
        format!("{}|{}|{}", self.daily.cache_key(), self.sign.name(), self.day.as_str())
    }
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanchangReport {
    pub date: String,
    pub lang: Language,
    pub data: CanonicalRecord,
    /// Every normalized label/value pair found on the page
    pub all_fields: FieldTable,
}

/// One choghadiya window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoghadiyaSlot {
    pub name: String,
    pub start: String,
    pub end: String,
}

impl From<TimedSegment> for ChoghadiyaSlot {
    fn from(segment: TimedSegment) -> Self {
        Self {
            name: segment.name,
            start: segment.start,
            end: segment.end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoghadiyaReport {
    pub date: String,
    pub lang: Language,
    pub data: Vec<ChoghadiyaSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RahuKaalReport {
    pub date: String,
    pub lang: Language,
    pub data: CanonicalRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoroscopeReport {
    pub sign: ZodiacSign,
    pub day: PredictionDay,
    pub date: String,
    pub lang: Language,
    pub data: CanonicalRecord,
}
