//! Date Format Bridge
//!
//! Callers speak ISO `YYYY-MM-DD`; sources want day-first locale forms such as
//! `DD/MM/YYYY` or `D-M-YYYY`. Both directions are lossless for real Gregorian
//! dates. Inputs that only look like dates (`13-13-2025`) are rejected rather
//! than guessed at.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::infrastructure::{ExtractionError, ExtractionResult};

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("static ISO date pattern"));

static LOCALE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})([/\-.])(\d{1,2})([/\-.])(\d{4})$").expect("static locale date pattern")
});

/// Day-first rendering rule used by a source's query string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleDateFormat {
    pub separator: char,
    pub zero_pad: bool,
}

impl LocaleDateFormat {
    /// `16/10/2026`
    pub const DD_MM_YYYY: Self = Self {
        separator: '/',
        zero_pad: true,
    };

    /// `16-10-2026`, `5-1-2026`
    pub const D_M_YYYY: Self = Self {
        separator: '-',
        zero_pad: false,
    };

    pub fn render(&self, date: NaiveDate) -> String {
        let sep = self.separator;
        if self.zero_pad {
            format!("{:02}{sep}{:02}{sep}{:04}", date.day(), date.month(), date.year())
        } else {
            format!("{}{sep}{}{sep}{:04}", date.day(), date.month(), date.year())
        }
    }

    /// Parse a string rendered in this form back into a date
    pub fn parse(&self, input: &str) -> ExtractionResult<NaiveDate> {
        let trimmed = input.trim();
        let caps = LOCALE_DATE
            .captures(trimmed)
            .ok_or_else(|| ExtractionError::invalid_date(input, "expected day-first date"))?;

        let separators_match = caps[2].starts_with(self.separator) && caps[4].starts_with(self.separator);
        if !separators_match {
            return Err(ExtractionError::invalid_date(
                input,
                &format!("expected '{}' as separator", self.separator),
            ));
        }
        if self.zero_pad && (caps[1].len() != 2 || caps[3].len() != 2) {
            return Err(ExtractionError::invalid_date(input, "expected two-digit day and month"));
        }

        build_date(input, &caps[5], &caps[3], &caps[1])
    }
}

impl Default for LocaleDateFormat {
    fn default() -> Self {
        Self::DD_MM_YYYY
    }
}

/// A validated calendar date for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateSpec {
    date: NaiveDate,
}

impl DateSpec {
    pub const fn from_date(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Current date in the server's local calendar
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Resolve caller input: absent or blank means today.
    ///
    /// Accepts ISO `YYYY-MM-DD` and, for existing clients, the day-first forms
    /// `DD/MM/YYYY` and `D-M-YYYY`. Every accepted shape must name a real date.
    pub fn from_input(input: Option<&str>) -> ExtractionResult<Self> {
        match input.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(Self::today()),
            Some(raw) if ISO_DATE.is_match(raw) => Self::parse_iso(raw),
            Some(raw) if LOCALE_DATE.is_match(raw) => {
                let caps = LOCALE_DATE
                    .captures(raw)
                    .ok_or_else(|| ExtractionError::invalid_date(raw, "unrecognised date"))?;
                if caps[2] != caps[4] {
                    return Err(ExtractionError::invalid_date(raw, "mixed separators"));
                }
                build_date(raw, &caps[5], &caps[3], &caps[1]).map(Self::from_date)
            }
            Some(raw) => Err(ExtractionError::invalid_date(raw, "expected YYYY-MM-DD")),
        }
    }

    /// Strict ISO `YYYY-MM-DD`
    pub fn parse_iso(input: &str) -> ExtractionResult<Self> {
        let caps = ISO_DATE
            .captures(input.trim())
            .ok_or_else(|| ExtractionError::invalid_date(input, "expected YYYY-MM-DD"))?;
        build_date(input, &caps[1], &caps[2], &caps[3]).map(Self::from_date)
    }

    pub fn to_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn to_locale(&self, format: LocaleDateFormat) -> String {
        format.render(self.date)
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Convert a locale-form date back to ISO
pub fn locale_to_iso(input: &str, format: LocaleDateFormat) -> ExtractionResult<String> {
    format
        .parse(input)
        .map(|date| DateSpec::from_date(date).to_iso())
}

fn build_date(input: &str, year: &str, month: &str, day: &str) -> ExtractionResult<NaiveDate> {
    let parse = |part: &str| -> ExtractionResult<u32> {
        part.parse::<u32>()
            .map_err(|_| ExtractionError::invalid_date(input, "non-numeric component"))
    };
    let year = i32::try_from(parse(year)?)
        .map_err(|_| ExtractionError::invalid_date(input, "year out of range"))?;
    let month = parse(month)?;
    let day = parse(day)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ExtractionError::invalid_date(input, "not a calendar date"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2026-10-16", LocaleDateFormat::DD_MM_YYYY, "16/10/2026")]
    #[case("2026-01-05", LocaleDateFormat::DD_MM_YYYY, "05/01/2026")]
    #[case("2026-01-05", LocaleDateFormat::D_M_YYYY, "5-1-2026")]
    #[case("2024-02-29", LocaleDateFormat::D_M_YYYY, "29-2-2024")]
    fn test_iso_to_locale(#[case] iso: &str, #[case] format: LocaleDateFormat, #[case] expected: &str) {
        let spec = DateSpec::parse_iso(iso).unwrap();
        assert_eq!(spec.to_locale(format), expected);
        assert_eq!(locale_to_iso(expected, format).unwrap(), iso);
    }

    #[rstest]
    #[case("13-13-2025")]
    #[case("2025-02-30")]
    #[case("2023-02-29")]
    #[case("31/04/2026")]
    #[case("tomorrow")]
    #[case("2026/10/16")]
    #[case("16/10-2026")]
    fn test_invalid_inputs_are_rejected(#[case] input: &str) {
        let err = DateSpec::from_input(Some(input)).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidDate { .. }), "{input}: {err:?}");
    }

    #[test]
    fn test_missing_input_means_today() {
        let today = Local::now().date_naive();
        assert_eq!(DateSpec::from_input(None).unwrap().date(), today);
        assert_eq!(DateSpec::from_input(Some("  ")).unwrap().date(), today);
    }

    #[test]
    fn test_locale_shapes_accepted_as_input() {
        let expected = DateSpec::parse_iso("2026-10-16").unwrap();
        assert_eq!(DateSpec::from_input(Some("16/10/2026")).unwrap(), expected);
        assert_eq!(DateSpec::from_input(Some("16-10-2026")).unwrap(), expected);
    }

    #[test]
    fn test_padded_format_rejects_unpadded_text() {
        assert!(LocaleDateFormat::DD_MM_YYYY.parse("5/1/2026").is_err());
        assert!(LocaleDateFormat::D_M_YYYY.parse("05-01-2026").is_ok());
        assert!(LocaleDateFormat::D_M_YYYY.parse("05/01/2026").is_err());
    }
}
