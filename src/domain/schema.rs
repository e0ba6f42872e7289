//! Canonical schemas
//!
//! A schema is data: an ordered list of logical field names, each with the
//! English and Hindi label terms that identify it on a source page. New fields
//! or new label spellings are added here (or in configuration), never in the
//! extraction code.

use serde::{Deserialize, Serialize};

/// One logical output field and the label terms that identify it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Output key, e.g. `tithi.name`
    pub name: String,
    /// Latin-script terms, compared case-insensitively
    #[serde(default)]
    pub english: Vec<String>,
    /// Devanagari terms, compared as written
    #[serde(default)]
    pub hindi: Vec<String>,
}

impl SchemaField {
    pub fn new(name: &str, english: &[&str], hindi: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            english: english.iter().map(|s| (*s).to_string()).collect(),
            hindi: hindi.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// All terms, English first
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.english
            .iter()
            .chain(self.hindi.iter())
            .map(String::as_str)
    }
}

/// Fixed ordered list of fields a driver must populate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalSchema {
    pub name: String,
    pub fields: Vec<SchemaField>,
}

impl CanonicalSchema {
    pub fn new(name: &str, fields: Vec<SchemaField>) -> Self {
        Self {
            name: name.to_string(),
            fields,
        }
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Day panchang
    pub fn panchang() -> Self {
        Self::new(
            "panchang",
            vec![
                SchemaField::new("weekday", &["Weekday", "Vara", "Vaar"], &["वार", "वासर"]),
                SchemaField::new("sunrise", &["Sunrise"], &["सूर्योदय"]),
                SchemaField::new("sunset", &["Sunset"], &["सूर्यास्त"]),
                SchemaField::new("moonrise", &["Moonrise"], &["चन्द्रोदय", "चंद्रोदय"]),
                SchemaField::new("moonset", &["Moonset"], &["चन्द्रास्त", "चंद्रास्त"]),
                SchemaField::new("tithi.name", &["Tithi"], &["तिथि"]),
                SchemaField::new("nakshatra.name", &["Nakshatra"], &["नक्षत्र"]),
                SchemaField::new("yoga", &["Yoga"], &["योग"]),
                SchemaField::new("karana", &["Karana"], &["करण"]),
                SchemaField::new("paksha", &["Paksha"], &["पक्ष"]),
                SchemaField::new(
                    "moonsign",
                    &["Moonsign", "Moon Sign", "Chandra Rashi"],
                    &["चन्द्र राशि", "चंद्र राशि"],
                ),
                SchemaField::new(
                    "sunsign",
                    &["Sunsign", "Sun Sign", "Surya Rashi"],
                    &["सूर्य राशि"],
                ),
                SchemaField::new("vikram_samvat", &["Vikram Samvat"], &["विक्रम सम्वत", "विक्रम संवत"]),
                SchemaField::new("shaka_samvat", &["Shaka Samvat"], &["शक सम्वत", "शक संवत"]),
                SchemaField::new("month.amanta", &["Amanta"], &["अमान्त", "अमांत"]),
                SchemaField::new("month.purnimanta", &["Purnimanta"], &["पूर्णिमान्त", "पूर्णिमांत"]),
            ],
        )
    }

    /// Rahu-kaal card
    pub fn rahu_kaal() -> Self {
        Self::new(
            "rahu_kaal",
            vec![
                SchemaField::new("start", &["Rahu Kaal Begins"], &["आरम्भ", "प्रारम्भ"]),
                SchemaField::new("end", &["Rahu Kaal Ends"], &["समाप्त"]),
                SchemaField::new("duration", &["Rahu Kaal Duration"], &["अवधि"]),
                SchemaField::new("weekday", &["weekday"], &["वार"]),
                SchemaField::new("city", &["city", "location"], &["स्थान"]),
            ],
        )
    }

    /// Daily horoscope: one body-text field, filled by content sniffing
    pub fn horoscope() -> Self {
        Self::new("horoscope", vec![SchemaField::new("body_text", &[], &[])])
    }
}
