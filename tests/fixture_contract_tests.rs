//! Extraction contract against saved source pages
//!
//! Each fixture is a trimmed copy of a real page layout. A failure here means
//! a strategy or schema change broke a layout that used to work.

mod common;

use common::{fixture, service, StubFetcher};
use panchang_scraper::application::{DailyRequest, HoroscopeRequest};
use panchang_scraper::NOT_AVAILABLE;

fn daily(lang: &str) -> DailyRequest {
    DailyRequest::parse(Some("2026-10-16"), Some(lang)).unwrap()
}

fn offline() -> panchang_scraper::AstroService<StubFetcher> {
    service(StubFetcher::failing(500))
}

#[test]
fn english_panchang_resolves_every_field() {
    let report = offline()
        .panchang_from_markup(&daily("en"), &fixture("panchang_en.html"), None)
        .unwrap();

    assert_eq!(report.date, "2026-10-16");
    assert_eq!(report.data.available_count(), report.data.len());
    assert_eq!(report.data.get("sunrise"), Some("06:24 AM"));
    assert_eq!(report.data.get("weekday"), Some("Shukrawara"));
    assert_eq!(report.data.get("tithi.name"), Some("Shukla Paksha Panchami upto 11:02 PM"));
    assert_eq!(report.data.get("paksha"), Some("Shukla Paksha"));
    assert_eq!(report.data.get("vikram_samvat"), Some("2083 Siddharthi"));
    assert_eq!(report.data.get("month.amanta"), Some("Ashwina"));
    assert_eq!(report.data.get("month.purnimanta"), Some("Ashwina"));
}

#[test]
fn english_panchang_keeps_first_value_across_strategies() {
    let report = offline()
        .panchang_from_markup(&daily("en"), &fixture("panchang_en.html"), None)
        .unwrap();

    // table row wins over the duplicate later row and the label block
    assert_eq!(report.data.get("sunrise"), Some("06:24 AM"));
    assert_eq!(report.data.get("sunset"), Some("05:48 PM"));
    assert_eq!(report.all_fields.len(), 16);
    assert_eq!(report.all_fields.get("shaka samvat"), Some("1948 Parabhava"));
}

#[test]
fn hindi_panchang_resolves_devanagari_labels() {
    let report = offline()
        .panchang_from_markup(&daily("hi"), &fixture("panchang_hi.html"), None)
        .unwrap();

    assert_eq!(report.data.available_count(), report.data.len());
    assert_eq!(report.data.get("sunrise"), Some("06:24 ए एम"));
    assert_eq!(report.data.get("weekday"), Some("शुक्रवार"));
    assert_eq!(report.data.get("moonsign"), Some("वृश्चिक"));
    assert_eq!(report.data.get("sunsign"), Some("कन्या"));
    assert_eq!(report.data.get("shaka_samvat"), Some("1948 पराभव"));
    assert_eq!(report.data.get("month.amanta"), Some("आश्विन"));
    assert_eq!(report.all_fields.get("चन्द्र राशि"), Some("वृश्चिक"));
}

#[test]
fn panchang_report_serializes_in_schema_order() {
    let report = offline()
        .panchang_from_markup(&daily("en"), &fixture("panchang_en.html"), None)
        .unwrap();
    let json = serde_json::to_string(&report).unwrap();

    assert!(json.starts_with(r#"{"date":"2026-10-16","lang":"en","data":{"weekday":"Shukrawara","sunrise":"#));
    let tithi = json.find("\"tithi.name\"").unwrap();
    let nakshatra = json.find("\"nakshatra.name\"").unwrap();
    assert!(tithi < nakshatra);
}

#[test]
fn choghadiya_lists_complete_slots_in_page_order() {
    let report = offline()
        .choghadiya_from_markup(&daily("en"), &fixture("choghadiya.html"), None)
        .unwrap();

    let names: Vec<_> = report.data.iter().map(|slot| slot.name.as_str()).collect();
    assert_eq!(
        names,
        ["Chara - Good", "Labha - Gain", "Amrita - Best", "Labha - Gain", "Shubha - Good"]
    );
    assert_eq!(report.data[0].start, "06:24 AM");
    assert_eq!(report.data[0].end, "07:51 AM");
    assert_eq!(report.data[4].end, "08:54 PM");
}

#[test]
fn hindi_rahu_kaal_card() {
    let report = offline()
        .rahu_kaal_from_markup(&daily("hi"), &fixture("rahu_kaal_hi.html"), None)
        .unwrap();

    assert_eq!(report.data.get("start"), Some("10:38 AM"));
    assert_eq!(report.data.get("end"), Some("12:05 PM"));
    assert_eq!(report.data.get("duration"), Some("01 घण्टा 27 मिनट्स"));
    assert_eq!(report.data.get("weekday"), Some("शुक्रवार"));
    assert_eq!(report.data.get("city"), Some("नई दिल्ली, भारत"));
}

#[test]
fn rahu_kaal_card_with_both_times_wrapped() {
    let report = offline()
        .rahu_kaal_from_markup(&daily("en"), &fixture("rahu_kaal_en_wrapped.html"), None)
        .unwrap();

    assert_eq!(report.data.get("start"), Some("10:38 AM"));
    assert_eq!(report.data.get("end"), Some("12:05 PM"));
    assert_eq!(report.data.get("duration"), Some("01 Hour 27 Mins"));
    assert_eq!(report.data.get("weekday"), Some("Friday"));
    assert_eq!(report.data.get("city"), Some("New Delhi, India"));
}

#[test]
fn rahu_kaal_missing_end_is_sentinel() {
    let report = offline()
        .rahu_kaal_from_markup(&daily("en"), &fixture("rahu_kaal_en_open.html"), None)
        .unwrap();

    assert_eq!(report.data.get("start"), Some("10:38 AM"));
    assert_eq!(report.data.get("end"), Some(NOT_AVAILABLE));
    assert_eq!(report.data.get("duration"), Some(NOT_AVAILABLE));
    assert_eq!(report.data.get("weekday"), Some("Friday"));
}

#[test]
fn rahu_kaal_ignores_unrelated_label_blocks() {
    for name in ["rahu_kaal_en_wrapped.html", "rahu_kaal_en_open.html"] {
        let report = offline()
            .rahu_kaal_from_markup(&daily("en"), &fixture(name), None)
            .unwrap();
        for (field, value) in report.data.iter() {
            assert!(
                !["Vikram", "Chaitra", "06:24 AM", "11 Hours 24 Mins"].contains(&value),
                "{name}: {field} took unrelated value {value}"
            );
        }
    }
}

#[test]
fn panchang_with_thousands_of_rows_keeps_first_values() {
    let filler: String = (0..4000)
        .map(|i| format!("<tr><td>Muhurta {i}</td><td>slot {i}</td></tr>"))
        .collect();
    let markup = format!(
        r#"<html><body><table class="panchang-table">
             <tr><td>Sunrise</td><td>06:24 AM</td></tr>{filler}<tr><td>Sunrise</td><td>07:00 AM</td></tr>
           </table></body></html>"#
    );
    let report = offline().panchang_from_markup(&daily("en"), &markup, None).unwrap();

    assert_eq!(report.data.get("sunrise"), Some("06:24 AM"));
    assert_eq!(report.all_fields.len(), 4001);
    assert_eq!(report.all_fields.get("muhurta 3999"), Some("slot 3999"));
}

#[test]
fn horoscope_picks_first_long_paragraph() {
    let request = HoroscopeRequest::from_query(&common::query(&[
        ("sign", "aries"),
        ("date", "2026-10-16"),
    ]))
    .unwrap();
    let report = offline()
        .horoscope_from_markup(&request, &fixture("horoscope.html"), None)
        .unwrap();

    let body = report.data.get("body_text").unwrap();
    assert!(body.starts_with("Your efforts at work"));
    assert!(body.ends_with("tension at home."));
}

#[test]
fn layout_drift_degrades_to_sentinels() {
    let markup = r#"<html><body>
        <div class="key-value"><span class="key">Sunrise</span><span class="value">06:24 AM</span></div>
        <div class="key-value"><span class="key">Tithi</span><span class="value">Panchami</span></div>
    </body></html>"#;
    let report = offline().panchang_from_markup(&daily("en"), markup, None).unwrap();

    assert_eq!(report.data.get("sunrise"), Some("06:24 AM"));
    assert_eq!(report.data.get("tithi.name"), Some("Panchami"));
    assert_eq!(report.data.get("moonsign"), Some(NOT_AVAILABLE));
    assert_eq!(report.data.len(), 16);
}
