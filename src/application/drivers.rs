//! Source drivers
//!
//! One driver per source. Each composes the document adapter, collector,
//! normalizer and resolver against one [`SourceDescriptor`] and produces that
//! source's record type. Drivers hold no state beyond the descriptor, so one
//! instance can serve any number of concurrent requests.
//!
//! [`SourceDescriptor`]: crate::infrastructure::SourceDescriptor

pub mod choghadiya;
pub mod horoscope;
pub mod panchang;
pub mod rahu_kaal;

pub use choghadiya::ChoghadiyaDriver;
pub use horoscope::HoroscopeDriver;
pub use panchang::{PanchangDriver, PanchangExtraction};
pub use rahu_kaal::RahuKaalDriver;
