//! Application layer module
//!
//! Source drivers, request/response DTOs, the service that fetches and
//! extracts, and the API facade with its optional response cache.

pub mod api;
pub mod cache;
pub mod drivers;
pub mod dto;
pub mod service;

pub use api::{ApiHandler, ApiResponse, Endpoint, CORS_HEADERS};
pub use cache::ResponseCache;
pub use dto::{
    ChoghadiyaReport, ChoghadiyaSlot, DailyRequest, HoroscopeReport, HoroscopeRequest, PanchangReport,
    RahuKaalReport,
};
pub use service::AstroService;
