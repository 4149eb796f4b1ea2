//! Search history bookkeeping.
//!
//! Appends one `(mood, detected_genre)` row per recommendation request.
//! There is no read endpoint; rows exist for offline analysis.

pub mod services;

pub use services::HistoryService;
