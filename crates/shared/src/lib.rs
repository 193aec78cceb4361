//! Shared types for analytics-tracker and any ingest-side consumer.
//!
//! Everything here is plain data with serde derives; no network code lives in
//! this crate.

pub mod error;
pub mod models;
pub mod protocol;
pub mod vitals;

pub use error::*;
pub use models::*;
pub use protocol::*;
pub use vitals::*;
