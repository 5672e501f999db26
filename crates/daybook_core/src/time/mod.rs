//! Time sources and date/timestamp normalization.
//!
//! # Responsibility
//! - Provide the only source of "now" used by stores.
//! - Map user date input to canonical `YYYY-MM-DD` dates and RFC 3339
//!   timestamps.
//!
//! # Invariants
//! - All calendar math happens in UTC.
//! - Normalization never fails; unparseable input falls back silently.

pub mod clock;
pub mod dates;
