//! The bundle's location record.
//!
//! A relocatable bundle must re-run its post-install configuration
//! whenever it finds itself at a new path. The record is one well-known
//! file holding the install path configuration last ran at; this crate
//! reads, compares and atomically rewrites it. Nothing here retries: a
//! half-configured bundle is worse than a hard stop, so every anomaly
//! except plain absence is surfaced as an error.

pub use error::{Error, Result};
pub use tracker::{MAX_RECORD_LEN, RelocationTracker};

mod error;
mod tracker;
