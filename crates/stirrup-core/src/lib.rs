//! Core launcher logic for `stirrup` bundle stubs.
//!
//! # Architecture
//!
//! Everything in this crate is pure computation over strings: the
//! build-time launcher manifest, the two environment variable deltas
//! (MSYS interpreter style vs. native MinGW toolchain), and the
//! desktop-entry-style Exec template expansion that produces the final
//! command line. No I/O happens here; the binary wires the results into
//! the process-start seam.

pub use error::{Error, Result};

pub mod cmdline;
pub mod config;
pub mod env;
mod error;
