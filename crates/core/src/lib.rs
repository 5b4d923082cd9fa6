//! Domain logic for stored load-test results.
//!
//! Everything in this crate is synchronous and free of I/O. The `ghz-db`
//! crate loads and persists records; this crate decides their status.

pub mod error;
pub mod evaluation;
pub mod naming;
pub mod report;
pub mod status;
pub mod threshold;
pub mod types;
