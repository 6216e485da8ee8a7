//! Common utilities for domql.
//!
//! This crate provides shared infrastructure used by the schema and the
//! server binary:
//! - **Fetching** - HTTP(S) and `data:` URL loading ([`net::Fetcher`])
//! - **Telemetry** - `tracing` subscriber bootstrap
//! - **Warning System** - deduplicated warnings for recurring conditions

pub mod net;
pub mod telemetry;
pub mod warning;

pub use net::{DataURL, FetchConfig, FetchError, FetchedPage, Fetcher};
