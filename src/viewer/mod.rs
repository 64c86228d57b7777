//! Terminal viewer for stored reports.
//!
//! A thin HTTP client over `/companies` and `/summary/{company_name}` that
//! decodes the same DTOs the service encodes. Nothing is cached between calls
//! and failed calls are never retried.

pub mod client;
pub mod render;

pub use client::{ViewerClient, ViewerError};
