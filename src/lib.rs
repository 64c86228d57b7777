//! Equity research report service.
//!
//! Uploaded PDF filings are turned into text, fed through a prompt template to
//! a hosted text-generation model, and the resulting report is stored per
//! company and quarter. The `viewer` module is a small HTTP client for
//! browsing stored reports from a terminal.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
pub mod viewer;
