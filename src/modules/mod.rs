//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the adapters for the collaborators the report pipeline depends on:
//! PDF text extraction and the hosted text-generation API.

pub mod llm;
pub mod pdf;
