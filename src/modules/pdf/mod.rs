//! PDF text extraction
//!
//! Turns raw uploaded bytes into ordered page texts. Corrupt or non-PDF input
//! fails immediately with a `PdfError`.

mod lopdf_extractor;

pub use lopdf_extractor::LopdfExtractor;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to load PDF: {0}")]
    Load(String),

    #[error("Failed to extract text from page {page}: {message}")]
    Page { page: u32, message: String },
}

/// Extracts plain text from a document, one string per page
pub trait TextExtractor: Send + Sync {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, PdfError>;

    /// Page texts joined with newlines, in page order
    fn extract_text(&self, bytes: &[u8]) -> Result<String, PdfError> {
        Ok(self.extract_pages(bytes)?.join("\n"))
    }
}
