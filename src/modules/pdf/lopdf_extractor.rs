use lopdf::Document;

use super::{PdfError, TextExtractor};

/// `TextExtractor` backed by the pure-Rust `lopdf` parser
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for LopdfExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, PdfError> {
        let doc = Document::load_mem(bytes).map_err(|e| PdfError::Load(e.to_string()))?;

        // get_pages is a BTreeMap keyed by 1-based page number
        let pages = doc.get_pages();
        let mut texts = Vec::with_capacity(pages.len());
        for page_num in pages.keys() {
            let text = doc
                .extract_text(&[*page_num])
                .map_err(|e| PdfError::Page {
                    page: *page_num,
                    message: e.to_string(),
                })?;
            texts.push(text);
        }

        tracing::debug!("Extracted text from {} PDF pages", texts.len());
        Ok(texts)
    }
}
