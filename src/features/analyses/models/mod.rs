mod analysis;
mod document;

pub use analysis::AnalysisRecord;
pub use document::{AnalysisSubmission, DocumentKind, DocumentUploads, ExtractedDocuments};
