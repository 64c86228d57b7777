// =============================================================================
// RESPONSE MESSAGES
// =============================================================================

/// Returned after a report was generated and stored
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Files uploaded & AI analysis updated successfully.";

/// Returned when none of the uploaded documents produced any text
pub const NO_DOCUMENTS_MESSAGE: &str = "At least one document must be uploaded.";

/// Returned by the company listing when the store is empty
pub const NO_COMPANIES_MESSAGE: &str = "No companies found.";

/// Returned when a company has no stored report
pub const SUMMARY_NOT_FOUND_MESSAGE: &str = "No analysis found for this company";

// =============================================================================
// UPLOAD LIMITS
// =============================================================================

/// Extra room on top of the configured body size for multipart framing
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
