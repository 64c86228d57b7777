use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppMultipart;
use crate::features::analyses::dtos::{
    AnalysisFormFields, CompaniesResponseDto, CompanySummaryResponseDto, SummaryQuery,
    UploadAnalysisDto,
};
use crate::features::analyses::models::{AnalysisSubmission, DocumentKind, DocumentUploads};
use crate::features::analyses::services::AnalysisService;
use crate::shared::constants::{NO_COMPANIES_MESSAGE, UPLOAD_SUCCESS_MESSAGE};
use crate::shared::types::{ErrorResponse, MessageResponse};

/// Upload documents and generate a report
///
/// Accepts multipart/form-data with:
/// - `company_name`, `analysis_quarter`: required text fields
/// - `quarterly_report`, `investor_presentation`, `earnings_call_transcript`:
///   optional PDF files, at least one of which must contain text
#[utoipa::path(
    post,
    path = "/upload/",
    tag = "analyses",
    request_body(
        content = UploadAnalysisDto,
        content_type = "multipart/form-data",
        description = "Company, quarter and up to three PDF documents",
    ),
    responses(
        (status = 200, description = "Report generated and stored", body = MessageResponse),
        (status = 400, description = "Missing fields or no document text", body = ErrorResponse),
        (status = 413, description = "Uploaded documents exceed the size limit", body = ErrorResponse),
        (status = 500, description = "Extraction, generation or storage failed", body = ErrorResponse)
    )
)]
pub async fn upload_analysis(
    State(service): State<Arc<AnalysisService>>,
    AppMultipart(multipart): AppMultipart,
) -> Result<Json<MessageResponse>> {
    let submission = read_submission(multipart).await?;
    service.submit(submission).await?;

    Ok(Json(MessageResponse::new(UPLOAD_SUCCESS_MESSAGE)))
}

/// Drain the multipart stream into a validated submission
async fn read_submission(mut multipart: Multipart) -> Result<AnalysisSubmission> {
    let mut fields = AnalysisFormFields::default();
    let mut documents = DocumentUploads::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "multipart data"))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        if let Some(kind) = DocumentKind::from_field_name(&field_name) {
            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error(e, kind.field_name()))?;
            debug!("Received {}: {} bytes", kind.field_name(), data.len());
            documents.set(kind, data);
            continue;
        }

        match field_name.as_str() {
            "company_name" | "analysis_quarter" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, &field_name))?;
                if field_name == "company_name" {
                    fields.company_name = text;
                } else {
                    fields.analysis_quarter = text;
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    fields
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(AnalysisSubmission {
        company_name: fields.company_name,
        analysis_quarter: fields.analysis_quarter,
        documents,
    })
}

/// Keep the body-limit rejection as 413; anything else is a malformed request
fn multipart_error(e: MultipartError, part: &str) -> AppError {
    debug!("Failed to read {}: {}", part, e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(format!("Failed to read {}: {}", part, e))
    }
}

/// Get stored reports for a company
///
/// Returns the most recently updated report as `final_summary` together with
/// every stored quarter. Use `quarter` to select a single quarter.
#[utoipa::path(
    get,
    path = "/summary/{company_name}",
    tag = "analyses",
    params(
        ("company_name" = String, Path, description = "Company name, matched exactly"),
        SummaryQuery
    ),
    responses(
        (status = 200, description = "Reports found", body = CompanySummaryResponseDto),
        (status = 404, description = "No analysis found for this company", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn get_summary(
    State(service): State<Arc<AnalysisService>>,
    Path(company_name): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<CompanySummaryResponseDto>> {
    let quarter = query.quarter.as_deref().filter(|q| !q.is_empty());
    let summary = service.get_company_summary(&company_name, quarter).await?;
    Ok(Json(summary))
}

/// List companies with stored reports
#[utoipa::path(
    get,
    path = "/companies",
    tag = "analyses",
    responses(
        (status = 200, description = "Company names, or a message when none exist", body = CompaniesResponseDto),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn list_companies(
    State(service): State<Arc<AnalysisService>>,
) -> Result<Json<CompaniesResponseDto>> {
    let companies = service.list_companies().await?;
    Ok(Json(CompaniesResponseDto::from_names(
        companies,
        NO_COMPANIES_MESSAGE,
    )))
}
