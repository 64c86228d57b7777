use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::features::analyses::dtos::{CompanySummaryResponseDto, QuarterSummaryDto};
use crate::features::analyses::models::{
    AnalysisRecord, AnalysisSubmission, DocumentKind, DocumentUploads, ExtractedDocuments,
};
use crate::features::analyses::repositories::AnalysisRepository;
use crate::modules::llm::TextGenerator;
use crate::modules::pdf::TextExtractor;
use crate::shared::constants::{NO_DOCUMENTS_MESSAGE, SUMMARY_NOT_FOUND_MESSAGE};
use crate::shared::prompts::{render_equity_report_prompt, PromptEngine};

/// Upload → extract → generate → upsert pipeline, plus the read side
pub struct AnalysisService {
    repository: Arc<dyn AnalysisRepository>,
    extractor: Arc<dyn TextExtractor>,
    generator: Arc<dyn TextGenerator>,
    prompts: Arc<PromptEngine>,
}

impl AnalysisService {
    pub fn new(
        repository: Arc<dyn AnalysisRepository>,
        extractor: Arc<dyn TextExtractor>,
        generator: Arc<dyn TextGenerator>,
        prompts: Arc<PromptEngine>,
    ) -> Self {
        Self {
            repository,
            extractor,
            generator,
            prompts,
        }
    }

    /// Generate a report from the uploaded documents and store it for the
    /// company/quarter pair, replacing any earlier report for the same pair.
    ///
    /// Fails with `AppError::Validation` when no document yields text. Any
    /// extraction, generation or storage failure aborts before anything is
    /// committed.
    pub async fn submit(&self, submission: AnalysisSubmission) -> Result<AnalysisRecord> {
        let AnalysisSubmission {
            company_name,
            analysis_quarter,
            documents,
        } = submission;

        info!(
            company = %company_name,
            quarter = %analysis_quarter,
            documents = documents.provided_count(),
            "Processing analysis upload"
        );

        let extracted = self.extract_documents(&documents).await?;
        if !extracted.has_content() {
            return Err(AppError::Validation(NO_DOCUMENTS_MESSAGE.to_string()));
        }

        let combined_text = extracted.combined_text();
        let prompt = render_equity_report_prompt(
            &self.prompts,
            &company_name,
            &analysis_quarter,
            &combined_text,
        )?;
        debug!("Rendered prompt: {} chars", prompt.len());

        let final_summary = self.generator.generate(&prompt).await?;

        let record = self
            .repository
            .upsert(&company_name, &analysis_quarter, &final_summary)
            .await?;

        info!(
            id = record.id,
            company = %record.company_name,
            quarter = %record.analysis_quarter,
            summary_chars = record.final_summary.len(),
            "Analysis stored"
        );

        Ok(record)
    }

    /// Extract every provided document on the blocking pool.
    /// Absent slots stay empty.
    async fn extract_documents(&self, uploads: &DocumentUploads) -> Result<ExtractedDocuments> {
        let mut extracted = ExtractedDocuments::default();

        for kind in DocumentKind::ALL {
            let Some(bytes) = uploads.get(kind) else {
                continue;
            };

            let extractor = Arc::clone(&self.extractor);
            let bytes = bytes.clone();
            let text = tokio::task::spawn_blocking(move || extractor.extract_text(&bytes))
                .await
                .map_err(|e| AppError::Internal(format!("Extraction task failed: {}", e)))?
                .map_err(|e| AppError::Extraction {
                    document: kind.label().to_string(),
                    message: e.to_string(),
                })?;

            debug!("Extracted {} chars from {}", text.len(), kind.label());
            extracted.set(kind, text);
        }

        Ok(extracted)
    }

    /// Reports stored for a company, optionally narrowed to one quarter
    pub async fn get_company_summary(
        &self,
        company_name: &str,
        analysis_quarter: Option<&str>,
    ) -> Result<CompanySummaryResponseDto> {
        let records = match analysis_quarter {
            Some(quarter) => self
                .repository
                .find_by_company_and_quarter(company_name, quarter)
                .await?
                .into_iter()
                .collect(),
            None => self.repository.find_by_company(company_name).await?,
        };

        let mut summaries = records.into_iter().map(QuarterSummaryDto::from);
        let Some(current) = summaries.next() else {
            return Err(AppError::NotFound(SUMMARY_NOT_FOUND_MESSAGE.to_string()));
        };

        let mut all = vec![current.clone()];
        all.extend(summaries);

        Ok(CompanySummaryResponseDto {
            company_name: company_name.to_string(),
            analysis_quarter: current.analysis_quarter,
            final_summary: current.final_summary,
            summaries: all,
        })
    }

    /// Distinct company names currently stored
    pub async fn list_companies(&self) -> Result<Vec<String>> {
        self.repository.list_companies().await
    }
}
