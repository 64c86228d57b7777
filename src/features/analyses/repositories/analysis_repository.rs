use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::analyses::models::AnalysisRecord;

/// Persistence for generated reports, keyed by (company_name, analysis_quarter)
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Insert the report, or replace `final_summary` if the pair already exists
    async fn upsert(
        &self,
        company_name: &str,
        analysis_quarter: &str,
        final_summary: &str,
    ) -> Result<AnalysisRecord>;

    /// All quarters stored for a company, most recently updated first
    async fn find_by_company(&self, company_name: &str) -> Result<Vec<AnalysisRecord>>;

    async fn find_by_company_and_quarter(
        &self,
        company_name: &str,
        analysis_quarter: &str,
    ) -> Result<Option<AnalysisRecord>>;

    /// Distinct company names
    async fn list_companies(&self) -> Result<Vec<String>>;
}

/// PostgreSQL implementation over the `final_analysis` table
pub struct PgAnalysisRepository {
    pool: PgPool,
}

impl PgAnalysisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisRepository for PgAnalysisRepository {
    async fn upsert(
        &self,
        company_name: &str,
        analysis_quarter: &str,
        final_summary: &str,
    ) -> Result<AnalysisRecord> {
        // Dropping the transaction without commit rolls it back
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            INSERT INTO final_analysis (company_name, analysis_quarter, final_summary)
            VALUES ($1, $2, $3)
            ON CONFLICT (company_name, analysis_quarter) DO UPDATE
            SET final_summary = EXCLUDED.final_summary,
                updated_at = NOW()
            RETURNING id, company_name, analysis_quarter, final_summary, created_at, updated_at
            "#,
        )
        .bind(company_name)
        .bind(analysis_quarter)
        .bind(final_summary)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert analysis: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await?;

        Ok(record)
    }

    async fn find_by_company(&self, company_name: &str) -> Result<Vec<AnalysisRecord>> {
        let records = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            SELECT id, company_name, analysis_quarter, final_summary, created_at, updated_at
            FROM final_analysis
            WHERE company_name = $1
            ORDER BY updated_at DESC, id DESC
            "#,
        )
        .bind(company_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch analyses for company: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(records)
    }

    async fn find_by_company_and_quarter(
        &self,
        company_name: &str,
        analysis_quarter: &str,
    ) -> Result<Option<AnalysisRecord>> {
        let record = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            SELECT id, company_name, analysis_quarter, final_summary, created_at, updated_at
            FROM final_analysis
            WHERE company_name = $1 AND analysis_quarter = $2
            "#,
        )
        .bind(company_name)
        .bind(analysis_quarter)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch analysis for quarter: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(record)
    }

    async fn list_companies(&self) -> Result<Vec<String>> {
        let companies = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT company_name
            FROM final_analysis
            ORDER BY company_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list companies: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(companies)
    }
}
