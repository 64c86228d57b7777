use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::analyses::dtos::QuarterSummaryDto;

/// Database model for `final_analysis`; one row per company and quarter
#[derive(Debug, Clone, FromRow)]
pub struct AnalysisRecord {
    pub id: i64,
    pub company_name: String,
    pub analysis_quarter: String,
    pub final_summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AnalysisRecord> for QuarterSummaryDto {
    fn from(r: AnalysisRecord) -> Self {
        Self {
            analysis_quarter: r.analysis_quarter,
            final_summary: r.final_summary,
            updated_at: r.updated_at,
        }
    }
}
