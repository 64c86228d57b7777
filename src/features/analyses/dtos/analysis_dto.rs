use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Upload form for OpenAPI documentation.
/// The handler reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadAnalysisDto {
    /// Company identifier, case-sensitive
    #[schema(example = "Tata Motors")]
    pub company_name: String,
    /// Free-form quarter label
    #[schema(example = "Q3FY25")]
    pub analysis_quarter: String,
    /// Quarterly results PDF
    #[schema(format = Binary, content_media_type = "application/pdf")]
    pub quarterly_report: Option<String>,
    /// Investor presentation PDF
    #[schema(format = Binary, content_media_type = "application/pdf")]
    pub investor_presentation: Option<String>,
    /// Earnings call transcript PDF
    #[schema(format = Binary, content_media_type = "application/pdf")]
    pub earnings_call_transcript: Option<String>,
}

/// Text fields of the upload form
#[derive(Debug, Clone, Default, Validate)]
pub struct AnalysisFormFields {
    #[validate(custom(function = "not_blank", message = "company_name is required"))]
    pub company_name: String,

    #[validate(custom(function = "not_blank", message = "analysis_quarter is required"))]
    pub analysis_quarter: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Optional filters for the summary lookup
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Only return the report for this quarter
    pub quarter: Option<String>,
}

/// One stored report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuarterSummaryDto {
    pub analysis_quarter: String,
    /// Markdown report body
    pub final_summary: String,
    pub updated_at: DateTime<Utc>,
}

/// Reports stored for a company
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanySummaryResponseDto {
    pub company_name: String,
    /// Quarter of `final_summary`
    pub analysis_quarter: String,
    /// Most recently updated report
    pub final_summary: String,
    /// Every stored quarter, most recently updated first
    pub summaries: Vec<QuarterSummaryDto>,
}

/// Distinct company names, or a message when there are none
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompaniesResponseDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CompaniesResponseDto {
    pub fn from_names(names: Vec<String>, empty_message: &str) -> Self {
        if names.is_empty() {
            Self {
                companies: None,
                message: Some(empty_message.to_string()),
            }
        } else {
            Self {
                companies: Some(names),
                message: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_reject_blank_values() {
        let fields = AnalysisFormFields {
            company_name: "  ".to_string(),
            analysis_quarter: "Q3FY25".to_string(),
        };
        let errors = fields.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("company_name"));
        assert!(!errors.field_errors().contains_key("analysis_quarter"));

        assert!(AnalysisFormFields::default().validate().is_err());
    }

    #[test]
    fn test_form_fields_keep_values_as_given() {
        let fields = AnalysisFormFields {
            company_name: "acme Corp ".to_string(),
            analysis_quarter: "q3fy25".to_string(),
        };
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn test_companies_response_shape() {
        let empty = CompaniesResponseDto::from_names(vec![], "No companies found.");
        assert_eq!(
            serde_json::to_value(&empty).unwrap(),
            serde_json::json!({"message": "No companies found."})
        );

        let some = CompaniesResponseDto::from_names(vec!["Acme".into()], "No companies found.");
        assert_eq!(
            serde_json::to_value(&some).unwrap(),
            serde_json::json!({"companies": ["Acme"]})
        );
    }
}
