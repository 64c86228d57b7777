use utoipa::{Modify, OpenApi};

use crate::features::analyses::{dtos as analyses_dtos, handlers as analyses_handlers};
use crate::shared::types::{ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        analyses_handlers::upload_analysis,
        analyses_handlers::get_summary,
        analyses_handlers::list_companies,
    ),
    components(
        schemas(
            analyses_dtos::UploadAnalysisDto,
            analyses_dtos::QuarterSummaryDto,
            analyses_dtos::CompanySummaryResponseDto,
            analyses_dtos::CompaniesResponseDto,
            MessageResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "analyses", description = "Equity research report generation and retrieval")
    )
)]
pub struct ApiDoc;

/// Overrides the document info with values from `SwaggerConfig`
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
