use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::analyses::handlers;
use crate::features::analyses::services::AnalysisService;
use crate::shared::constants::MULTIPART_OVERHEAD_BYTES;

/// Create routes for the analyses feature
///
/// `max_upload_size` bounds the combined size of the uploaded documents.
pub fn routes(service: Arc<AnalysisService>, max_upload_size: usize) -> Router {
    let upload_limit = DefaultBodyLimit::max(max_upload_size + MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route(
            "/upload/",
            post(handlers::upload_analysis).layer(upload_limit.clone()),
        )
        .route(
            "/upload",
            post(handlers::upload_analysis).layer(upload_limit),
        )
        .route("/summary/{company_name}", get(handlers::get_summary))
        .route("/companies", get(handlers::list_companies))
        .with_state(service)
}
