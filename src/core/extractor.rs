use axum::{
    body::Body,
    extract::{FromRequest, Multipart, Request},
};

use crate::core::error::AppError;

/// Multipart extractor that reports a missing or malformed
/// `multipart/form-data` body as an `AppError` JSON response
pub struct AppMultipart(pub Multipart);

impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Multipart::from_request(req, state).await {
            Ok(multipart) => Ok(Self(multipart)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}
