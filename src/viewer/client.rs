use reqwest::StatusCode;
use thiserror::Error;

use crate::features::analyses::dtos::{CompaniesResponseDto, CompanySummaryResponseDto};
use crate::shared::types::ErrorResponse;

/// Backend used when none is configured
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },
}

pub struct ViewerClient {
    http: reqwest::Client,
    base_url: String,
}

impl ViewerClient {
    pub fn new(base_url: &str) -> Result<Self, ViewerError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ViewerError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Company names with stored reports; empty when the backend has none
    pub async fn list_companies(&self) -> Result<Vec<String>, ViewerError> {
        let url = format!("{}/companies", self.base_url);
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: CompaniesResponseDto = response.json().await?;
        Ok(body.companies.unwrap_or_default())
    }

    /// Stored reports for a company, `None` when the backend has nothing
    pub async fn fetch_summary(
        &self,
        company_name: &str,
        quarter: Option<&str>,
    ) -> Result<Option<CompanySummaryResponseDto>, ViewerError> {
        let url = format!(
            "{}/summary/{}",
            self.base_url,
            urlencoding::encode(company_name)
        );
        tracing::debug!("GET {}", url);

        let mut request = self.http.get(&url);
        if let Some(quarter) = quarter {
            request = request.query(&[("quarter", quarter)]);
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            _ => Err(status_error(response).await),
        }
    }
}

async fn status_error(response: reqwest::Response) -> ViewerError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    ViewerError::Status { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::analyses::models::{AnalysisSubmission, DocumentKind, DocumentUploads};
    use crate::features::analyses::routes;
    use crate::shared::test_helpers::{StubGenerator, TestContext};
    use axum_test::TestServer;

    async fn serve(ctx: &TestContext) -> (TestServer, ViewerClient) {
        let server = TestServer::builder()
            .http_transport()
            .build(routes(ctx.service.clone(), 1024 * 1024))
            .unwrap();
        let address = server.server_address().unwrap().to_string();
        let client = ViewerClient::new(&address).unwrap();
        (server, client)
    }

    async fn seed(ctx: &TestContext, company: &str, quarter: &str) {
        ctx.service
            .submit(AnalysisSubmission {
                company_name: company.to_string(),
                analysis_quarter: quarter.to_string(),
                documents: DocumentUploads::new()
                    .with(DocumentKind::QuarterlyReport, b"Revenue up".to_vec()),
            })
            .await
            .unwrap();
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = ViewerClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_list_companies_empty_backend() {
        let ctx = TestContext::new();
        let (_server, client) = serve(&ctx).await;

        assert!(client.list_companies().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_companies_and_fetch_summary() {
        let ctx = TestContext::with_generator(StubGenerator::returning(["# Acme & Co report"]));
        seed(&ctx, "Acme & Co", "Q3FY25").await;
        let (_server, client) = serve(&ctx).await;

        assert_eq!(client.list_companies().await.unwrap(), vec!["Acme & Co"]);

        let summary = client.fetch_summary("Acme & Co", None).await.unwrap().unwrap();
        assert_eq!(summary.company_name, "Acme & Co");
        assert_eq!(summary.final_summary, "# Acme & Co report");
        assert_eq!(summary.summaries.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_summary_unknown_company_is_none() {
        let ctx = TestContext::new();
        let (_server, client) = serve(&ctx).await;

        assert!(client.fetch_summary("Nobody", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_summary_by_quarter() {
        let ctx = TestContext::with_generator(StubGenerator::returning(["first", "second"]));
        seed(&ctx, "Acme", "Q1").await;
        seed(&ctx, "Acme", "Q2").await;
        let (_server, client) = serve(&ctx).await;

        let summary = client.fetch_summary("Acme", Some("Q1")).await.unwrap().unwrap();
        assert_eq!(summary.analysis_quarter, "Q1");
        assert_eq!(summary.final_summary, "first");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_request_error() {
        // Port 9 (discard) has no HTTP listener
        let client = ViewerClient::new("http://127.0.0.1:9").unwrap();
        let result = client.list_companies().await;
        assert!(matches!(result, Err(ViewerError::Request(_))));
    }
}
