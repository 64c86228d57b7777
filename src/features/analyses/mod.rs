//! Equity research analyses.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/upload/` | Upload PDFs, generate and store a report |
//! | GET | `/summary/{company_name}` | Stored reports for a company |
//! | GET | `/companies` | Companies with stored reports |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{AnalysisRepository, PgAnalysisRepository};
pub use routes::routes;
pub use services::AnalysisService;
