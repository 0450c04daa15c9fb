//! bunpou-api crate
//!
//! Web server exposing Japanese sentence analysis as HTTP API.
//!
//! ## Endpoints
//! - `POST /api/v1/analyze` - Grammar patterns and vocabulary levels
//! - `GET /api/v1/health` - Component readiness
//! - `GET /` - Service information
//!
//! ## Usage Example
//! ```bash
//! curl -X POST http://127.0.0.1:8000/api/v1/analyze \
//!   -H "Content-Type: application/json" \
//!   -d '{"sentence": "行かなければなりません"}'
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use errors::{ApiError, ApiErrorKind};
pub use models::{AnalyzeRequest, HealthResponse};
pub use service::{AnalysisApiService, AnalysisApiServiceFull};
