//! Service module

mod analysis_api_service;

pub use analysis_api_service::{AnalysisApiService, AnalysisApiServiceFull};
