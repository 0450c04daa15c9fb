//! Response Model Definition
//!
//! The analysis result itself is `bunpou::AnalyzeResult`, serialized as is.

use serde::Serialize;

use bunpou::Readiness;

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
  /// `"ok"` when the analysis service is ready, `"degraded"` otherwise
  pub status: &'static str,
  /// Per-component readiness
  pub components: ComponentsDto,
  /// Whether the analysis service exists
  pub analysis_service: bool,
}

/// Readiness of each collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentsDto {
  /// Token producer
  pub tokenizer: bool,
  /// Grammar rule engine
  pub grammar_engine: bool,
  /// Vocabulary mapper
  pub vocabulary_mapper: bool,
}

impl From<Readiness> for HealthResponse {
  fn from(readiness: Readiness) -> Self {
    Self {
      status: if readiness.analysis_service { "ok" } else { "degraded" },
      components: ComponentsDto {
        tokenizer: readiness.tokenizer,
        grammar_engine: readiness.grammar_engine,
        vocabulary_mapper: readiness.vocabulary_mapper,
      },
      analysis_service: readiness.analysis_service,
    }
  }
}

/// `GET /` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootResponse {
  /// Service name
  pub name: &'static str,
  /// Crate version
  pub version: &'static str,
  /// Always `"running"`
  pub status: &'static str,
}

impl Default for RootResponse {
  fn default() -> Self {
    Self {
      name: env!("CARGO_PKG_NAME"),
      version: env!("CARGO_PKG_VERSION"),
      status: "running",
    }
  }
}
