//! API State Definition

use std::sync::Arc;

use crate::config::Config;
use crate::service::AnalysisApiService;

/// Application State
///
/// State shared across the entire server.
/// Contains configuration and service.
#[derive(Clone)]
pub struct AppState {
  /// Configuration
  pub config: Config,
  /// Sentence analysis service
  ///
  /// - Production: `Arc::new(AnalysisApiServiceFull::new(&config.bunpou))`
  /// - Test: a stub implementing `AnalysisApiService`
  pub service: Arc<dyn AnalysisApiService>,
}

impl AppState {
  /// Creates a new AppState
  #[must_use]
  pub fn new(config: Config, service: Arc<dyn AnalysisApiService>) -> Self {
    Self { config, service }
  }
}
