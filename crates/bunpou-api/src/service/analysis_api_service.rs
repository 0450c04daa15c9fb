//! Sentence Analysis Service

use bunpou::{AnalyzeResult, BunpouConfig, BunpouContext, Readiness};
use tracing::warn;

use crate::errors::{ApiError, Result};

/// Common interface for the sentence analysis service
///
/// This trait allows swapping production implementation (`AnalysisApiServiceFull`) with
/// test stubs/mocks.
pub trait AnalysisApiService: Send + Sync {
  /// Analyzes an already validated (trimmed, non-empty) sentence
  ///
  /// # Errors
  /// - Service not ready
  /// - Input rejected by the token producer
  /// - Internal error
  fn analyze(&self, sentence: &str) -> Result<AnalyzeResult>;

  /// Readiness of each component
  fn readiness(&self) -> Readiness;
}

/// Sentence analysis service backed by a [`BunpouContext`]
///
/// Components that failed to initialize stay unavailable; the server still starts and
/// reports them through the health endpoint.
#[derive(Debug, Clone)]
pub struct AnalysisApiServiceFull {
  context: BunpouContext,
}

impl AnalysisApiServiceFull {
  /// Initializes every component from the configuration
  ///
  /// Never fails: component failures are logged and reported via [`Readiness`].
  #[must_use]
  pub fn new(config: &BunpouConfig) -> Self {
    Self::from_context(BunpouContext::init(config))
  }

  /// Wraps an already built context
  #[must_use]
  pub fn from_context(context: BunpouContext) -> Self {
    Self { context }
  }

  /// Analyzes a sentence
  ///
  /// # Errors
  /// - `service_unavailable` if any component failed to initialize
  /// - `invalid_input` if the token producer rejects the sentence
  pub fn analyze(&self, sentence: &str) -> Result<AnalyzeResult> {
    let Some(service) = self.context.analysis_service() else {
      warn!("解析サービスが未初期化のためリクエストを拒否します");
      return Err(ApiError::service_unavailable(
        "初期化に失敗したコンポーネントがあります。/api/v1/health を確認してください",
      ));
    };

    Ok(service.analyze(sentence)?)
  }
}

/// Production implementation of trait `AnalysisApiService`
impl AnalysisApiService for AnalysisApiServiceFull {
  fn analyze(&self, sentence: &str) -> Result<AnalyzeResult> {
    // Explicitly call the inherent method to avoid recursing into the trait method.
    AnalysisApiServiceFull::analyze(self, sentence)
  }

  fn readiness(&self) -> Readiness {
    self.context.readiness()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use bunpou::errors::TokenizerError;
  use bunpou::grammar::GrammarRuleEngine;
  use bunpou::models::Token;
  use bunpou::vocabulary::VocabularyMapper;
  use bunpou::TokenProducer;

  use super::*;

  struct EchoTokenizer;

  impl TokenProducer for EchoTokenizer {
    fn tokenize(&self, sentence: &str) -> std::result::Result<Vec<Token>, TokenizerError> {
      if sentence.chars().count() > 5 {
        return Err(TokenizerError::InvalidInput {
          reason: "too long".to_string(),
        });
      }
      Ok(vec![Token::new(sentence, sentence, "名詞", "")])
    }
  }

  fn ready_service() -> AnalysisApiServiceFull {
    let engine = GrammarRuleEngine::new(Vec::new()).unwrap();
    let context = BunpouContext::from_parts(
      Some(Arc::new(EchoTokenizer)),
      Some(Arc::new(engine)),
      Some(Arc::new(VocabularyMapper::default())),
    );
    AnalysisApiServiceFull::from_context(context)
  }

  #[test]
  fn analyze_with_ready_context() {
    let service = ready_service();
    let result = service.analyze("猫").unwrap();

    assert_eq!(result.sentence, "猫");
    assert_eq!(result.tokens.len(), 1);
    assert!(result.grammar_patterns.is_empty());
    assert!(AnalysisApiService::readiness(&service).is_ready());
  }

  #[test]
  fn analyze_without_service_is_unavailable() {
    let context = BunpouContext::from_parts(None, None, Some(Arc::new(VocabularyMapper::default())));
    let service = AnalysisApiServiceFull::from_context(context);

    let err = service.analyze("猫").unwrap_err();
    assert_eq!(err.code(), "service_unavailable");
    assert!(!AnalysisApiService::readiness(&service).analysis_service);
  }

  #[test]
  fn tokenizer_rejection_is_invalid_input() {
    let err = ready_service().analyze("とても長い文です").unwrap_err();
    assert_eq!(err.code(), "invalid_input");
  }

  #[test]
  fn new_with_missing_files_starts_degraded() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let mut config = BunpouConfig::default();
    config.dictionary.local_path = Some(temp_dir.path().join("missing.dic"));
    config.data.grammar_rules_path = temp_dir.path().join("missing_rules.json");
    config.data.vocabulary_path = temp_dir.path().join("missing_vocab.json");

    let service = AnalysisApiServiceFull::new(&config);
    let readiness = AnalysisApiService::readiness(&service);

    assert!(!readiness.tokenizer);
    assert!(!readiness.grammar_engine);
    assert!(readiness.vocabulary_mapper);
    assert_eq!(service.analyze("猫").unwrap_err().code(), "service_unavailable");
  }

  /// 実辞書と同梱の `data/` で「行かなければなりません」を解析する。
  ///
  /// IPADIC のダウンロード（初回）が必要なため `with_dict_tests` feature 有効時のみ実行。
  #[test]
  #[cfg_attr(not(feature = "with_dict_tests"), ignore)]
  fn analyze_with_downloaded_dictionary_and_bundled_rules() {
    let mut config = BunpouConfig::default();
    config.data.grammar_rules_path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/grammar_rules.json").into();
    config.data.vocabulary_path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/vocabulary_levels.json").into();

    let service = AnalysisApiServiceFull::new(&config);
    assert!(AnalysisApiService::readiness(&service).is_ready());

    let result = service.analyze("行かなければなりません").unwrap();
    let pattern = result
      .grammar_patterns
      .iter()
      .find(|p| p.id == "n4_nakereba_narimasen")
      .expect("n4_nakereba_narimasen should match");

    assert_eq!(pattern.matched_tokens, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(pattern.span.start, 0);
    assert_eq!(pattern.span.end, 11);
  }
}
