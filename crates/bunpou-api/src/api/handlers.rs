//! HTTPハンドラー定義

use axum::{Json, extract::State};
use bunpou::AnalyzeResult;
use tracing::{debug, error, info};

use crate::config::MAX_SENTENCE_LENGTH;
use crate::errors::ApiError;
use crate::models::{AnalyzeRequest, HealthResponse, RootResponse};

use super::state::AppState;

/// POST /api/v1/analyze エンドポイント
///
/// 日本語の文を解析し、文型パターンと語彙レベル付きのトークン列を返す。
///
/// # Request Body
/// ```json
/// { "sentence": "行かなければなりません" }
/// ```
///
/// # Response
/// - 200 OK: 解析成功
/// - 400 Bad Request: 入力エラー（空文、文長超過、形態素解析器が拒否した入力）
/// - 503 Service Unavailable: 初期化に失敗したコンポーネントがある
/// - 500 Internal Server Error: 内部エラー
pub async fn post_analyze(
  State(state): State<AppState>,
  Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResult>, ApiError> {
  let sentence = validate_sentence(&request.sentence)?.to_string();
  debug!(sentence_len = sentence.len(), "文解析リクエストを受信");

  // 形態素解析は CPU バウンドなので、非同期ランタイムをブロックしないよう分離
  let service = state.service.clone();

  let result =
    tokio::task::spawn_blocking(move || service.analyze(&sentence)).await.map_err(|e| {
      error!(error = %e, "spawn_blocking エラー");
      ApiError::internal("処理の実行に失敗しました")
    })??;

  info!(
    token_count = result.tokens.len(),
    pattern_count = result.grammar_patterns.len(),
    "文解析完了"
  );

  Ok(Json(result))
}

/// GET /api/v1/health エンドポイント
///
/// 各コンポーネントの初期化状態を返す。サービスが degraded でも 200 を返す。
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
  Json(HealthResponse::from(state.service.readiness()))
}

/// GET / エンドポイント
pub async fn root() -> Json<RootResponse> {
  Json(RootResponse::default())
}

/// 前後の空白を除き、空文と長さ超過を拒否する
fn validate_sentence(raw: &str) -> Result<&str, ApiError> {
  let sentence = raw.trim();

  if sentence.is_empty() {
    return Err(ApiError::invalid_input("文が空です"));
  }

  if sentence.len() > MAX_SENTENCE_LENGTH {
    return Err(ApiError::text_too_long(sentence.len(), MAX_SENTENCE_LENGTH));
  }

  Ok(sentence)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validate_trims_whitespace() {
    assert_eq!(validate_sentence("  猫です\n").unwrap(), "猫です");
    assert_eq!(validate_sentence("\u{3000}猫\u{3000}").unwrap(), "猫");
  }

  #[test]
  fn validate_rejects_blank() {
    assert_eq!(validate_sentence("").unwrap_err().code(), "invalid_input");
    assert_eq!(validate_sentence(" \t ").unwrap_err().code(), "invalid_input");
  }

  #[test]
  fn validate_rejects_too_long() {
    let long = "あ".repeat(MAX_SENTENCE_LENGTH / 3 + 1);
    assert_eq!(validate_sentence(&long).unwrap_err().code(), "text_too_long");

    let fits = "a".repeat(MAX_SENTENCE_LENGTH);
    assert!(validate_sentence(&fits).is_ok());
  }
}
