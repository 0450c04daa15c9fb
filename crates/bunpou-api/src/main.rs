//! bunpou-api サーバーエントリーポイント

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use bunpou_api::ApiError;
use bunpou_api::api::{AppState, run_server};
use bunpou_api::config::Config;
use bunpou_api::service::{AnalysisApiService, AnalysisApiServiceFull};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
  // 設定の読み込み（ログ初期化前なのでエラーはそのまま返す）
  let config = Config::from_env()?;

  // ロギングの初期化: RUST_LOG があればそちらを優先
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(config.bunpou.log_level().as_filter_str()));
  tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).init();

  tracing::info!(
    preset = ?config.bunpou.dictionary.preset,
    grammar_rules = %config.bunpou.grammar_rules_path().display(),
    vocabulary = %config.bunpou.vocabulary_path().display(),
    "設定を読み込みました"
  );

  // サービスの初期化（失敗したコンポーネントがあっても起動する）
  let service = AnalysisApiServiceFull::new(&config.bunpou);
  let readiness = service.readiness();
  if readiness.is_ready() {
    tracing::info!("解析サービスを初期化しました");
  } else {
    tracing::warn!(?readiness, "一部のコンポーネントが利用できません（degraded）");
  }

  // アプリケーション状態の作成
  let state = AppState::new(config, Arc::new(service));

  // サーバー起動
  run_server(state).await
}
