//! ルーター定義

use axum::{
  Router,
  routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::handlers::{health_check, post_analyze, root};
use super::state::AppState;
use crate::errors::ApiError;

/// APIルーターを作成する
///
/// | Method | Path              |
/// |--------|-------------------|
/// | GET    | `/`               |
/// | POST   | `/api/v1/analyze` |
/// | GET    | `/api/v1/health`  |
pub fn create_router(state: AppState) -> Router {
  let v1 = Router::new()
    .route("/analyze", post(post_analyze))
    .route("/health", get(health_check));

  Router::new()
    .route("/", get(root))
    .nest("/api/v1", v1)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// サーバーを起動する
///
/// # Errors
/// バインドまたはサーバーの実行に失敗した場合にエラーを返す
pub async fn run_server(state: AppState) -> crate::errors::Result<()> {
  let addr = state.config.bind_addr.clone();
  let listener = tokio::net::TcpListener::bind(&addr)
    .await
    .map_err(|e| ApiError::config(format!("バインドに失敗しました: {}", e)))?;

  tracing::info!("サーバーを起動します: http://{}", addr);

  let router = create_router(state);

  axum::serve(listener, router)
    .await
    .map_err(|e| ApiError::internal(format!("サーバーエラー: {}", e)))?;

  Ok(())
}
