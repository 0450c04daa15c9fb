//! リクエストモデル定義

use serde::Deserialize;

/// 文解析リクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
  /// 解析対象の文
  pub sentence: String,
}
