//! tokenizer モジュール
pub mod vibrato_tokenizer;

use crate::errors::TokenizerError;
use crate::models::Token;

/// 再エクスポート
pub use vibrato_tokenizer::{FeatureLayout, VibratoTokenProducer};

/// 形態素解析器の共通インターフェース
///
/// 本番実装 (`VibratoTokenProducer`) とテスト用スタブを差し替えられるようにする。
pub trait TokenProducer: Send + Sync {
  /// 文を形態素単位のトークン列に分割する
  ///
  /// 空文字列には空の列を返す。
  ///
  /// # Errors
  /// 解析不能な入力、辞書起因の失敗
  fn tokenize(&self, sentence: &str) -> Result<Vec<Token>, TokenizerError>;
}
