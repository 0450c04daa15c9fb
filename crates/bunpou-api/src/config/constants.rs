//! API設定の定数定義

/// 入力文の最大長（バイト単位）
///
/// トリム後の文に適用する。UTF-8 の日本語でおよそ 1000 文字に相当。
pub const MAX_SENTENCE_LENGTH: usize = 3_000;

/// デフォルトのバインドアドレス
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// デフォルトの辞書プリセット名
///
/// 同梱の文型ルールは IPADIC の品詞体系で書かれている。
pub const DEFAULT_PRESET_DICT: &str = "ipadic";
