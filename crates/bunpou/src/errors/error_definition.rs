//! エラー定義

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use vibrato_rkyv::dictionary::PresetDictionaryKind;

/// 設定（BunpouConfig）関連のエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ConfigError {
  /// data.grammar_rules_path が空
  #[error("data.grammar_rules_path を指定してください")]
  EmptyGrammarRulesPath,

  /// data.vocabulary_path が空
  #[error("data.vocabulary_path を指定してください")]
  EmptyVocabularyPath,

  /// analysis.max_sentence_chars < 1
  #[error("analysis.max_sentence_chars は 1 以上である必要があります: actual={actual}")]
  InvalidMaxSentenceChars {
    /// 実際に指定された値
    actual: usize,
  },

  /// dictionary.cache_dir が「存在するディレクトリ」でない（ファイルである等）
  #[error("dictionary.cache_dir がディレクトリではありません: path={path:?}")]
  InvalidDictionaryCacheDir {
    /// 不正なパス
    path: PathBuf,
  },

  /// dictionary.cache_dir の作成に失敗
  #[error("dictionary.cache_dir の作成に失敗しました: path={path:?}, error={source}")]
  DictionaryCacheDirCreationFailed {
    /// 作成しようとしたパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },
}

/// 辞書関連のエラー
/// Vibrato では ipadic, unidic 等の辞書を使用可能
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum DictionaryError {
  /// キャッシュディレクトリーが見つからない
  #[error("辞書キャッシュディレクトリーが見つかりません")]
  CacheDirNotFound,

  /// キャッシュディレクトリーの作成失敗
  #[error("辞書キャッシュディレクトリーの作成に失敗しました: {0}")]
  CacheDirCreationFailed(Arc<io::Error>),

  /// 指定された辞書が見つからない
  #[error("指定された辞書が見つかりません: {0}")]
  DictionaryNotFound(String),

  /// 辞書パスが不正または辞書種別が不正
  #[error("辞書パスまたは辞書種別が不正です: path={0}, preset_kind={1:?}")]
  InvalidPathOrInvalidPresetKind(PathBuf, Option<PresetDictionaryKind>),

  /// vibrato-rkyv による辞書のロード失敗
  #[error("vibrato-rkyv 辞書ロードエラー: {0}")]
  VibratoLoad(Arc<dyn std::error::Error + Send + Sync + 'static>),

  /// vibrato-rkyv のプリセット辞書のダウンロード失敗
  #[error("vibrato-rkyv プリセット辞書ダウンロード失敗: {0}")]
  PresetDictDownloadFailed(Arc<dyn std::error::Error + Send + Sync + 'static>),
}

/// トークナイザー関連エラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum TokenizerError {
  /// 辞書起因のエラー
  #[error("辞書エラー: {0}")]
  Dictionary(#[from] DictionaryError),

  /// 入力テキストが不正
  #[error("トークナイズ対象の入力テキストが不正: {reason}")]
  InvalidInput {
    /// 不正の理由
    reason: String,
  },
}

/// 文型ルール（grammar_rules.json）関連のエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum GrammarError {
  /// ルールファイルが存在しない
  #[error("文型ルールファイルが見つかりません: {path:?}")]
  NotFound {
    /// 指定されたパス
    path: PathBuf,
  },

  /// ルールファイルの JSON が不正
  #[error("文型ルールファイルの形式が不正です: path={path:?}, error={source}")]
  Parse {
    /// 読み込んだパス（文字列から読み込んだ場合は `None`）
    path: Option<PathBuf>,
    /// 元となった JSON エラー
    #[source]
    source: Arc<serde_json::Error>,
  },

  /// JSON としては正しいが、ルールとして不正（pattern が空等）
  #[error("文型ルールが不正です: id={id}, reason={reason}")]
  InvalidRule {
    /// ルール ID
    id: String,
    /// 不正の理由
    reason: String,
  },

  /// NotFound 以外の IO エラー（権限不足等）
  #[error("文型ルールファイルの読み込みに失敗しました: path={path:?}, error={source}")]
  Io {
    /// 読み込もうとしたパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },
}

impl GrammarError {
  /// ルールソースが存在しない種類のエラーか
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound { .. })
  }

  /// ルールソースの構造が不正な種類のエラーか
  ///
  /// JSON 構文エラーと、空パターン等のルール不正の両方を含む。
  pub fn is_parse_error(&self) -> bool {
    matches!(self, Self::Parse { .. } | Self::InvalidRule { .. })
  }
}

/// 語彙テーブル（vocabulary_levels.json）関連のエラー
///
/// ファイルが存在しない場合はエラーにならない（空テーブル + 警告ログ）。
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum VocabularyError {
  /// 語彙ファイルの JSON が不正
  #[error("語彙ファイルの形式が不正です: path={path:?}, error={source}")]
  Parse {
    /// 読み込んだパス（文字列から読み込んだ場合は `None`）
    path: Option<PathBuf>,
    /// 元となった JSON エラー
    #[source]
    source: Arc<serde_json::Error>,
  },

  /// NotFound 以外の IO エラー
  #[error("語彙ファイルの読み込みに失敗しました: path={path:?}, error={source}")]
  Io {
    /// 読み込もうとしたパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },
}

/// 統合エラー
/// 本クレートの外部に公開するエラー用 API はこのエラーを返すこと
/// `BunpouResult<T>` = `Result<T, BunpouError>` として使用する
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum BunpouError {
  /// 辞書関連エラー
  #[error(transparent)]
  Dictionary(#[from] DictionaryError),

  /// トークナイザー関連エラー
  #[error(transparent)]
  Tokenizer(#[from] TokenizerError),

  /// 文型ルール関連エラー
  #[error(transparent)]
  Grammar(#[from] GrammarError),

  /// 語彙テーブル関連エラー
  #[error(transparent)]
  Vocabulary(#[from] VocabularyError),

  /// 設定エラー
  #[error(transparent)]
  Config(#[from] ConfigError),
}

/// bunpou クレートの標準 Result 型エイリアス
pub type BunpouResult<T> = Result<T, BunpouError>;
