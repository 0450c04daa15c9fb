// crates/bunpou/src/service.rs

//! AnalysisService / BunpouContext: bunpou クレートの統合ファサード。
//!
//! - 形態素解析 (TokenProducer)
//! - 文型マッチング (GrammarRuleEngine)
//! - 語彙レベル付与 (VocabularyMapper)
//! - span 計算 (compute_span)
//!
//! HTTP サーバーなどの外部からは、起動時に一度だけ `BunpouContext` を構築し、
//! リクエストハンドラーに渡せばよい。グローバルな可変状態は持たない。
//!
//! # 並行性
//!
//! ルールセットと語彙テーブルは構築後に変更されないため、`analyze` は
//! ロックなしで複数スレッドから同時に呼び出せる。

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::analysis::compute_span;
use crate::config::BunpouConfig;
use crate::dictionary::DictionaryManager;
use crate::errors::error_definition::BunpouResult;
use crate::grammar::GrammarRuleEngine;
use crate::models::{AnalyzeResult, GrammarPattern};
use crate::tokenizer::{FeatureLayout, TokenProducer, VibratoTokenProducer};
use crate::vocabulary::VocabularyMapper;

/// 文解析サービス
///
/// 3 つのコンポーネントがすべて Ready の場合にのみ構築できる。
/// リクエスト間で状態を持たない。
#[derive(Clone)]
pub struct AnalysisService {
  /// 形態素解析器
  tokenizer: Arc<dyn TokenProducer>,

  /// 文型ルールエンジン
  grammar_engine: Arc<GrammarRuleEngine>,

  /// 語彙マッパー
  vocabulary_mapper: Arc<VocabularyMapper>,
}

impl AnalysisService {
  /// Ready なコンポーネントからサービスを組み立てる。
  pub fn new(
    tokenizer: Arc<dyn TokenProducer>,
    grammar_engine: Arc<GrammarRuleEngine>,
    vocabulary_mapper: Arc<VocabularyMapper>,
  ) -> Self {
    Self {
      tokenizer,
      grammar_engine,
      vocabulary_mapper,
    }
  }

  /// 設定からすべてのコンポーネントを構築する（厳格版）。
  ///
  /// # 処理フロー
  /// 1. 設定の妥当性を検証
  /// 2. 辞書ロード（失敗は `BunpouError::Dictionary`）+ VibratoTokenProducer 構築
  /// 3. 文型ルールのロード
  /// 4. 語彙テーブルのロード（ファイルがなければ空テーブル）
  ///
  /// # エラー
  /// いずれかの段階で失敗した場合、そのエラーをそのまま返す。
  /// 部分的に初期化された状態が必要な場合は [`BunpouContext::init`] を使うこと。
  pub fn init(config: &BunpouConfig) -> BunpouResult<Self> {
    config.validate()?;

    let dictionary = DictionaryManager::from_config(config)?.load()?;
    let layout = FeatureLayout::for_preset(config.dictionary_preset());
    let tokenizer = VibratoTokenProducer::from_shared_dictionary(dictionary, layout)
      .with_max_sentence_chars(config.max_sentence_chars());
    let grammar_engine = GrammarRuleEngine::from_path(config.grammar_rules_path())?;
    let vocabulary_mapper = VocabularyMapper::from_path(config.vocabulary_path())?;

    Ok(Self::new(
      Arc::new(tokenizer),
      Arc::new(grammar_engine),
      Arc::new(vocabulary_mapper),
    ))
  }

  /// 文を解析する。
  ///
  /// # 処理フロー
  /// 1. 形態素解析（トークンが空なら他のコンポーネントに触れずに空の結果を返す）
  /// 2. 文型マッチング
  /// 3. 全トークンに語彙情報を付与（順序は保持）
  /// 4. マッチごとに span を計算して GrammarPattern を組み立てる
  ///
  /// `grammar_patterns` の順序はエンジンが返した順（開始位置優先、同位置ではルール順）。
  ///
  /// # エラー
  /// 形態素解析の失敗のみ。部分的な結果は返さない。
  pub fn analyze(&self, sentence: &str) -> BunpouResult<AnalyzeResult> {
    let tokens = self.tokenizer.tokenize(sentence)?;

    if tokens.is_empty() {
      return Ok(AnalyzeResult::empty(sentence));
    }

    let grammar_matches = self.grammar_engine.match_tokens(&tokens);

    let grammar_patterns = grammar_matches
      .into_iter()
      .map(|m| {
        let span = compute_span(sentence, &tokens, &m.matched_indices);
        GrammarPattern::from_match(m, span)
      })
      .collect();

    let tokens = tokens.into_iter().map(|t| self.vocabulary_mapper.enrich(t)).collect();

    let result = AnalyzeResult {
      sentence: sentence.to_string(),
      grammar_patterns,
      tokens,
    };

    debug!(
      token_count = result.tokens.len(),
      pattern_count = result.grammar_patterns.len(),
      "Sentence analyzed"
    );

    Ok(result)
  }
}

impl fmt::Debug for AnalysisService {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AnalysisService")
      .field("rule_count", &self.grammar_engine.len())
      .field("vocabulary_size", &self.vocabulary_mapper.len())
      .finish_non_exhaustive()
  }
}

/// 各コンポーネントが Ready に到達したかどうか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
  /// 形態素解析器
  pub tokenizer: bool,
  /// 文型ルールエンジン
  pub grammar_engine: bool,
  /// 語彙マッパー
  pub vocabulary_mapper: bool,
  /// 解析サービス（上記 3 つがすべて Ready の場合のみ true）
  pub analysis_service: bool,
}

impl Readiness {
  /// すべて Ready か
  pub fn is_ready(&self) -> bool {
    self.tokenizer && self.grammar_engine && self.vocabulary_mapper && self.analysis_service
  }
}

/// プロセス全体で共有するコンテキスト。
///
/// 起動時に一度だけ構築し、以降は読み取り専用。
/// 構築に失敗したコンポーネントは `None`（Uninitialized）として保持し、
/// ヘルスチェックで報告できるようにする。
#[derive(Debug, Clone)]
pub struct BunpouContext {
  tokenizer_ready: bool,
  grammar_engine: Option<Arc<GrammarRuleEngine>>,
  vocabulary_mapper: Option<Arc<VocabularyMapper>>,
  analysis_service: Option<AnalysisService>,
}

impl BunpouContext {
  /// 設定から各コンポーネントを個別に構築する。
  ///
  /// 失敗したコンポーネントはエラーログを出して Uninitialized のままにする。
  /// 設定自体が不正な場合はすべて Uninitialized になる。
  pub fn init(config: &BunpouConfig) -> Self {
    if let Err(e) = config.validate() {
      error!(error = %e, "設定が不正なため、コンポーネントを初期化しません");
      return Self::from_parts(None, None, None);
    }

    let tokenizer = ready_or_log("VibratoTokenProducer", VibratoTokenProducer::from_config(config))
      .map(|t| Arc::new(t) as Arc<dyn TokenProducer>);

    let grammar_engine = ready_or_log(
      "GrammarRuleEngine",
      GrammarRuleEngine::from_path(config.grammar_rules_path()),
    )
    .map(Arc::new);

    let vocabulary_mapper = ready_or_log(
      "VocabularyMapper",
      VocabularyMapper::from_path(config.vocabulary_path()),
    )
    .map(Arc::new);

    Self::from_parts(tokenizer, grammar_engine, vocabulary_mapper)
  }

  /// 構築済み（または失敗した）コンポーネントからコンテキストを組み立てる。
  ///
  /// 3 つすべてが `Some` の場合のみ AnalysisService を構築する。
  pub fn from_parts(
    tokenizer: Option<Arc<dyn TokenProducer>>,
    grammar_engine: Option<Arc<GrammarRuleEngine>>,
    vocabulary_mapper: Option<Arc<VocabularyMapper>>,
  ) -> Self {
    let tokenizer_ready = tokenizer.is_some();

    let analysis_service = match (tokenizer, &grammar_engine, &vocabulary_mapper) {
      (Some(tokenizer), Some(engine), Some(mapper)) => {
        info!("AnalysisService を初期化しました");
        Some(AnalysisService::new(tokenizer, Arc::clone(engine), Arc::clone(mapper)))
      }
      _ => {
        error!("一部のコンポーネントの初期化に失敗したため、AnalysisService を作成しません");
        None
      }
    };

    Self {
      tokenizer_ready,
      grammar_engine,
      vocabulary_mapper,
      analysis_service,
    }
  }

  /// 各コンポーネントの状態を返す。
  pub fn readiness(&self) -> Readiness {
    Readiness {
      tokenizer: self.tokenizer_ready,
      grammar_engine: self.grammar_engine.is_some(),
      vocabulary_mapper: self.vocabulary_mapper.is_some(),
      analysis_service: self.analysis_service.is_some(),
    }
  }

  /// 解析サービスを返す（すべて Ready の場合のみ）。
  pub fn analysis_service(&self) -> Option<&AnalysisService> {
    self.analysis_service.as_ref()
  }
}

/// 成功ならログを出して値を返し、失敗ならエラーログを出して `None` を返す。
fn ready_or_log<T, E: fmt::Display>(component: &str, result: Result<T, E>) -> Option<T> {
  match result {
    Ok(value) => {
      info!(component, "初期化に成功しました");
      Some(value)
    }
    Err(e) => {
      error!(component, error = %e, "初期化に失敗しました");
      None
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// テストモジュール
// ─────────────────────────────────────────────────────────────────────────────
