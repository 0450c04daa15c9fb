//! bunpou 日本語文解析ライブラリー
//!
//! vibrato-rkyv による形態素解析の結果に対して、文型パターンのマッチングと
//! JLPT 語彙レベルの付与を行う

/// 解析モジュール - マッチしたトークン列の文字オフセット (span) 計算
pub mod analysis;

/// 設定モジュール - BunpouConfig, DictionaryPreset等の設定構造体を定義
pub mod config;

/// 辞書モジュール - 形態素解析用辞書の管理・ロード機能を提供
pub mod dictionary;

/// エラーモジュール - BunpouError, BunpouResult等のエラー型を定義
pub mod errors;

/// 文型モジュール - ルールファイルのロードとスライディングウィンドウによるマッチング
pub mod grammar;

/// データモデルモジュール - Token, GrammarRule, AnalyzeResult等のデータ構造を定義
pub mod models;

/// サービスモジュール - AnalysisService, BunpouContext等の上位レベルAPIを提供
pub mod service;

/// トークナイザーモジュール - vibrato-rkyvを用いた形態素解析トークナイザー
pub mod tokenizer;

/// 語彙モジュール - 単語からJLPTレベル・読み・意味への対応表
pub mod vocabulary;

/// 再エクスポート
pub use config::BunpouConfig;
pub use errors::{BunpouError, BunpouResult};
pub use models::{AnalyzeResult, GrammarPattern, Span, Token};
pub use service::{AnalysisService, BunpouContext, Readiness};
pub use tokenizer::TokenProducer;
