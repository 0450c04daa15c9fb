//! grammar モジュール
pub mod rule_engine;

/// 再エクスポート
pub use rule_engine::GrammarRuleEngine;
