//! models module
pub mod model_definition;

/// 再エクスポート
pub use model_definition::{
  AnalyzeResult, Condition, GrammarMatch, GrammarPattern, GrammarRule, Span, Token, VocabEntry,
};
