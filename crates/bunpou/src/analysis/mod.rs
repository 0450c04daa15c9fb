//! analysis モジュール
pub mod span_calculator;

/// 再エクスポート
pub use span_calculator::compute_span;
