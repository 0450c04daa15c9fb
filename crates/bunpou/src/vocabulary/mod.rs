//! vocabulary モジュール
pub mod vocabulary_mapper;

/// 再エクスポート
pub use vocabulary_mapper::VocabularyMapper;
