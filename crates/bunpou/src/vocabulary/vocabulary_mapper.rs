//! Vocabulary level mapper
//!
//! Maps words to JLPT level, reading, meaning and romanization.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::errors::VocabularyError;
use crate::models::{Token, VocabEntry};

/// Immutable word → [`VocabEntry`] table
#[derive(Debug, Clone, Default)]
pub struct VocabularyMapper {
  entries: HashMap<String, VocabEntry>,
}

impl VocabularyMapper {
  /// Builds a mapper from normalized entries
  pub fn new(entries: HashMap<String, VocabEntry>) -> Self {
    Self { entries }
  }

  /// Loads the vocabulary file
  ///
  /// A missing file is not an error: the table is empty and a warning is logged.
  /// Individual malformed entries are skipped with a warning.
  ///
  /// # Errors
  /// - `VocabularyError::Parse` when the file exists but is not a JSON object
  /// - `VocabularyError::Io` for read failures other than "not found"
  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
    let path = path.as_ref();

    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        warn!(path = %path.display(), "Vocabulary file not found, using an empty table");
        return Ok(Self::default());
      }
      Err(e) => {
        return Err(VocabularyError::Io {
          path: path.to_path_buf(),
          source: Arc::new(e),
        });
      }
    };

    let mapper = Self::parse(&content, Some(path.to_path_buf()))?;
    info!(path = %path.display(), entry_count = mapper.len(), "Vocabulary loaded");

    Ok(mapper)
  }

  /// Parses a vocabulary table from a JSON string
  ///
  /// # Errors
  /// `VocabularyError::Parse` when the input is not a JSON object
  pub fn from_json_str(json: &str) -> Result<Self, VocabularyError> {
    Self::parse(json, None)
  }

  fn parse(json: &str, path: Option<PathBuf>) -> Result<Self, VocabularyError> {
    let raw: HashMap<String, JsonValue> =
      serde_json::from_str(json).map_err(|e| VocabularyError::Parse {
        path,
        source: Arc::new(e),
      })?;

    let entries = raw
      .into_iter()
      .filter_map(|(word, value)| match normalize_entry(value) {
        Some(entry) => Some((word, entry)),
        None => {
          warn!(word = %word, "Skipping malformed vocabulary entry");
          None
        }
      })
      .collect();

    Ok(Self { entries })
  }

  /// Number of entries
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Whether the table is empty
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Looks up a single word
  pub fn lookup_word(&self, word: &str) -> Option<&VocabEntry> {
    self.entries.get(word)
  }

  /// Looks up a token: lemma first, then surface
  pub fn lookup(&self, token: &Token) -> Option<&VocabEntry> {
    self.lookup_word(&token.lemma).or_else(|| self.lookup_word(&token.surface))
  }

  /// Fills the four vocabulary fields of the token
  ///
  /// Fields stay `None` when the word is unknown. No other field is touched.
  pub fn enrich(&self, mut token: Token) -> Token {
    if let Some(entry) = self.lookup(&token) {
      token.proficiency_level = entry.level.clone();
      token.reading = entry.reading.clone();
      token.meaning = entry.meaning.clone();
      token.romanization = entry.romanization.clone();
    }
    token
  }
}

/// A bare string is a level; an object is a full record; anything else is malformed
fn normalize_entry(value: JsonValue) -> Option<VocabEntry> {
  match value {
    JsonValue::String(level) => Some(VocabEntry::from_level(level)),
    JsonValue::Object(_) => serde_json::from_value(value).ok(),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use tempfile::TempDir;

  fn mapper(value: JsonValue) -> VocabularyMapper {
    VocabularyMapper::from_json_str(&value.to_string()).unwrap()
  }

  #[test]
  fn bare_string_normalizes_to_level_only() {
    let m = mapper(json!({"食べる": "N5"}));

    assert_eq!(
      m.lookup_word("食べる"),
      Some(&VocabEntry {
        level: Some("N5".to_string()),
        reading: None,
        meaning: None,
        romanization: None,
      })
    );
  }

  #[test]
  fn structured_record_is_kept() {
    let m = mapper(json!({
      "行く": {"level": "N5", "reading": "いく", "meaning": "to go", "romaji": "iku", "extra": 1}
    }));
    let entry = m.lookup_word("行く").unwrap();

    assert_eq!(entry.level.as_deref(), Some("N5"));
    assert_eq!(entry.reading.as_deref(), Some("いく"));
    assert_eq!(entry.meaning.as_deref(), Some("to go"));
    assert_eq!(entry.romanization.as_deref(), Some("iku"));
  }

  #[test]
  fn malformed_entries_are_skipped() {
    let m = mapper(json!({
      "ok": "N4",
      "number": 5,
      "list": ["N5"],
      "bad_field": {"level": 3},
      "null": null
    }));

    assert_eq!(m.len(), 1);
    assert!(m.lookup_word("ok").is_some());
    assert!(m.lookup_word("bad_field").is_none());
  }

  #[test]
  fn non_object_source_is_parse_error() {
    let err = VocabularyMapper::from_json_str("[\"N5\"]").unwrap_err();
    assert!(matches!(err, VocabularyError::Parse { .. }));

    let err = VocabularyMapper::from_json_str("{ broken").unwrap_err();
    assert!(matches!(err, VocabularyError::Parse { .. }));
  }

  #[test]
  fn lookup_prefers_lemma_then_surface() {
    let m = mapper(json!({"行く": "N5", "行か": "N1"}));
    let token = Token::new("行か", "行く", "動詞", "未然形");
    assert_eq!(m.lookup(&token).unwrap().level.as_deref(), Some("N5"));

    let m = mapper(json!({"行か": "N1"}));
    assert_eq!(m.lookup(&token).unwrap().level.as_deref(), Some("N1"));

    let m = mapper(json!({}));
    assert!(m.lookup(&token).is_none());
  }

  #[test]
  fn enrich_fills_fields_from_entry() {
    let m = mapper(json!({"行く": {"level": "N5", "reading": "いく"}}));
    let token = Token::new("行か", "行く", "動詞", "未然形");

    let enriched = m.enrich(token.clone());
    assert_eq!(enriched.proficiency_level.as_deref(), Some("N5"));
    assert_eq!(enriched.reading.as_deref(), Some("いく"));
    assert_eq!(enriched.meaning, None);
    assert_eq!(enriched.romanization, None);

    // Morphological fields are untouched
    assert_eq!(enriched.surface, token.surface);
    assert_eq!(enriched.lemma, token.lemma);
    assert_eq!(enriched.part_of_speech, token.part_of_speech);
    assert_eq!(enriched.conjugation_form, token.conjugation_form);
  }

  #[test]
  fn enrich_unknown_word_leaves_fields_unset() {
    let m = mapper(json!({"行く": "N5"}));
    let token = Token::new("猫", "猫", "名詞", "");

    assert_eq!(m.enrich(token.clone()), token);
  }

  #[test]
  fn from_path_missing_file_is_empty_table() {
    let temp_dir = TempDir::new().unwrap();
    let m = VocabularyMapper::from_path(temp_dir.path().join("missing.json")).unwrap();

    assert!(m.is_empty());
  }

  #[test]
  fn from_path_reads_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vocab.json");
    fs::write(&path, r#"{"見る": "N5", "静か": {"level": "N5", "reading": "しずか"}}"#).unwrap();

    let m = VocabularyMapper::from_path(&path).unwrap();
    assert_eq!(m.len(), 2);
  }

  #[test]
  fn from_path_corrupt_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vocab.json");
    fs::write(&path, "not json").unwrap();

    let err = VocabularyMapper::from_path(&path).unwrap_err();
    match err {
      VocabularyError::Parse { path: Some(p), .. } => assert_eq!(p, path),
      _ => panic!("expected Parse error with path"),
    }
  }
}
