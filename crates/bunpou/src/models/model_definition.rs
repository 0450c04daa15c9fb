//! Data Model Definition
use serde::{Deserialize, Serialize};

/// One morphological unit of the analyzed sentence
///
/// Produced by a [`TokenProducer`](crate::tokenizer::TokenProducer).
/// The four optional fields are filled in afterwards by the
/// [`VocabularyMapper`](crate::vocabulary::VocabularyMapper).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
  /// Surface form (literal text as it appears in the sentence)
  pub surface: String,

  /// Lemma (dictionary form)
  pub lemma: String,

  /// Part of speech (e.g. `動詞`, `助動詞`, `助詞`)
  pub part_of_speech: String,

  /// Conjugation form (e.g. `未然形`, `連用形`), empty when not applicable
  #[serde(default)]
  pub conjugation_form: String,

  /// JLPT level of the word (e.g. `N5`)
  #[serde(default)]
  pub proficiency_level: Option<String>,

  /// Reading in kana
  #[serde(default)]
  pub reading: Option<String>,

  /// Meaning / gloss
  #[serde(default)]
  pub meaning: Option<String>,

  /// Romanization
  #[serde(default)]
  pub romanization: Option<String>,
}

impl Token {
  /// Constructor for an un-enriched Token
  pub fn new(
    surface: impl Into<String>,
    lemma: impl Into<String>,
    part_of_speech: impl Into<String>,
    conjugation_form: impl Into<String>,
  ) -> Self {
    Self {
      surface: surface.into(),
      lemma: lemma.into(),
      part_of_speech: part_of_speech.into(),
      conjugation_form: conjugation_form.into(),
      proficiency_level: None,
      reading: None,
      meaning: None,
      romanization: None,
    }
  }
}

/// Constraint on a single token inside a rule pattern
///
/// `None` members are wildcards. `Some` members must equal the token field exactly,
/// except that a conjugation form of `*` (the dictionary's "no inflection" marker) also
/// matches the empty form the token producer emits for uninflected words.
/// Rule files in the wild use both the long names and the short `pos` / `conj` keys,
/// so both are accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
  /// Required part of speech
  #[serde(default, alias = "pos", skip_serializing_if = "Option::is_none")]
  pub part_of_speech: Option<String>,

  /// Required conjugation form
  #[serde(default, alias = "conj", skip_serializing_if = "Option::is_none")]
  pub conjugation_form: Option<String>,

  /// Required lemma
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lemma: Option<String>,

  /// Required surface form
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub surface: Option<String>,
}

impl Condition {
  /// Returns true when every constrained member equals the corresponding token field.
  pub fn matches(&self, token: &Token) -> bool {
    field_matches(self.part_of_speech.as_deref(), &token.part_of_speech)
      && conjugation_matches(self.conjugation_form.as_deref(), &token.conjugation_form)
      && field_matches(self.lemma.as_deref(), &token.lemma)
      && field_matches(self.surface.as_deref(), &token.surface)
  }

  /// Builder: constrain the part of speech
  #[must_use]
  pub fn with_part_of_speech(mut self, value: impl Into<String>) -> Self {
    self.part_of_speech = Some(value.into());
    self
  }

  /// Builder: constrain the conjugation form
  #[must_use]
  pub fn with_conjugation_form(mut self, value: impl Into<String>) -> Self {
    self.conjugation_form = Some(value.into());
    self
  }

  /// Builder: constrain the lemma
  #[must_use]
  pub fn with_lemma(mut self, value: impl Into<String>) -> Self {
    self.lemma = Some(value.into());
    self
  }

  /// Builder: constrain the surface form
  #[must_use]
  pub fn with_surface(mut self, value: impl Into<String>) -> Self {
    self.surface = Some(value.into());
    self
  }
}

fn field_matches(expected: Option<&str>, actual: &str) -> bool {
  expected.is_none_or(|e| e == actual)
}

fn conjugation_matches(expected: Option<&str>, actual: &str) -> bool {
  match expected {
    Some("*") => actual.is_empty() || actual == "*",
    _ => field_matches(expected, actual),
  }
}

/// Grammar construction rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarRule {
  /// Rule ID (e.g. `n4_nakereba_narimasen`)
  pub id: String,

  /// Display name (e.g. `〜なければなりません`)
  pub name: String,

  /// JLPT level of the construction
  pub level: String,

  /// Meaning of the construction
  #[serde(default)]
  pub meaning: String,

  /// Ordered token conditions, never empty once loaded by the engine
  pub pattern: Vec<Condition>,
}

/// One successful anchoring of a rule on the token sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarMatch {
  /// ID of the matched rule
  pub rule_id: String,

  /// Name of the matched rule
  pub rule_name: String,

  /// Level of the matched rule
  pub level: String,

  /// Meaning of the matched rule
  pub meaning: String,

  /// Contiguous, increasing token positions, one per pattern condition
  pub matched_indices: Vec<usize>,

  /// Surface forms of the matched tokens in order
  pub structure: Vec<String>,
}

/// Character offset range in the original sentence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
  /// Start offset (characters, inclusive)
  pub start: usize,

  /// End offset (characters, exclusive)
  pub end: usize,
}

/// Grammar match as reported to callers, with its span in the sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarPattern {
  /// Rule ID
  pub id: String,

  /// Rule name
  pub name: String,

  /// Rule level
  pub level: String,

  /// Rule meaning
  pub meaning: String,

  /// Surface forms of the matched tokens
  pub structure: Vec<String>,

  /// Character span in the sentence
  pub span: Span,

  /// Matched token positions
  pub matched_tokens: Vec<usize>,
}

impl GrammarPattern {
  /// Builds the reported pattern from an engine match and its computed span
  pub fn from_match(grammar_match: GrammarMatch, span: Span) -> Self {
    Self {
      id: grammar_match.rule_id,
      name: grammar_match.rule_name,
      level: grammar_match.level,
      meaning: grammar_match.meaning,
      structure: grammar_match.structure,
      span,
      matched_tokens: grammar_match.matched_indices,
    }
  }
}

/// Normalized vocabulary table entry
///
/// The raw table may hold a bare level string (`"N5"`) instead of a record;
/// see [`VocabularyMapper`](crate::vocabulary::VocabularyMapper) for normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
  /// JLPT level
  #[serde(default)]
  pub level: Option<String>,

  /// Reading
  #[serde(default)]
  pub reading: Option<String>,

  /// Meaning
  #[serde(default)]
  pub meaning: Option<String>,

  /// Romanization
  #[serde(default, alias = "romaji")]
  pub romanization: Option<String>,
}

impl VocabEntry {
  /// Entry carrying only a level
  pub fn from_level(level: impl Into<String>) -> Self {
    Self {
      level: Some(level.into()),
      ..Self::default()
    }
  }
}

/// Result of analyzing one sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
  /// The analyzed sentence
  pub sentence: String,

  /// Every grammar match, in engine order
  pub grammar_patterns: Vec<GrammarPattern>,

  /// Enriched tokens, in sentence order
  pub tokens: Vec<Token>,
}

impl AnalyzeResult {
  /// Result for a sentence that produced no tokens
  pub fn empty(sentence: impl Into<String>) -> Self {
    Self {
      sentence: sentence.into(),
      grammar_patterns: Vec::new(),
      tokens: Vec::new(),
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
