//! Token producer backed by vibrato-rkyv

use std::sync::Arc;
use tracing::debug;
use vibrato_rkyv::Dictionary;
use vibrato_rkyv::Tokenizer as VibratoImpl;
use vibrato_rkyv::dictionary::PresetDictionaryKind;

use crate::config::{BunpouConfig, DEFAULT_MAX_SENTENCE_CHARS};
use crate::dictionary::DictionaryManager;
use crate::errors::TokenizerError;
use crate::models::Token;

use super::TokenProducer;

/// Placeholder used by MeCab-style dictionaries for an empty feature column
const EMPTY_FEATURE: &str = "*";

/// Column positions inside a comma-separated feature string
///
/// | Dictionary | POS | Conjugation form | Lemma |
/// |------------|-----|------------------|-------|
/// | IPADIC     | 0   | 5                | 6     |
/// | UniDic     | 0   | 5                | 7     |
///
/// UniDic puts the lemma reading (`lForm`) at column 6, the lemma itself follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLayout {
  /// Part of speech column
  pub pos: usize,
  /// Conjugation form column
  pub conjugation_form: usize,
  /// Lemma column
  pub lemma: usize,
}

impl FeatureLayout {
  /// IPADIC layout
  pub const IPADIC: Self = Self {
    pos: 0,
    conjugation_form: 5,
    lemma: 6,
  };

  /// UniDic (cwj / csj) layout
  pub const UNIDIC: Self = Self {
    pos: 0,
    conjugation_form: 5,
    lemma: 7,
  };

  /// Layout of the given preset dictionary
  pub fn for_preset(kind: PresetDictionaryKind) -> Self {
    match kind {
      PresetDictionaryKind::Ipadic => Self::IPADIC,
      _ => Self::UNIDIC,
    }
  }

  /// Converts one analyzed segment into a [`Token`]
  ///
  /// - A lemma of `*` or missing falls back to the surface
  /// - A conjugation form of `*` becomes the empty string
  pub fn parse(&self, surface: &str, feature: &str) -> Token {
    let parts: Vec<&str> = feature.split(',').collect();
    let column = |idx: usize| parts.get(idx).copied().filter(|s| !s.is_empty() && *s != EMPTY_FEATURE);

    Token::new(
      surface,
      column(self.lemma).unwrap_or(surface),
      parts.get(self.pos).copied().unwrap_or_default(),
      column(self.conjugation_form).unwrap_or_default(),
    )
  }
}

/// Japanese token producer using vibrato-rkyv
///
/// - Only holds the shared dictionary; a worker is created per call
/// - `Clone + Send + Sync`
#[derive(Clone)]
pub struct VibratoTokenProducer {
  inner: VibratoImpl,
  layout: FeatureLayout,
  max_sentence_chars: usize,
}

impl VibratoTokenProducer {
  /// Constructs a producer from a shared dictionary (`Arc<Dictionary>`).
  ///
  /// # Examples
  /// ```rust,no_run
  /// # use bunpou::dictionary::DictionaryManager;
  /// # use bunpou::tokenizer::{FeatureLayout, VibratoTokenProducer};
  /// # use vibrato_rkyv::dictionary::PresetDictionaryKind;
  /// let manager = DictionaryManager::with_preset(PresetDictionaryKind::Ipadic).unwrap();
  /// let dict = manager.load().unwrap();
  /// let producer = VibratoTokenProducer::from_shared_dictionary(dict, FeatureLayout::IPADIC);
  /// ```
  pub fn from_shared_dictionary(dict: Arc<Dictionary>, layout: FeatureLayout) -> Self {
    Self {
      inner: VibratoImpl::from_shared_dictionary(dict),
      layout,
      max_sentence_chars: DEFAULT_MAX_SENTENCE_CHARS,
    }
  }

  /// Loads the configured dictionary and builds the producer
  ///
  /// # Errors
  /// Dictionary lookup, download or load failures
  pub fn from_config(config: &BunpouConfig) -> Result<Self, TokenizerError> {
    let manager = DictionaryManager::from_config(config)?;
    let dict = manager.load()?;
    let layout = FeatureLayout::for_preset(config.dictionary_preset());

    Ok(Self::from_shared_dictionary(dict, layout).with_max_sentence_chars(config.max_sentence_chars()))
  }

  /// Builder: upper bound on input length in characters
  #[must_use]
  pub fn with_max_sentence_chars(mut self, max_sentence_chars: usize) -> Self {
    self.max_sentence_chars = max_sentence_chars;
    self
  }
}

impl TokenProducer for VibratoTokenProducer {
  fn tokenize(&self, sentence: &str) -> Result<Vec<Token>, TokenizerError> {
    if sentence.is_empty() {
      return Ok(Vec::new());
    }

    let chars = sentence.chars().count();
    if chars > self.max_sentence_chars {
      return Err(TokenizerError::InvalidInput {
        reason: format!("文が長すぎます: {} 文字（最大: {} 文字）", chars, self.max_sentence_chars),
      });
    }

    // The worker holds the lattice, created each time
    let mut worker = self.inner.new_worker();
    worker.reset_sentence(sentence);
    worker.tokenize();

    let mut tokens = Vec::with_capacity(worker.num_tokens());
    for token in worker.token_iter() {
      let surface = token.surface();
      let feature = token.feature();

      debug!(surface = %surface, ?feature, "Token");

      tokens.push(self.layout.parse(surface, feature));
    }

    debug!(sentence = %sentence, token_count = tokens.len(), "Morphological analysis completed");

    Ok(tokens)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_ipadic_verb() {
    let token = FeatureLayout::IPADIC.parse("行か", "動詞,自立,*,*,五段・カ行促音便,未然形,行く,イカ,イカ");

    assert_eq!(token.surface, "行か");
    assert_eq!(token.part_of_speech, "動詞");
    assert_eq!(token.conjugation_form, "未然形");
    assert_eq!(token.lemma, "行く");
    assert_eq!(token.proficiency_level, None);
  }

  #[test]
  fn parse_ipadic_particle_has_empty_conjugation() {
    let token = FeatureLayout::IPADIC.parse("ば", "助詞,接続助詞,*,*,*,*,ば,バ,バ");

    assert_eq!(token.part_of_speech, "助詞");
    assert_eq!(token.conjugation_form, "");
    assert_eq!(token.lemma, "ば");
  }

  #[test]
  fn parse_unknown_word_falls_back_to_surface() {
    // Unknown words carry only the leading columns
    let token = FeatureLayout::IPADIC.parse("ボブ", "名詞,固有名詞,人名,*,*,*,*");

    assert_eq!(token.lemma, "ボブ");
    assert_eq!(token.part_of_speech, "名詞");
    assert_eq!(token.conjugation_form, "");
  }

  #[test]
  fn parse_short_feature() {
    let token = FeatureLayout::IPADIC.parse("x", "記号");

    assert_eq!(token.part_of_speech, "記号");
    assert_eq!(token.lemma, "x");
    assert_eq!(token.conjugation_form, "");
  }

  #[test]
  fn parse_unidic_uses_lemma_column() {
    let token = FeatureLayout::UNIDIC.parse(
      "行か",
      "動詞,非自立可能,*,*,五段-カ行,未然形-一般,イク,行く,行か,イカ,行く,イク,和,*,*,*,*",
    );

    assert_eq!(token.lemma, "行く");
    assert_eq!(token.conjugation_form, "未然形-一般");
  }

  #[test]
  fn layout_for_preset() {
    assert_eq!(FeatureLayout::for_preset(PresetDictionaryKind::Ipadic), FeatureLayout::IPADIC);
    assert_eq!(FeatureLayout::for_preset(PresetDictionaryKind::UnidicCwj), FeatureLayout::UNIDIC);
    assert_eq!(FeatureLayout::for_preset(PresetDictionaryKind::UnidicCsj), FeatureLayout::UNIDIC);
  }
}
