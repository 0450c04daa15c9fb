// crates/bunpou/src/config.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use vibrato_rkyv::dictionary::PresetDictionaryKind;

use crate::errors::ConfigError;

/// Default path of the grammar rule file
pub const DEFAULT_GRAMMAR_RULES_PATH: &str = "data/grammar_rules.json";

/// Default path of the vocabulary level file
pub const DEFAULT_VOCABULARY_PATH: &str = "data/vocabulary_levels.json";

/// Default upper bound on sentence length (characters)
pub const DEFAULT_MAX_SENTENCE_CHARS: usize = 1_000;

/// Top-level configuration for bunpou.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BunpouConfig {
  /// [dictionary] section
  #[serde(default)]
  pub dictionary: DictionaryConfig,
  /// [data] section
  #[serde(default)]
  pub data: DataConfig,
  /// [analysis] section
  #[serde(default)]
  pub analysis: AnalysisConfig,
  /// [logging] section
  #[serde(default)]
  pub logging: LoggingConfig,
}

/// [dictionary] section configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictionaryConfig {
  /// Preset dictionary type: "ipadic" | "unidic-cwj" | "unidic-csj"
  #[serde(default)]
  pub preset: DictionaryPreset,
  /// Dictionary cache directory.
  ///
  /// If omitted, the OS cache directory chosen by `DictionaryManager` is used.
  #[serde(default)]
  pub cache_dir: Option<PathBuf>,
  /// Compiled local dictionary file. Takes precedence over the preset download.
  ///
  /// `preset` still decides the feature column layout.
  #[serde(default)]
  pub local_path: Option<PathBuf>,
}

/// Preset dictionary type.
///
/// `PresetDictionaryKind` (vibrato-rkyv) does not implement `Deserialize`, and the orphan rule
/// forbids adding it here, so this enum is the configuration-side mirror.
/// Convert with `.into()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DictionaryPreset {
  /// IpaDic: The smallest. Rule files are written against its tag set.
  #[default]
  Ipadic,
  /// Unidic for written language
  UnidicCwj,
  /// Unidic for spoken language
  UnidicCsj,
}

impl std::str::FromStr for DictionaryPreset {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "ipadic" => Ok(Self::Ipadic),
      "unidic-cwj" => Ok(Self::UnidicCwj),
      "unidic-csj" => Ok(Self::UnidicCsj),
      _ => Err(format!(
        "Unknown preset: {}. Valid values: ipadic, unidic-cwj, unidic-csj",
        s
      )),
    }
  }
}

/// [data] section configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
  /// Grammar rule JSON file
  #[serde(default = "default_grammar_rules_path")]
  pub grammar_rules_path: PathBuf,
  /// Vocabulary level JSON file
  #[serde(default = "default_vocabulary_path")]
  pub vocabulary_path: PathBuf,
}

fn default_grammar_rules_path() -> PathBuf {
  PathBuf::from(DEFAULT_GRAMMAR_RULES_PATH)
}

fn default_vocabulary_path() -> PathBuf {
  PathBuf::from(DEFAULT_VOCABULARY_PATH)
}

impl Default for DataConfig {
  fn default() -> Self {
    Self {
      grammar_rules_path: default_grammar_rules_path(),
      vocabulary_path: default_vocabulary_path(),
    }
  }
}

/// [analysis] section configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
  /// Sentences longer than this (in characters) are rejected by the tokenizer
  #[serde(default = "default_max_sentence_chars")]
  pub max_sentence_chars: usize,
}

fn default_max_sentence_chars() -> usize {
  DEFAULT_MAX_SENTENCE_CHARS
}

impl Default for AnalysisConfig {
  fn default() -> Self {
    Self {
      max_sentence_chars: default_max_sentence_chars(),
    }
  }
}

/// [logging] section configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
  /// Log level: "trace" | "debug" | "info" | "warn" | "error"
  #[serde(default)]
  pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  /// trace
  Trace,

  /// debug
  Debug,

  /// info
  #[default]
  Info,

  /// warn
  Warn,

  ///error
  Error,
}

impl LogLevel {
  /// Directive string for `tracing_subscriber::EnvFilter`
  pub fn as_filter_str(&self) -> &'static str {
    match self {
      LogLevel::Trace => "trace",
      LogLevel::Debug => "debug",
      LogLevel::Info => "info",
      LogLevel::Warn => "warn",
      LogLevel::Error => "error",
    }
  }
}

impl std::str::FromStr for LogLevel {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "trace" => Ok(Self::Trace),
      "debug" => Ok(Self::Debug),
      "info" => Ok(Self::Info),
      "warn" | "warning" => Ok(Self::Warn),
      "error" => Ok(Self::Error),
      _ => Err(format!(
        "Unknown log level: {}. Valid values: trace, debug, info, warn, error",
        s
      )),
    }
  }
}

// ===== Accessor Methods =====

impl BunpouConfig {
  /// Returns the preset dictionary type to pass to DictionaryManager.
  pub fn dictionary_preset(&self) -> PresetDictionaryKind {
    self.dictionary.preset.into()
  }

  /// Returns the configured dictionary cache directory.
  ///
  /// `None` if unspecified.
  pub fn dictionary_cache_dir(&self) -> Option<&Path> {
    self.dictionary.cache_dir.as_deref()
  }

  /// Returns the configured local dictionary file, if any.
  pub fn dictionary_local_path(&self) -> Option<&Path> {
    self.dictionary.local_path.as_deref()
  }

  /// Returns the grammar rule file path.
  pub fn grammar_rules_path(&self) -> &Path {
    &self.data.grammar_rules_path
  }

  /// Returns the vocabulary file path.
  pub fn vocabulary_path(&self) -> &Path {
    &self.data.vocabulary_path
  }

  /// Returns the maximum sentence length in characters.
  pub fn max_sentence_chars(&self) -> usize {
    self.analysis.max_sentence_chars
  }

  /// Returns the log level.
  pub fn log_level(&self) -> LogLevel {
    self.logging.level
  }

  /// Validates the configuration.
  ///
  /// # Validation Items
  /// - `data.grammar_rules_path` is not empty
  /// - `data.vocabulary_path` is not empty
  /// - `analysis.max_sentence_chars` >= 1
  /// - `dictionary.cache_dir` exists or can be created
  ///
  /// # Errors
  /// Returns the first failing `ConfigError`.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.data.grammar_rules_path.as_os_str().is_empty() {
      return Err(ConfigError::EmptyGrammarRulesPath);
    }

    if self.data.vocabulary_path.as_os_str().is_empty() {
      return Err(ConfigError::EmptyVocabularyPath);
    }

    if self.analysis.max_sentence_chars < 1 {
      return Err(ConfigError::InvalidMaxSentenceChars {
        actual: self.analysis.max_sentence_chars,
      });
    }

    // dictionary.cache_dir exists or can be created
    if let Some(cache_dir) = &self.dictionary.cache_dir {
      if cache_dir.exists() {
        if !cache_dir.is_dir() {
          return Err(ConfigError::InvalidDictionaryCacheDir {
            path: cache_dir.clone(),
          });
        }
      } else if let Err(e) = std::fs::create_dir_all(cache_dir) {
        return Err(ConfigError::DictionaryCacheDirCreationFailed {
          path: cache_dir.clone(),
          source: Arc::new(e),
        });
      }
    }

    Ok(())
  }
}

// ===== Convert configuration types to vibrato-rkyv types =====

impl From<DictionaryPreset> for PresetDictionaryKind {
  fn from(preset: DictionaryPreset) -> Self {
    match preset {
      DictionaryPreset::Ipadic => PresetDictionaryKind::Ipadic,
      DictionaryPreset::UnidicCwj => PresetDictionaryKind::UnidicCwj,
      DictionaryPreset::UnidicCsj => PresetDictionaryKind::UnidicCsj,
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
