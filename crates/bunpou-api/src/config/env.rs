//! Config loading from environment variables
//!
//! | Variable               | Meaning                                   | Default                        |
//! |------------------------|-------------------------------------------|--------------------------------|
//! | `BUNPOU_API_BASE_URL`  | Bind address                              | `127.0.0.1:8000`               |
//! | `BUNPOU_PRESET_DICT`   | `ipadic` / `unidic-cwj` / `unidic-csj`    | `ipadic`                       |
//! | `BUNPOU_DICT_PATH`     | Compiled local dictionary (wins over preset) | unset                       |
//! | `BUNPOU_GRAMMAR_RULES` | Grammar rule file                         | `data/grammar_rules.json`      |
//! | `BUNPOU_VOCABULARY`    | Vocabulary file                           | `data/vocabulary_levels.json`  |
//! | `BUNPOU_LOG_LEVEL`     | Log level                                 | `info`                         |

use std::path::PathBuf;
use std::str::FromStr;

use bunpou::config::{BunpouConfig, DictionaryPreset, LogLevel};

use super::constants::{DEFAULT_BIND_ADDR, DEFAULT_PRESET_DICT};
use crate::errors::ApiError;

/// API Server Configuration
#[derive(Debug, Clone)]
pub struct Config {
  /// Bind address (e.g. "127.0.0.1:8000")
  pub bind_addr: String,
  /// Library configuration (dictionary, data files, logging)
  pub bunpou: BunpouConfig,
}

impl Config {
  /// Loads configuration from environment variables
  ///
  /// # Errors
  /// Returns an error if environment variable values are invalid
  pub fn from_env() -> crate::errors::Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Loads configuration through an arbitrary key lookup
  ///
  /// Empty values are treated as unset.
  ///
  /// # Errors
  /// Returns an error for an unknown preset or log level
  pub fn from_lookup<F>(lookup: F) -> crate::errors::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let bind_addr = var("BUNPOU_API_BASE_URL").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

    let preset_dict_str =
      var("BUNPOU_PRESET_DICT").unwrap_or_else(|| DEFAULT_PRESET_DICT.to_string());
    let preset = DictionaryPreset::from_str(&preset_dict_str).map_err(ApiError::config)?;

    let mut bunpou = BunpouConfig::default();
    bunpou.dictionary.preset = preset;
    bunpou.dictionary.local_path = var("BUNPOU_DICT_PATH").map(PathBuf::from);

    if let Some(path) = var("BUNPOU_GRAMMAR_RULES") {
      bunpou.data.grammar_rules_path = PathBuf::from(path);
    }
    if let Some(path) = var("BUNPOU_VOCABULARY") {
      bunpou.data.vocabulary_path = PathBuf::from(path);
    }
    if let Some(level) = var("BUNPOU_LOG_LEVEL") {
      bunpou.logging.level = LogLevel::from_str(&level).map_err(ApiError::config)?;
    }

    Ok(Self { bind_addr, bunpou })
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  fn from_pairs(pairs: &[(&str, &str)]) -> crate::errors::Result<Config> {
    let vars: HashMap<String, String> =
      pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    Config::from_lookup(|key| vars.get(key).cloned())
  }

  #[test]
  fn defaults_when_nothing_is_set() {
    let config = from_pairs(&[]).unwrap();

    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(config.bunpou.dictionary.preset, DictionaryPreset::Ipadic);
    assert_eq!(config.bunpou.dictionary.local_path, None);
    assert_eq!(config.bunpou.log_level(), LogLevel::Info);
    assert_eq!(
      config.bunpou.grammar_rules_path(),
      BunpouConfig::default().grammar_rules_path()
    );
  }

  #[test]
  fn every_variable_is_applied() {
    let config = from_pairs(&[
      ("BUNPOU_API_BASE_URL", "0.0.0.0:9000"),
      ("BUNPOU_PRESET_DICT", "UNIDIC-CWJ"),
      ("BUNPOU_DICT_PATH", "/opt/dict/system.dic"),
      ("BUNPOU_GRAMMAR_RULES", "/srv/rules.json"),
      ("BUNPOU_VOCABULARY", "/srv/vocab.json"),
      ("BUNPOU_LOG_LEVEL", "debug"),
    ])
    .unwrap();

    assert_eq!(config.bind_addr, "0.0.0.0:9000");
    assert_eq!(config.bunpou.dictionary.preset, DictionaryPreset::UnidicCwj);
    assert_eq!(
      config.bunpou.dictionary_local_path(),
      Some(PathBuf::from("/opt/dict/system.dic").as_path())
    );
    assert_eq!(config.bunpou.grammar_rules_path(), PathBuf::from("/srv/rules.json").as_path());
    assert_eq!(config.bunpou.vocabulary_path(), PathBuf::from("/srv/vocab.json").as_path());
    assert_eq!(config.bunpou.log_level(), LogLevel::Debug);
  }

  #[test]
  fn empty_values_fall_back_to_defaults() {
    let config = from_pairs(&[("BUNPOU_API_BASE_URL", ""), ("BUNPOU_DICT_PATH", "  ")]).unwrap();

    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(config.bunpou.dictionary.local_path, None);
  }

  #[test]
  fn invalid_preset_is_config_error() {
    let err = from_pairs(&[("BUNPOU_PRESET_DICT", "mecab")]).unwrap_err();
    assert_eq!(err.code(), "config_error");
  }

  #[test]
  fn invalid_log_level_is_config_error() {
    let err = from_pairs(&[("BUNPOU_LOG_LEVEL", "loud")]).unwrap_err();
    assert_eq!(err.code(), "config_error");
  }
}
