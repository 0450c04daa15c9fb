//! Dictionary Management Module
//!
//! Loads the vibrato-rkyv dictionary backing the token producer.
//! Preset dictionaries (IPADIC, UniDic) are downloaded on the first run and read from the
//! cache directory afterwards. A compiled local dictionary file can be used instead.

use crate::config::BunpouConfig;
use crate::errors::error_definition::DictionaryError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use vibrato_rkyv::Dictionary;
use vibrato_rkyv::dictionary::LoadMode;
use vibrato_rkyv::dictionary::PresetDictionaryKind;

/// Dictionary manager structure for vibrato-rkyv
pub struct DictionaryManager {
  /// Dictionary cache directory
  cache_dir: PathBuf,

  /// Type of preset dictionary. `None` for local dictionaries
  preset_kind: Option<PresetDictionaryKind>,

  /// Local dictionary file. `None` for preset dictionaries
  dictionary_path: Option<PathBuf>,

  /// Loaded dictionary, initialized once on the first `load()`.
  /// `DictionaryError` is `Clone`, so a failed load is cached as well.
  dictionary: OnceLock<Result<Arc<Dictionary>, DictionaryError>>,
}

impl DictionaryManager {
  /// Returns the path of the cache directory
  pub fn cache_dir(&self) -> &Path {
    &self.cache_dir
  }

  /// Returns the preset kind (`None` for a local dictionary)
  pub fn preset_kind(&self) -> Option<PresetDictionaryKind> {
    self.preset_kind
  }

  /// Preset dictionary cached under the OS default cache directory
  pub fn with_preset(preset_kind: PresetDictionaryKind) -> Result<Self, DictionaryError> {
    let cache_dir = default_cache_dir()?;
    Ok(Self::with_preset_in(preset_kind, cache_dir))
  }

  /// Preset dictionary cached under an explicit directory
  pub fn with_preset_in(preset_kind: PresetDictionaryKind, cache_dir: impl Into<PathBuf>) -> Self {
    Self {
      cache_dir: cache_dir.into(),
      preset_kind: Some(preset_kind),
      dictionary_path: None,
      dictionary: OnceLock::new(),
    }
  }

  /// Local compiled dictionary file
  pub fn from_local_path<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
    let path = path.as_ref().to_path_buf();

    if !path.is_file() {
      let s = path.display().to_string();
      return Err(DictionaryError::DictionaryNotFound(s));
    }

    let cache_dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));

    Ok(Self {
      cache_dir,
      preset_kind: None,
      dictionary_path: Some(path),
      dictionary: OnceLock::new(),
    })
  }

  /// Picks the dictionary source described by the configuration
  ///
  /// `dictionary.local_path` wins over the preset; `dictionary.cache_dir` overrides the
  /// OS cache directory.
  pub fn from_config(config: &BunpouConfig) -> Result<Self, DictionaryError> {
    if let Some(path) = config.dictionary_local_path() {
      return Self::from_local_path(path);
    }

    match config.dictionary_cache_dir() {
      Some(dir) => Ok(Self::with_preset_in(config.dictionary_preset(), dir)),
      None => Self::with_preset(config.dictionary_preset()),
    }
  }

  /// Load dictionary
  ///
  /// - Loads the dictionary on the first call
  /// - Returns a clone of `Arc<Dictionary>` from the second call onwards
  /// - If the first call fails, keeps returning that error
  pub fn load(&self) -> Result<Arc<Dictionary>, DictionaryError> {
    self.dictionary.get_or_init(|| self.load_inner().map(Arc::new)).clone()
  }

  fn load_inner(&self) -> Result<Dictionary, DictionaryError> {
    match (&self.dictionary_path, self.preset_kind) {
      (Some(path), _) => Self::load_from_local_path(path),
      (None, Some(preset_kind)) => self.load_from_preset(preset_kind),
      _ => Err(DictionaryError::InvalidPathOrInvalidPresetKind(
        self.cache_dir.clone(),
        self.preset_kind,
      )),
    }
  }

  fn load_from_local_path(path: &Path) -> Result<Dictionary, DictionaryError> {
    Dictionary::from_path(path, LoadMode::TrustCache)
      .map_err(|e| DictionaryError::VibratoLoad(Arc::new(e)))
  }

  /// Downloads on the first run, reads from the cache directory afterwards
  fn load_from_preset(
    &self,
    preset_kind: PresetDictionaryKind,
  ) -> Result<Dictionary, DictionaryError> {
    std::fs::create_dir_all(&self.cache_dir)
      .map_err(|e| DictionaryError::CacheDirCreationFailed(Arc::new(e)))?;

    // One subdirectory per dictionary
    let dict_dir = self.cache_dir.join(preset_kind.name());

    Dictionary::from_preset_with_download(preset_kind, &dict_dir)
      .map_err(|e| DictionaryError::PresetDictDownloadFailed(Arc::new(e)))
  }
}

/// Returns the default cache directory path according to the OS
///
/// | OS      | Example Path                                 |
/// |---------|----------------------------------------------|
/// | Linux   | `~/.cache/bunpou/dict`                       |
/// | macOS   | `~/Library/Caches/bunpou/dict`               |
/// | Windows | `C:\Users\{user}\AppData\Local\bunpou\dict`  |
pub fn default_cache_dir() -> Result<PathBuf, DictionaryError> {
  let base = dirs::cache_dir().ok_or(DictionaryError::CacheDirNotFound)?;

  Ok(base.join("bunpou").join("dict"))
}

/// `vibrato_rkyv::Dictionary` does not implement `Debug`, so only meta information is shown.
impl fmt::Debug for DictionaryManager {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DictionaryManager")
      .field("cache_dir", &self.cache_dir)
      .field("preset_kind", &self.preset_kind)
      .field("dictionary_path", &self.dictionary_path)
      .field("dictionary_initialized", &self.dictionary.get().is_some())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{DictionaryConfig, DictionaryPreset};
  use tempfile::TempDir;

  #[test]
  fn with_preset_in_uses_given_cache_dir() {
    let temp_dir = TempDir::new().unwrap();
    let manager = DictionaryManager::with_preset_in(PresetDictionaryKind::Ipadic, temp_dir.path());

    assert_eq!(manager.cache_dir(), temp_dir.path());
    assert_eq!(manager.preset_kind(), Some(PresetDictionaryKind::Ipadic));
  }

  #[test]
  fn from_config_prefers_cache_dir_override() {
    let temp_dir = TempDir::new().unwrap();
    let config = BunpouConfig {
      dictionary: DictionaryConfig {
        preset: DictionaryPreset::UnidicCwj,
        cache_dir: Some(temp_dir.path().to_path_buf()),
        local_path: None,
      },
      ..BunpouConfig::default()
    };

    let manager = DictionaryManager::from_config(&config).unwrap();
    assert_eq!(manager.cache_dir(), temp_dir.path());
    assert_eq!(manager.preset_kind(), Some(PresetDictionaryKind::UnidicCwj));
  }

  #[test]
  fn from_config_with_missing_local_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = BunpouConfig {
      dictionary: DictionaryConfig {
        local_path: Some(temp_dir.path().join("system.dic")),
        ..DictionaryConfig::default()
      },
      ..BunpouConfig::default()
    };

    let err = DictionaryManager::from_config(&config).unwrap_err();
    assert!(matches!(err, DictionaryError::DictionaryNotFound(_)));
  }

  #[test]
  fn debug_shows_uninitialized_dictionary() {
    let manager = DictionaryManager::with_preset_in(PresetDictionaryKind::Ipadic, "/tmp/bunpou");
    let debug = format!("{manager:?}");
    assert!(debug.contains("dictionary_initialized: false"));
  }
}
