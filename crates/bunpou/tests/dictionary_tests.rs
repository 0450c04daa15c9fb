//! dictionary 用のテスト
//! 辞書管理の統合テスト

use std::path::PathBuf;

use tempfile::TempDir;
use vibrato_rkyv::dictionary::PresetDictionaryKind;

use bunpou::config::{BunpouConfig, DictionaryConfig, DictionaryPreset};
use bunpou::dictionary::{DictionaryManager, default_cache_dir};
use bunpou::errors::DictionaryError;

/// DictionaryManager のコンストラクタが正常に動作することを確認する。
#[test]
fn create_dictionary_manager_with_preset() {
  let result = DictionaryManager::with_preset(PresetDictionaryKind::Ipadic);

  // コンストラクタ自体はネットワーク不要なので成功するはず
  assert!(
    result.is_ok(),
    "DictionaryManager の構築に失敗: {:?}",
    result.err()
  );
  let manager = result.unwrap();
  assert_eq!(manager.preset_kind(), Some(PresetDictionaryKind::Ipadic));
  assert!(manager.cache_dir().ends_with(PathBuf::from("bunpou").join("dict")));
}

/// 存在しないパスを指定した場合にエラーが返ることを確認する。
#[test]
fn from_local_path_with_nonexistent_file() {
  let result = DictionaryManager::from_local_path("/nonexistent/path/to/system.dic");

  let err = result.unwrap_err();
  assert!(
    matches!(err, DictionaryError::DictionaryNotFound(_)),
    "期待されるエラー型ではありません: {:?}",
    err
  );
}

/// 設定の cache_dir がそのまま使われることを確認する。
#[test]
fn from_config_uses_configured_cache_dir() {
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

/// local_path はプリセットより優先される。
#[test]
fn from_config_prefers_local_path() {
  let temp_dir = TempDir::new().unwrap();
  let config = BunpouConfig {
    dictionary: DictionaryConfig {
      local_path: Some(temp_dir.path().join("missing.dic")),
      ..DictionaryConfig::default()
    },
    ..BunpouConfig::default()
  };

  let err = DictionaryManager::from_config(&config).unwrap_err();
  assert!(matches!(err, DictionaryError::DictionaryNotFound(_)));
}

/// プリセット辞書のダウンロード＆ロード テスト。
///
/// ネットワークアクセスと大容量ファイルの処理が必要なため
/// `#[ignore]` を付けている。
///
/// 実行方法:
/// ```bash
/// cargo test -- --ignored download_and_load_ipadic
/// ```
#[test]
#[ignore = "辞書ダウンロードは時間がかかるため通常テストから除外"]
fn download_and_load_ipadic() {
  let manager = DictionaryManager::with_preset(PresetDictionaryKind::Ipadic)
    .expect("DictionaryManager の構築に失敗");

  // 辞書をロード（初回はダウンロードが発生する）
  let dict = manager.load();
  assert!(dict.is_ok(), "辞書のロードに失敗: {:?}", dict.err());

  // 2回目のロードはキャッシュから取得される
  let dict2 = manager.load().expect("2回目のロードに失敗");
  assert!(std::sync::Arc::ptr_eq(&dict.unwrap(), &dict2));
}

/// キャッシュ済み辞書のロードテスト。
///
/// キャッシュが存在しない場合は自動スキップする。
#[test]
fn load_cached_dictionary() {
  let cache_dir = default_cache_dir().expect("キャッシュディレクトリの取得に失敗");
  let dict_subdir = cache_dir.join(PresetDictionaryKind::Ipadic.name());

  if !dict_subdir.exists() {
    eprintln!(
      "辞書キャッシュが存在しないためスキップ: {}",
      dict_subdir.display()
    );
    return;
  }

  let manager = DictionaryManager::with_preset_in(PresetDictionaryKind::Ipadic, cache_dir);
  let dict = manager.load();
  assert!(dict.is_ok(), "キャッシュ済み辞書のロードに失敗: {:?}", dict.err());
}
