//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::path::{
    Path,
    PathBuf,
};

use tempfile::TempDir;

use crate::locale::FixedLocale;
use crate::store::{
    StoreOptions,
    TranslationStore,
};

/// 一時ディレクトリに `translations.csv` を書き込む
///
/// # Returns
/// 書き込んだファイルのパス
pub(crate) fn write_translations(temp_dir: &TempDir, content: &str) -> PathBuf {
    let path = temp_dir.path().join("translations.csv");
    std::fs::write(&path, content).unwrap();
    path
}

/// 固定のランタイムロケールでストアを開く
///
/// # Arguments
/// * `path` - 翻訳ファイルのパス
/// * `runtime_locale` - ホストが報告するロケール（例: "en-US"）
pub(crate) fn open_store(path: &Path, runtime_locale: &str) -> TranslationStore {
    TranslationStore::with_options(
        path,
        StoreOptions {
            locale_source: Box::new(FixedLocale::new(runtime_locale)),
            ..StoreOptions::default()
        },
    )
}
