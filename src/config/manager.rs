//! 設定管理を行うモジュール

use std::path::PathBuf;

use super::{
    ConfigError,
    TranslatorSettings,
    loader,
};
use crate::store::TranslationStore;

/// ワークスペースの設定と、その設定で開く翻訳ストアを管理する
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: TranslatorSettings,

    /// 翻訳ファイルの相対パスを解決するワークスペースルート
    workspace_root: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// デフォルト設定、カレントディレクトリ基準で作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: TranslatorSettings::default(), workspace_root: PathBuf::from(".") }
    }

    /// ワークスペースの設定を読み込む
    ///
    /// 設定ファイルがなければデフォルト値を使う。
    /// 失敗した場合、現在の設定とワークスペースルートは変わらない。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let workspace_root = workspace_root.into();
        tracing::debug!(root = %workspace_root.display(), "Loading settings");

        let settings = loader::load_from_workspace(&workspace_root)?.unwrap_or_default();
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(?settings, "Settings loaded");
        self.current_settings = settings;
        self.workspace_root = workspace_root;

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &TranslatorSettings {
        &self.current_settings
    }

    /// ワークスペースルートで解決した翻訳ファイルのパス
    #[must_use]
    pub fn translations_path(&self) -> PathBuf {
        self.current_settings.translations_path(&self.workspace_root)
    }

    /// 現在の設定で翻訳ストアを開く
    #[must_use]
    pub fn open_store(&self) -> TranslationStore {
        self.current_settings.open_store(&self.workspace_root)
    }
}
