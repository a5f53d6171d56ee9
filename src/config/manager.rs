//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    InjectorSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: InjectorSettings,

    /// 設定の読み込み元（デフォルト値の場合は `None`）
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: InjectorSettings::default(), source: None }
    }

    /// 設定を読み込む
    ///
    /// 優先順位: `explicit` > `search_dir` 内の `.html-i18n.json` > デフォルト値
    ///
    /// # Arguments
    /// * `explicit` - コマンドラインで指定された設定ファイル
    /// * `search_dir` - 設定ファイルを探すディレクトリ（通常はカレントディレクトリ）
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(
        &mut self,
        explicit: Option<&Path>,
        search_dir: Option<&Path>,
    ) -> Result<(), ConfigError> {
        tracing::debug!(?explicit, ?search_dir, "Loading settings");

        let (settings, source) = if let Some(path) = explicit {
            (loader::load_from_file(path)?, Some(path.to_path_buf()))
        } else if let Some(dir) = search_dir
            && let Some(settings) = loader::load_from_directory(dir)?
        {
            (settings, Some(dir.join(loader::CONFIG_FILE_NAME)))
        } else {
            (InjectorSettings::default(), None)
        };

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.source = source;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &InjectorSettings {
        &self.current_settings
    }

    /// 設定の読み込み元を取得
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
