//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    InjectorSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".html-i18n.json";

/// ディレクトリから設定を読み込む
///
/// `.html-i18n.json` ファイルを探して読み込む
///
/// # Arguments
/// * `directory` - 設定ファイルを探すディレクトリ
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_directory(directory: &Path) -> Result<Option<InjectorSettings>, ConfigError> {
    let config_path = directory.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// 指定されたファイルから設定を読み込む
///
/// ファイルが存在しない場合もエラーになる
pub(super) fn load_from_file(config_path: &Path) -> Result<InjectorSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: InjectorSettings = serde_json::from_str(&content)?;

    Ok(settings)
}
