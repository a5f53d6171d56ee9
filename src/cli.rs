//! Command-line front end.

use std::path::{
    Path,
    PathBuf,
};

use clap::Parser;
use thiserror::Error;

use crate::config::{
    ConfigError,
    ConfigManager,
};
use crate::localizer::{
    LocalizeError,
    Localizer,
    RunOptions,
    RunReport,
};

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Localize(#[from] LocalizeError),
}

/// Injects translated strings into every language folder of an HTML tree.
///
/// SOURCE is copied into TARGET, then each immediate subdirectory of TARGET
/// is localized with the JSON dictionaries under `JSON_ROOT` whose file names
/// carry that folder's language code.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about)]
pub struct Cli {
    /// Directory searched recursively for JSON dictionaries
    pub json_root: PathBuf,

    /// Directory tree holding the placeholder documents
    pub source: PathBuf,

    /// Output directory; its subdirectories are replaced on every run
    pub target: PathBuf,

    /// Settings file (default: `.html-i18n.json` in the current directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write plain-text logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Keep existing folders in TARGET instead of removing them first
    #[arg(long)]
    pub keep_target: bool,
}

impl Cli {
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            json_root: self.json_root.clone(),
            source: self.source.clone(),
            target: self.target.clone(),
            clean_target: !self.keep_target,
        }
    }

    /// Loads settings and performs one run.
    ///
    /// `search_dir` is where `.html-i18n.json` is looked up when no
    /// `--config` was given.
    ///
    /// # Errors
    /// An invalid or unreadable configuration, or a fatal pipeline error.
    pub fn execute(&self, search_dir: Option<&Path>) -> Result<RunReport, CliError> {
        let mut config_manager = ConfigManager::new();
        config_manager.load_settings(self.config.as_deref(), search_dir)?;
        match config_manager.source() {
            Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
            None => tracing::debug!("Using default configuration"),
        }

        let report = Localizer::new(config_manager.get_settings()).run(&self.run_options())?;
        log_report(&report);
        Ok(report)
    }
}

/// Surfaces diagnostics and a one-line summary through `tracing`.
pub fn log_report(report: &RunReport) {
    for subtree in &report.subtrees {
        for diagnostic in &subtree.diagnostics {
            diagnostic.log();
        }
    }

    tracing::info!(
        subtrees = report.subtrees.len(),
        rewritten = report.rewritten_count(),
        missing_keys = report.missing_key_count(),
        "Localization finished"
    );
}
