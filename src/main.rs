//! Entry point for the `html-i18n-injector` command.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use html_i18n_injector::cli::Cli;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{
    RollingFileAppender,
    Rotation,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_file.as_deref());

    let search_dir = std::env::current_dir().ok();
    match cli.execute(search_dir.as_deref()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Console logging filtered by `RUST_LOG` (default `info`), plus an optional
/// plain-text log file. The returned guard flushes the file on drop.
fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = tracing_subscriber::fmt::layer().with_target(false);

    let (file_layer, guard, file_error) = match log_file.map(file_appender) {
        Some(Ok(appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard), None)
        }
        Some(Err(e)) => (None, None, Some(e)),
        None => (None, None, None),
    };

    tracing_subscriber::registry().with(filter).with(console_layer).with(file_layer).init();

    if let Some(e) = file_error {
        tracing::warn!("Log file disabled: {e}");
    }

    guard
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, String> {
    let file_name = path
        .file_name()
        .ok_or_else(|| format!("{} is not a file path", path.display()))?
        .to_string_lossy()
        .into_owned();
    let directory =
        path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .map_err(|e| e.to_string())
}
