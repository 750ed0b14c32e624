//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI, so logs go to a file. Filter priority:
//!
//! 1. `REPLAYVIEW_LOG` env var (per-target directives)
//! 2. `RUST_LOG` env var
//! 3. `-v` on the command line (debug), otherwise info

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const LOG_FILE_NAME: &str = "replayview.log";

/// Default log location: the platform cache directory, else the temp dir.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("replayview"))
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_FILE_NAME)
}

/// Install the global subscriber writing to `path`.
///
/// The returned guard flushes buffered lines when dropped; keep it alive for
/// the whole run.
pub fn init(path: &Path, verbose: bool) -> std::io::Result<WorkerGuard> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbose))
        .with(layer)
        .try_init();

    Ok(guard)
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    if let Ok(directives) = std::env::var("REPLAYVIEW_LOG")
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(if verbose { "replayview=debug,info" } else { "info" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_file_name() {
        assert_eq!(
            default_log_path().file_name().and_then(|n| n.to_str()),
            Some(LOG_FILE_NAME)
        );
    }
}
