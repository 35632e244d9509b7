//! File logging via `tracing`. The terminal belongs to the UI, so everything
//! goes to a daily rolling file instead of stderr.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_dir};

pub const LOG_ENV: &str = "NEEDLE_LOG";
const LOG_FILE: &str = "needle.log";

pub fn log_dir(settings: &LoggingSettings) -> PathBuf {
    settings.dir.clone().unwrap_or_else(default_log_dir)
}

/// `NEEDLE_LOG` wins over the configured level; a bad directive falls back to `info`.
fn filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered lines get flushed.
pub fn init(settings: &LoggingSettings) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let dir = log_dir(settings);
    std::fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::daily(&dir, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter(settings))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_dir_wins_over_default() {
        let settings = LoggingSettings {
            level: "debug".into(),
            dir: Some(PathBuf::from("/tmp/needle-logs")),
        };
        assert_eq!(log_dir(&settings), PathBuf::from("/tmp/needle-logs"));
    }

    #[test]
    fn bad_level_still_builds_a_filter() {
        let settings = LoggingSettings {
            level: "not a [valid] directive==".into(),
            dir: None,
        };
        // Must not panic whatever NEEDLE_LOG holds.
        let _ = filter(&settings).to_string();
    }
}
