//! File-backed tracing setup.
//!
//! The terminal belongs to the UI while the quiz runs, so log output goes to a
//! daily rolling file instead of stdout.

use std::fs;
use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{DEFAULT_LOG_LEVEL, LogConfig};

const LOG_FILE_PREFIX: &str = "vocab-quiz.log";

/// Keeps the background log writer alive; drop it only at shutdown.
pub struct LogGuard {
    _guard: WorkerGuard,
}

pub fn init_tracing(config: &LogConfig) -> io::Result<LogGuard> {
    let env_filter =
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    fs::create_dir_all(&config.dir)?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(LogGuard { _guard: guard })
}
