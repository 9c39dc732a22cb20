use std::path::PathBuf;

use habit_core::config::ClientConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "habit.log";

/// Installs the global subscriber.
///
/// Console output goes to stderr so command output stays pipeable. `RUST_LOG`
/// wins over the configured level. When file logging is enabled a daily
/// rolling file is written under `logs_dir`; keep the returned guard alive
/// until exit so buffered lines are flushed.
pub fn init(config: &ClientConfig, logs_dir: Option<PathBuf>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let console = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let registry = tracing_subscriber::registry().with(filter).with(console);

    match logs_dir.filter(|_| config.log_to_file) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = fmt::layer().with_ansi(false).with_writer(writer);
            let _ = registry.with(file).try_init();
            Some(guard)
        }
        None => {
            let _ = registry.try_init();
            None
        }
    }
}
