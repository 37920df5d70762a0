//! Logging setup for `aura`.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Full log to `<cache>/aurayale/logs/aura.log`, warnings and up on stderr.
pub fn setup_logging() -> Result<WorkerGuard> {
    let log_dir = directories::ProjectDirs::from("", "", "aurayale")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("aurayale").join("logs"));
    std::fs::create_dir_all(&log_dir)?;

    let (non_blocking_file, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&log_dir, "aura.log"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        );

    // Command output goes to stdout; keep stderr for problems only
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::debug!("Log file: {}/aura.log", log_dir.display());
    Ok(guard)
}
