//! Logging configuration for vivirag

use std::path::Path;

use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::config::AppConfig;
use crate::Result;

/// Initialize logging with console and daily-rolling file output.
///
/// The filter level comes from the configuration; `RUST_LOG` still wins when
/// set so operators can crank verbosity without editing files.
pub fn init_logging(config: &AppConfig) -> Result<()> {
    let logs_dir = Path::new("logs");
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    let level = &config.logging.level;
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},vivirag={level}")));

    let file_appender = tracing_appender::rolling::daily("logs", "vivirag.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false);

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if config.logging.backtrace {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    tracing::info!("Logging initialized with level: {level}");
    tracing::info!("Log files will be saved to: logs/vivirag.log.YYYY-MM-DD");

    // The writer guard must outlive the process for the file layer to flush
    std::mem::forget(guard);

    Ok(())
}

/// Initialize console-only logging for tests and one-shot commands.
///
/// Repeated initialization is a no-op.
pub fn init_simple_logging() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(tracing::Level::INFO)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_logging_tolerates_repeated_initialization() {
        assert!(init_simple_logging().is_ok());
        assert!(init_simple_logging().is_ok());
    }
}
