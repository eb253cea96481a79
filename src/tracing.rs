//! Logging setup
//!
//! Configure console output via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=docksizer::dock::structure=debug` - module-level filtering
//!
//! Logs are also written to `~/.config/docksizer/logs/docksizer.log` with
//! daily rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::DockPaths;

/// Initialize tracing subscriber with console and file logging.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// for the life of the program.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let (file_layer, guard) = match DockPaths::user()
        .ok_or_else(|| "No config directory available".to_string())
        .and_then(|p| p.ensure_logs_dir())
    {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "docksizer.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true)
                        .with_filter(EnvFilter::new("debug")),
                ),
                Some(guard),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}
