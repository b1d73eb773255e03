use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset: lookup details from our own crates
/// reach the log file, dependencies stay at `info`.
pub const DEFAULT_FILTER: &str = "info,nsfill_core=debug,nsfill_lsp=debug";

/// Directory holding the rolling log files, `~/.nsfill/logs`.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".nsfill/logs")
}

/// Installs the global subscriber for `component` and returns the guard that
/// flushes the file writer on drop.
///
/// Events at `info` and above are mirrored on stderr when `to_stderr` is set.
/// Nothing is written to stdout, which the language server owns for JSON-RPC.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let log_dir = log_dir();
    let _ = std::fs::create_dir_all(&log_dir);

    // Files look like lsp.2026-10-16
    let file_appender = tracing_appender::rolling::daily(&log_dir, component);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
            .with_filter(LevelFilter::INFO);
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    guard
}
