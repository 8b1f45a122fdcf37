use std::io;
use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_STDOUT_FILTER: &str = "info,extract=info,db_query=warn,sqlx=off";
const DEFAULT_FILE_FILTER: &str = "info,extract=debug,db_query=debug,sqlx=info";

/// Install the global subscriber: stdout (overridable through `RUST_LOG`) and
/// a daily-rolling file under `log_dir`.
///
/// Console output goes to stderr when `quiet_stdout` is set, so commands
/// that print machine-readable results keep stdout clean.
pub fn configure_logging(log_dir: &Path, quiet_stdout: bool) {
    let stdout_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_STDOUT_FILTER));

    let console_writer = if quiet_stdout {
        BoxMakeWriter::new(io::stderr)
    } else {
        BoxMakeWriter::new(io::stdout)
    };
    let console_log = fmt::layer()
        .with_writer(console_writer)
        .with_filter(stdout_filter);

    let file_appender = rolling::daily(log_dir, "extractor.log");
    let file_log = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(EnvFilter::new(DEFAULT_FILE_FILTER));

    tracing_subscriber::Registry::default()
        .with(console_log)
        .with(file_log)
        .init();
}
