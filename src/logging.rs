//! Process logging: stderr plus `log.txt` in the workspace.

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::paths::{LOG_FILE, Workspace};

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// The file gets everything the filter lets through (`info` unless
/// `RUST_LOG` says otherwise); stderr only warnings and errors, so the
/// console prompt stays readable. Keep the returned guard alive until exit or
/// buffered file output is lost.
pub fn init(workspace: &Workspace) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(workspace.root(), LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr.with_max_level(Level::WARN)))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    guard
}
