use std::path::Path;
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder as RollingBuilder, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const MAX_LOG_FILES: usize = 5;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `base_level`. Warnings and errors go to
/// stderr, everything else to stdout. With `log_dir` set, events are also
/// written to a daily-rolling `<app_name>.*.log` file there, keeping the last
/// five files.
///
/// Panics if called twice or if the log directory cannot be created.
pub fn setup_logging(app_name: &str, base_level: &str, log_dir: Option<&Path>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(base_level))
        .unwrap_or_else(|e| panic!("Invalid log filter '{}': {}", base_level, e));

    let console_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(console_writer);

    let file_layer = log_dir.map(|dir| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(file_writer(app_name, dir))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .unwrap_or_else(|e| panic!("Logger initialization failed: {}", e));
}

fn file_writer(app_name: &str, dir: &Path) -> tracing_appender::non_blocking::NonBlocking {
    std::fs::create_dir_all(dir)
        .unwrap_or_else(|e| panic!("Failed to create log directory {}: {}", dir.display(), e));

    let appender = RollingBuilder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(app_name)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(dir)
        .unwrap_or_else(|e| panic!("Failed to create log file appender: {}", e));

    let (writer, guard) = tracing_appender::non_blocking(appender);
    if LOG_GUARD.set(guard).is_err() {
        panic!("Logging already initialized");
    }
    writer
}
