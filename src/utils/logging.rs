use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt::{format::FmtSpan, writer::MakeWriterExt},
};

pub const CLI_PREFIX: &str = "cli";

const LOG_DIR: &str = "logs";
const KEPT_LOG_FILES: usize = 5;
const DEFAULT_LEVEL: &str = "info";

/// Sets up tracing for a single run of the binary.
///
/// Every event of this crate is appended to `<app_dir>/logs/<prefix>.<date>`, which rotates
/// daily. Mirroring to stdout only happens with `show_std`, which the `--log` flag turns on.
pub fn enable_logging(
    prefix: &str,
    app_dir: &Path,
    log_level: Option<LevelFilter>,
    show_std: bool,
) -> Result<()> {
    let file = Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(KEPT_LOG_FILES)
        .filename_prefix(prefix)
        .build(app_dir.join(LOG_DIR))?;
    let console = std::io::stdout.with_filter(move |_| show_std);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(crate_directive(log_level)))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(console.and(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Directive that silences dependencies. `--log` beats `RUST_LOG`, which beats the default.
fn crate_directive(log_level: Option<LevelFilter>) -> String {
    let level = match log_level {
        Some(level) => level.to_string(),
        None => std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| DEFAULT_LEVEL.into()),
    };
    format!("{}={level}", env!("CARGO_CRATE_NAME"))
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
