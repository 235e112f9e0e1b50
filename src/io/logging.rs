use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `CATALOG_LOG=debug`)
pub const LOG_ENV: &str = "CATALOG_LOG";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Log to `<dir>/catalog.log`. The terminal belongs to the TUI, so nothing
/// goes to stdout/stderr. Keep the guard alive for the whole run or buffered
/// lines are lost.
pub fn init_file_logging(dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!("warning: could not create log dir {}: {}", dir.display(), e);
        return None;
    }
    let appender = tracing_appender::rolling::never(dir, "catalog.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .is_ok();
    installed.then_some(guard)
}

/// Log warnings and above to stderr (CLI subcommands).
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .try_init();
}
