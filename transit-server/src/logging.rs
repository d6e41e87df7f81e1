//! Logging setup.
//!
//! Every session logs to the console and to a timestamped file under the
//! log directory, e.g. `logs/2026-10-14T09:30:00.log`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Default log directory, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Path of the log file for a session started at `started`.
pub fn log_file_path(dir: &Path, started: DateTime<Local>) -> PathBuf {
    dir.join(format!("{}.log", started.format("%Y-%m-%dT%H:%M:%S")))
}

/// Create the log file, including its directory.
fn open_log_file(dir: &Path) -> std::io::Result<(PathBuf, File)> {
    std::fs::create_dir_all(dir)?;
    let path = log_file_path(dir, Local::now());
    let file = File::create(&path)?;
    Ok((path, file))
}

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. If the log file
/// cannot be created, logging continues on the console only and the
/// failure is logged there. Returns the log file path when one is in use.
pub fn init(log_dir: &Path) -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer().without_time().with_target(false);

    match open_log_file(log_dir) {
        Ok((path, file)) => {
            let file_layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(file_layer)
                .init();
            Some(path)
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
            tracing::warn!(dir = %log_dir.display(), error = %e, "Could not create log file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn log_file_is_named_by_start_time() {
        let started = Local.with_ymd_and_hms(2026, 10, 14, 9, 30, 5).unwrap();
        let path = log_file_path(Path::new("logs"), started);
        assert_eq!(path, Path::new("logs").join("2026-10-14T09:30:05.log"));
    }

    #[test]
    fn creates_missing_log_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("logs");

        let (path, _file) = open_log_file(&nested).unwrap();

        assert!(path.exists());
        assert!(path.starts_with(&nested));
    }
}
