//! Logging setup on top of `tracing`.
//!
//! Events always go to stderr. When file logging is enabled they are
//! also written to `<config dir>/logs/focusframe.log`. When that file
//! exceeds the configured max size, it is rotated to `focusframe.log.1`
//! (one backup kept).

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_NAME: &str = "focusframe.log";
const BACKUP_FILE_NAME: &str = "focusframe.log.1";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// `RUST_LOG` overrides the configured level. Calling this again is a
/// no-op.
pub fn init(config: &LogConfig, log_dir: &Path) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(&config.level)));

    let file_layer = config
        .enabled
        .then(|| RotatingFile::open(log_dir, config.max_file_mb * 1024 * 1024))
        .and_then(|result| match result {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("Warning: file logging disabled: {e}");
                None
            }
        })
        .map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
        });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(file_layer)
        .try_init();
}

/// Installs a stderr-only subscriber for short-lived commands.
pub fn init_console(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init();
}

/// Maps the configured level onto a filter directive, defaulting to info.
fn level_directive(level: &str) -> &'static str {
    match level.to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}

/// Append-only log file that rotates itself once it grows past `max_bytes`.
struct RotatingFile {
    file: File,
    path: PathBuf,
    backup: PathBuf,
    max_bytes: u64,
    written: u64,
}

impl RotatingFile {
    fn open(dir: &Path, max_bytes: u64) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            file,
            path,
            backup: dir.join(BACKUP_FILE_NAME),
            max_bytes,
            written,
        })
    }

    fn rotate(&mut self) -> io::Result<()> {
        let _ = fs::rename(&self.path, &self.backup);
        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.file.write(buf)?;
        self.written += n as u64;
        if self.max_bytes > 0 && self.written >= self.max_bytes {
            self.rotate()?;
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_directive_defaults_to_info() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("warn"), "warn");
        assert_eq!(level_directive("verbose"), "info");
    }

    #[test]
    fn file_rotates_after_max_bytes() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let mut file = RotatingFile::open(dir.path(), 16).unwrap();

        // Act
        file.write_all(b"0123456789abcdef").unwrap();
        file.write_all(b"next").unwrap();
        file.flush().unwrap();

        // Assert
        let backup = fs::read_to_string(dir.path().join(BACKUP_FILE_NAME)).unwrap();
        let current = fs::read_to_string(dir.path().join(LOG_FILE_NAME)).unwrap();
        assert_eq!(backup, "0123456789abcdef");
        assert_eq!(current, "next");
    }

    #[test]
    fn reopening_counts_existing_bytes() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LOG_FILE_NAME), "existing").unwrap();

        // Act
        let file = RotatingFile::open(dir.path(), 1024).unwrap();

        // Assert
        assert_eq!(file.written, 8);
    }
}
