use std::path::PathBuf;

use crate::window::WindowHandle;

/// Errors raised while reading or mutating native window and process state.
///
/// None of these are fatal. The watch loops log them and skip the cycle.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("window {0} no longer exists")]
    InvalidHandle(WindowHandle),

    #[error("no visible window belongs to process {pid}")]
    WindowNotFound { pid: u32 },

    #[error("no running process matches '{executable}'")]
    ProcessNotFound { executable: String },

    #[error("access denied opening process {pid}")]
    AccessDenied { pid: u32 },

    #[error("{call} failed: {message}")]
    Os { call: &'static str, message: String },
}

impl WindowError {
    /// Wraps a failed native call.
    pub fn os(call: &'static str, message: impl ToString) -> Self {
        Self::Os {
            call,
            message: message.to_string(),
        }
    }
}

pub type WindowResult<T> = Result<T, WindowError>;

/// Errors raised while establishing or persisting the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// Returns true if the error means the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
