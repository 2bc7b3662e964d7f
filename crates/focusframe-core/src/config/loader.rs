use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::{Config, template};
use crate::ConfigError;

/// Returns the config directory: `<config dir>/focusframe/`.
///
/// On Windows this is `%APPDATA%\focusframe`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("focusframe"))
}

/// Returns the default config file path: `<config dir>/focusframe/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Picks the explicit path if one was given, else the default location.
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config_path().ok_or(ConfigError::NoConfigDir),
    }
}

/// Directory for log files, next to the config file.
pub fn log_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map_or_else(|| PathBuf::from("logs"), |dir| dir.join("logs"))
}

/// Tries to load and parse the config file at `path`.
pub fn try_load(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.normalize();
    Ok(config)
}

/// Loads the configuration, falling back to defaults.
///
/// A missing file silently yields defaults; other errors are logged.
pub fn load(path: &Path) -> Config {
    match try_load(path) {
        Ok(config) => config,
        Err(e) if e.is_not_found() => Config::default(),
        Err(e) => {
            warn!(error = %e, "invalid config, using defaults");
            Config::default()
        }
    }
}

/// Establishes the configuration at startup.
///
/// Writes the default template first if the file does not exist yet.
/// Any failure here is fatal for the caller.
pub fn ensure(path: &Path) -> Result<Config, ConfigError> {
    write_default(path)?;
    try_load(path)
}

/// Writes the commented default config unless the file already exists.
///
/// Returns `true` if a new file was created.
pub fn write_default(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    create_parent(path)?;
    fs::write(path, template::generate_config()).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Serializes the whole configuration to `path`.
pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;
    create_parent(path)?;
    fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn create_parent(path: &Path) -> Result<(), ConfigError> {
    let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };
    fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ManagedApp, WindowSettings};

    #[test]
    fn ensure_creates_default_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        // Act
        let config = ensure(&path).unwrap();

        // Assert
        assert!(path.exists());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn ensure_keeps_existing_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[global]\nwidth = 1280\n").unwrap();

        // Act
        let config = ensure(&path).unwrap();

        // Assert
        assert_eq!(config.global.width, 1280);
    }

    #[test]
    fn ensure_fails_on_unparseable_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[global\nwidth = ").unwrap();

        // Act
        let err = ensure(&path).unwrap_err();

        // Assert
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();

        // Act
        let config = load(&dir.path().join("absent.toml"));

        // Assert
        assert_eq!(config, Config::default());
    }

    #[test]
    fn saved_config_is_reloaded() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.managed_apps.insert(
            "testapp.exe".into(),
            ManagedApp::new("TestApp.exe", WindowSettings::default()),
        );

        // Act
        save(&path, &config).unwrap();
        let reloaded = try_load(&path).unwrap();

        // Assert
        assert!(reloaded.contains("TestApp.exe"));
    }

    #[test]
    fn log_dir_sits_next_to_config() {
        assert_eq!(
            log_dir(Path::new("/tmp/ff/config.toml")),
            PathBuf::from("/tmp/ff/logs")
        );
    }
}
