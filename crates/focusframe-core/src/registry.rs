//! The managed-application registry.
//!
//! A cloneable handle over the shared configuration. Every read and
//! mutation takes the same lock, and mutations write the whole config
//! back to disk while still holding it, so the file never lags behind
//! what the engine sees.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::config::{self, Config, app_key};
use crate::settings::{GlobalSettings, ManagedApp, WindowSettings};

/// Result of [`Registry::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The executable was added with these (global) settings.
    Added(WindowSettings),
    /// The executable was removed.
    Removed,
}

struct Inner {
    config: Config,
    /// Where mutations are persisted. `None` keeps the registry in memory.
    path: Option<PathBuf>,
}

/// Shared store of managed applications and global defaults.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<Mutex<Inner>>,
}

impl Registry {
    /// Creates a registry backed by the config file at `path`.
    pub fn new(config: Config, path: impl Into<PathBuf>) -> Self {
        Self::with_path(config, Some(path.into()))
    }

    /// Creates a registry that never touches the disk.
    pub fn in_memory(config: Config) -> Self {
        Self::with_path(config, None)
    }

    fn with_path(mut config: Config, path: Option<PathBuf>) -> Self {
        config.normalize();
        Self {
            inner: Arc::new(Mutex::new(Inner { config, path })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic elsewhere must not take enforcement down with it.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Settings for `executable`. Unknown executables and invalid per-app
    /// settings both yield the global defaults.
    pub fn get(&self, executable: &str) -> WindowSettings {
        self.lock().config.window_settings(executable)
    }

    /// Settings for `executable` if it is managed, else `None`.
    pub fn managed_settings(&self, executable: &str) -> Option<WindowSettings> {
        let inner = self.lock();
        inner
            .config
            .contains(executable)
            .then(|| inner.config.window_settings(executable))
    }

    pub fn contains(&self, executable: &str) -> bool {
        self.lock().config.contains(executable)
    }

    /// Starts managing `executable` with the current global defaults.
    ///
    /// Returns the settings now in effect. An executable that is already
    /// managed keeps its existing entry.
    pub fn add(&self, executable: &str) -> WindowSettings {
        let mut inner = self.lock();
        if !inner.config.contains(executable) {
            let settings = inner.config.global.window();
            inner.config.managed_apps.insert(
                app_key(executable),
                ManagedApp::new(executable, settings),
            );
            info!(executable, "app added");
            inner.flush();
        }
        inner.config.window_settings(executable)
    }

    /// Stops managing `executable`. Returns whether it was managed.
    pub fn remove(&self, executable: &str) -> bool {
        let mut inner = self.lock();
        let removed = inner
            .config
            .managed_apps
            .remove(&app_key(executable))
            .is_some();
        if removed {
            info!(executable, "app removed");
            inner.flush();
        }
        removed
    }

    /// Adds `executable` if unmanaged, removes it otherwise.
    ///
    /// The check and the mutation happen under one lock acquisition.
    pub fn toggle(&self, executable: &str) -> Toggle {
        let mut inner = self.lock();
        let key = app_key(executable);
        let outcome = if inner.config.managed_apps.remove(&key).is_some() {
            info!(executable, "app removed");
            Toggle::Removed
        } else {
            let settings = inner.config.global.window();
            inner
                .config
                .managed_apps
                .insert(key, ManagedApp::new(executable, settings));
            info!(executable, "app added");
            Toggle::Added(settings)
        };
        inner.flush();
        outcome
    }

    /// Inserts or replaces the entry for `app.executable`.
    pub fn set_app(&self, app: ManagedApp) {
        let mut inner = self.lock();
        inner
            .config
            .managed_apps
            .insert(app_key(&app.executable), app);
        inner.flush();
    }

    pub fn global(&self) -> GlobalSettings {
        self.lock().config.global.clone()
    }

    pub fn set_global(&self, global: GlobalSettings) {
        let mut inner = self.lock();
        inner.config.global = global;
        inner.flush();
    }

    /// All managed apps, ordered by executable name.
    pub fn apps(&self) -> Vec<ManagedApp> {
        self.lock().config.managed_apps.values().cloned().collect()
    }
}

impl Inner {
    fn flush(&self) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        if let Err(e) = config::save(path, &self.config) {
            warn!(path = %path.display(), error = %e, "failed to persist config");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(width: i32, height: i32) -> Config {
        let mut config = Config::default();
        config.global.width = width;
        config.global.height = height;
        config
    }

    #[test]
    fn add_captures_current_global_defaults() {
        // Arrange
        let registry = Registry::in_memory(global(1920, 1090));

        // Act
        let settings = registry.add("Game.exe");

        // Assert
        assert_eq!(settings.width, 1920);
        assert_eq!(settings.height, 1090);
        assert!(registry.contains("game.exe"));
        assert_eq!(registry.managed_settings("GAME.EXE"), Some(settings));
    }

    #[test]
    fn add_keeps_existing_entry() {
        // Arrange
        let registry = Registry::in_memory(Config::default());
        let custom = WindowSettings {
            width: 800,
            height: 600,
            offset_x: 10,
            offset_y: 10,
            delay: 0,
        };
        registry.set_app(ManagedApp::new("tool.exe", custom));

        // Act
        let settings = registry.add("TOOL.exe");

        // Assert
        assert_eq!(settings, custom);
        assert_eq!(registry.apps().len(), 1);
    }

    #[test]
    fn invalid_app_settings_yield_global_defaults() {
        // Arrange
        let registry = Registry::in_memory(global(1280, 720));
        let invalid = WindowSettings {
            height: -20,
            ..WindowSettings::default()
        };
        registry.set_app(ManagedApp::new("broken.exe", invalid));

        // Act
        let settings = registry.get("broken.exe");

        // Assert
        assert_eq!(settings, registry.global().window());
        assert_eq!(registry.managed_settings("broken.exe"), Some(settings));
    }

    #[test]
    fn unmanaged_app_has_no_managed_settings() {
        // Arrange
        let registry = Registry::in_memory(Config::default());

        // Act / Assert
        assert_eq!(registry.managed_settings("other.exe"), None);
        assert_eq!(registry.get("other.exe"), registry.global().window());
    }

    #[test]
    fn toggle_adds_then_removes() {
        // Arrange
        let registry = Registry::in_memory(global(1920, 1080));

        // Act
        let first = registry.toggle("game.exe");
        let second = registry.toggle("GAME.exe");

        // Assert
        assert_eq!(first, Toggle::Added(registry.global().window()));
        assert_eq!(second, Toggle::Removed);
        assert!(!registry.contains("game.exe"));
    }

    #[test]
    fn remove_reports_whether_app_was_managed() {
        // Arrange
        let registry = Registry::in_memory(Config::default());
        registry.add("game.exe");

        // Act / Assert
        assert!(registry.remove("Game.exe"));
        assert!(!registry.remove("game.exe"));
    }

    #[test]
    fn clones_share_state() {
        // Arrange
        let registry = Registry::in_memory(Config::default());
        let other = registry.clone();

        // Act
        other.add("game.exe");

        // Assert
        assert!(registry.contains("game.exe"));
    }

    #[test]
    fn mutations_are_persisted() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let registry = Registry::new(Config::default(), &path);

        // Act
        registry.add("game.exe");
        let mut global = registry.global();
        global.width = 2560;
        registry.set_global(global);

        // Assert
        let reloaded = config::try_load(&path).unwrap();
        assert!(reloaded.contains("game.exe"));
        assert_eq!(reloaded.global.width, 2560);
    }

    #[test]
    fn removal_is_persisted() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let registry = Registry::new(Config::default(), &path);
        registry.add("game.exe");

        // Act
        registry.toggle("game.exe");

        // Assert
        let reloaded = config::try_load(&path).unwrap();
        assert!(reloaded.managed_apps.is_empty());
    }

    #[test]
    fn flush_failure_keeps_in_memory_state() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes every write fail.
        let path = dir.path().join("config.toml");
        std::fs::create_dir(&path).unwrap();
        let registry = Registry::new(Config::default(), &path);

        // Act
        registry.add("game.exe");

        // Assert
        assert!(registry.contains("game.exe"));
    }
}
