mod loader;
pub mod template;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;
use crate::settings::{GlobalSettings, ManagedApp, WindowSettings};

pub use loader::{
    config_dir, config_path, ensure, load, log_dir, resolve_path, save, try_load, write_default,
};

/// Top-level configuration for FocusFrame.
///
/// Loaded from `<config dir>/focusframe/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for every managed app, plus the toggle hotkey.
    pub global: GlobalSettings,
    /// Managed applications keyed by lower-cased executable name.
    pub managed_apps: BTreeMap<String, ManagedApp>,
    /// File logging settings.
    pub logging: LogConfig,
}

/// Registry key for an executable name.
pub(crate) fn app_key(executable: &str) -> String {
    executable.to_lowercase()
}

impl Config {
    /// Re-keys managed apps by lower-cased executable name.
    ///
    /// Hand-edited files may use any key; an app without an
    /// `executable` takes its key as the executable. When two entries
    /// collide, the later one in key order wins.
    pub fn normalize(&mut self) {
        let apps = std::mem::take(&mut self.managed_apps);
        for (key, mut app) in apps {
            if app.executable.trim().is_empty() {
                app.executable = key;
            }
            self.managed_apps.insert(app_key(&app.executable), app);
        }
    }

    pub fn app(&self, executable: &str) -> Option<&ManagedApp> {
        self.managed_apps.get(&app_key(executable))
    }

    pub fn contains(&self, executable: &str) -> bool {
        self.app(executable).is_some()
    }

    /// Settings for `executable`, falling back to the global defaults
    /// when the app is unknown or its own settings are invalid.
    pub fn window_settings(&self, executable: &str) -> WindowSettings {
        self.app(executable)
            .map(|app| app.settings)
            .filter(WindowSettings::is_valid)
            .unwrap_or_else(|| self.global.window())
    }
}
