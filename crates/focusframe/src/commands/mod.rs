pub mod apps;
pub mod autostart;
pub mod global;
pub mod init;
pub mod list;
pub mod run;

use std::path::{Path, PathBuf};

use clap::Args;

use focusframe_core::config;
use focusframe_core::{Hotkey, Registry, WindowSettings};

/// Geometry flags shared by `apps add`, `apps set` and `global set`.
///
/// Omitted flags keep the value they are applied to.
#[derive(Args)]
pub struct GeometryArgs {
    /// Window width in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<i32>,
    /// Window height in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<i32>,
    /// Left edge in screen pixels (negative for monitors left of the primary)
    #[arg(long, allow_negative_numbers = true)]
    pub x: Option<i32>,
    /// Top edge in screen pixels
    #[arg(long, allow_negative_numbers = true)]
    pub y: Option<i32>,
    /// Milliseconds to wait before resizing
    #[arg(long, allow_negative_numbers = true)]
    pub delay: Option<i32>,
}

impl GeometryArgs {
    /// Overlays the given flags on `base`, exiting on invalid values.
    pub fn apply(&self, base: WindowSettings) -> WindowSettings {
        let settings = WindowSettings {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            offset_x: self.x.unwrap_or(base.offset_x),
            offset_y: self.y.unwrap_or(base.offset_y),
            delay: self.delay.unwrap_or(base.delay),
        };
        if !settings.is_valid() {
            fail("width, height and delay must not be negative");
        }
        settings
    }
}

/// Arguments for `global set`.
#[derive(Args)]
pub struct GlobalArgs {
    #[command(flatten)]
    pub geometry: GeometryArgs,
    /// Toggle hotkey: a key name (F4, NumSlash, J) or a virtual-key code
    #[arg(long)]
    pub hotkey: Option<Hotkey>,
    /// Theme flag for settings front-ends
    #[arg(long)]
    pub dark_mode: Option<bool>,
}

/// Resolves the config file path, exiting if there is none.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    config::resolve_path(explicit).unwrap_or_else(|e| fail(e))
}

/// Loads (creating if needed) the config and wraps it in a registry.
pub fn open_registry(path: &Path) -> Registry {
    let config = config::ensure(path).unwrap_or_else(|e| fail(e));
    focusframe_core::log::init_console("warn");
    Registry::new(config, path)
}

/// Prints an error and exits with status 1.
pub fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Exits with an error on platforms without a native backend.
#[cfg(not(windows))]
pub fn unsupported(command: &str) -> ! {
    fail(format_args!("'{command}' is only available on Windows"))
}
