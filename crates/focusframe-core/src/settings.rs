use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::keys;

/// Target geometry for a managed window.
///
/// Field names follow the `offsetX` / `offsetY` spelling of existing
/// config files. Missing offsets and delay read as zero; a missing size
/// reads as unset, which makes the entry fall back to the global defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default = "WindowSettings::unset", rename_all = "camelCase")]
pub struct WindowSettings {
    /// Width in pixels (must be >= 0).
    pub width: i32,
    /// Height in pixels (must be >= 0).
    pub height: i32,
    /// Left edge in screen pixels. Negative for monitors left of the primary.
    pub offset_x: i32,
    /// Top edge in screen pixels.
    pub offset_y: i32,
    /// Milliseconds to wait before enforcing, for slow-launching windows.
    pub delay: i32,
}

impl WindowSettings {
    /// Settings with no size, never valid on their own.
    pub fn unset() -> Self {
        Self {
            width: -1,
            height: -1,
            offset_x: 0,
            offset_y: 0,
            delay: 0,
        }
    }

    /// Settings are only honoured when every size and delay is non-negative.
    pub fn is_valid(&self) -> bool {
        self.width >= 0 && self.height >= 0 && self.delay >= 0
    }

    /// The rectangle the window should occupy.
    pub fn target_rect(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, self.width, self.height)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay.max(0) as u64)
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            offset_x: 0,
            offset_y: 0,
            delay: 0,
        }
    }
}

/// Global defaults, applied to every managed app without valid overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalSettings {
    pub width: i32,
    pub height: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub delay: i32,
    /// Key that toggles management of the focused window.
    pub hotkey: Hotkey,
    /// UI theme flag for settings front-ends.
    pub dark_mode: bool,
}

impl GlobalSettings {
    /// The window settings portion of the global defaults.
    pub fn window(&self) -> WindowSettings {
        WindowSettings {
            width: self.width,
            height: self.height,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            delay: self.delay,
        }
    }

    pub fn set_window(&mut self, window: WindowSettings) {
        self.width = window.width;
        self.height = window.height;
        self.offset_x = window.offset_x;
        self.offset_y = window.offset_y;
        self.delay = window.delay;
    }
}

impl Default for GlobalSettings {
    fn default() -> Self {
        let window = WindowSettings::default();
        Self {
            width: window.width,
            height: window.height,
            offset_x: window.offset_x,
            offset_y: window.offset_y,
            delay: window.delay,
            hotkey: Hotkey::default(),
            dark_mode: true,
        }
    }
}

/// A hotkey given either as a raw virtual-key code or as a key name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Hotkey {
    Code(u32),
    Name(String),
}

impl Hotkey {
    /// Resolves the virtual-key code, or `None` for an unknown name.
    pub fn vk(&self) -> Option<u32> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Name(name) => keys::vk_from_name(name),
        }
    }
}

impl FromStr for Hotkey {
    type Err = String;

    /// Parses `115`, `0x73` or a key name such as `F4`. Unknown names
    /// are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let code = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => s.parse::<u32>().ok(),
        };
        let hotkey = code.map_or_else(|| Self::Name(s.to_string()), Self::Code);
        if hotkey.vk().is_none() {
            return Err(format!("unknown key '{s}'"));
        }
        Ok(hotkey)
    }
}

impl Default for Hotkey {
    fn default() -> Self {
        Self::Name("F4".into())
    }
}

impl std::fmt::Display for Hotkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code(code) => write!(f, "0x{code:02X}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// An executable whose windows are kept at a fixed geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedApp {
    /// Executable file name, matched case-insensitively (e.g. `game.exe`).
    pub executable: String,
    /// Optional friendly display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Per-app geometry. Invalid values fall back to the global defaults.
    #[serde(alias = "dimensions", default = "WindowSettings::unset")]
    pub settings: WindowSettings,
}

impl ManagedApp {
    pub fn new(executable: impl Into<String>, settings: WindowSettings) -> Self {
        Self {
            executable: executable.into(),
            name: None,
            settings,
        }
    }

    /// Name shown to users: the friendly name, or the executable.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.executable)
    }
}
