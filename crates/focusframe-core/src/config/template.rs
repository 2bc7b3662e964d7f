/// Generates the default `config.toml` contents with explanatory comments.
///
/// Written by `focusframe init` and on first start, so users have a
/// file they can immediately edit.
pub fn generate_config() -> String {
    r##"# FocusFrame configuration
# Location: %APPDATA%\focusframe\config.toml

# Defaults for every managed application without its own valid settings.
[global]
# Window size in pixels (must be >= 0).
width = 1920
height = 1080
# Window position in screen pixels. Negative values reach monitors
# left of or above the primary monitor.
offsetX = 0
offsetY = 0
# Milliseconds to wait before resizing, for slow-launching windows.
delay = 0
# Key that adds/removes the focused application: a key name ("F4",
# "NumSlash", "J") or a virtual-key code (115).
hotkey = "F4"
# Theme flag for settings front-ends.
darkMode = true

# Managed applications. Press the hotkey while an application is focused
# to add it here, or add entries by hand:
#
# [managed_apps."bg3.exe"]
# executable = "bg3.exe"
# name = "Baldur's Gate 3"
# settings = { width = 2560, height = 1440, offsetX = 0, offsetY = 0, delay = 500 }
[managed_apps]

[logging]
# Enable file logging to %APPDATA%\focusframe\logs\focusframe.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}
