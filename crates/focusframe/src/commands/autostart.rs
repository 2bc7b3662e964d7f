//! Manages automatic startup on logon.
//!
//! Delegates to [`focusframe_windows::autostart`] on Windows.

use std::path::Path;

#[cfg(windows)]
pub fn enable(config: Option<&Path>) {
    match focusframe_windows::autostart::enable(config) {
        Ok(()) => println!("Autostart enabled."),
        Err(e) => super::fail(e),
    }
}

#[cfg(windows)]
pub fn disable() {
    match focusframe_windows::autostart::disable() {
        Ok(()) => println!("Autostart disabled."),
        Err(e) => super::fail(e),
    }
}

#[cfg(windows)]
pub fn status() {
    if focusframe_windows::autostart::is_enabled() {
        println!("Autostart is currently enabled.");
    } else {
        println!("Autostart is currently disabled.");
    }
}

#[cfg(not(windows))]
pub fn enable(_config: Option<&Path>) {
    super::unsupported("autostart enable")
}

#[cfg(not(windows))]
pub fn disable() {
    super::unsupported("autostart disable")
}

#[cfg(not(windows))]
pub fn status() {
    super::unsupported("autostart status")
}
