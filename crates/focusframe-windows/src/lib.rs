//! Win32 implementation of the FocusFrame window and process APIs.
//!
//! Everything here talks to the OS through the `windows` crate. The
//! engine itself lives in `focusframe-core` and only sees the
//! [`WindowApi`](focusframe_core::WindowApi) and
//! [`ProcessApi`](focusframe_core::ProcessApi) traits.
#![cfg(windows)]

/// HKCU Run-key registration.
pub mod autostart;

/// Ctrl+C handling.
pub mod ctrl_c;

mod dpi;

mod enumerate;

/// WinEvent hook thread for foreground changes.
pub mod event_loop;

/// Picks the foreground source for the engine.
pub mod foreground;

/// Physical key state.
pub mod keyboard;

/// Process introspection.
pub mod process;

/// Window reads and mutations.
pub mod window;

pub use process::Processes;
pub use window::Desktop;
