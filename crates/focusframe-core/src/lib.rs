pub mod config;
pub mod directory;
pub mod enforce;
pub mod engine;
pub mod error;
pub mod foreground;
pub mod identity;
pub mod keys;
pub mod log;
pub mod rect;
pub mod registry;
pub mod settings;
pub mod toggle;
pub mod window;

#[cfg(test)]
mod testing;

pub use enforce::{Enforcement, Enforcer, RetryPolicy};
pub use engine::{Engine, EngineState};
pub use error::{ConfigError, WindowError, WindowResult};
pub use foreground::{ForegroundSource, ForegroundStrategy, ForegroundTracker};
pub use identity::{ProcessApi, ProcessEntry};
pub use rect::Rect;
pub use registry::Registry;
pub use settings::{GlobalSettings, Hotkey, ManagedApp, WindowSettings};
pub use window::{EnumeratedWindow, TopLevelWindow, WindowApi, WindowHandle};
