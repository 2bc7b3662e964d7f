//! The enforcement engine.
//!
//! Consumes foreground changes one at a time. For each change it
//! resolves the owning executable, looks it up in the registry and,
//! for managed apps, enforces the configured geometry. Window and
//! process failures never leave this module: they are logged and the
//! cycle is skipped.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use tracing::{debug, info};

use crate::directory;
use crate::enforce::{Enforcement, Enforcer};
use crate::foreground::ForegroundSource;
use crate::identity::{self, ProcessApi};
use crate::registry::{Registry, Toggle};
use crate::settings::WindowSettings;
use crate::toggle::Toggled;
use crate::window::{WindowApi, WindowHandle};

/// Whether the engine is currently acting on a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Idle,
    Enforcing,
}

/// Drives enforcement from foreground notifications and hotkey toggles.
///
/// Clones share the registry and the enforcement gate, so the
/// foreground loop and the hotkey loop never enforce at the same time.
/// [`EngineState`] is not shared: each clone reports only the
/// notifications it handles itself.
#[derive(Clone)]
pub struct Engine<W, P> {
    windows: W,
    processes: P,
    registry: Registry,
    enforcer: Enforcer,
    state: EngineState,
    gate: Arc<Mutex<()>>,
}

impl<W: WindowApi, P: ProcessApi> Engine<W, P> {
    pub fn new(windows: W, processes: P, registry: Registry) -> Self {
        Self::with_enforcer(windows, processes, registry, Enforcer::default())
    }

    pub fn with_enforcer(windows: W, processes: P, registry: Registry, enforcer: Enforcer) -> Self {
        Self {
            windows,
            processes,
            registry,
            enforcer,
            state: EngineState::Idle,
            gate: Arc::new(Mutex::new(())),
        }
    }

    /// State of the loop driving this clone.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Processes notifications until the source shuts down.
    ///
    /// Each notification is handled to completion before the next one
    /// is pulled.
    pub fn run<S: ForegroundSource + ?Sized>(&mut self, source: &mut S) {
        info!("enforcement loop started");
        while let Some(handle) = source.next_change() {
            self.on_foreground(handle);
        }
        info!("foreground source closed, enforcement loop stopped");
    }

    /// Handles one foreground change.
    ///
    /// Returns `None` when the window's owner could not be resolved or
    /// is not managed.
    pub fn on_foreground(&mut self, handle: WindowHandle) -> Option<Enforcement> {
        self.state = EngineState::Enforcing;
        let outcome = self.handle_foreground(handle);
        self.state = EngineState::Idle;
        outcome
    }

    fn handle_foreground(&self, handle: WindowHandle) -> Option<Enforcement> {
        let owner = match identity::owner(&self.windows, &self.processes, handle) {
            Ok(owner) => owner,
            Err(e) => {
                debug!(%handle, error = %e, "could not resolve window owner");
                return None;
            }
        };
        let executable = owner.executable.as_str();

        let Some(settings) = self.registry.managed_settings(executable) else {
            debug!(%handle, executable, "not managed");
            return None;
        };

        debug!(%handle, executable, "managed app focused");
        if settings.delay > 0 {
            thread::sleep(settings.delay());
        }
        Some(self.enforce_executable(executable, Some(owner.pid), &settings))
    }

    /// Locates the main window of `executable` and enforces `settings`.
    ///
    /// `pid`, when known, is the process that was focused; its windows
    /// are tried before any other process with the same name.
    pub fn enforce_executable(
        &self,
        executable: &str,
        pid: Option<u32>,
        settings: &WindowSettings,
    ) -> Enforcement {
        let Some(handle) = self.locate(executable, pid) else {
            debug!(executable, "no window to enforce");
            return Enforcement::WindowMissing;
        };

        let _gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        let outcome = self.enforcer.enforce(&self.windows, handle, settings);
        debug!(executable, %handle, ?outcome, "enforcement finished");
        outcome
    }

    /// Finds the running process for `executable` and its top-level window.
    pub fn locate(&self, executable: &str, pid: Option<u32>) -> Option<WindowHandle> {
        if let Some(handle) = pid.and_then(|pid| directory::resolve(&self.windows, pid)) {
            return Some(handle);
        }
        let Some(pid) = identity::find_process(&self.processes, executable) else {
            debug!(executable, "process not running");
            return None;
        };
        let handle = directory::resolve(&self.windows, pid);
        if handle.is_none() {
            debug!(executable, pid, "process has no top-level window yet");
        }
        handle
    }

    /// Adds the focused app to the registry and enforces it, or removes
    /// it if it is already managed.
    ///
    /// Returns `None` when there is no foreground window or its owner
    /// cannot be resolved.
    pub fn toggle_focused(&self) -> Option<Toggled> {
        let handle = self.windows.foreground_window();
        if handle.is_none() {
            debug!("toggle ignored, no foreground window");
            return None;
        }

        let identity::Owner { pid, executable } =
            match identity::owner(&self.windows, &self.processes, handle) {
                Ok(owner) => owner,
                Err(e) => {
                    debug!(%handle, error = %e, "toggle ignored, owner unknown");
                    return None;
                }
            };

        match self.registry.toggle(&executable) {
            Toggle::Added(settings) => {
                let outcome = self.enforce_executable(&executable, Some(pid), &settings);
                Some(Toggled::Added {
                    executable,
                    outcome,
                })
            }
            Toggle::Removed => Some(Toggled::Removed { executable }),
        }
    }
}
