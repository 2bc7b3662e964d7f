//! The management hotkey.
//!
//! Polls the key state and toggles the focused application on each
//! press. A held key counts as one press.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::info;

use crate::enforce::Enforcement;
use crate::engine::Engine;
use crate::identity::ProcessApi;
use crate::window::WindowApi;

/// How often the key state is sampled.
pub const KEY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What a hotkey press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggled {
    /// The app was added with the global defaults and enforced.
    Added {
        executable: String,
        outcome: Enforcement,
    },
    /// The app was removed; its window is left as is.
    Removed { executable: String },
}

/// Fires once per up-to-down transition of a key.
#[derive(Debug, Default)]
pub struct KeyEdge {
    was_down: bool,
}

impl KeyEdge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one sample. Returns `true` only when the key was just pressed.
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.was_down;
        self.was_down = down;
        pressed
    }
}

/// Samples `key_down` every `interval` and toggles the focused app on
/// each press, until `stop` is set.
pub fn run<W, P>(
    engine: &Engine<W, P>,
    mut key_down: impl FnMut() -> bool,
    interval: Duration,
    stop: &AtomicBool,
) where
    W: WindowApi,
    P: ProcessApi,
{
    let mut edge = KeyEdge::new();
    while !stop.load(Ordering::Relaxed) {
        if edge.update(key_down()) {
            match engine.toggle_focused() {
                Some(Toggled::Added {
                    executable,
                    outcome,
                }) => info!(executable, ?outcome, "hotkey: now managing"),
                Some(Toggled::Removed { executable }) => {
                    info!(executable, "hotkey: no longer managing");
                }
                None => {}
            }
        }
        thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::config::Config;
    use crate::registry::Registry;
    use crate::testing::{FakeDesktop, FakeProcesses, FakeWindow};

    #[test]
    fn edge_fires_only_on_press() {
        // Arrange
        let mut edge = KeyEdge::new();
        let samples = [false, true, true, true, false, true, false];

        // Act
        let fired: Vec<bool> = samples.into_iter().map(|s| edge.update(s)).collect();

        // Assert
        assert_eq!(fired, vec![false, true, false, false, false, true, false]);
    }

    /// Replays `samples` as key states, setting `stop` once they run out.
    fn replay<'a>(samples: &'a [bool], stop: &'a AtomicBool) -> impl FnMut() -> bool + 'a {
        let index = Cell::new(0);
        move || {
            let i = index.get();
            index.set(i + 1);
            if i + 1 >= samples.len() {
                stop.store(true, Ordering::Relaxed);
            }
            samples.get(i).copied().unwrap_or(false)
        }
    }

    fn setup() -> (FakeDesktop, Registry, Engine<FakeDesktop, FakeProcesses>) {
        let desktop = FakeDesktop::new(vec![FakeWindow::new(1, 10, "Game")]);
        desktop.focus(1);
        let registry = Registry::in_memory(Config::default());
        let engine = Engine::new(
            desktop.clone(),
            FakeProcesses::new(vec![(10, "game.exe")]),
            registry.clone(),
        );
        (desktop, registry, engine)
    }

    #[test]
    fn held_key_toggles_once() {
        // Arrange
        let (desktop, registry, engine) = setup();
        let stop = AtomicBool::new(false);
        let samples = [true, true, true, true, false];

        // Act
        run(&engine, replay(&samples, &stop), Duration::ZERO, &stop);

        // Assert
        assert!(registry.contains("game.exe"));
        assert_eq!(desktop.style_writes(), 1);
        assert_eq!(desktop.rect_writes(), 1);
    }

    #[test]
    fn second_press_removes_without_enforcing() {
        // Arrange
        let (desktop, registry, engine) = setup();
        let stop = AtomicBool::new(false);
        let samples = [true, false, true, false];

        // Act
        run(&engine, replay(&samples, &stop), Duration::ZERO, &stop);

        // Assert
        assert!(!registry.contains("game.exe"));
        assert_eq!(desktop.mutations(), 2);
    }

    #[test]
    fn stopped_loop_never_samples() {
        // Arrange
        let (_, registry, engine) = setup();
        let stop = AtomicBool::new(true);

        // Act
        run(&engine, || panic!("sampled after stop"), Duration::ZERO, &stop);

        // Assert
        assert!(registry.apps().is_empty());
    }
}
