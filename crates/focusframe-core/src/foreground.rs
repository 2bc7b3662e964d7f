//! Foreground-change notifications.
//!
//! The engine consumes a [`ForegroundSource`] without knowing whether it
//! is backed by an OS event hook or by polling. Both flavours share a
//! [`ForegroundTracker`] so they report the same sequence for the same
//! foreground history.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::Duration;

use crate::window::{WindowApi, WindowHandle};

/// How often the polling source queries the foreground window.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A stream of foreground-window changes.
pub trait ForegroundSource {
    /// Blocks until the foreground window changes.
    ///
    /// Returns `None` once the source has shut down.
    fn next_change(&mut self) -> Option<WindowHandle>;
}

/// Which source `focusframe run` should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForegroundStrategy {
    /// OS foreground-change events, falling back to polling if the hook
    /// cannot be installed.
    #[default]
    Event,
    /// Query the foreground window on a fixed interval.
    Polling,
}

/// Filters raw foreground observations down to real changes.
///
/// The same handle twice in a row is reported once. Handle 0 (no
/// foreground window, e.g. during a desktop switch) is dropped without
/// forgetting the last real handle.
#[derive(Debug, Default)]
pub struct ForegroundTracker {
    last: Option<WindowHandle>,
}

impl ForegroundTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some(handle)` if `handle` should be reported.
    pub fn observe(&mut self, handle: WindowHandle) -> Option<WindowHandle> {
        if handle.is_none() || self.last == Some(handle) {
            return None;
        }
        self.last = Some(handle);
        Some(handle)
    }
}

/// Polls [`WindowApi::foreground_window`] every `interval`.
pub struct PollingSource<W> {
    api: W,
    interval: Duration,
    tracker: ForegroundTracker,
    stop: Arc<AtomicBool>,
}

impl<W: WindowApi> PollingSource<W> {
    pub fn new(api: W, stop: Arc<AtomicBool>) -> Self {
        Self::with_interval(api, POLL_INTERVAL, stop)
    }

    pub fn with_interval(api: W, interval: Duration, stop: Arc<AtomicBool>) -> Self {
        Self {
            api,
            interval,
            tracker: ForegroundTracker::new(),
            stop,
        }
    }
}

impl<W: WindowApi> ForegroundSource for PollingSource<W> {
    fn next_change(&mut self) -> Option<WindowHandle> {
        while !self.stop.load(Ordering::Relaxed) {
            let current = self.api.foreground_window();
            if let Some(handle) = self.tracker.observe(current) {
                return Some(handle);
            }
            thread::sleep(self.interval);
        }
        None
    }
}

/// Reads raw foreground handles pushed by an event hook.
///
/// Only the newest queued handle is reported: changes that piled up
/// while the consumer was busy collapse into the latest one. Ends when
/// every sender has been dropped.
pub struct ChannelSource {
    rx: Receiver<WindowHandle>,
    tracker: ForegroundTracker,
}

impl ChannelSource {
    pub fn new(rx: Receiver<WindowHandle>) -> Self {
        Self {
            rx,
            tracker: ForegroundTracker::new(),
        }
    }
}

impl ForegroundSource for ChannelSource {
    fn next_change(&mut self) -> Option<WindowHandle> {
        loop {
            let mut raw = self.rx.recv().ok()?;
            while let Ok(newer) = self.rx.try_recv() {
                // A trailing null handle does not hide a real window before it.
                if !newer.is_none() || raw.is_none() {
                    raw = newer;
                }
            }
            if let Some(handle) = self.tracker.observe(raw) {
                return Some(handle);
            }
        }
    }
}
