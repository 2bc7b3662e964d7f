//! In-memory fakes of the native window and process APIs.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use crate::enforce::style::{WS_CAPTION, WS_THICKFRAME, WS_VISIBLE};
use crate::identity::{ProcessApi, ProcessEntry, base_name};
use crate::window::{TopLevelWindow, WindowApi, WindowHandle};
use crate::{Rect, WindowError, WindowResult};

/// Style of an ordinary decorated application window.
pub const DECORATED: u32 = WS_CAPTION | WS_THICKFRAME | WS_VISIBLE;

#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub handle: WindowHandle,
    pub pid: u32,
    pub title: String,
    pub visible: bool,
    pub tool_window: bool,
    pub style: u32,
    pub rect: Rect,
}

impl FakeWindow {
    pub fn new(handle: usize, pid: u32, title: &str) -> Self {
        Self {
            handle: WindowHandle(handle),
            pid,
            title: title.into(),
            visible: true,
            tool_window: false,
            style: DECORATED,
            rect: Rect::new(100, 100, 1000, 800),
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn tool(mut self) -> Self {
        self.tool_window = true;
        self
    }

    pub fn with_style(mut self, style: u32) -> Self {
        self.style = style;
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }
}

#[derive(Debug, Default)]
struct DesktopState {
    windows: Vec<FakeWindow>,
    foreground_script: VecDeque<WindowHandle>,
    foreground: WindowHandle,
    style_writes: usize,
    rect_writes: usize,
    /// Number of upcoming `set_rect` calls to reject.
    rejected_rect_writes: u32,
    vanish_on_set_rect: bool,
    /// How long each style or geometry write takes.
    write_pause: Duration,
}

/// A scriptable desktop. Clones share state so tests can inspect
/// what an engine did through its own copy.
#[derive(Debug, Clone, Default)]
pub struct FakeDesktop {
    state: Arc<Mutex<DesktopState>>,
    writing: Arc<AtomicBool>,
    overlapping_writes: Arc<AtomicUsize>,
}

impl FakeDesktop {
    pub fn new(windows: Vec<FakeWindow>) -> Self {
        let desktop = Self::default();
        desktop.lock().windows = windows;
        desktop
    }

    fn lock(&self) -> MutexGuard<'_, DesktopState> {
        self.state.lock().unwrap()
    }

    pub fn destroy(&self, handle: WindowHandle) {
        self.lock().windows.retain(|w| w.handle != handle);
    }

    pub fn focus(&self, handle: usize) {
        self.lock().foreground = WindowHandle(handle);
    }

    /// Queues foreground handles returned by successive queries.
    /// The last one sticks once the script is exhausted.
    pub fn script_foreground(&self, handles: &[usize]) {
        self.lock()
            .foreground_script
            .extend(handles.iter().map(|&h| WindowHandle(h)));
    }

    pub fn reject_rect_writes(&self, count: u32) {
        self.lock().rejected_rect_writes = count;
    }

    pub fn vanish_on_set_rect(&self) {
        self.lock().vanish_on_set_rect = true;
    }

    /// Makes every style and geometry write take `pause`. The state lock
    /// is not held meanwhile, so concurrent writers can run into each other.
    pub fn pause_writes(&self, pause: Duration) {
        self.lock().write_pause = pause;
    }

    /// Writes that started while another one was still in progress.
    pub fn overlapping_writes(&self) -> usize {
        self.overlapping_writes.load(Ordering::SeqCst)
    }

    pub fn window(&self, handle: usize) -> FakeWindow {
        self.lock()
            .windows
            .iter()
            .find(|w| w.handle == WindowHandle(handle))
            .cloned()
            .unwrap()
    }

    pub fn style_writes(&self) -> usize {
        self.lock().style_writes
    }

    pub fn rect_writes(&self) -> usize {
        self.lock().rect_writes
    }

    /// Total native mutation calls (style and geometry).
    pub fn mutations(&self) -> usize {
        let state = self.lock();
        state.style_writes + state.rect_writes
    }

    pub fn reset_counters(&self) {
        let mut state = self.lock();
        state.style_writes = 0;
        state.rect_writes = 0;
    }

    fn write<T>(&self, f: impl FnOnce() -> T) -> T {
        if self.writing.swap(true, Ordering::SeqCst) {
            self.overlapping_writes.fetch_add(1, Ordering::SeqCst);
        }
        let pause = self.lock().write_pause;
        thread::sleep(pause);
        let result = f();
        self.writing.store(false, Ordering::SeqCst);
        result
    }

    fn with_window<T>(
        &self,
        handle: WindowHandle,
        f: impl FnOnce(&mut FakeWindow) -> T,
    ) -> WindowResult<T> {
        let mut state = self.lock();
        state
            .windows
            .iter_mut()
            .find(|w| w.handle == handle)
            .map(f)
            .ok_or(WindowError::InvalidHandle(handle))
    }
}

impl WindowApi for FakeDesktop {
    fn top_level_windows(&self) -> WindowResult<Vec<TopLevelWindow>> {
        Ok(self
            .lock()
            .windows
            .iter()
            .map(|w| TopLevelWindow {
                handle: w.handle,
                title: w.title.clone(),
                visible: w.visible,
                tool_window: w.tool_window,
            })
            .collect())
    }

    fn process_id(&self, handle: WindowHandle) -> WindowResult<u32> {
        self.with_window(handle, |w| w.pid)
    }

    fn foreground_window(&self) -> WindowHandle {
        let mut state = self.lock();
        if let Some(next) = state.foreground_script.pop_front() {
            state.foreground = next;
        }
        state.foreground
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        self.lock().windows.iter().any(|w| w.handle == handle)
    }

    fn style(&self, handle: WindowHandle) -> WindowResult<u32> {
        self.with_window(handle, |w| w.style)
    }

    fn set_style(&self, handle: WindowHandle, style: u32) -> WindowResult<()> {
        self.write(|| {
            self.lock().style_writes += 1;
            self.with_window(handle, |w| w.style = style)
        })
    }

    fn rect(&self, handle: WindowHandle) -> WindowResult<Rect> {
        self.with_window(handle, |w| w.rect)
    }

    fn set_rect(&self, handle: WindowHandle, rect: &Rect) -> WindowResult<()> {
        self.write(|| {
            {
                let mut state = self.lock();
                state.rect_writes += 1;
                if state.vanish_on_set_rect {
                    state.windows.retain(|w| w.handle != handle);
                    return Err(WindowError::os("SetWindowPos", "invalid window handle"));
                }
                if state.rejected_rect_writes > 0 {
                    state.rejected_rect_writes -= 1;
                    return Err(WindowError::os("SetWindowPos", "rejected"));
                }
            }
            self.with_window(handle, |w| w.rect = *rect)
        })
    }
}

/// A fixed process table: `(pid, image path)` pairs.
#[derive(Debug, Clone, Default)]
pub struct FakeProcesses {
    entries: Vec<(u32, String)>,
    denied: Vec<u32>,
}

impl FakeProcesses {
    pub fn new(entries: Vec<(u32, &str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(pid, path)| (pid, path.to_string()))
                .collect(),
            denied: Vec::new(),
        }
    }

    pub fn deny(mut self, pid: u32) -> Self {
        self.denied.push(pid);
        self
    }
}

impl ProcessApi for FakeProcesses {
    fn image_path(&self, pid: u32) -> WindowResult<String> {
        if self.denied.contains(&pid) {
            return Err(WindowError::AccessDenied { pid });
        }
        self.entries
            .iter()
            .find(|(p, _)| *p == pid)
            .map(|(_, path)| path.clone())
            .ok_or_else(|| WindowError::os("OpenProcess", "no such process"))
    }

    fn processes(&self) -> WindowResult<Vec<ProcessEntry>> {
        Ok(self
            .entries
            .iter()
            .map(|(pid, path)| ProcessEntry {
                pid: *pid,
                image_name: base_name(path).to_string(),
            })
            .collect())
    }
}
