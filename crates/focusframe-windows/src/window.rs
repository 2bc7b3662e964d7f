use focusframe_core::{Rect, TopLevelWindow, WindowApi, WindowError, WindowHandle, WindowResult};

use windows::Win32::Foundation::{GetLastError, HWND, RECT, SetLastError, WIN32_ERROR};
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_STYLE, GetForegroundWindow, GetWindowLongPtrW, GetWindowRect, GetWindowThreadProcessId,
    SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SetWindowLongPtrW,
    SetWindowPos,
};

use crate::{dpi, enumerate};

/// The live Windows desktop.
///
/// Stateless: every call goes straight to Win32, so copies are free and
/// can be handed to several threads.
#[derive(Debug, Clone, Copy)]
pub struct Desktop(());

impl Desktop {
    /// Opens the desktop, making the process per-monitor DPI aware so
    /// all coordinates are physical pixels.
    pub fn new() -> Self {
        dpi::enable_dpi_awareness();
        Self(())
    }

    /// Maps a failed call onto `InvalidHandle` if the window is gone.
    fn failure(&self, handle: WindowHandle, call: &'static str, error: impl ToString) -> WindowError {
        if self.is_window(handle) {
            WindowError::os(call, error)
        } else {
            WindowError::InvalidHandle(handle)
        }
    }
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new()
    }
}

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.raw() as *mut _)
}

fn last_error() -> WIN32_ERROR {
    // SAFETY: reads the calling thread's last-error value.
    unsafe { GetLastError() }
}

fn clear_last_error() {
    // SAFETY: resets the calling thread's last-error value.
    unsafe { SetLastError(WIN32_ERROR(0)) }
}

impl WindowApi for Desktop {
    fn top_level_windows(&self) -> WindowResult<Vec<TopLevelWindow>> {
        enumerate::top_level_windows()
    }

    fn process_id(&self, handle: WindowHandle) -> WindowResult<u32> {
        let mut pid: u32 = 0;
        // SAFETY: GetWindowThreadProcessId writes the owner pid into `pid`.
        let thread = unsafe { GetWindowThreadProcessId(hwnd(handle), Some(&mut pid)) };
        if thread == 0 || pid == 0 {
            return Err(WindowError::InvalidHandle(handle));
        }
        Ok(pid)
    }

    fn foreground_window(&self) -> WindowHandle {
        // SAFETY: GetForegroundWindow has no preconditions. It returns a
        // null handle while focus is changing.
        let hwnd = unsafe { GetForegroundWindow() };
        WindowHandle(hwnd.0 as usize)
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        // SAFETY: a destroyed or bogus handle makes this return 0.
        !handle.is_none() && unsafe { GetWindowThreadProcessId(hwnd(handle), None) } != 0
    }

    fn style(&self, handle: WindowHandle) -> WindowResult<u32> {
        clear_last_error();
        // SAFETY: GetWindowLongPtrW reads the style bits. A zero result
        // is only an error if the last-error value was set.
        let style = unsafe { GetWindowLongPtrW(hwnd(handle), GWL_STYLE) };
        if style == 0 && last_error().is_err() {
            return Err(self.failure(handle, "GetWindowLongPtrW", format!("{:?}", last_error())));
        }
        Ok(style as u32)
    }

    fn set_style(&self, handle: WindowHandle, style: u32) -> WindowResult<()> {
        let hwnd = hwnd(handle);
        clear_last_error();
        // SAFETY: SetWindowLongPtrW replaces the style bits. It returns the
        // previous value, so zero is only an error with last-error set.
        let previous = unsafe { SetWindowLongPtrW(hwnd, GWL_STYLE, style as isize) };
        if previous == 0 && last_error().is_err() {
            return Err(self.failure(handle, "SetWindowLongPtrW", format!("{:?}", last_error())));
        }

        // Cached frame metrics only refresh on SWP_FRAMECHANGED.
        // SAFETY: SetWindowPos on a handle we just wrote to.
        unsafe {
            SetWindowPos(
                hwnd,
                None,
                0,
                0,
                0,
                0,
                SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            )
        }
        .map_err(|e| self.failure(handle, "SetWindowPos", e))
    }

    fn rect(&self, handle: WindowHandle) -> WindowResult<Rect> {
        let mut rect = RECT::default();
        // SAFETY: GetWindowRect writes the bounding rectangle into `rect`.
        unsafe { GetWindowRect(hwnd(handle), &mut rect) }
            .map_err(|e| self.failure(handle, "GetWindowRect", e))?;
        Ok(Rect::from_edges(rect.left, rect.top, rect.right, rect.bottom))
    }

    fn set_rect(&self, handle: WindowHandle, rect: &Rect) -> WindowResult<()> {
        // SAFETY: SetWindowPos with a handle the caller resolved; an
        // invalid one makes the call fail rather than misbehave.
        unsafe {
            SetWindowPos(
                hwnd(handle),
                None,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )
        }
        .map_err(|e| self.failure(handle, "SetWindowPos", e))
    }
}
