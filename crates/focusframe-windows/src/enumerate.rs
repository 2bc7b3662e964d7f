use focusframe_core::{TopLevelWindow, WindowError, WindowHandle, WindowResult};

use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GWL_EXSTYLE, GetWindowLongPtrW, GetWindowTextLengthW, GetWindowTextW,
    IsWindowVisible, WS_EX_TOOLWINDOW,
};
use windows::core::BOOL;

/// Lists every top-level window with the attributes the directory
/// filters on.
///
/// Each call collects into its own `Vec`; nothing is shared between
/// enumerations.
pub(crate) fn top_level_windows() -> WindowResult<Vec<TopLevelWindow>> {
    let mut windows: Vec<TopLevelWindow> = Vec::new();

    // SAFETY: EnumWindows runs synchronously and calls our callback for
    // each top-level window. The LPARAM carries a pointer to `windows`,
    // which outlives the call.
    unsafe {
        EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut windows as *mut _ as isize),
        )
    }
    .map_err(|e| WindowError::os("EnumWindows", e))?;

    Ok(windows)
}

unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the `Vec` pointer passed by top_level_windows().
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<TopLevelWindow>) };
    windows.push(describe(hwnd));
    BOOL(1) // continue
}

fn describe(hwnd: HWND) -> TopLevelWindow {
    // SAFETY: read-only queries on a handle EnumWindows just gave us.
    let (visible, ex_style) = unsafe {
        (
            IsWindowVisible(hwnd).as_bool(),
            GetWindowLongPtrW(hwnd, GWL_EXSTYLE) as u32,
        )
    };

    TopLevelWindow {
        handle: WindowHandle(hwnd.0 as usize),
        title: window_title(hwnd),
        visible,
        tool_window: ex_style & WS_EX_TOOLWINDOW.0 != 0,
    }
}

fn window_title(hwnd: HWND) -> String {
    // SAFETY: GetWindowTextLengthW and GetWindowTextW only read the
    // window text into our buffer.
    unsafe {
        let length = GetWindowTextLengthW(hwnd);
        if length <= 0 {
            return String::new();
        }
        let mut buffer = vec![0u16; length as usize + 1];
        let copied = GetWindowTextW(hwnd, &mut buffer);
        String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
    }
}
