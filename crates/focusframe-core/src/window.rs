use std::fmt;

use crate::{Rect, WindowResult};

/// An opaque handle to a native top-level window.
///
/// Handles are not stable across application relaunches, so they are
/// never stored. Handle `0` means "no window".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowHandle(pub usize);

impl WindowHandle {
    /// The null handle, reported when there is no foreground window.
    pub const NONE: Self = Self(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// A top-level window as reported by one native enumeration pass,
/// before any filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelWindow {
    pub handle: WindowHandle,
    pub title: String,
    pub visible: bool,
    /// Carries `WS_EX_TOOLWINDOW` (tooltips, floating palettes, helper frames).
    pub tool_window: bool,
}

impl TopLevelWindow {
    /// Returns whether this window is a meaningful automation target.
    pub fn is_candidate(&self) -> bool {
        self.visible && !self.tool_window && !self.title.is_empty()
    }
}

/// A visible, titled, non-tool window produced by one enumeration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumeratedWindow {
    pub title: String,
    pub handle: WindowHandle,
}

/// The native window API surface the engine consumes.
///
/// Each platform crate (e.g. `focusframe-windows`) provides its own
/// implementation. All methods are synchronous reads or single mutations.
pub trait WindowApi {
    /// Enumerates every top-level window in z-order.
    fn top_level_windows(&self) -> WindowResult<Vec<TopLevelWindow>>;

    /// Returns the id of the process that owns the window.
    fn process_id(&self, handle: WindowHandle) -> WindowResult<u32>;

    /// Returns the current foreground window, or [`WindowHandle::NONE`].
    fn foreground_window(&self) -> WindowHandle;

    /// Returns whether the handle still refers to an existing window.
    fn is_window(&self, handle: WindowHandle) -> bool;

    /// Reads the window style bits (`GWL_STYLE`).
    fn style(&self, handle: WindowHandle) -> WindowResult<u32>;

    /// Replaces the window style bits.
    fn set_style(&self, handle: WindowHandle, style: u32) -> WindowResult<()>;

    /// Reads the window bounding rectangle in screen coordinates.
    fn rect(&self, handle: WindowHandle) -> WindowResult<Rect>;

    /// Moves and resizes the window without changing z-order or activation.
    fn set_rect(&self, handle: WindowHandle, rect: &Rect) -> WindowResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(title: &str, visible: bool, tool_window: bool) -> TopLevelWindow {
        TopLevelWindow {
            handle: WindowHandle(1),
            title: title.into(),
            visible,
            tool_window,
        }
    }

    #[test]
    fn visible_titled_window_is_candidate() {
        assert!(window("Game", true, false).is_candidate());
    }

    #[test]
    fn hidden_tool_and_untitled_windows_are_not_candidates() {
        assert!(!window("Game", false, false).is_candidate());
        assert!(!window("Tooltip", true, true).is_candidate());
        assert!(!window("", true, false).is_candidate());
    }

    #[test]
    fn handle_displays_as_hex() {
        assert_eq!(WindowHandle(0x1A2B).to_string(), "0x1A2B");
        assert!(WindowHandle::NONE.is_none());
    }
}
