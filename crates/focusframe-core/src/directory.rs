//! Window directory: maps a process id to its top-level window.
//!
//! Every lookup runs a fresh enumeration. Window sets change constantly,
//! and a cached handle may already be destroyed.

use tracing::warn;

use crate::window::{EnumeratedWindow, WindowApi, WindowHandle};

/// Enumerates the visible, titled, non-tool top-level windows.
///
/// Returns an empty list if the native enumeration fails.
pub fn enumerate<W: WindowApi + ?Sized>(api: &W) -> Vec<EnumeratedWindow> {
    let windows = match api.top_level_windows() {
        Ok(windows) => windows,
        Err(e) => {
            warn!(error = %e, "window enumeration failed");
            return Vec::new();
        }
    };

    windows
        .into_iter()
        .filter(|w| w.is_candidate())
        .map(|w| EnumeratedWindow {
            title: w.title,
            handle: w.handle,
        })
        .collect()
}

/// Returns the first candidate window owned by `pid`.
///
/// `None` is an expected outcome, e.g. while the process is still
/// creating its main window.
pub fn resolve<W: WindowApi + ?Sized>(api: &W, pid: u32) -> Option<WindowHandle> {
    enumerate(api)
        .into_iter()
        .find(|w| api.process_id(w.handle).is_ok_and(|owner| owner == pid))
        .map(|w| w.handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDesktop, FakeWindow};

    #[test]
    fn enumerate_filters_hidden_tool_and_untitled() {
        // Arrange
        let desktop = FakeDesktop::new(vec![
            FakeWindow::new(1, 10, "Hidden").hidden(),
            FakeWindow::new(2, 10, "Tooltip").tool(),
            FakeWindow::new(3, 10, ""),
            FakeWindow::new(4, 10, "Game"),
        ]);

        // Act
        let windows = enumerate(&desktop);

        // Assert
        assert_eq!(
            windows,
            vec![EnumeratedWindow {
                title: "Game".into(),
                handle: WindowHandle(4),
            }]
        );
    }

    #[test]
    fn resolve_returns_first_matching_candidate() {
        // Arrange
        let desktop = FakeDesktop::new(vec![
            FakeWindow::new(1, 20, "Other"),
            FakeWindow::new(2, 10, "Splash").tool(),
            FakeWindow::new(3, 10, "Main"),
            FakeWindow::new(4, 10, "Second"),
        ]);

        // Act / Assert
        assert_eq!(resolve(&desktop, 10), Some(WindowHandle(3)));
    }

    #[test]
    fn resolve_returns_none_when_process_has_no_window() {
        // Arrange
        let desktop = FakeDesktop::new(vec![FakeWindow::new(1, 20, "Other")]);

        // Act / Assert
        assert_eq!(resolve(&desktop, 10), None);
    }

    #[test]
    fn enumeration_reflects_current_window_set() {
        // Arrange
        let desktop = FakeDesktop::new(vec![FakeWindow::new(1, 10, "Game")]);
        assert_eq!(resolve(&desktop, 10), Some(WindowHandle(1)));

        // Act
        desktop.destroy(WindowHandle(1));

        // Assert
        assert_eq!(resolve(&desktop, 10), None);
    }
}
