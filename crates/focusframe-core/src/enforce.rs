//! Geometry enforcement: borderless style plus fixed position and size.
//!
//! Enforcement is idempotent. A window that already conforms receives
//! no native mutation calls at all, because the same window can be
//! enforced many times across rapid focus changes.

use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::settings::WindowSettings;
use crate::window::{WindowApi, WindowHandle};
use crate::{Rect, WindowError};

/// Window style bits (`GWL_STYLE`) touched by the enforcer.
pub mod style {
    /// Title bar (`WS_BORDER | WS_DLGFRAME`).
    pub const WS_CAPTION: u32 = 0x00C0_0000;
    /// Resizable border.
    pub const WS_THICKFRAME: u32 = 0x0004_0000;
    pub const WS_POPUP: u32 = 0x8000_0000;
    pub const WS_VISIBLE: u32 = 0x1000_0000;
}

/// Computes the borderless style for a window currently styled `current`.
///
/// Clears the title bar and resizable border, sets popup and visible.
/// All other bits are kept.
pub fn desired_style(current: u32) -> u32 {
    use style::*;
    (current & !(WS_CAPTION | WS_THICKFRAME)) | WS_POPUP | WS_VISIBLE
}

/// Bounded retry for the geometry-set call.
///
/// Some windows silently reject the first `SetWindowPos` while they
/// are still initializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub attempts: u32,
    /// Fixed pause between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(100),
        }
    }
}

/// Outcome of one enforcement call. Never an error: every failure is
/// recovered here and reported as a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforcement {
    /// Style and geometry already matched; nothing was written.
    AlreadyConforming,
    /// At least one of style or geometry was written.
    Applied { style: bool, geometry: bool },
    /// The geometry-set call failed on every attempt.
    GaveUp { attempts: u32, style: bool },
    /// The window vanished (or never existed); cycle abandoned.
    Aborted,
    /// No window could be located for the executable.
    WindowMissing,
}

/// Why geometry normalization stopped early.
enum GeometryFailure {
    Gone(WindowError),
    Rejected { attempts: u32, last: WindowError },
}

/// Applies borderless style and target geometry to a window.
#[derive(Debug, Clone, Copy, Default)]
pub struct Enforcer {
    retry: RetryPolicy,
}

impl Enforcer {
    pub fn new(retry: RetryPolicy) -> Self {
        Self { retry }
    }

    /// Enforces `settings` on `handle`.
    pub fn enforce<W: WindowApi + ?Sized>(
        &self,
        api: &W,
        handle: WindowHandle,
        settings: &WindowSettings,
    ) -> Enforcement {
        if handle.is_none() || !api.is_window(handle) {
            debug!(%handle, "window gone before enforcement");
            return Enforcement::Aborted;
        }

        let style = match normalize_style(api, handle) {
            Ok(changed) => changed,
            Err(e) => {
                debug!(%handle, error = %e, "style normalization aborted");
                return Enforcement::Aborted;
            }
        };

        let target = settings.target_rect();
        match self.normalize_geometry(api, handle, &target) {
            Ok(false) if !style => Enforcement::AlreadyConforming,
            Ok(geometry) => Enforcement::Applied { style, geometry },
            Err(GeometryFailure::Gone(e)) => {
                debug!(%handle, error = %e, "window gone during enforcement");
                Enforcement::Aborted
            }
            Err(GeometryFailure::Rejected { attempts, last }) => {
                warn!(%handle, %target, attempts, error = %last, "window rejected geometry, giving up");
                Enforcement::GaveUp { attempts, style }
            }
        }
    }

    /// Moves the window to `target` unless it is already there.
    /// Returns whether a write succeeded.
    fn normalize_geometry<W: WindowApi + ?Sized>(
        &self,
        api: &W,
        handle: WindowHandle,
        target: &Rect,
    ) -> Result<bool, GeometryFailure> {
        let current = api.rect(handle).map_err(GeometryFailure::Gone)?;
        if current == *target {
            debug!(%handle, %current, "geometry already correct");
            return Ok(false);
        }

        let attempts = self.retry.attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match api.set_rect(handle, target) {
                Ok(()) => {
                    info!(%handle, from = %current, to = %target, attempt, "geometry updated");
                    return Ok(true);
                }
                Err(e) if !api.is_window(handle) => return Err(GeometryFailure::Gone(e)),
                Err(e) if attempt >= attempts => {
                    return Err(GeometryFailure::Rejected { attempts, last: e });
                }
                Err(e) => {
                    debug!(%handle, attempt, error = %e, "geometry rejected, retrying");
                    thread::sleep(self.retry.backoff);
                }
            }
        }
    }
}

/// Strips decorations unless the style already matches.
/// Returns whether a write happened.
fn normalize_style<W: WindowApi + ?Sized>(api: &W, handle: WindowHandle) -> Result<bool, WindowError> {
    let current = api.style(handle)?;
    let desired = desired_style(current);
    if current == desired {
        debug!(%handle, "style already correct");
        return Ok(false);
    }

    api.set_style(handle, desired)?;
    info!(%handle, from = format_args!("0x{current:08X}"), to = format_args!("0x{desired:08X}"), "style updated");
    Ok(true)
}
