use std::sync::Once;

use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};

static DPI_AWARENESS: Once = Once::new();

/// Declares this process as per-monitor DPI aware (V2).
///
/// Without it Windows virtualizes coordinates against the primary
/// monitor's scale, and configured offsets land in the wrong place on
/// mixed-DPI setups. Runs at most once per process.
pub(crate) fn enable_dpi_awareness() {
    DPI_AWARENESS.call_once(|| {
        // SAFETY: SetProcessDpiAwarenessContext only changes process-wide
        // state. Failure (e.g. already set by a manifest) is harmless.
        unsafe {
            let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
        }
    });
}
