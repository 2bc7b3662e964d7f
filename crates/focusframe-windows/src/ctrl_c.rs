//! Ctrl+C signal handler using `SetConsoleCtrlHandler`.

use std::sync::OnceLock;
use std::sync::mpsc::Sender;

use focusframe_core::{WindowError, WindowResult};
use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};
use windows::core::BOOL;

/// Written once by `set_handler`, read by the callback.
static SENDER: OnceLock<Sender<()>> = OnceLock::new();

/// Registers a handler that sends `()` on `tx` for Ctrl+C or Ctrl+Break.
///
/// The handler keeps its own clone of `tx`; the caller's sender is left
/// untouched whether or not registration succeeds.
pub fn set_handler(tx: &Sender<()>) -> WindowResult<()> {
    SENDER
        .set(tx.clone())
        .map_err(|_| WindowError::os("SetConsoleCtrlHandler", "handler already registered"))?;

    // SAFETY: registers a plain extern "system" callback with no state
    // besides the static sender above.
    unsafe { SetConsoleCtrlHandler(Some(handler), true) }
        .map_err(|e| WindowError::os("SetConsoleCtrlHandler", e))
}

unsafe extern "system" fn handler(ctrl_type: u32) -> BOOL {
    if (ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT)
        && let Some(tx) = SENDER.get()
    {
        let _ = tx.send(());
        return BOOL(1);
    }
    BOOL(0)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, TryRecvError};

    use super::*;

    #[test]
    fn failed_registration_keeps_channel_open() {
        // Arrange
        let (tx, rx) = mpsc::channel();
        let _ = set_handler(&tx);

        // Act
        let second = set_handler(&tx);

        // Assert
        assert!(second.is_err());
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }
}
