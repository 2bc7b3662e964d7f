//! Foreground-change events from a WinEvent hook.
//!
//! The hook runs on its own thread with its own message pump, because
//! out-of-context WinEvent callbacks are delivered through the message
//! queue of the thread that installed them.

use std::cell::RefCell;
use std::sync::mpsc::{self, Sender};
use std::thread;

use focusframe_core::{WindowError, WindowHandle, WindowResult};
use tracing::debug;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetForegroundWindow, GetMessageW, MSG, PM_NOREMOVE, PeekMessageW,
    PostThreadMessageW, TranslateMessage, WINEVENT_OUTOFCONTEXT, WINEVENT_SKIPOWNPROCESS, WM_QUIT,
};

const EVENT_SYSTEM_FOREGROUND: u32 = 0x0003;

/// `OBJID_WINDOW`: the event is about the window itself.
const OBJID_WINDOW: i32 = 0;

thread_local! {
    static SENDER: RefCell<Option<Sender<WindowHandle>>> = const { RefCell::new(None) };
}

/// Installs the foreground hook on a new thread.
///
/// Raw handles (duplicates included) are sent on `tx`, starting with
/// the window that is in the foreground right now. `tx` is dropped when
/// the thread exits, which ends the receiving side.
pub fn start(tx: Sender<WindowHandle>) -> WindowResult<EventLoopHandle> {
    let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, String>>();

    let handle = thread::spawn(move || {
        // SAFETY: the hook is out-of-context, so the callback runs on
        // this thread while it pumps messages.
        let hook = unsafe {
            SetWinEventHook(
                EVENT_SYSTEM_FOREGROUND,
                EVENT_SYSTEM_FOREGROUND,
                None,
                Some(win_event_proc),
                0,
                0,
                WINEVENT_OUTOFCONTEXT | WINEVENT_SKIPOWNPROCESS,
            )
        };
        if hook.is_invalid() {
            let _ = ready_tx.send(Err("hook handle is invalid".into()));
            return;
        }

        // SAFETY: forces creation of this thread's message queue so a
        // WM_QUIT posted right after startup is not lost.
        let mut msg = MSG::default();
        let _ = unsafe { PeekMessageW(&mut msg, None, 0, 0, PM_NOREMOVE) };

        // SAFETY: both calls are plain queries.
        let (thread_id, current) = unsafe { (GetCurrentThreadId(), GetForegroundWindow()) };
        let _ = tx.send(WindowHandle(current.0 as usize));
        SENDER.with(|cell| *cell.borrow_mut() = Some(tx));

        let _ = ready_tx.send(Ok(thread_id));
        run_message_pump();

        // SAFETY: unhooks the handle installed above.
        unsafe {
            let _ = UnhookWinEvent(hook);
        }
        SENDER.with(|cell| cell.borrow_mut().take());
        debug!("foreground hook removed");
    });

    let thread_id = ready_rx
        .recv()
        .map_err(|_| WindowError::os("SetWinEventHook", "hook thread exited unexpectedly"))?
        .map_err(|e| WindowError::os("SetWinEventHook", e))?;

    Ok(EventLoopHandle { thread_id, handle })
}

/// Controls the hook thread.
pub struct EventLoopHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
}

impl EventLoopHandle {
    /// Posts `WM_QUIT` to the hook thread and waits for it to finish.
    pub fn stop(self) {
        // SAFETY: posting to a thread id we own; failure means the
        // thread is already gone.
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}

/// Blocks until `WM_QUIT` is received.
fn run_message_pump() {
    let mut msg = MSG::default();

    // SAFETY: standard message loop on this thread's own queue.
    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

unsafe extern "system" fn win_event_proc(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    if event != EVENT_SYSTEM_FOREGROUND || id_object != OBJID_WINDOW {
        return;
    }
    SENDER.with(|cell| {
        if let Some(sender) = cell.borrow().as_ref() {
            let _ = sender.send(WindowHandle(hwnd.0 as usize));
        }
    });
}
