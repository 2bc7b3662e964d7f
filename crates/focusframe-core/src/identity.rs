//! Process identity: window handle to executable name and back.

use tracing::warn;

use crate::WindowResult;
use crate::window::{WindowApi, WindowHandle};

/// One entry of a live process snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    /// Image file name as reported by the OS (e.g. `game.exe`).
    pub image_name: String,
}

/// The native process API surface the engine consumes.
pub trait ProcessApi {
    /// Returns the full path of the executable loaded by `pid`.
    fn image_path(&self, pid: u32) -> WindowResult<String>;

    /// Takes a snapshot of all running processes.
    fn processes(&self) -> WindowResult<Vec<ProcessEntry>>;
}

/// The process behind a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub pid: u32,
    /// Executable file name, in the case reported by the OS.
    pub executable: String,
}

/// Resolves the process that owns `handle`.
pub fn owner<W, P>(windows: &W, processes: &P, handle: WindowHandle) -> WindowResult<Owner>
where
    W: WindowApi + ?Sized,
    P: ProcessApi + ?Sized,
{
    let pid = windows.process_id(handle)?;
    let path = processes.image_path(pid)?;
    Ok(Owner {
        pid,
        executable: base_name(&path).to_string(),
    })
}

/// Resolves the executable file name that owns `handle`.
///
/// The name keeps the case reported by the OS. Comparisons against the
/// registry are case-insensitive.
pub fn owner_of<W, P>(windows: &W, processes: &P, handle: WindowHandle) -> WindowResult<String>
where
    W: WindowApi + ?Sized,
    P: ProcessApi + ?Sized,
{
    owner(windows, processes, handle).map(|owner| owner.executable)
}

/// Finds a running process whose image name matches `executable`.
///
/// Matching is exact and case-insensitive. If several processes match,
/// the first one in snapshot order wins.
pub fn find_process<P: ProcessApi + ?Sized>(processes: &P, executable: &str) -> Option<u32> {
    let snapshot = match processes.processes() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "process snapshot failed");
            return None;
        }
    };

    snapshot
        .into_iter()
        .find(|p| p.image_name.eq_ignore_ascii_case(executable))
        .map(|p| p.pid)
}

/// Returns the file name component of a Windows or POSIX path.
pub fn base_name(path: &str) -> &str {
    path.rsplit(['\\', '/']).next().unwrap_or(path)
}
