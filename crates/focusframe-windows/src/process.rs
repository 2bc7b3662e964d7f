use focusframe_core::{ProcessApi, ProcessEntry, WindowError, WindowResult};

use windows::Win32::Foundation::{CloseHandle, E_ACCESSDENIED, GetLastError, HANDLE};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW, TH32CS_SNAPPROCESS,
};
use windows::Win32::System::ProcessStatus::K32GetModuleFileNameExW;
use windows::Win32::System::Threading::{OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ};

/// Long enough for extended-length paths.
const PATH_CAPACITY: usize = 1024;

/// A kernel handle closed on drop.
struct OwnedHandle(HANDLE);

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        // SAFETY: the handle was returned open by the OS and is closed once.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Live process table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Processes;

impl ProcessApi for Processes {
    fn image_path(&self, pid: u32) -> WindowResult<String> {
        // SAFETY: OpenProcess either returns a handle we own or an error.
        let process = unsafe {
            OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, false, pid)
        }
        .map(OwnedHandle)
        .map_err(|e| {
            if e.code() == E_ACCESSDENIED {
                WindowError::AccessDenied { pid }
            } else {
                WindowError::os("OpenProcess", e)
            }
        })?;

        let mut buffer = [0u16; PATH_CAPACITY];
        // SAFETY: K32GetModuleFileNameExW writes at most buffer.len()
        // characters and returns how many it wrote.
        let length = unsafe { K32GetModuleFileNameExW(Some(process.0), None, &mut buffer) };
        if length == 0 {
            // SAFETY: reads the calling thread's last-error value.
            let code = unsafe { GetLastError() };
            return Err(WindowError::os("K32GetModuleFileNameExW", format!("{code:?}")));
        }
        Ok(String::from_utf16_lossy(&buffer[..length as usize]))
    }

    fn processes(&self) -> WindowResult<Vec<ProcessEntry>> {
        // SAFETY: takes a snapshot of the process list that we own.
        let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }
            .map(OwnedHandle)
            .map_err(|e| WindowError::os("CreateToolhelp32Snapshot", e))?;

        let mut entry = PROCESSENTRY32W {
            dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
            ..Default::default()
        };
        let mut processes = Vec::new();

        // SAFETY: `entry` has dwSize set; the snapshot handle is valid
        // until `snapshot` drops at the end of this function.
        let mut next = unsafe { Process32FirstW(snapshot.0, &mut entry) };
        while next.is_ok() {
            processes.push(ProcessEntry {
                pid: entry.th32ProcessID,
                image_name: exe_name(&entry.szExeFile),
            });
            // SAFETY: as above.
            next = unsafe { Process32NextW(snapshot.0, &mut entry) };
        }

        Ok(processes)
    }
}

/// Decodes a NUL-terminated UTF-16 buffer.
fn exe_name(raw: &[u16]) -> String {
    let end = raw.iter().position(|&c| c == 0).unwrap_or(raw.len());
    String::from_utf16_lossy(&raw[..end])
}
