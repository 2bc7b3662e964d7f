//! Startup registration via the HKCU Run registry key.
//!
//! Writes a `FocusFrame` value under
//! `HKEY_CURRENT_USER\Software\Microsoft\Windows\CurrentVersion\Run`
//! so that `focusframe run` starts on user logon. HKCU is per-user, so
//! no elevation is required.

use std::path::Path;

use focusframe_core::{WindowError, WindowResult};
use windows::Win32::Foundation::ERROR_FILE_NOT_FOUND;
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, KEY_QUERY_VALUE, KEY_SET_VALUE, REG_SAM_FLAGS, REG_SZ, RegCloseKey,
    RegDeleteValueW, RegOpenKeyExW, RegQueryValueExW, RegSetValueExW,
};
use windows::core::PCWSTR;

const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";
const VALUE_NAME: &str = "FocusFrame";

/// Registers FocusFrame to start on logon.
///
/// The command runs the current executable with `run`, passing
/// `--config` when a non-default config file is in use.
pub fn enable(config: Option<&Path>) -> WindowResult<()> {
    let exe = std::env::current_exe().map_err(|e| WindowError::os("current_exe", e))?;
    let command = run_command(&exe, config);
    RunKey::open(KEY_SET_VALUE)?.set(&command)
}

/// Removes the startup entry. Succeeds if it did not exist.
pub fn disable() -> WindowResult<()> {
    RunKey::open(KEY_SET_VALUE)?.delete()
}

/// Returns whether the startup entry exists.
pub fn is_enabled() -> bool {
    RunKey::open(KEY_QUERY_VALUE).is_ok_and(|key| key.exists())
}

fn run_command(exe: &Path, config: Option<&Path>) -> String {
    match config {
        Some(config) => format!("\"{}\" --config \"{}\" run", exe.display(), config.display()),
        None => format!("\"{}\" run", exe.display()),
    }
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// The opened Run key, closed on drop.
struct RunKey(HKEY);

impl RunKey {
    fn open(access: REG_SAM_FLAGS) -> WindowResult<Self> {
        let path = wide(RUN_KEY);
        let mut key = HKEY::default();
        // SAFETY: valid NUL-terminated path and out-pointer; the key is
        // closed in Drop.
        let status =
            unsafe { RegOpenKeyExW(HKEY_CURRENT_USER, PCWSTR(path.as_ptr()), None, access, &mut key) };
        if status.is_err() {
            return Err(WindowError::os("RegOpenKeyExW", format!("{status:?}")));
        }
        Ok(Self(key))
    }

    fn set(&self, value: &str) -> WindowResult<()> {
        let name = wide(VALUE_NAME);
        let data: Vec<u8> = wide(value).iter().flat_map(|c| c.to_le_bytes()).collect();
        // SAFETY: `data` is the UTF-16LE value including its terminator.
        let status =
            unsafe { RegSetValueExW(self.0, PCWSTR(name.as_ptr()), None, REG_SZ, Some(&data)) };
        if status.is_err() {
            return Err(WindowError::os("RegSetValueExW", format!("{status:?}")));
        }
        Ok(())
    }

    fn delete(&self) -> WindowResult<()> {
        let name = wide(VALUE_NAME);
        // SAFETY: deletes a named value under a key we hold open.
        let status = unsafe { RegDeleteValueW(self.0, PCWSTR(name.as_ptr())) };
        if status.is_err() && status != ERROR_FILE_NOT_FOUND {
            return Err(WindowError::os("RegDeleteValueW", format!("{status:?}")));
        }
        Ok(())
    }

    fn exists(&self) -> bool {
        let name = wide(VALUE_NAME);
        // SAFETY: no data buffer, so this only checks for existence.
        let status =
            unsafe { RegQueryValueExW(self.0, PCWSTR(name.as_ptr()), None, None, None, None) };
        status.is_ok()
    }
}

impl Drop for RunKey {
    fn drop(&mut self) {
        // SAFETY: closes the key opened in RunKey::open.
        let _ = unsafe { RegCloseKey(self.0) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_command_quotes_paths() {
        // Arrange
        let exe = Path::new(r"C:\Program Files\FocusFrame\focusframe.exe");

        // Act
        let plain = run_command(exe, None);
        let custom = run_command(exe, Some(Path::new(r"D:\cfg\ff.toml")));

        // Assert
        assert_eq!(plain, r#""C:\Program Files\FocusFrame\focusframe.exe" run"#);
        assert_eq!(
            custom,
            r#""C:\Program Files\FocusFrame\focusframe.exe" --config "D:\cfg\ff.toml" run"#
        );
    }
}
