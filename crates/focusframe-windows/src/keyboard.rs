use windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;

/// Returns whether the key with virtual-key code `vk` is held right now.
///
/// Reads the physical state, so it works no matter which window has
/// focus (including exclusive-input games).
pub fn is_key_down(vk: u32) -> bool {
    // SAFETY: GetAsyncKeyState only reads keyboard state. The high bit
    // (sign bit of the i16) is set while the key is down.
    unsafe { GetAsyncKeyState(vk as i32) < 0 }
}
