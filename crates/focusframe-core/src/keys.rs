/// Converts a key name string to a Windows virtual key code.
///
/// Supports letters (A–Z), digits (0–9), function keys (F1–F24),
/// numpad keys (Num0–Num9, NumSlash, ...) and common named keys.
/// Matching is case-insensitive.
pub fn vk_from_name(name: &str) -> Option<u32> {
    let upper = name.trim().to_ascii_uppercase();

    if upper.len() == 1 {
        let ch = upper.as_bytes()[0];
        if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            return Some(u32::from(ch));
        }
    }

    // F1–F24 are contiguous from VK_F1.
    if let Some(rest) = upper.strip_prefix('F')
        && let Ok(n) = rest.parse::<u32>()
        && (1..=24).contains(&n)
    {
        return Some(0x70 + n - 1);
    }

    // Num0–Num9 are contiguous from VK_NUMPAD0.
    if let Some(rest) = upper.strip_prefix("NUM")
        && let Ok(n) = rest.parse::<u32>()
        && n <= 9
    {
        return Some(0x60 + n);
    }

    match upper.as_str() {
        "NUMSLASH" | "DIVIDE" => Some(0x6F),
        "NUMSTAR" | "MULTIPLY" => Some(0x6A),
        "NUMMINUS" | "SUBTRACT" => Some(0x6D),
        "NUMPLUS" | "ADD" => Some(0x6B),
        "NUMDOT" | "DECIMAL" => Some(0x6E),

        "ENTER" | "RETURN" => Some(0x0D),
        "TAB" => Some(0x09),
        "ESCAPE" | "ESC" => Some(0x1B),
        "SPACE" => Some(0x20),
        "BACKSPACE" => Some(0x08),
        "DELETE" | "DEL" => Some(0x2E),
        "INSERT" | "INS" => Some(0x2D),
        "HOME" => Some(0x24),
        "END" => Some(0x23),
        "PAGEUP" | "PGUP" => Some(0x21),
        "PAGEDOWN" | "PGDN" => Some(0x22),
        "PAUSE" => Some(0x13),
        "SCROLLLOCK" => Some(0x91),

        "LEFT" => Some(0x25),
        "UP" => Some(0x26),
        "RIGHT" => Some(0x27),
        "DOWN" => Some(0x28),

        _ => None,
    }
}
