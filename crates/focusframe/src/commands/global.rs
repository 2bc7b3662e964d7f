use std::path::Path;

use super::{GlobalArgs, open_registry};

pub fn show(path: &Path) {
    let registry = open_registry(path);
    let global = registry.global();
    let hotkey = match global.hotkey.vk() {
        Some(vk) => format!("{} (0x{vk:02X})", global.hotkey),
        None => format!("{} (unknown key, toggle disabled)", global.hotkey),
    };

    println!("Config:    {}", path.display());
    println!("Size:      {}x{}", global.width, global.height);
    println!("Position:  ({}, {})", global.offset_x, global.offset_y);
    println!("Delay:     {} ms", global.delay);
    println!("Hotkey:    {hotkey}");
    println!("Dark mode: {}", global.dark_mode);
}

pub fn set(path: &Path, args: &GlobalArgs) {
    let registry = open_registry(path);
    let mut global = registry.global();
    global.set_window(args.geometry.apply(global.window()));
    if let Some(hotkey) = &args.hotkey {
        global.hotkey = hotkey.clone();
    }
    if let Some(dark_mode) = args.dark_mode {
        global.dark_mode = dark_mode;
    }
    registry.set_global(global);
    println!("Global defaults updated. Restart `focusframe run` for a new hotkey to apply.");
}
