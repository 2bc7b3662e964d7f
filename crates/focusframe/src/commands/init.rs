use std::path::Path;

use focusframe_core::config;

/// Creates the default configuration file.
///
/// The file is commented so every option is explained. An existing
/// file is never overwritten.
pub fn execute(path: &Path) {
    match config::write_default(path) {
        Ok(true) => println!("Created {}", path.display()),
        Ok(false) => println!("Already exists: {}", path.display()),
        Err(e) => super::fail(e),
    }

    println!("\nEdit this file to set the global defaults and managed applications,");
    println!("or press the hotkey (F4 by default) while `focusframe run` is active");
    println!("to add the focused application.");
}
