use std::path::Path;

/// Prints the windows the engine could enforce, with their owners.
#[cfg(windows)]
pub fn execute(path: &Path) {
    use focusframe_core::{config, directory, identity};
    use focusframe_windows::{Desktop, Processes};

    let managed = config::load(path);
    let desktop = Desktop::new();
    let windows = directory::enumerate(&desktop);

    println!("{:<12} {:<28} {:<8} Title", "Handle", "Executable", "Managed");
    for window in &windows {
        let executable = identity::owner_of(&desktop, &Processes, window.handle)
            .unwrap_or_else(|_| "?".into());
        let mark = if managed.contains(&executable) { "yes" } else { "" };
        println!(
            "{:<12} {:<28} {:<8} {}",
            window.handle.to_string(),
            executable,
            mark,
            window.title
        );
    }

    println!("\n{} windows found", windows.len());
}

#[cfg(not(windows))]
pub fn execute(_path: &Path) {
    super::unsupported("list")
}
