use std::path::Path;

use focusframe_core::ManagedApp;

use super::{GeometryArgs, fail, open_registry};

pub fn list(path: &Path) {
    let registry = open_registry(path);
    let apps = registry.apps();
    if apps.is_empty() {
        println!("No managed applications.");
        return;
    }

    println!(
        "{:<28} {:<28} {:>6} {:>6} {:>7} {:>7} {:>6}",
        "Executable", "Name", "Width", "Height", "X", "Y", "Delay"
    );
    for app in &apps {
        let s = app.settings;
        let note = if s.is_valid() { "" } else { "  (invalid, using global)" };
        println!(
            "{:<28} {:<28} {:>6} {:>6} {:>7} {:>7} {:>6}{note}",
            app.executable,
            app.name.as_deref().unwrap_or("-"),
            s.width,
            s.height,
            s.offset_x,
            s.offset_y,
            s.delay
        );
    }
    println!("\n{} managed applications", apps.len());
}

/// Adds `executable` with the global defaults overlaid by `geometry`.
/// An already managed app is left unchanged.
pub fn add(path: &Path, executable: &str, name: Option<String>, geometry: &GeometryArgs) {
    let registry = open_registry(path);
    if registry.contains(executable) {
        println!("{executable} is already managed; use `apps set` to change it.");
        return;
    }

    let mut app = ManagedApp::new(executable, geometry.apply(registry.global().window()));
    app.name = name;
    registry.set_app(app);
    println!("Now managing {executable}.");
}

pub fn remove(path: &Path, executable: &str) {
    let registry = open_registry(path);
    if !registry.remove(executable) {
        fail(format_args!("{executable} is not managed"));
    }
    println!("No longer managing {executable}.");
}

/// Updates the settings of `executable`, starting from its current
/// settings (or the global defaults for a new app).
pub fn set(path: &Path, executable: &str, name: Option<String>, geometry: &GeometryArgs) {
    let registry = open_registry(path);
    let current = registry
        .apps()
        .into_iter()
        .find(|app| app.executable.eq_ignore_ascii_case(executable));

    let mut app = match current {
        Some(app) => app,
        None => ManagedApp::new(executable, registry.global().window()),
    };
    app.settings = geometry.apply(app.settings);
    if name.is_some() {
        app.name = name;
    }

    let s = app.settings;
    registry.set_app(app);
    println!(
        "{executable}: {}x{} at ({}, {}), delay {} ms",
        s.width, s.height, s.offset_x, s.offset_y, s.delay
    );
}
