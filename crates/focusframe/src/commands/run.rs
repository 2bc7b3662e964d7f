//! `focusframe run`: the long-running enforcement process.

use std::path::Path;

#[cfg(windows)]
pub fn execute(path: &Path, polling: bool) {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc;
    use std::thread;

    use focusframe_core::config;
    use focusframe_core::toggle::{self, KEY_POLL_INTERVAL};
    use focusframe_core::{Engine, ForegroundStrategy, Registry};
    use focusframe_windows::foreground::{self, Foreground};
    use focusframe_windows::{Desktop, Processes, ctrl_c, keyboard};
    use tracing::{error, info, warn};

    let config = match config::ensure(path) {
        Ok(config) => config,
        Err(e) => {
            focusframe_core::log::init_console("error");
            error!(error = %e, "could not establish configuration");
            super::fail(e);
        }
    };
    focusframe_core::log::init(&config.logging, &config::log_dir(path));

    let hotkey = config.global.hotkey.clone();
    let apps = config.managed_apps.len();
    let registry = Registry::new(config, path);
    let engine = Engine::new(Desktop::new(), Processes, registry);
    info!(config = %path.display(), apps, %hotkey, "FocusFrame started");

    let stop = Arc::new(AtomicBool::new(false));
    // `ctrl_tx` lives until shutdown, so `recv` below blocks even when
    // no handler could be registered.
    let (ctrl_tx, ctrl_rx) = mpsc::channel();
    if let Err(e) = ctrl_c::set_handler(&ctrl_tx) {
        warn!(error = %e, "Ctrl+C handler unavailable");
    }

    let strategy = if polling {
        ForegroundStrategy::Polling
    } else {
        ForegroundStrategy::Event
    };
    let Foreground { mut source, hook } = foreground::open(strategy, Arc::clone(&stop));

    let foreground_thread = {
        let mut engine = engine.clone();
        thread::spawn(move || engine.run(&mut *source))
    };

    let hotkey_thread = match hotkey.vk() {
        Some(vk) => {
            let engine = engine.clone();
            let stop = Arc::clone(&stop);
            Some(thread::spawn(move || {
                toggle::run(&engine, || keyboard::is_key_down(vk), KEY_POLL_INTERVAL, &stop);
            }))
        }
        None => {
            warn!(%hotkey, "unknown hotkey, toggling is disabled");
            None
        }
    };

    println!("FocusFrame is running. Press Ctrl+C to stop.");
    let _ = ctrl_rx.recv();

    info!("shutting down");
    stop.store(true, Ordering::Relaxed);
    if let Some(hook) = hook {
        hook.stop();
    }
    let _ = foreground_thread.join();
    if let Some(thread) = hotkey_thread {
        let _ = thread.join();
    }
    info!("stopped");
}

#[cfg(not(windows))]
pub fn execute(_path: &Path, _polling: bool) {
    super::unsupported("run")
}
