use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;

use focusframe_core::{ForegroundSource, ForegroundStrategy};
use focusframe_core::foreground::{ChannelSource, PollingSource};
use tracing::{info, warn};

use crate::Desktop;
use crate::event_loop::{self, EventLoopHandle};

/// An open foreground source plus the hook thread backing it, if any.
pub struct Foreground {
    pub source: Box<dyn ForegroundSource + Send>,
    pub hook: Option<EventLoopHandle>,
}

/// Opens the foreground source for `strategy`.
///
/// If the event hook cannot be installed this degrades to polling
/// instead of failing.
pub fn open(strategy: ForegroundStrategy, stop: Arc<AtomicBool>) -> Foreground {
    if strategy == ForegroundStrategy::Event {
        let (tx, rx) = mpsc::channel();
        match event_loop::start(tx) {
            Ok(hook) => {
                info!("watching foreground changes via WinEvent hook");
                return Foreground {
                    source: Box::new(ChannelSource::new(rx)),
                    hook: Some(hook),
                };
            }
            Err(e) => warn!(error = %e, "foreground hook unavailable, falling back to polling"),
        }
    }

    info!("polling the foreground window");
    Foreground {
        source: Box::new(PollingSource::new(Desktop::new(), stop)),
        hook: None,
    }
}
