//! Signal-driven teardown
//!
//! Watches for termination signals on a dedicated thread. The signal handler
//! itself only wakes that thread (signal-hook's self-pipe); the release and
//! exit happen in normal thread context, so nothing runs inside the
//! interrupted code of the event loop.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{info, warn};
use signal_hook::iterator::{Handle, Signals};

use crate::capture::CaptureSession;
use crate::constants::{exit, signals::TERMINATION};
use crate::platform::DisplayServer;

/// Installed signal watcher
pub struct Teardown {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

/// Release the session's grab and exit the process on the first
/// termination signal
pub fn install<S: DisplayServer + 'static>(session: Arc<CaptureSession<S>>) -> io::Result<Teardown> {
    install_with(session, |code| std::process::exit(code))
}

/// Like [`install`], but hands the exit status to `on_exit` instead of
/// exiting
pub fn install_with<S, F>(session: Arc<CaptureSession<S>>, on_exit: F) -> io::Result<Teardown>
where
    S: DisplayServer + 'static,
    F: FnOnce(i32) + Send + 'static,
{
    let mut signals = Signals::new(TERMINATION)?;
    let handle = signals.handle();

    let thread = thread::Builder::new()
        .name("teardown".into())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                release_on_signal(&session, signal);
                on_exit(exit::SIGNALLED);
            }
        })?;

    info!("Signal teardown installed");
    Ok(Teardown {
        handle,
        thread: Some(thread),
    })
}

/// Stop the loop and send the ungrab; no partial click is reported
pub fn release_on_signal<S: DisplayServer>(session: &CaptureSession<S>, signal: i32) {
    info!("Signal {} received, releasing {:?} grab", signal, session.mode());
    session.stop();
    if let Err(e) = session.release() {
        warn!("Failed to release grab on signal {}: {}", signal, e);
    }
}

impl Teardown {
    /// Stop watching and wait for the watcher thread to finish
    pub fn uninstall(mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Teardown thread panicked");
            }
        }
        info!("Signal teardown removed");
    }
}
