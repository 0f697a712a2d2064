//! Input capture manager
//!
//! Turns the requested [`CaptureMode`] into a grab request and guarantees the
//! matching ungrab is sent exactly once, whether the run ends normally, on a
//! signal, or by unwinding.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};

use super::CaptureResult;
use crate::app::CaptureMode;
use crate::constants::capture::CURSOR_NAME;
use crate::platform::DisplayServer;

/// Capture session shared by the event loop and the teardown thread.
///
/// The server, mode and button are fixed at construction. Only the two
/// flags change afterwards, and both are atomics so the teardown thread can
/// read them without locking.
pub struct CaptureSession<S: DisplayServer> {
    server: S,
    mode: CaptureMode,
    button: u8,
    grabbed: AtomicBool,
    running: AtomicBool,
}

impl<S: DisplayServer> CaptureSession<S> {
    pub fn new(server: S, mode: CaptureMode, button: u8) -> Self {
        Self {
            server,
            mode,
            button,
            grabbed: AtomicBool::new(false),
            running: AtomicBool::new(false),
        }
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Check if a grab is currently held
    pub fn is_grabbed(&self) -> bool {
        self.grabbed.load(Ordering::SeqCst)
    }

    /// Check if the event loop should keep going
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Ask the event loop to stop at the next iteration boundary
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Grab the pointer (or the designated button) on the root window.
    ///
    /// The crosshair cursor is best effort. A refused exclusive grab is
    /// returned as [`CaptureError::GrabFailed`](super::CaptureError::GrabFailed)
    /// and leaves nothing to release.
    pub fn acquire(&self) -> CaptureResult<()> {
        if self.is_grabbed() {
            return Ok(());
        }

        let cursor = match self.server.load_cursor(CURSOR_NAME) {
            Ok(cursor) => Some(cursor),
            Err(e) => {
                debug!("No {} cursor, grabbing without one: {}", CURSOR_NAME, e);
                None
            }
        };

        match self.mode {
            CaptureMode::ExclusivePointer => self.server.grab_pointer(cursor)?,
            CaptureMode::ButtonScoped => self.server.grab_button(self.button, cursor)?,
        }

        self.grabbed.store(true, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);
        self.server.flush()?;

        info!(
            "Grab acquired on root 0x{:X} ({:?}, button {})",
            self.server.root(),
            self.mode,
            self.button
        );
        Ok(())
    }

    /// Send the ungrab matching the acquired mode and flush it.
    ///
    /// Returns `Ok(false)` when there was nothing to release, so calling it
    /// from both the normal exit path and the teardown path is harmless.
    pub fn release(&self) -> CaptureResult<bool> {
        self.stop();

        if !self.grabbed.swap(false, Ordering::SeqCst) {
            return Ok(false);
        }

        match self.mode {
            CaptureMode::ExclusivePointer => self.server.ungrab_pointer()?,
            CaptureMode::ButtonScoped => self.server.ungrab_button(self.button)?,
        }
        self.server.flush()?;

        info!("Grab released");
        Ok(true)
    }
}

impl<S: DisplayServer> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("Failed to release grab: {}", e);
        }
    }
}
