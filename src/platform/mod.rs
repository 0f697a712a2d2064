// platform/mod.rs - Windowing Server Abstraction
//
// This module puts the windowing-server requests the capture needs behind a
// trait. The X11 implementation lives in `x11`; tests drive the same trait
// with a scripted server.

pub mod x11;

pub use x11::X11Server;

use crate::app::{PointerSample, WindowId};
use crate::capture::CaptureError;

/// Pointer events delivered while a grab is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    ButtonPress(PointerSample),
    ButtonRelease(PointerSample),
    Motion(PointerSample),
    /// Anything else the server sent; carries a printable description
    Other(String),
}

/// Trait for the windowing-server requests used during a capture.
///
/// Implementations are shared between the capture loop and the signal
/// teardown thread, so every method takes `&self`.
pub trait DisplayServer: Send + Sync {
    /// Root window of the screen coordinates are reported against
    fn root(&self) -> WindowId;

    /// Load a themed cursor glyph by name
    fn load_cursor(&self, name: &str) -> Result<u32, CaptureError>;

    /// Actively grab the whole pointer with synchronous pointer mode
    fn grab_pointer(&self, cursor: Option<u32>) -> Result<(), CaptureError>;

    /// Passively grab one button (any modifier) with synchronous pointer mode
    fn grab_button(&self, button: u8, cursor: Option<u32>) -> Result<(), CaptureError>;

    fn ungrab_pointer(&self) -> Result<(), CaptureError>;

    fn ungrab_button(&self, button: u8) -> Result<(), CaptureError>;

    /// Let the server deliver the next pointer event of a synchronous grab
    fn allow_events(&self) -> Result<(), CaptureError>;

    fn flush(&self) -> Result<(), CaptureError>;

    /// Block until the next event arrives.
    ///
    /// Returns [`CaptureError::EventStreamTerminated`] once the server has
    /// closed the connection.
    fn wait_for_event(&self) -> Result<InputEvent, CaptureError>;
}
