//! clickgrab - Pointer Capture Library
//!
//! This library grabs the X11 pointer, follows a press/drag/release sequence
//! and renders the resulting point or rectangle.

pub mod app;
pub mod capture;
pub mod cli;
pub mod constants;
pub mod output;
pub mod platform;
pub mod teardown;
pub mod utils;

// Re-export commonly used types
pub use app::{CaptureMode, CaptureRect, CaptureSettings, ClickRecord, OutputMode, PointerSample};
pub use capture::{CaptureError, CaptureMachine, CaptureOutcome, CaptureSession, GrabFailure};
pub use output::ResultEmitter;
pub use platform::{DisplayServer, InputEvent, X11Server};
