// capture/mod.rs - Pointer Capture Module
//
// This module holds the grab manager (`session`) and the event-driven state
// machine (`machine`) that turns press/drag/release into results.

pub mod machine;
pub mod session;

pub use machine::{CaptureMachine, CaptureOutcome};
pub use session::CaptureSession;

use std::fmt;
use std::io::Write;

use thiserror::Error;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError, ReplyOrIdError};

use crate::constants::exit;

/// Reason the server refused an active pointer grab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabFailure {
    AlreadyGrabbed,
    Frozen,
    InvalidTime,
    NotViewable,
    Other(u8),
}

impl fmt::Display for GrabFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrabFailure::AlreadyGrabbed => f.write_str("already_grabbed"),
            GrabFailure::Frozen => f.write_str("frozen"),
            GrabFailure::InvalidTime => f.write_str("invalid_time"),
            GrabFailure::NotViewable => f.write_str("not_viewable"),
            GrabFailure::Other(status) => write!(f, "error (status {})", status),
        }
    }
}

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Error opening display: {0}")]
    Connect(#[from] ConnectError),

    #[error("X server has no screen {0}")]
    NoScreen(usize),

    #[error("X connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("X request failed: {0}")]
    Reply(#[from] ReplyError),

    #[error("X request failed: {0}")]
    ReplyOrId(#[from] ReplyOrIdError),

    #[error("grab pointer {0}")]
    GrabFailed(GrabFailure),

    #[error("No event.")]
    EventStreamTerminated,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaptureError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            CaptureError::GrabFailed(_) => exit::GRAB_FAILED,
            CaptureError::EventStreamTerminated => exit::EVENT_STREAM,
            _ => exit::CONNECTION,
        }
    }

    /// Write the fatal diagnostic to `out` and return the exit status.
    ///
    /// Goes straight to the writer so the message survives `RUST_LOG=off`.
    pub fn report(&self, mut out: impl Write) -> u8 {
        let _ = writeln!(out, "{}", self);
        self.exit_code()
    }
}

pub type CaptureResult<T> = Result<T, CaptureError>;
