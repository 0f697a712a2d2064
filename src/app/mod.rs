// app/mod.rs - Capture Settings and Records
//
// This module contains the platform-independent state of a capture run:
// the settings chosen at startup and the records the state machine fills in.

mod state;

pub use state::*;
