// constants.rs - Application-wide Constants
//
// Centralized constants for exit codes, grab parameters and signals.

/// Process exit statuses
pub mod exit {
    /// Result printed, or help shown
    pub const SUCCESS: u8 = 0;
    /// Display could not be opened or the connection broke
    pub const CONNECTION: u8 = 1;
    /// Bad command line
    pub const USAGE: u8 = 2;
    /// The server refused the pointer grab
    pub const GRAB_FAILED: u8 = 3;
    /// The server closed the event stream before a result was complete
    pub const EVENT_STREAM: u8 = 4;
    /// Status used by the signal teardown path
    pub const SIGNALLED: i32 = 0;
}

/// Grab parameters
pub mod capture {
    /// Button intercepted by a button-scoped grab
    pub const DEFAULT_BUTTON: u8 = 1;
    /// Highest core protocol button index
    pub const MAX_BUTTON: u8 = 5;
    /// Cursor theme glyph shown while the grab is active
    pub const CURSOR_NAME: &str = "crosshair";
}

/// Signals that trigger release-and-exit
pub mod signals {
    use signal_hook::consts::signal::{SIGALRM, SIGHUP, SIGINT, SIGTERM, SIGUSR1, SIGUSR2};

    pub const TERMINATION: [i32; 6] = [SIGHUP, SIGINT, SIGALRM, SIGTERM, SIGUSR1, SIGUSR2];
}
