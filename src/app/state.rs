// app/state.rs - Core Capture State
//
// This module defines the settings that are fixed for the whole run and the
// records produced from pointer events (press, release, motion).

use crate::constants::capture::DEFAULT_BUTTON;

/// X11 window identifier as reported in pointer events
pub type WindowId = u32;

/// How pointer input is taken away from other clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    /// Active grab of the whole pointer device; nobody else sees input
    ExclusivePointer,
    /// Passive grab of a single button; motion still reaches other clients
    #[default]
    ButtonScoped,
}

/// What gets printed once the click is complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Print the press position and stop
    PressOnly,
    /// Print the release position
    #[default]
    ReleaseOnly,
    /// Print the dragged rectangle as WxH+X+Y
    Geometry,
    /// Print one JSON object per event
    StructuredJson,
}

/// Settings chosen on the command line, immutable once capture starts
#[derive(Debug, Clone)]
pub struct CaptureSettings {
    /// Exclusive pointer grab or button-scoped grab
    pub capture_mode: CaptureMode,
    /// Result format
    pub output_mode: OutputMode,
    /// Whether motion events are reported as they arrive
    pub report_motion: bool,
    /// Whether a `window 0x..` line follows each text result
    pub print_window: bool,
    /// Button intercepted in button-scoped mode
    pub button: u8,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            capture_mode: CaptureMode::default(),
            output_mode: OutputMode::default(),
            report_motion: false,
            print_window: false,
            button: DEFAULT_BUTTON,
        }
    }
}

impl CaptureSettings {
    /// True when the loop should stop right after the press is reported
    pub fn stops_after_press(&self) -> bool {
        self.output_mode == OutputMode::PressOnly && !self.report_motion
    }
}

/// Pointer position in root coordinates plus the child window under it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerSample {
    pub x: i32,
    pub y: i32,
    pub window: WindowId,
}

impl PointerSample {
    pub fn new(x: i32, y: i32, window: WindowId) -> Self {
        Self { x, y, window }
    }
}

/// Represents a rectangular region on the screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rectangle anchored at the top-left that bounds both points.
    ///
    /// Width and height come from `a + b - 2 * min`, which equals `|a - b|`
    /// whatever direction the drag went in.
    pub fn spanning(a: (i32, i32), b: (i32, i32)) -> Self {
        let x = a.0.min(b.0);
        let y = a.1.min(b.1);
        let width = a.0 + b.0 - 2 * x;
        let height = a.1 + b.1 - 2 * y;
        Self::new(x, y, width.unsigned_abs(), height.unsigned_abs())
    }
}

/// A completed press/release pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickRecord {
    pub press: PointerSample,
    pub release: PointerSample,
    /// Region bounded by the press and release positions
    pub rect: CaptureRect,
}

impl ClickRecord {
    /// Build the record once the release arrives
    pub fn complete(press: PointerSample, release: PointerSample) -> Self {
        Self {
            press,
            release,
            rect: CaptureRect::spanning((press.x, press.y), (release.x, release.y)),
        }
    }
}
