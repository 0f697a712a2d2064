// output.rs - Result Emitter
//
// Renders completed press/click/motion records in the selected output
// format. Everything here goes to the result channel (stdout); diagnostics
// never do.

use std::io::{self, Write};

use serde::Serialize;

use crate::app::{ClickRecord, OutputMode, PointerSample, WindowId};
use crate::utils::format_window_id;

/// Position with the window under the pointer, as nested in JSON records
#[derive(Debug, Serialize)]
struct JsonPoint {
    window: String,
    x: i32,
    y: i32,
}

impl From<&PointerSample> for JsonPoint {
    fn from(sample: &PointerSample) -> Self {
        Self {
            window: format_window_id(sample.window),
            x: sample.x,
            y: sample.y,
        }
    }
}

/// One JSON line; `type` comes first
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum JsonRecord {
    Click {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        press: JsonPoint,
        release: JsonPoint,
    },
    Motion {
        window: String,
        x: i32,
        y: i32,
    },
}

/// Writes results to `out`, flushing after every record
pub struct ResultEmitter<W: Write> {
    out: W,
    mode: OutputMode,
    print_window: bool,
}

impl<W: Write> ResultEmitter<W> {
    pub fn new(out: W, mode: OutputMode, print_window: bool) -> Self {
        Self {
            out,
            mode,
            print_window,
        }
    }

    /// Print the press position (press-only mode)
    pub fn emit_press(&mut self, press: &PointerSample) -> io::Result<()> {
        writeln!(self.out, "{} {}", press.x, press.y)?;
        self.window_line(press.window)?;
        self.out.flush()
    }

    /// Print a completed click in the configured format
    pub fn emit_click(&mut self, click: &ClickRecord) -> io::Result<()> {
        match self.mode {
            // Already reported when the button went down
            OutputMode::PressOnly => {}
            OutputMode::ReleaseOnly => {
                writeln!(self.out, "{} {}", click.release.x, click.release.y)?;
                self.window_line(click.release.window)?;
            }
            OutputMode::Geometry => {
                let rect = &click.rect;
                writeln!(
                    self.out,
                    "{}x{}+{}+{}",
                    rect.width, rect.height, rect.x, rect.y
                )?;
                self.window_line(click.release.window)?;
            }
            OutputMode::StructuredJson => {
                self.json_line(&JsonRecord::Click {
                    x: click.rect.x,
                    y: click.rect.y,
                    width: click.rect.width,
                    height: click.rect.height,
                    press: JsonPoint::from(&click.press),
                    release: JsonPoint::from(&click.release),
                })?;
            }
        }
        self.out.flush()
    }

    /// Print a motion sample; JSON when the output mode is JSON
    pub fn emit_motion(&mut self, at: &PointerSample) -> io::Result<()> {
        if self.mode == OutputMode::StructuredJson {
            self.json_line(&JsonRecord::Motion {
                window: format_window_id(at.window),
                x: at.x,
                y: at.y,
            })?;
        } else {
            writeln!(self.out, "motion {} {}", at.x, at.y)?;
            self.window_line(at.window)?;
        }
        self.out.flush()
    }

    /// Hand back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn window_line(&mut self, window: WindowId) -> io::Result<()> {
        if self.print_window {
            writeln!(self.out, "window {}", format_window_id(window))?;
        }
        Ok(())
    }

    fn json_line(&mut self, record: &JsonRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        writeln!(self.out)
    }
}
