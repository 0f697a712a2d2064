//! Capture state machine
//!
//! Consumes the pointer events delivered while the grab is held and tracks
//! `WaitingForPress -> Dragging -> Done`. Motion reporting runs alongside and
//! never touches the click state.

use std::io::Write;

use log::{debug, warn};

use super::{CaptureResult, CaptureSession};
use crate::app::{CaptureSettings, ClickRecord, OutputMode, PointerSample};
use crate::output::ResultEmitter;
use crate::platform::{DisplayServer, InputEvent};

/// Where the click sequence currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickState {
    WaitingForPress,
    /// Button is down at the recorded press position
    Dragging(PointerSample),
    /// Press printed in press-only mode; only motion is served from here on
    PressReported,
    Done,
}

/// What the loop produced before it ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Press and release both seen
    Click(ClickRecord),
    /// Press seen and reported in press-only mode
    Pressed(PointerSample),
    /// Loop was stopped before any result
    Stopped,
}

pub struct CaptureMachine<'a, S: DisplayServer, W: Write> {
    session: &'a CaptureSession<S>,
    settings: CaptureSettings,
    emitter: ResultEmitter<W>,
    state: ClickState,
}

impl<'a, S: DisplayServer, W: Write> CaptureMachine<'a, S, W> {
    pub fn new(session: &'a CaptureSession<S>, settings: CaptureSettings, out: W) -> Self {
        let emitter = ResultEmitter::new(out, settings.output_mode, settings.print_window);
        Self {
            session,
            settings,
            emitter,
            state: ClickState::WaitingForPress,
        }
    }

    pub fn state(&self) -> ClickState {
        self.state
    }

    /// Hand back the output writer
    pub fn into_output(self) -> W {
        self.emitter.into_inner()
    }

    /// Run until the click completes or the session is stopped.
    ///
    /// A closed event stream ends the loop with
    /// [`CaptureError::EventStreamTerminated`](super::CaptureError::EventStreamTerminated);
    /// a half-finished drag is dropped without output.
    pub fn run(&mut self) -> CaptureResult<CaptureOutcome> {
        let mut outcome = CaptureOutcome::Stopped;
        let session = self.session;
        let server = session.server();

        while session.is_running() && self.state != ClickState::Done {
            // Both grabs use synchronous pointer mode, so the server holds
            // further pointer events until they are allowed again.
            server.allow_events()?;
            server.flush()?;

            let event = server.wait_for_event()?;
            if let Some(result) = self.handle(event)? {
                outcome = result;
            }
        }

        Ok(outcome)
    }

    /// Apply one event; returns a result when the event produced one
    ///
    /// Once the session is stopped (teardown in progress) events are dropped
    /// so nothing reaches the output after a signal.
    pub fn handle(&mut self, event: InputEvent) -> CaptureResult<Option<CaptureOutcome>> {
        if !self.session.is_running() {
            debug!("Session stopped, dropping {:?}", event);
            return Ok(None);
        }

        match event {
            InputEvent::ButtonPress(at) => self.on_press(at),
            InputEvent::ButtonRelease(at) => self.on_release(at),
            InputEvent::Motion(at) => {
                self.on_motion(at)?;
                Ok(None)
            }
            InputEvent::Other(description) => {
                warn!("Event {}", description);
                Ok(None)
            }
        }
    }

    fn on_press(&mut self, at: PointerSample) -> CaptureResult<Option<CaptureOutcome>> {
        if self.state != ClickState::WaitingForPress {
            debug!("Ignoring press at ({}, {}) in {:?}", at.x, at.y, self.state);
            return Ok(None);
        }
        debug!("Press at ({}, {}) on 0x{:X}", at.x, at.y, at.window);

        if self.settings.output_mode == OutputMode::PressOnly {
            self.emitter.emit_press(&at)?;
            self.state = if self.settings.stops_after_press() {
                ClickState::Done
            } else {
                ClickState::PressReported
            };
            return Ok(Some(CaptureOutcome::Pressed(at)));
        }

        self.state = ClickState::Dragging(at);
        Ok(None)
    }

    fn on_release(&mut self, at: PointerSample) -> CaptureResult<Option<CaptureOutcome>> {
        let press = match self.state {
            ClickState::Dragging(press) => press,
            other => {
                debug!("Ignoring release at ({}, {}) in {:?}", at.x, at.y, other);
                return Ok(None);
            }
        };
        debug!("Release at ({}, {}) on 0x{:X}", at.x, at.y, at.window);

        let click = ClickRecord::complete(press, at);
        self.emitter.emit_click(&click)?;
        self.state = ClickState::Done;
        Ok(Some(CaptureOutcome::Click(click)))
    }

    fn on_motion(&mut self, at: PointerSample) -> CaptureResult<()> {
        if self.settings.report_motion {
            self.emitter.emit_motion(&at)?;
        }
        Ok(())
    }
}
