//! Scripted display server shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::thread;

use clickgrab::app::{PointerSample, WindowId};
use clickgrab::{CaptureError, DisplayServer, GrabFailure, InputEvent};

pub const ROOT: WindowId = 0x1e1;
pub const CROSSHAIR: u32 = 0x600001;

/// Requests the fake server received, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    LoadCursor(String),
    GrabPointer(Option<u32>),
    GrabButton(u8, Option<u32>),
    UngrabPointer,
    UngrabButton(u8),
    AllowEvents,
    Flush,
    WaitForEvent,
}

pub type RequestLog = Arc<Mutex<Vec<Request>>>;

pub struct FakeServer {
    events: Mutex<VecDeque<InputEvent>>,
    log: RequestLog,
    grab_failure: Option<GrabFailure>,
    cursor: Option<u32>,
    block_when_drained: bool,
}

impl FakeServer {
    pub fn new(events: Vec<InputEvent>) -> (Self, RequestLog) {
        let log = RequestLog::default();
        let server = Self {
            events: Mutex::new(events.into()),
            log: Arc::clone(&log),
            grab_failure: None,
            cursor: Some(CROSSHAIR),
            block_when_drained: false,
        };
        (server, log)
    }

    /// Refuse exclusive grabs with `failure`
    pub fn refusing(mut self, failure: GrabFailure) -> Self {
        self.grab_failure = Some(failure);
        self
    }

    /// Fail every cursor lookup
    pub fn without_cursor(mut self) -> Self {
        self.cursor = None;
        self
    }

    /// Block forever once the scripted events run out, like a user who
    /// never lets go of the button
    pub fn blocking(mut self) -> Self {
        self.block_when_drained = true;
        self
    }

    pub fn pending_events(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    fn record(&self, request: Request) {
        self.log.lock().unwrap().push(request);
    }
}

impl DisplayServer for FakeServer {
    fn root(&self) -> WindowId {
        ROOT
    }

    fn load_cursor(&self, name: &str) -> Result<u32, CaptureError> {
        self.record(Request::LoadCursor(name.to_string()));
        self.cursor.ok_or_else(|| {
            CaptureError::Io(io::Error::new(io::ErrorKind::NotFound, "no cursor theme"))
        })
    }

    fn grab_pointer(&self, cursor: Option<u32>) -> Result<(), CaptureError> {
        self.record(Request::GrabPointer(cursor));
        match self.grab_failure {
            Some(failure) => Err(CaptureError::GrabFailed(failure)),
            None => Ok(()),
        }
    }

    fn grab_button(&self, button: u8, cursor: Option<u32>) -> Result<(), CaptureError> {
        self.record(Request::GrabButton(button, cursor));
        Ok(())
    }

    fn ungrab_pointer(&self) -> Result<(), CaptureError> {
        self.record(Request::UngrabPointer);
        Ok(())
    }

    fn ungrab_button(&self, button: u8) -> Result<(), CaptureError> {
        self.record(Request::UngrabButton(button));
        Ok(())
    }

    fn allow_events(&self) -> Result<(), CaptureError> {
        self.record(Request::AllowEvents);
        Ok(())
    }

    fn flush(&self) -> Result<(), CaptureError> {
        self.record(Request::Flush);
        Ok(())
    }

    fn wait_for_event(&self) -> Result<InputEvent, CaptureError> {
        self.record(Request::WaitForEvent);
        let next = self.events.lock().unwrap().pop_front();
        match next {
            Some(event) => Ok(event),
            None if self.block_when_drained => loop {
                thread::park();
            },
            None => Err(CaptureError::EventStreamTerminated),
        }
    }
}

pub fn press(x: i32, y: i32, window: WindowId) -> InputEvent {
    InputEvent::ButtonPress(PointerSample::new(x, y, window))
}

pub fn release(x: i32, y: i32, window: WindowId) -> InputEvent {
    InputEvent::ButtonRelease(PointerSample::new(x, y, window))
}

pub fn motion(x: i32, y: i32, window: WindowId) -> InputEvent {
    InputEvent::Motion(PointerSample::new(x, y, window))
}

pub fn requests(log: &RequestLog) -> Vec<Request> {
    log.lock().unwrap().clone()
}

pub fn count(log: &RequestLog, request: &Request) -> usize {
    log.lock().unwrap().iter().filter(|r| *r == request).count()
}

/// Output buffer that stays readable while another thread writes to it
#[derive(Clone, Default)]
pub struct SharedOutput(Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
