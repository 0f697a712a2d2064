// platform/x11.rs - X11 Windowing Session
//
// Owns the single connection to the X server for the whole run. All grab,
// ungrab and event requests go through this connection.

use log::{debug, info};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    Allow, ButtonIndex, ConnectionExt as _, EventMask, GrabMode, GrabStatus, ModMask, Window,
};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;
use x11rb::{CURRENT_TIME, NONE};

use super::{DisplayServer, InputEvent};
use crate::app::{PointerSample, WindowId};
use crate::capture::{CaptureError, GrabFailure};

/// Events requested by both grab flavours
fn grab_events() -> EventMask {
    EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE | EventMask::POINTER_MOTION
}

/// Translate a GrabPointer reply status; `None` means the grab is held
pub fn grab_failure(status: GrabStatus) -> Option<GrabFailure> {
    match status {
        GrabStatus::SUCCESS => None,
        GrabStatus::ALREADY_GRABBED => Some(GrabFailure::AlreadyGrabbed),
        GrabStatus::FROZEN => Some(GrabFailure::Frozen),
        GrabStatus::INVALID_TIME => Some(GrabFailure::InvalidTime),
        GrabStatus::NOT_VIEWABLE => Some(GrabFailure::NotViewable),
        other => Some(GrabFailure::Other(u8::from(other))),
    }
}

/// Connection to the X server plus the root window of the default screen
pub struct X11Server {
    conn: RustConnection,
    screen_num: usize,
    root: Window,
}

impl X11Server {
    /// Connect to `display`, or to `$DISPLAY` when `None`
    pub fn connect(display: Option<&str>) -> Result<Self, CaptureError> {
        let (conn, screen_num) = x11rb::connect(display)?;
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or(CaptureError::NoScreen(screen_num))?;

        info!("Connected to X server, screen {} root 0x{:X}", screen_num, root);

        Ok(Self {
            conn,
            screen_num,
            root,
        })
    }
}

fn sample(root_x: i16, root_y: i16, child: Window) -> PointerSample {
    PointerSample::new(root_x.into(), root_y.into(), child)
}

impl DisplayServer for X11Server {
    fn root(&self) -> WindowId {
        self.root
    }

    fn load_cursor(&self, name: &str) -> Result<u32, CaptureError> {
        let database = x11rb::resource_manager::new_from_default(&self.conn)?;
        let handle = x11rb::cursor::Handle::new(&self.conn, self.screen_num, &database)?.reply()?;
        Ok(handle.load_cursor(&self.conn, name)?)
    }

    fn grab_pointer(&self, cursor: Option<u32>) -> Result<(), CaptureError> {
        let reply = self
            .conn
            .grab_pointer(
                false,
                self.root,
                grab_events(),
                GrabMode::SYNC,
                GrabMode::ASYNC,
                NONE,
                cursor.unwrap_or(NONE),
                CURRENT_TIME,
            )?
            .reply()?;

        match grab_failure(reply.status) {
            None => Ok(()),
            Some(failure) => Err(CaptureError::GrabFailed(failure)),
        }
    }

    fn grab_button(&self, button: u8, cursor: Option<u32>) -> Result<(), CaptureError> {
        // No reply; a refused passive grab shows up later as an error event
        self.conn.grab_button(
            false,
            self.root,
            grab_events(),
            GrabMode::SYNC,
            GrabMode::ASYNC,
            NONE,
            cursor.unwrap_or(NONE),
            ButtonIndex::from(button),
            ModMask::ANY,
        )?;
        Ok(())
    }

    fn ungrab_pointer(&self) -> Result<(), CaptureError> {
        self.conn.ungrab_pointer(CURRENT_TIME)?;
        Ok(())
    }

    fn ungrab_button(&self, button: u8) -> Result<(), CaptureError> {
        self.conn
            .ungrab_button(ButtonIndex::from(button), self.root, ModMask::ANY)?;
        Ok(())
    }

    fn allow_events(&self) -> Result<(), CaptureError> {
        self.conn.allow_events(Allow::SYNC_POINTER, CURRENT_TIME)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), CaptureError> {
        self.conn.flush()?;
        Ok(())
    }

    fn wait_for_event(&self) -> Result<InputEvent, CaptureError> {
        let event = self.conn.wait_for_event().map_err(|e| {
            debug!("X connection closed while waiting for events: {}", e);
            CaptureError::EventStreamTerminated
        })?;

        Ok(match event {
            Event::ButtonPress(e) => InputEvent::ButtonPress(sample(e.root_x, e.root_y, e.child)),
            Event::ButtonRelease(e) => {
                InputEvent::ButtonRelease(sample(e.root_x, e.root_y, e.child))
            }
            Event::MotionNotify(e) => InputEvent::Motion(sample(e.root_x, e.root_y, e.child)),
            other => InputEvent::Other(format!("{:?}", other)),
        })
    }
}
