use std::io;

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop that renders only after something happened.
///
/// There is no tick: a viewer has nothing to animate, so the loop blocks on terminal input
/// and asks for one render after each event.
#[derive(Debug)]
pub(super) struct EventLoop {
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            dirty: true, // Initial render is required on startup
        }
    }

    /// Returns the next event.
    ///
    /// Yields [`TuiEvent::Render`] first if the screen is stale, otherwise blocks until a
    /// crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        if self.dirty {
            self.dirty = false;
            return Ok(TuiEvent::Render);
        }
        let event = event::read()?;
        self.dirty = true;
        Ok(event.into())
    }
}
