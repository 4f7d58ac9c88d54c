//! Core traits that decouple the handler from any specific window system or
//! transport mechanism.
//!
//! Every concrete backend (Hyprland, a Unix-socket listener, a test harness,
//! …) implements one of these traits.  The
//! [`WindowHandler`](crate::handler::WindowHandler) only depends on these
//! abstractions.

use crate::command::Command;
use crate::geometry::{Point, Rect, Size};
use std::sync::mpsc;

/// Access to windows and the display the focused one lives on.
///
/// All geometry is Cartesian (origin bottom-left, y up).  Implementations
/// that talk to a top-down window system convert at this boundary.
///
/// Windows are addressed by an opaque [`WindowId`](WindowPort::WindowId)
/// so a caller can keep acting on the same window after focus moves on.
pub trait WindowPort {
    /// The error type produced by this port.
    type Error: std::error::Error + Send + 'static;

    /// Handle identifying one window.
    type WindowId: Clone + PartialEq + std::fmt::Debug;

    /// The currently focused window, or `None` if nothing is focused.
    fn focused_window(&self) -> Result<Option<Self::WindowId>, Self::Error>;

    /// Frame of `window`, or `None` if it no longer exists.
    fn window_frame(&self, window: &Self::WindowId) -> Result<Option<Rect>, Self::Error>;

    /// Usable area of the display hosting the focused window (menu bars,
    /// docks and panels excluded).
    ///
    /// Queried afresh for every command; never cache it, the window may
    /// have moved to another display.
    fn screen_bounds(&self) -> Result<Rect, Self::Error>;

    /// Move `window` so its origin lands on `origin`.
    fn move_window(&self, window: &Self::WindowId, origin: Point) -> Result<(), Self::Error>;

    /// Resize `window`, keeping its origin.
    fn resize_window(&self, window: &Self::WindowId, size: Size) -> Result<(), Self::Error>;

    /// The focused window together with its frame.
    fn current_geometry(&self) -> Result<Option<(Self::WindowId, Rect)>, Self::Error> {
        let Some(window) = self.focused_window()? else {
            return Ok(None);
        };
        Ok(self.window_frame(&window)?.map(|frame| (window, frame)))
    }

    /// Realise `target` on `window`: **move first, then resize**.
    ///
    /// Moving first keeps a large window from clipping against the screen
    /// edges while it shrinks.
    fn apply(&self, window: &Self::WindowId, target: Rect) -> Result<(), Self::Error> {
        self.move_window(window, target.origin)?;
        self.resize_window(window, target.size)
    }
}

//  Command Source

/// A source of [`Command`]s.
///
/// Implementations listen on some transport (a Unix socket, a compositor
/// plugin, an in-memory channel) and forward parsed commands into the
/// provided [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Command`] into `sink`.
    ///
    /// This method blocks the calling thread.  To run multiple sources
    /// concurrently, spawn each one on its own thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}
