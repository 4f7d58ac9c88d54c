//! The orchestrator that ties the layout catalog, resolvers, drag tracking
//! and the window port together.
//!
//! [`WindowHandler`] reacts to [`Command`]s by reading a fresh snapshot of
//! the focused window and its screen, computing the target frame and
//! applying it through the [`WindowPort`].  Nothing about the window is
//! remembered between commands: if the user drags the window while a
//! command is in flight, the next command simply starts from the new
//! geometry.
//!
//! The one exception is a live drag: the window under the drag is bound when
//! a move/resize intention starts and released when the modifiers go idle,
//! so pointer events keep acting on it even if focus follows the pointer
//! onto a neighbour.

use crate::command::Command;
use crate::custom::{resolve_custom, CustomParams};
use crate::drag::{DragConfig, DragState, DragTracker, Intention};
use crate::geometry::{Point, Rect};
use crate::layout::lookup;
use crate::resolver::resolve;
use crate::traits::WindowPort;
use log::{debug, info, warn};

/// Possible errors from the handler.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The window port returned an error.
    #[error("window port error: {0}")]
    Port(String),
}

/// Why a command did not change any window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The template identifier is not in the catalog.
    UnknownTemplate(String),
    /// No window is focused.
    NoActiveWindow,
    /// The screen bounds have zero area.
    DegenerateBounds,
    /// A pointer event arrived while no drag was active.
    Idle,
    /// The target equals the current frame.
    Unchanged,
}

/// Result of handling a single command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The window was moved/resized to this frame.
    Applied(Rect),
    /// Nothing was applied.
    Skipped(SkipReason),
    /// The drag state changed (no geometry involved).
    DragState(DragState),
}

/// A point-in-time view of the focused window and its screen.
struct Snapshot<W> {
    window: W,
    current: Rect,
    bounds: Rect,
}

/// Orchestrates layout resolution and window-port calls.
///
/// The handler is generic over any [`WindowPort`] implementation, making
/// it independent of Hyprland or any other concrete backend.
///
/// # Typical usage
///
/// ```ignore
/// let mut handler = WindowHandler::new(HyprlandPort::new(), DragConfig::default());
/// handler.handle(Command::Template("left-half".into()))?;
/// ```
pub struct WindowHandler<P: WindowPort> {
    port: P,
    drag: DragTracker,
    /// Window bound for the current drag.
    dragged: Option<P::WindowId>,
}

impl<P: WindowPort> WindowHandler<P> {
    /// Create a new handler.
    pub fn new(port: P, drag_config: DragConfig) -> Self {
        Self {
            port,
            drag: DragTracker::new(drag_config),
            dragged: None,
        }
    }

    /// Return a shared reference to the underlying port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Current drag state.
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Process a single [`Command`].
    ///
    /// Unknown templates, a missing focused window and degenerate screen
    /// bounds are reported as [`Outcome::Skipped`], not as errors.  Errors
    /// are reserved for the port failing.
    pub fn handle(&mut self, cmd: Command) -> Result<Outcome, HandlerError> {
        match cmd {
            Command::Template(id) => {
                let spec = match lookup(&id) {
                    Ok(spec) => spec,
                    Err(e) => {
                        warn!("{}, ignoring", e);
                        return Ok(Outcome::Skipped(SkipReason::UnknownTemplate(id)));
                    }
                };
                info!("template {}", id);
                let snapshot = match self.snapshot()? {
                    Ok(s) => s,
                    Err(reason) => return Ok(Outcome::Skipped(reason)),
                };
                let target = resolve(spec, &snapshot.current, &snapshot.bounds);
                self.apply(&snapshot.window, &snapshot.current, target)
            }

            Command::Custom(params) => {
                info!("custom {:?}", params);
                self.handle_custom(&params)
            }

            Command::Intention(intention) => self.change_intention(intention),

            Command::PointerMoved { x, y, dx, dy } => {
                if self.drag.state() == DragState::Idle {
                    debug!("pointer moved while idle, ignoring");
                    return Ok(Outcome::Skipped(SkipReason::Idle));
                }
                let Some(window) = self.dragged.clone() else {
                    debug!("no window bound to the drag");
                    return Ok(Outcome::Skipped(SkipReason::NoActiveWindow));
                };
                let current = match self.window_frame(&window)? {
                    Some(frame) => frame,
                    None => {
                        debug!("dragged window {:?} is gone", window);
                        self.dragged = None;
                        return Ok(Outcome::Skipped(SkipReason::NoActiveWindow));
                    }
                };
                match self.drag.on_pointer(&current, Point::new(x, y), dx, dy) {
                    Some(target) => self.apply(&window, &current, target),
                    None => Ok(Outcome::Skipped(SkipReason::Idle)),
                }
            }
        }
    }

    /// Update the drag state, binding the focused window when a move or
    /// resize starts and releasing it on idle.
    fn change_intention(&mut self, intention: Intention) -> Result<Outcome, HandlerError> {
        let previous = self.drag.set_intention(intention);
        let state = self.drag.state();
        if previous != state {
            debug!("drag {:?} -> {:?}", previous, state);
        }
        self.dragged = match state {
            DragState::Idle => None,
            DragState::Moving | DragState::Resizing => {
                let window = self
                    .port
                    .focused_window()
                    .map_err(|e| HandlerError::Port(e.to_string()))?;
                if window.is_none() {
                    debug!("no active window to drag");
                }
                window
            }
        };
        Ok(Outcome::DragState(state))
    }

    fn handle_custom(&mut self, params: &CustomParams) -> Result<Outcome, HandlerError> {
        let request = params.to_request();
        let snapshot = match self.snapshot()? {
            Ok(s) => s,
            Err(reason) => return Ok(Outcome::Skipped(reason)),
        };
        let target = resolve_custom(&request, &snapshot.current, &snapshot.bounds);
        self.apply(&snapshot.window, &snapshot.current, target)
    }

    //  Port helpers

    fn window_frame(&self, window: &P::WindowId) -> Result<Option<Rect>, HandlerError> {
        self.port
            .window_frame(window)
            .map_err(|e| HandlerError::Port(e.to_string()))
    }

    /// Read the focused window and its screen bounds.
    ///
    /// The inner `Err` carries the reason resolution must not run.
    fn snapshot(&self) -> Result<Result<Snapshot<P::WindowId>, SkipReason>, HandlerError> {
        let focused = self
            .port
            .current_geometry()
            .map_err(|e| HandlerError::Port(e.to_string()))?;
        let (window, current) = match focused {
            Some(found) => found,
            None => {
                debug!("no active window, nothing to place");
                return Ok(Err(SkipReason::NoActiveWindow));
            }
        };
        let bounds = self
            .port
            .screen_bounds()
            .map_err(|e| HandlerError::Port(e.to_string()))?;
        if bounds.is_empty() {
            warn!("screen bounds {:?} have no area, is a display connected?", bounds);
            return Ok(Err(SkipReason::DegenerateBounds));
        }
        Ok(Ok(Snapshot {
            window,
            current,
            bounds,
        }))
    }

    /// Apply `target` to `window` unless it matches `current`.
    fn apply(
        &self,
        window: &P::WindowId,
        current: &Rect,
        target: Rect,
    ) -> Result<Outcome, HandlerError> {
        if *current == target {
            debug!("already at {:?}", target);
            return Ok(Outcome::Skipped(SkipReason::Unchanged));
        }
        debug!("  {:?} -> {:?}", current, target);
        self.port
            .apply(window, target)
            .map_err(|e| HandlerError::Port(e.to_string()))?;
        Ok(Outcome::Applied(target))
    }
}

//  Tests
