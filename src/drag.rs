//! Modifier-driven live move and resize.
//!
//! While a modifier chord is held the pointer drags the window around
//! (or resizes it from the nearest edges).  This is caller-side state: the
//! tracker only remembers *what* the user intends, never the window's
//! geometry.  Every pointer event is handled against a fresh read of the
//! dragged window's frame, so a drag can be abandoned at any point.
//!
//! ```text
//!             Intention(Move)              Intention(Resize)
//!   Idle ─────────────────────▶ Moving ◀───────────────────▶ Resizing
//!    ▲                            │                              │
//!    └──────── Intention(Idle) ───┴──────────────────────────────┘
//! ```

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// What the held modifiers ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Intention {
    #[default]
    Idle,
    Move,
    Resize,
}

/// Tuning for live resize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Smallest width a resize may produce.  Default: `100.0`.
    pub min_width: f64,
    /// Smallest height a resize may produce.  Default: `60.0`.
    pub min_height: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            min_width: 100.0,
            min_height: 60.0,
        }
    }
}

/// Current drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Moving,
    Resizing,
}

/// The drag state machine.
#[derive(Debug, Default)]
pub struct DragTracker {
    state: DragState,
    config: DragConfig,
}

impl DragTracker {
    pub fn new(config: DragConfig) -> Self {
        Self {
            state: DragState::Idle,
            config,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Transition on a modifier change.  Returns the previous state.
    pub fn set_intention(&mut self, intention: Intention) -> DragState {
        let previous = self.state;
        self.state = match intention {
            Intention::Idle => DragState::Idle,
            Intention::Move => DragState::Moving,
            Intention::Resize => DragState::Resizing,
        };
        previous
    }

    /// Compute the new frame for a pointer movement of `(dx, dy)` ending at
    /// `pointer`.  `None` while idle.
    pub fn on_pointer(&self, frame: &Rect, pointer: Point, dx: f64, dy: f64) -> Option<Rect> {
        match self.state {
            DragState::Idle => None,
            DragState::Moving => Some(Rect::new(frame.origin.offset(dx, dy), frame.size)),
            DragState::Resizing => Some(self.resize(frame, pointer, dx, dy)),
        }
    }

    /// Drag the edges nearest to `pointer` by the delta.
    ///
    /// A window already below the configured minimum may grow but never
    /// shrinks further; it is not snapped up to the minimum.
    fn resize(&self, frame: &Rect, pointer: Point, dx: f64, dy: f64) -> Rect {
        let (left, right) = (frame.min_x(), frame.max_x());
        let (bottom, top) = (frame.min_y(), frame.max_y());
        let min_width = self.config.min_width.min(frame.width());
        let min_height = self.config.min_height.min(frame.height());

        let (left, right) = if (pointer.x - left).abs() < (pointer.x - right).abs() {
            ((left + dx).min(right - min_width), right)
        } else {
            (left, (right + dx).max(left + min_width))
        };
        let (bottom, top) = if (pointer.y - top).abs() < (pointer.y - bottom).abs() {
            (bottom, (top + dy).max(bottom + min_height))
        } else {
            ((bottom + dy).min(top - min_height), top)
        };

        Rect::from_xywh(left, bottom, right - left, top - bottom)
    }
}
