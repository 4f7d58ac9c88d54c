//! Commands delivered to the window handler.
//!
//! This is the vocabulary every [`CommandSource`](crate::traits::CommandSource)
//! speaks.  On the wire each command is one line of externally-tagged JSON:
//!
//! ```json
//! {"Template":"left-half"}
//! {"Custom":{"position":"center","absoluteWidth":400,"relativeHeight":0.5}}
//! {"Intention":"Move"}
//! {"PointerMoved":{"x":812.0,"y":430.5,"dx":3.0,"dy":-1.5}}
//! ```
//!
//! Template names are passed through untouched; whether they exist is
//! decided by the [`layout`](crate::layout) catalog when the command is
//! handled, so a typo is a logged no-op rather than a parse error.

use crate::custom::CustomParams;
use crate::drag::Intention;
use serde::{Deserialize, Serialize};

/// Every action the window handler can perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Apply a named template to the focused window.
    Template(String),

    /// Apply a custom anchor/size/offset request to the focused window.
    Custom(CustomParams),

    /// The held modifiers changed.
    Intention(Intention),

    /// The pointer moved by `(dx, dy)` and is now at `(x, y)`.
    ///
    /// All values are in Cartesian screen coordinates (y up).  Ignored
    /// unless a move or resize intention is active.
    PointerMoved { x: f64, y: f64, dx: f64, dy: f64 },
}
