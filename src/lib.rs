//! **moves**: template-driven window placement.
//!
//! A named template such as `"left-half"` or `"top-center-sixth"`, or a
//! custom anchor/size/offset request, is turned into a concrete target
//! frame for the focused window.  Some templates are *dynamic*: the
//! fullscreen toggle, maximize-height/width and the display actions look at
//! the window's current frame to decide where it goes next.  Holding a
//! modifier chord additionally lets the pointer drag or resize the window.
//!
//! # Architecture
//!
//! The pure core is [`layout`] (the template catalog), [`resolver`] and
//! [`custom`] (frame computation) on top of the [`geometry`] value types.
//! The core keeps no state; everything it needs is passed in per call.
//!
//! Around it sit two traits:
//!
//! * [`traits::WindowPort`]: reads the focused window and its screen and
//!   applies frames, so the handler is not coupled to any window system.
//! * [`traits::CommandSource`]: abstracts the transport that delivers
//!   commands (a Unix socket, a compositor plugin, …).
//!
//! [`handler::WindowHandler`] glues them together.  Concrete
//! implementations live in [`hyprland`] (Hyprland IPC) and [`ipc`]
//! (Unix-socket command listener).

pub mod command;
pub mod config;
pub mod custom;
pub mod drag;
pub mod geometry;
pub mod grid;
pub mod handler;
pub mod hyprland;
pub mod ipc;
pub mod layout;
pub mod resolver;
pub mod traits;
