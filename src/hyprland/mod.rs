//! Hyprland-specific implementations.
//!
//! This module provides the concrete [`WindowPort`](crate::traits::WindowPort)
//! backend, powered by Hyprland's IPC socket.
//!
//! Nothing outside this module should reference Hyprland directly.

pub mod port;
