//! IPC listener that accepts commands over a Unix socket.
//!
//! Hotkey daemons, scripts and compositor plugins connect to the socket
//! and send newline-delimited JSON commands.

pub mod listener;
