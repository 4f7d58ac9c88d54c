//! [`WindowPort`] implementation backed by Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
//!
//! # Coordinates
//!
//! Hyprland's layout coordinates are top-down (y grows downward) while the
//! rest of the crate is Cartesian.  Conversion happens per monitor: a frame
//! is mirrored vertically inside the monitor that hosts it, so a monitor's
//! own rectangle maps onto itself and "top" stays "top".  Frames on
//! different monitors are therefore not comparable with each other, which
//! is fine because every resolution only involves one window and the
//! monitor it is on.

use crate::geometry::{Point, Rect, Size};
use crate::traits::WindowPort;
use log::debug;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed window port.
///
/// All communication happens over Hyprland's IPC socket.  No child
/// processes are spawned.
#[derive(Debug, Default)]
pub struct HyprlandPort;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandPortError(String);

impl HyprlandPort {
    /// Create a new handle.
    ///
    /// No connection is opened eagerly; each method call opens a short-lived
    /// IPC request.
    pub fn new() -> Self {
        Self
    }
}

//  Direct Hyprland IPC helpers

/// Resolve the Hyprland command socket path.
fn socket_path() -> Result<PathBuf, HyprlandPortError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandPortError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandPortError("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(format!(
        "{}/hypr/{}/.socket.sock",
        runtime_dir, his
    )))
}

/// Send a raw command to the Hyprland command socket and return the
/// response as a string.
fn ipc_request(command: &str) -> Result<String, HyprlandPortError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandPortError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandPortError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandPortError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandPortError(format!("utf-8: {}", e)))
}

/// Send a JSON data query (`j/<command>`) and deserialize the response.
fn ipc_json<T: for<'de> Deserialize<'de>>(data_command: &str) -> Result<T, HyprlandPortError> {
    let json = ipc_request(&format!("j/{}", data_command))?;
    serde_json::from_str(&json).map_err(|e| HyprlandPortError(format!("parse: {}", e)))
}

/// Send a dispatch command and check for `"ok"`.
fn ipc_dispatch(args: &str) -> Result<(), HyprlandPortError> {
    debug!("dispatch {}", args);
    let response = ipc_request(&format!("/dispatch {}", args))?;
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandPortError(format!("dispatch error: {}", response)))
    }
}

//  Minimal serde structs for the JSON we care about

/// Subset of the JSON object returned by `j/monitors`.
#[derive(Debug, Clone, Deserialize)]
struct MonitorJson {
    id: i64,
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    #[serde(default = "unit_scale")]
    scale: f64,
    /// Reserved margins `[left, top, right, bottom]` (bars, panels).
    #[serde(default)]
    reserved: Vec<f64>,
    #[serde(default)]
    focused: bool,
}

fn unit_scale() -> f64 {
    1.0
}

impl MonitorJson {
    /// The monitor's full area in top-down layout coordinates.
    fn frame(&self) -> Rect {
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        Rect::from_xywh(
            self.x as f64,
            self.y as f64,
            self.width as f64 / scale,
            self.height as f64 / scale,
        )
    }

    /// The area left after reserved margins, top-down.
    fn usable(&self) -> Rect {
        let margin = |i: usize| self.reserved.get(i).copied().unwrap_or(0.0);
        let (left, top, right, bottom) = (margin(0), margin(1), margin(2), margin(3));
        let full = self.frame();
        Rect::from_xywh(
            full.min_x() + left,
            full.min_y() + top,
            (full.width() - left - right).max(0.0),
            (full.height() - top - bottom).max(0.0),
        )
    }
}

/// Subset of a window object from `j/activewindow` and `j/clients`.
#[derive(Debug, Deserialize)]
struct ClientJson {
    address: String,
    at: [f64; 2],
    size: [f64; 2],
    monitor: i64,
}

impl ClientJson {
    fn frame(&self) -> Rect {
        Rect::from_xywh(self.at[0], self.at[1], self.size[0], self.size[1])
    }
}

/// Mirror `y` for a span of `height` inside `monitor`.
///
/// Converts top-down to Cartesian and back (the mapping is its own
/// inverse).
fn flip_y(y: f64, height: f64, monitor: &Rect) -> f64 {
    2.0 * monitor.min_y() + monitor.height() - y - height
}

/// Convert a frame between top-down and Cartesian within `monitor`.
fn flip(frame: &Rect, monitor: &Rect) -> Rect {
    Rect::new(
        Point::new(frame.min_x(), flip_y(frame.min_y(), frame.height(), monitor)),
        frame.size,
    )
}

/// A window together with the monitor that hosts it.
struct Placed {
    window: ClientJson,
    monitor: MonitorJson,
}

impl Placed {
    /// The window's frame in Cartesian coordinates.
    fn frame(&self) -> Rect {
        flip(&self.window.frame(), &self.monitor.frame())
    }
}

impl HyprlandPort {
    fn monitors(&self) -> Result<Vec<MonitorJson>, HyprlandPortError> {
        ipc_json("monitors")
    }

    fn place(&self, window: ClientJson) -> Result<Placed, HyprlandPortError> {
        let monitor = self
            .monitors()?
            .into_iter()
            .find(|m| m.id == window.monitor)
            .ok_or_else(|| HyprlandPortError(format!("unknown monitor id: {}", window.monitor)))?;
        Ok(Placed { window, monitor })
    }

    fn focused(&self) -> Result<Option<Placed>, HyprlandPortError> {
        let json = ipc_request("j/activewindow")?;
        // Hyprland returns an empty object `{}` when no window is focused.
        if json.trim() == "{}" {
            return Ok(None);
        }
        let window: ClientJson =
            serde_json::from_str(&json).map_err(|e| HyprlandPortError(format!("parse: {}", e)))?;
        self.place(window).map(Some)
    }

    /// Look a window up by address among all clients.
    fn client(&self, address: &str) -> Result<Option<Placed>, HyprlandPortError> {
        let clients: Vec<ClientJson> = ipc_json("clients")?;
        match clients.into_iter().find(|c| c.address == address) {
            Some(window) => self.place(window).map(Some),
            None => Ok(None),
        }
    }

    fn client_or_err(&self, address: &str) -> Result<Placed, HyprlandPortError> {
        self.client(address)?
            .ok_or_else(|| HyprlandPortError(format!("no window at address {}", address)))
    }
}

/// `movewindowpixel` arguments placing `window` at top-down `(x, y)`.
fn move_args(address: &str, x: f64, y: f64) -> String {
    format!(
        "movewindowpixel exact {} {},address:{}",
        x.round() as i64,
        y.round() as i64,
        address
    )
}

/// `resizewindowpixel` arguments.
fn resize_args(address: &str, size: Size) -> String {
    format!(
        "resizewindowpixel exact {} {},address:{}",
        size.width.round() as i64,
        size.height.round() as i64,
        address
    )
}

//  WindowPort implementation

impl WindowPort for HyprlandPort {
    type Error = HyprlandPortError;
    /// Hyprland window address, e.g. `0x55d0c1a2b3c0`.
    type WindowId = String;

    fn focused_window(&self) -> Result<Option<String>, Self::Error> {
        Ok(self.focused()?.map(|f| f.window.address))
    }

    fn window_frame(&self, window: &String) -> Result<Option<Rect>, Self::Error> {
        Ok(self.client(window)?.map(|c| c.frame()))
    }

    fn current_geometry(&self) -> Result<Option<(String, Rect)>, Self::Error> {
        Ok(self.focused()?.map(|f| {
            let frame = f.frame();
            (f.window.address, frame)
        }))
    }

    fn screen_bounds(&self) -> Result<Rect, Self::Error> {
        let monitor = match self.focused()? {
            Some(f) => f.monitor,
            None => {
                let monitors = self.monitors()?;
                match monitors.iter().find(|m| m.focused).or(monitors.first()) {
                    Some(m) => m.clone(),
                    None => return Ok(Rect::default()),
                }
            }
        };
        Ok(flip(&monitor.usable(), &monitor.frame()))
    }

    /// Uses the window's current (pre-resize) height to place its top edge.
    fn move_window(&self, window: &String, origin: Point) -> Result<(), Self::Error> {
        let c = self.client_or_err(window)?;
        let y = flip_y(origin.y, c.window.size[1], &c.monitor.frame());
        ipc_dispatch(&move_args(window, origin.x, y))
    }

    /// Hyprland resizes around the top-left corner; re-anchor afterwards so
    /// the Cartesian origin (bottom-left) stays where it was.
    fn resize_window(&self, window: &String, size: Size) -> Result<(), Self::Error> {
        let c = self.client_or_err(window)?;
        let origin = c.frame().origin;
        ipc_dispatch(&resize_args(window, size))?;
        let y = flip_y(origin.y, size.height, &c.monitor.frame());
        ipc_dispatch(&move_args(window, origin.x, y))
    }
}
