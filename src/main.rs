//! Entry point for the **moves** daemon.
//!
//! Spawns the command socket listener on a background thread and processes
//! incoming commands on the main thread.
//!
//! `--dry-run` swaps the Hyprland backend for an in-memory window that only
//! logs what would happen, which is handy for trying out templates.

use log::{debug, error, info};
use moves::command::Command;
use moves::config::{config_dir, Config};
use moves::handler::WindowHandler;
use moves::hyprland::port::HyprlandPort;
use moves::ipc::listener::UnixSocketListener;
use moves::traits::{CommandSource, WindowPort};
use std::path::PathBuf;
use std::sync::mpsc;

/// Try to load the config from `$XDG_CONFIG_HOME/moves/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

//  In-memory window port (--dry-run)

mod dry_run {
    use log::info;
    use moves::geometry::{Point, Rect, Size};
    use moves::traits::WindowPort;
    use std::cell::Cell;

    /// A single 800×600 window on a 1920×1080 screen.
    pub struct DryRunPort {
        frame: Cell<Rect>,
    }

    impl Default for DryRunPort {
        fn default() -> Self {
            Self {
                frame: Cell::new(Rect::from_xywh(560.0, 240.0, 800.0, 600.0)),
            }
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("dry run")]
    pub struct DryRunError;

    impl WindowPort for DryRunPort {
        type Error = DryRunError;
        type WindowId = ();

        fn focused_window(&self) -> Result<Option<()>, DryRunError> {
            Ok(Some(()))
        }

        fn window_frame(&self, _: &()) -> Result<Option<Rect>, DryRunError> {
            Ok(Some(self.frame.get()))
        }

        fn screen_bounds(&self) -> Result<Rect, DryRunError> {
            Ok(Rect::from_xywh(0.0, 0.0, 1920.0, 1080.0))
        }

        fn move_window(&self, _: &(), origin: Point) -> Result<(), DryRunError> {
            info!("move to ({:.1}, {:.1})", origin.x, origin.y);
            let mut frame = self.frame.get();
            frame.origin = origin;
            self.frame.set(frame);
            Ok(())
        }

        fn resize_window(&self, _: &(), size: Size) -> Result<(), DryRunError> {
            info!("resize to {:.1}×{:.1}", size.width, size.height);
            let mut frame = self.frame.get();
            frame.size = size;
            self.frame.set(frame);
            Ok(())
        }
    }
}

//  Main

fn main() {
    env_logger::init();

    let dry_run = std::env::args().any(|a| a == "--dry-run");
    let config = load_config();

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_command_sources(cmd_tx, config.listener.socket_path());

    if dry_run {
        info!("dry run: commands act on an in-memory window");
        run(
            WindowHandler::new(dry_run::DryRunPort::default(), config.drag),
            cmd_rx,
        );
    } else {
        run(WindowHandler::new(HyprlandPort::new(), config.drag), cmd_rx);
    }
}

/// Handle commands until every source has hung up.
fn run<P: WindowPort>(mut handler: WindowHandler<P>, cmd_rx: mpsc::Receiver<Command>) {
    info!("moves running");
    for cmd in cmd_rx {
        match handler.handle(cmd) {
            Ok(outcome) => debug!("{:?}", outcome),
            Err(e) => error!("command error: {}", e),
        }
    }
    info!("all command sources closed, exiting");
}

//  Helpers

fn spawn_command_sources(tx: mpsc::Sender<Command>, socket_path: PathBuf) {
    std::thread::spawn(move || {
        let mut source = UnixSocketListener::new(&socket_path);
        if let Err(e) = source.run(tx) {
            error!("socket listener error: {}", e);
        }
    });
}
