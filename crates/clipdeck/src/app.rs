use crate::{
    AppCommand, AppResult,
    app_command::HELP,
    backend::{Viewport, read_media_file},
    console,
};

use std::{io, time::Duration};

use clipdeck_core::{Studio, StudioEvent, UserAction};
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

/// Main application state.
///
/// Owns the studio and feeds it console commands and platform events, one
/// at a time, on the async runtime.
pub struct App {
    pub(crate) studio: Studio,
    pub(crate) events_rx: mpsc::UnboundedReceiver<StudioEvent>,
    pub(crate) viewport: Viewport,
}

impl App {
    /// Run the main application event loop until quit or end of input.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Clipdeck starting");
        println!("{HELP}");

        // Shutdown: when line_rx is dropped (main loop breaks), the next
        // blocking_send fails and the forwarder returns.
        let (line_tx, mut line_rx) = mpsc::channel(32);
        let console_handle = console::spawn_forwarder(io::BufReader::new(io::stdin()), line_tx);

        loop {
            tokio::select! {
                line = line_rx.recv() => {
                    let Some(line) = line else {
                        info!("Console closed, shutting down");
                        break;
                    };
                    match AppCommand::parse(&line) {
                        Ok(Some(command)) => {
                            if !self.handle_command(command) {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => warn!(error = %e, "Ignoring console line"),
                    }
                }

                Some(event) = self.events_rx.recv() => {
                    if !self.studio.handle(event) {
                        break;
                    }
                }
            }
        }

        if !self.studio.is_closed() {
            self.studio.handle(StudioEvent::Unload);
        }

        drop(line_rx);

        match tokio::time::timeout(Duration::from_secs(1), console_handle).await {
            Ok(Ok(())) => info!("Console forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Console forwarder task panicked"),
            Err(_) => info!(
                "Console forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        info!("Clipdeck shut down successfully");

        Ok(())
    }

    /// Apply one console command. Returns `false` when the app should exit.
    #[instrument(skip(self))]
    pub(crate) fn handle_command(&mut self, command: AppCommand) -> bool {
        match command {
            AppCommand::Studio(action) => self.studio.handle(StudioEvent::User(action)),
            AppCommand::LoadMusic(path) => {
                let action = match read_media_file(&path) {
                    Ok(file) => UserAction::ChooseMusic(Some(file)),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Failed to read music file");
                        let name = path.file_name().map_or_else(
                            || path.display().to_string(),
                            |name| name.to_string_lossy().into_owned(),
                        );
                        UserAction::MusicUnreadable {
                            name,
                            reason: e.to_string(),
                        }
                    }
                };
                self.studio.handle(StudioEvent::User(action))
            }
            AppCommand::Resize { width, height } => {
                self.viewport.resize(width, height);
                self.studio.handle(StudioEvent::ViewportResized)
            }
            AppCommand::Help => {
                println!("{HELP}");
                true
            }
            AppCommand::Shutdown => {
                info!("Shutdown requested");
                false
            }
        }
    }
}
