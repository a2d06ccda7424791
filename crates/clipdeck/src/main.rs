//! Clipdeck: record a clip from the microphone, play it back, and save it.

mod app;
mod app_command;
mod backend;
mod config;
mod console;
mod error;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
};

use crate::{
    backend::{
        FileExporter, HeadlessPlayer, HeadlessTrack, MicrophoneCapture, TerminalOverlay,
        TerminalView, Viewport,
    },
    config::Config,
};

use std::time::Duration;

use clipdeck_core::{Platform, Studio, clip::ClipRegistry, timer::TokioScheduler};
use tokio::{runtime::Handle, sync::mpsc};
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "clipdeck=debug,clipdeck_core=debug";

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        error!(error = ?e, "App error");
        std::process::exit(1);
    }
}

fn run(config: Config) -> AppResult<()> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let viewport = Viewport::new(
            config.playback.viewport_width,
            config.playback.viewport_height,
        );

        let platform = Platform {
            capture: Box::new(MicrophoneCapture::new(
                config.capture.selected_device.clone(),
                Duration::from_millis(config.capture.chunk_interval_ms),
                events_tx.clone(),
            )),
            playback: Box::new(HeadlessPlayer::new(
                Handle::current(),
                events_tx.clone(),
                viewport.clone(),
                Duration::from_millis(config.playback.time_update_interval_ms),
            )),
            overlay: Box::new(TerminalOverlay::new()),
            music: Box::new(HeadlessTrack::new(events_tx.clone())),
            exporter: Box::new(FileExporter::new(config.download_dir()?)?),
            view: Box::new(TerminalView::new()),
            scheduler: Box::new(TokioScheduler::new(Handle::current(), events_tx)),
        };

        let studio = Studio::new(platform, config.studio_settings(), ClipRegistry::new());

        let app = App {
            studio,
            events_rx,
            viewport,
        };

        app.run().await
    })
}
