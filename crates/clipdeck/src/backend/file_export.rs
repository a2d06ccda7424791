use crate::config::write_atomic;

use clipdeck_core::{CoreResult, StudioError, clip::ClipHandle, export::ClipExporter};

use std::{fs, panic::Location, path::PathBuf};

use error_location::ErrorLocation;
use tracing::{info, instrument};

/// [`ClipExporter`] writing into a directory.
#[derive(Debug)]
pub struct FileExporter {
    dir: PathBuf,
}

impl FileExporter {
    /// Create the exporter, making `dir` if it does not exist.
    #[track_caller]
    pub fn new(dir: PathBuf) -> CoreResult<Self> {
        fs::create_dir_all(&dir).map_err(|e| StudioError::ExportFailed {
            reason: format!("Failed to create {}: {}", dir.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self { dir })
    }
}

impl ClipExporter for FileExporter {
    #[track_caller]
    #[instrument(skip(self, clip), fields(dir = %self.dir.display()))]
    fn save(&mut self, file_name: &str, clip: &ClipHandle) -> CoreResult<()> {
        let path = self.dir.join(file_name);

        write_atomic(&path, clip.clip().bytes()).map_err(|e| StudioError::ExportFailed {
            reason: format!("Failed to write {}: {}", path.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(path = %path.display(), byte_len = clip.clip().len(), "Recording saved");

        Ok(())
    }
}
