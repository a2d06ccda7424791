use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Download destination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory downloads are written to (None = the user's download directory).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}
