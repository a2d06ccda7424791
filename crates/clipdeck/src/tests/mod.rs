mod app;

use std::path::PathBuf;

use uuid::Uuid;

/// Fresh directory path under the system temp dir. Not created.
pub(crate) fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("clipdeck-test-{}", Uuid::new_v4()))
}
