use crate::clip::Clip;

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{debug, error};
use uuid::Uuid;

const URL_PREFIX: &str = "blob:clipdeck/";

/// Registry of live clip references.
///
/// Plays the role of the platform's object-URL table: a reference exists
/// exactly as long as its [`ClipHandle`] is alive.
#[derive(Debug, Default)]
pub struct ClipRegistry {
    entries: Mutex<HashMap<Uuid, Clip>>,
}

impl ClipRegistry {
    /// Create an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a clip and return the handle that keeps it alive.
    pub fn mint(self: &Arc<Self>, clip: Clip) -> ClipHandle {
        let id = Uuid::new_v4();
        let byte_len = clip.len();
        self.lock().insert(id, clip.clone());

        debug!(clip_id = %id, byte_len, "Clip reference minted");

        ClipHandle {
            id,
            url: format!("{URL_PREFIX}{id}"),
            clip,
            registry: Arc::clone(self),
        }
    }

    /// Look up the clip behind a live reference URL.
    pub fn resolve(&self, url: &str) -> Option<Clip> {
        let id = url
            .strip_prefix(URL_PREFIX)
            .and_then(|raw| Uuid::parse_str(raw).ok())?;
        self.lock().get(&id).cloned()
    }

    /// Number of references currently alive.
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    fn revoke(&self, id: Uuid) {
        if self.lock().remove(&id).is_some() {
            debug!(clip_id = %id, "Clip reference revoked");
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Clip>> {
        // Entries stay valid even if a holder panicked.
        self.entries.lock().unwrap_or_else(|e| {
            error!("Clip registry lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}

/// RAII clip reference. Dropping it revokes the reference.
pub struct ClipHandle {
    id: Uuid,
    url: String,
    clip: Clip,
    registry: Arc<ClipRegistry>,
}

impl ClipHandle {
    /// URL-like identifier bound to a playback surface.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The referenced clip.
    pub fn clip(&self) -> &Clip {
        &self.clip
    }
}

impl fmt::Debug for ClipHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipHandle")
            .field("url", &self.url)
            .field("mime_type", &self.clip.mime_type())
            .field("byte_len", &self.clip.len())
            .finish()
    }
}

impl Drop for ClipHandle {
    fn drop(&mut self) {
        self.registry.revoke(self.id);
    }
}
