use std::sync::Arc;

use tracing::debug;

/// A sealed binary media object with its MIME type.
///
/// Cloning is cheap: the bytes are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    bytes: Arc<[u8]>,
    mime_type: String,
}

impl Clip {
    /// Wrap already-concatenated bytes.
    pub fn new(bytes: impl Into<Arc<[u8]>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    /// The clip's bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The clip's MIME type, parameters included.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Size of the clip in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the clip holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Ordered chunks produced during one capture session.
///
/// Appendable until sealed; after [`Recording::seal`] every further chunk is
/// dropped.
#[derive(Debug, Default)]
pub struct Recording {
    chunks: Vec<Vec<u8>>,
    byte_len: usize,
    sealed: bool,
}

impl Recording {
    /// Create an empty, unsealed recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk in capture order.
    ///
    /// Returns `false` when the chunk was discarded (empty, or the recording
    /// is already sealed).
    pub fn append(&mut self, chunk: Vec<u8>) -> bool {
        if self.sealed || chunk.is_empty() {
            debug!(
                chunk_len = chunk.len(),
                sealed = self.sealed,
                "Chunk discarded"
            );
            return false;
        }

        self.byte_len += chunk.len();
        self.chunks.push(chunk);
        true
    }

    /// Seal the recording and concatenate it into a clip.
    pub fn seal(&mut self, mime_type: &str) -> Clip {
        self.sealed = true;
        self.to_clip(mime_type)
    }

    /// Concatenate the chunks into a fresh clip without sealing.
    pub fn to_clip(&self, mime_type: &str) -> Clip {
        let mut bytes = Vec::with_capacity(self.byte_len);
        for chunk in &self.chunks {
            bytes.extend_from_slice(chunk);
        }
        Clip::new(bytes, mime_type)
    }

    /// Number of chunks accumulated.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total bytes accumulated.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Whether the recording has been sealed.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}
