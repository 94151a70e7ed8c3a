//! Per-call transfer options.

use serde::{Deserialize, Serialize};

/// Default I/O window size (64 KiB).
fn default_chunk_size() -> usize {
    64 * 1024
}

/// Text encodings supported when decoding file bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    /// Strict UTF-8; invalid bytes fail the read with an encoding error.
    #[default]
    Utf8,
    /// UTF-8 with invalid sequences replaced by U+FFFD.
    Utf8Lossy,
}

/// Options for a single chunked transfer. Not persisted; scoped to one call.
///
/// Deserializable so the editor's preference layer can load the defaults it
/// hands to every save and open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferOptions {
    /// Size of each I/O window in bytes. Smaller chunks give finer progress
    /// and cancellation granularity at the cost of more syscalls.
    #[serde(default = "default_chunk_size")]
    pub chunk_size_bytes: usize,
    /// Encoding used to decode bytes on read. Writes always emit UTF-8.
    #[serde(default)]
    pub encoding: TextEncoding,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            chunk_size_bytes: default_chunk_size(),
            encoding: TextEncoding::Utf8,
        }
    }
}

impl TransferOptions {
    /// Chunk size clamped to at least one byte.
    pub(crate) fn chunk_size(&self) -> usize {
        self.chunk_size_bytes.max(1)
    }
}
