//! Chunked large-file transfer for vellum.
//!
//! Streams document text to and from disk in bounded-size windows so the
//! editor can show save/open progress and cancel mid-flight without ever
//! observing a half-written file:
//!
//! - [`read_large`] reads in fixed-size chunks, reporting 0–100% integer
//!   progress and checking for cancellation before every chunk.
//! - [`write_large`] streams to a temporary sibling and atomically renames
//!   it over the target, with the temporary removed on every non-success
//!   exit path.
//!
//! Cancellation is cooperative: the token is observed only at chunk
//! boundaries, never mid-syscall. Callers that need finer-grained
//! cancellation choose a smaller [`TransferOptions::chunk_size_bytes`].
//! Transfers are independent of one another; no global lock spans a
//! transfer, and no retries happen internally.

mod chunked;
mod error;
mod options;
mod progress;

pub use chunked::{read_large, write_large};
pub use error::{Error, Result};
pub use options::{TextEncoding, TransferOptions};
pub use progress::ProgressSink;
