//! Chunked file read/write with progress and cooperative cancellation.
//!
//! Reads and writes move data in bounded windows so the editor can surface
//! progress and honor cancellation without preempting an in-flight syscall.
//! Writes go through a temporary sibling file that is atomically renamed
//! over the target, so a cancelled or failed save never leaves a file whose
//! content mixes old and new.

use crate::error::{Error, Result};
use crate::options::{TextEncoding, TransferOptions};
use crate::progress::{ProgressMeter, ProgressSink};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Read a text file in `chunk_size_bytes` windows.
///
/// Progress is emitted as `0` before the first chunk, a floor-rounded
/// percentage after each chunk, and `100` exactly once on success. The
/// cancellation token is observed at every chunk boundary, including before
/// the first read; observing it fails with [`Error::Cancelled`] and mutates
/// nothing. Payloads that fit in a single chunk are read in one shot but
/// follow the same progress discipline.
pub async fn read_large(
    path: impl AsRef<Path>,
    options: &TransferOptions,
    progress: Option<&dyn ProgressSink>,
    cancel: Option<&CancellationToken>,
) -> Result<String> {
    let path = path.as_ref();
    check_cancel(cancel, "read")?;

    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::not_found(path));
        }
        Err(e) => return Err(Error::io(e, path, "metadata")),
    };
    if !metadata.is_file() {
        return Err(Error::not_found(path));
    }
    let total = metadata.len();
    let chunk_size = options.chunk_size();

    let mut meter = ProgressMeter::start(progress, total);
    let bytes = if total <= chunk_size as u64 {
        // Small payload: a single-shot read, same progress discipline.
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::not_found(path));
            }
            Err(e) => return Err(Error::io(e, path, "read")),
        };
        meter.advance(bytes.len());
        bytes
    } else {
        let mut file = fs::File::open(path)
            .await
            .map_err(|e| Error::io(e, path, "open"))?;
        let mut bytes = Vec::with_capacity(usize::try_from(total).unwrap_or_default());
        let mut buf = vec![0u8; chunk_size];
        loop {
            check_cancel(cancel, "read")?;
            let n = file
                .read(&mut buf)
                .await
                .map_err(|e| Error::io(e, path, "read"))?;
            if n == 0 {
                break;
            }
            bytes.extend_from_slice(&buf[..n]);
            meter.advance(n);
        }
        bytes
    };

    let text = decode(bytes, options.encoding, path)?;
    meter.finish();
    debug!(path = %path.display(), bytes = text.len(), "large read complete");
    Ok(text)
}

/// Write a text file in `chunk_size_bytes` windows, atomically.
///
/// Content is streamed to `<target>.tmp`, fsynced, then renamed over the
/// target in one filesystem operation: on success the target holds exactly
/// the new content, and on cancellation or failure the old content is
/// untouched and the temporary file is removed before the error returns.
/// Progress and cancellation follow the same discipline as [`read_large`].
pub async fn write_large(
    path: impl AsRef<Path>,
    contents: &str,
    options: &TransferOptions,
    progress: Option<&dyn ProgressSink>,
    cancel: Option<&CancellationToken>,
) -> Result<()> {
    let path = path.as_ref();
    check_cancel(cancel, "write")?;

    let total = contents.len() as u64;
    let tmp_path = tmp_path_for(path);
    let mut guard = TempGuard {
        path: &tmp_path,
        armed: true,
    };
    let mut file = fs::File::create(&tmp_path)
        .await
        .map_err(|e| Error::io(e, &tmp_path, "create"))?;

    let mut meter = ProgressMeter::start(progress, total);
    for chunk in contents.as_bytes().chunks(options.chunk_size()) {
        check_cancel(cancel, "write")?;
        file.write_all(chunk)
            .await
            .map_err(|e| Error::io(e, &tmp_path, "write"))?;
        meter.advance(chunk.len());
    }

    file.sync_all()
        .await
        .map_err(|e| Error::io(e, &tmp_path, "sync"))?;
    drop(file);

    fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Error::io(e, path, "rename"))?;
    guard.disarm();
    meter.finish();
    debug!(path = %path.display(), bytes = total, "large write complete");
    Ok(())
}

/// Fail with [`Error::Cancelled`] if the token is signaled.
fn check_cancel(cancel: Option<&CancellationToken>, operation: &str) -> Result<()> {
    if let Some(token) = cancel
        && token.is_cancelled()
    {
        debug!(operation, "transfer cancelled at chunk boundary");
        return Err(Error::cancelled(operation));
    }
    Ok(())
}

fn decode(bytes: Vec<u8>, encoding: TextEncoding, path: &Path) -> Result<String> {
    match encoding {
        TextEncoding::Utf8 => {
            String::from_utf8(bytes).map_err(|e| Error::encoding(e.utf8_error(), path))
        }
        TextEncoding::Utf8Lossy => Ok(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

/// `<target>.tmp`, appended to the full file name so `notes.md` and
/// `notes.txt` in the same directory never share a temporary.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("vellum"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

/// Removes the temporary file on drop unless the rename completed.
struct TempGuard<'a> {
    path: &'a Path,
    armed: bool,
}

impl TempGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TempGuard<'_> {
    fn drop(&mut self) {
        if self.armed
            && let Err(e) = std::fs::remove_file(self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            // Best-effort: never mask the error that got us here.
            warn!(path = %self.path.display(), "failed to remove temporary file: {e}");
        }
    }
}
