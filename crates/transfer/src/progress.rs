//! Progress reporting for chunked transfers.

use tracing::trace;

/// Receives integer progress percentages during a transfer.
///
/// Implemented for any `Fn(u8) + Send + Sync` closure, so a plain closure is
/// a sink. Sinks may be invoked from a background execution context and must
/// tolerate zero or more invocations.
pub trait ProgressSink: Send + Sync {
    /// Record that the transfer has reached `percent` percent, in `[0, 100]`.
    fn report(&self, percent: u8);
}

impl<F> ProgressSink for F
where
    F: Fn(u8) + Send + Sync,
{
    fn report(&self, percent: u8) {
        self(percent);
    }
}

/// Tracks bytes moved and drives an optional [`ProgressSink`].
///
/// Emits `0` when the transfer starts, a floor-rounded percentage capped at
/// 99 after each chunk, and `100` exactly once on completion, so the emitted
/// sequence is monotonically non-decreasing and ends at 100 on success.
pub(crate) struct ProgressMeter<'a> {
    sink: Option<&'a dyn ProgressSink>,
    total_bytes: u64,
    bytes_done: u64,
}

impl<'a> ProgressMeter<'a> {
    /// Begin a transfer of `total_bytes`, emitting the initial `0`.
    pub(crate) fn start(sink: Option<&'a dyn ProgressSink>, total_bytes: u64) -> Self {
        if let Some(sink) = sink {
            sink.report(0);
        }
        trace!(total_bytes, "transfer started");
        Self {
            sink,
            total_bytes,
            bytes_done: 0,
        }
    }

    /// Record `len` more bytes moved and emit the proportional percentage.
    pub(crate) fn advance(&mut self, len: usize) {
        self.bytes_done += len as u64;
        if let Some(sink) = self.sink {
            let percent = if self.total_bytes == 0 {
                0
            } else {
                // Capped at 99: the final 100 is reserved for `finish`.
                (self.bytes_done.saturating_mul(100) / self.total_bytes).min(99) as u8
            };
            sink.report(percent);
        }
    }

    /// Emit the final `100` for a successful transfer.
    pub(crate) fn finish(self) {
        if let Some(sink) = self.sink {
            sink.report(100);
        }
        trace!(bytes = self.bytes_done, "transfer complete");
    }
}
