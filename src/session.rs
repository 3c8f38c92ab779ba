use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context as _, Result};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::decoder::Decode;
use crate::error::Error;
use crate::record::Stamped;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// The first decode error ends the loop with that error.
    Abort,
    /// Malformed lines and commands are logged and skipped.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEnd {
    Interrupted,
    Exhausted,
}

/// Decodes readings until the stream ends or `stop` is raised, handing each
/// one to `sink` stamped with the time it was decoded.
///
/// The decoder, and the stream inside it, is dropped exactly once when this
/// returns, whichever way the loop ends.
pub fn run<D, F>(
    mut decoder: D,
    clock: &Clock,
    stop: &AtomicBool,
    policy: ErrorPolicy,
    mut sink: F,
) -> Result<LoopEnd>
where
    D: Decode,
    F: FnMut(Stamped<D::Item>) -> Result<()>,
{
    let mut count: u64 = 0;

    loop {
        if stop.load(Ordering::SeqCst) {
            info!(count, "read loop interrupted");
            return Ok(LoopEnd::Interrupted);
        }

        match decoder.decode_next() {
            Ok(Some(record)) => {
                let measured_at = clock.now();
                count += 1;
                sink(Stamped {
                    measured_at,
                    record,
                })?;
            }
            Ok(None) => {
                info!(count, "stream ended");
                return Ok(LoopEnd::Exhausted);
            }
            Err(e) if stop.load(Ordering::SeqCst) => {
                debug!(error = %e, "pending read abandoned");
                info!(count, "read loop interrupted");
                return Ok(LoopEnd::Interrupted);
            }
            Err(e) if policy == ErrorPolicy::Skip && e.is_skippable() => {
                warn!(error = %e, "skipping unreadable record");
            }
            Err(e @ Error::IncompleteRead { .. }) if policy == ErrorPolicy::Skip => {
                warn!(error = %e, count, "stream ended mid-record");
                return Ok(LoopEnd::Exhausted);
            }
            Err(e) => return Err(e).context("failed to decode record"),
        }
    }
}
