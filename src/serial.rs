use std::io::{self, ErrorKind, Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context as _, Result};
use serialport::SerialPort;

use crate::cli::SerialArgs;

pub fn open(args: &SerialArgs) -> Result<Box<dyn SerialPort>> {
    let port = serialport::new(&args.port, args.baud_rate)
        .timeout(Duration::from_millis(args.poll_interval_ms))
        .open()
        .with_context(|| format!("failed to open serial port: {}", args.port))?;

    tracing::info!(port = %args.port, baud_rate = args.baud_rate, "opened serial port");

    Ok(port)
}

/// Wraps a stream whose reads time out periodically.
///
/// A timed-out read is retried until `stop` is raised, so callers see a plain
/// blocking stream. Once `stop` is set the pending read fails with
/// [`ErrorKind::TimedOut`].
#[derive(Debug)]
pub struct Interruptible<S> {
    inner: S,
    stop: Arc<AtomicBool>,
}

impl<S> Interruptible<S> {
    pub fn new(inner: S, stop: Arc<AtomicBool>) -> Self {
        Self { inner, stop }
    }
}

impl<S: Read> Read for Interruptible<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.inner.read(buf) {
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    if self.stop.load(Ordering::SeqCst) {
                        return Err(io::Error::new(
                            ErrorKind::TimedOut,
                            "read cancelled by interrupt",
                        ));
                    }
                }
                other => return other,
            }
        }
    }
}

impl<S: Write> Write for Interruptible<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<S> Drop for Interruptible<S> {
    fn drop(&mut self) {
        tracing::debug!("closing stream");
    }
}
