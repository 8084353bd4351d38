//! Concurrent stream drainers (non-UTF8-safe).
//!
//! OS pipe buffers are bounded: if only one of a subprocess's output streams
//! is read, the subprocess stalls forever once it fills the other. Both
//! streams therefore get their own reader task, spawned immediately after
//! the child starts, and the invoker waits for both before reading the exit
//! status. Bytes are decoded lossily so non-UTF8 output cannot kill a
//! reader mid-stream.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::progress::ProgressParser;

/// Drains stdout byte-by-byte, feeding each `\r`-terminated line unit to the
/// progress parser while accumulating the raw stream verbatim.
///
/// The tool repaints progress with carriage returns, so the unit boundary is
/// `\r`, not `\n`; newline characters stay inside the current unit and are
/// split out by the parser's header handling. Whatever remains in the buffer
/// at end-of-stream is flushed as a final unit before the end event fires.
pub(crate) fn spawn_stdout_drainer(
    stream: impl AsyncRead + Unpin + Send + 'static,
    mut parser: ProgressParser,
) -> JoinHandle<String> {
    tokio::spawn(async move {
        let mut stream = stream;
        let mut raw: Vec<u8> = Vec::new();
        let mut unit: Vec<u8> = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            match stream.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => {
                    for &byte in &chunk[..n] {
                        raw.push(byte);
                        if byte == b'\r' {
                            parser.observe_line(&String::from_utf8_lossy(&unit));
                            unit.clear();
                        } else {
                            unit.push(byte);
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "stdout drainer exiting on read error");
                    break;
                }
            }
        }

        if !unit.is_empty() {
            parser.observe_line(&String::from_utf8_lossy(&unit));
        }
        parser.finish();

        String::from_utf8_lossy(&raw).into_owned()
    })
}

/// Drains stderr into a raw accumulator; no structured parsing.
pub(crate) fn spawn_stderr_drainer(
    stream: impl AsyncRead + Unpin + Send + 'static,
) -> JoinHandle<String> {
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut raw: Vec<u8> = Vec::new();
        let mut buf: Vec<u8> = Vec::with_capacity(1024);

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => raw.extend_from_slice(&buf),
                Err(e) => {
                    warn!(error = %e, "stderr drainer exiting on read error");
                    break;
                }
            }
        }

        String::from_utf8_lossy(&raw).into_owned()
    })
}
