//! Interactive Query Loop
//!
//! Reads one query per line, runs it against the [`Database`] and writes the
//! response back, until the input ends or the context is cancelled.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  write prompt                │
//! │       │                      │
//! │       ▼                      │
//! │  read line ──(EOF)──> done   │
//! │       │                      │
//! │       ▼                      │
//! │  Database::handle_query      │
//! │       │                      │
//! │       ▼                      │
//! │  write response              │
//! │       │                      │
//! │  [loop back]                 │
//! └──────────────────────────────┘
//! ```
//!
//! Lines are handled strictly one at a time. The loop is generic over the
//! reader and writer so it can be driven by stdin/stdout or by test doubles.

use crate::context::Context;
use crate::database::Database;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

/// Printed before every query.
pub const PROMPT: &str = "[linekv] > ";

/// Runs the read-eval-print loop.
///
/// Returns the number of queries handled.
pub async fn run_repl<R, W>(
    mut reader: R,
    mut writer: W,
    ctx: &Context,
    db: &mut Database,
) -> io::Result<u64>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut handled = 0u64;
    let mut buf = Vec::new();

    while !ctx.is_cancelled() {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        buf.clear();
        let read = tokio::select! {
            read = reader.read_until(b'\n', &mut buf) => read?,
            _ = ctx.cancelled() => break,
        };

        if read == 0 {
            debug!("end of input");
            break;
        }

        // Bytes that are not UTF-8 become U+FFFD, which the tokenizer rejects.
        let line = String::from_utf8_lossy(&buf);
        let response = db.handle_query(ctx, strip_line_ending(&line));
        handled += 1;

        writer.write_all(response.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    writer.flush().await?;
    match db.engine_stats() {
        Some(stats) => info!(
            queries = handled,
            keys = stats.keys,
            sets = stats.sets,
            gets = stats.gets,
            hits = stats.hits,
            dels = stats.dels,
            "query loop finished"
        ),
        None => info!(queries = handled, "query loop finished"),
    }
    Ok(handled)
}

/// Removes a single trailing `\n` or `\r\n`.
fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
