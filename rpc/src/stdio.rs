//! stdio transport.
//!
//! Newline-delimited JSON: one request per line on stdin, one response per
//! line on stdout. Blank lines are skipped; EOF ends the loop. Logs never go
//! to stdout.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, trace};

use crate::dispatcher::Dispatcher;
use crate::error::RpcError;

/// Serve the process's stdin/stdout until EOF.
pub async fn serve_stdio(dispatcher: &Dispatcher) -> Result<(), RpcError> {
    info!("stdio transport ready");
    serve_lines(dispatcher, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Serve any line-oriented reader/writer pair until the reader hits EOF.
pub async fn serve_lines<R, W>(dispatcher: &Dispatcher, reader: R, mut writer: W) -> Result<(), RpcError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let io_error = |e: std::io::Error| RpcError::Server(format!("stdio: {e}"));
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await.map_err(io_error)? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        trace!(line, "received");

        let response = dispatcher.handle_raw(line.as_bytes()).await;

        let mut out = serde_json::to_vec(&response).map_err(|e| RpcError::Internal(e.to_string()))?;
        out.push(b'\n');
        writer.write_all(&out).await.map_err(io_error)?;
        writer.flush().await.map_err(io_error)?;
    }

    info!("stdin closed");
    Ok(())
}
