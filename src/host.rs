//! JSON-lines request loop.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use dashmark_core::result::AppResult;
use dashmark_entity::scan::{ScanRequest, ScanResponse};
use dashmark_service::scan::ScanService;

/// Answer a single request line.
///
/// A line that does not parse as a request yields an error response
/// instead of ending the session.
pub async fn handle_line(service: &ScanService, line: &str) -> ScanResponse {
    match serde_json::from_str::<ScanRequest>(line) {
        Ok(request) => {
            debug!(mode = %request.mode, "Received scan request");
            service.handle(request).await
        }
        Err(e) => {
            warn!(error = %e, "Rejected malformed request");
            ScanResponse::error(format!("Invalid request: {}", e))
        }
    }
}

/// Serve requests from `reader` until EOF, writing one response per line.
///
/// Blank lines are ignored. Returns the number of requests answered.
pub async fn serve<R, W>(service: &ScanService, reader: R, mut writer: W) -> AppResult<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut answered = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(service, line).await;
        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
        answered += 1;
    }

    Ok(answered)
}
