//! Output sink: writes each emission as one line.

use sensavg_core::output::render_line;
use sensavg_core::{Emission, OutputFormat};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::error::IngestError;

/// Drain `rx` into `writer`, one rendered line per emission, flushing after
/// every line. Returns the number of lines written once the channel closes.
pub async fn write_emissions<W>(
    mut rx: mpsc::Receiver<Emission>,
    mut writer: W,
    format: OutputFormat,
) -> Result<u64, IngestError>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while let Some(emission) = rx.recv().await {
        let mut line = render_line(&emission, format);
        line.push('\n');
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(IngestError::Sink)?;
        writer.flush().await.map_err(IngestError::Sink)?;
        written += 1;
    }
    Ok(written)
}
