#![allow(dead_code)]
//! FakeSerial: an [`AsyncRead`] whose read boundaries are controlled by
//! the test.
//!
//! Every [`FakeSerialWriter::send_chunk`] becomes exactly one delivery to the
//! ingestion loop (provided it fits the 1024-byte receive buffer), which
//! makes chunk-boundary behaviour reproducible. Dropping the writer turns
//! the reader into an idle source that only ever returns empty polls.

use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;

/// Handle for pushing raw chunks into a [`FakeSerial`] reader.
pub struct FakeSerialWriter {
    tx: mpsc::UnboundedSender<std::io::Result<Bytes>>,
}

impl FakeSerialWriter {
    /// Queue one delivery.
    pub fn send_chunk(&self, chunk: impl Into<Bytes>) {
        let _ = self.tx.send(Ok(chunk.into()));
    }

    /// Queue several deliveries in order.
    pub fn send_chunks(&self, chunks: &[&'static [u8]]) {
        for chunk in chunks {
            self.send_chunk(Bytes::from_static(chunk));
        }
    }

    /// Make the next read fail, as an unplugged device would.
    pub fn fail(&self, kind: std::io::ErrorKind) {
        let _ = self.tx.send(Err(std::io::Error::new(kind, "fake serial failure")));
    }

    /// Close the writer side.
    pub fn close(self) {}
}

/// Channel-backed stream of chunk results.
pub struct FakeSerialStream {
    rx: mpsc::UnboundedReceiver<std::io::Result<Bytes>>,
}

impl Stream for FakeSerialStream {
    type Item = std::io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

pub type FakeSerial = StreamReader<FakeSerialStream, Bytes>;

/// Create a linked writer/reader pair.
///
/// ```rust
/// let (writer, serial) = fake_serial();
/// writer.send_chunk(&b"1,2\n"[..]);
/// ```
pub fn fake_serial() -> (FakeSerialWriter, FakeSerial) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        FakeSerialWriter { tx },
        StreamReader::new(FakeSerialStream { rx }),
    )
}
