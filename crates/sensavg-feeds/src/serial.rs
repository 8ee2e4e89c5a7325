//! Serial device feed.
//!
//! The device is opened 9600 8N1 without flow control. The returned
//! [`SerialStream`] implements `AsyncRead` and is handed straight to
//! [`run_ingest`](crate::ingest::run_ingest).

use tokio_serial::{SerialPortBuilderExt, SerialStream};

use crate::error::IngestError;

/// Fixed line speed of the sensor link.
pub const BAUD_RATE: u32 = 9600;

/// Open `path` as an async serial stream.
///
/// # Errors
/// Returns [`IngestError::DeviceOpen`] if the port cannot be opened or
/// configured.
pub fn open_serial(path: &str) -> Result<SerialStream, IngestError> {
    let port = tokio_serial::new(path, BAUD_RATE)
        .data_bits(tokio_serial::DataBits::Eight)
        .parity(tokio_serial::Parity::None)
        .stop_bits(tokio_serial::StopBits::One)
        .flow_control(tokio_serial::FlowControl::None)
        .open_native_async()
        .map_err(|source| IngestError::DeviceOpen {
            path: path.to_string(),
            source,
        })?;

    tracing::info!(path, baud = BAUD_RATE, "serial device opened");
    Ok(port)
}
