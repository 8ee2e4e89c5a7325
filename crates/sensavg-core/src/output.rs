//! Rendering of [`Emission`] values as output lines.

use crate::types::{Emission, OutputFormat};

/// Local timestamp layout of CSV output, e.g. `2024-Jan-15 10:00:03`.
pub const CSV_TIMESTAMP_FORMAT: &str = "%Y-%b-%d %H:%M:%S";

/// Render `emission` as a single line, without the trailing newline.
pub fn render_line(emission: &Emission, format: OutputFormat) -> String {
    match format {
        OutputFormat::Csv => format!(
            "{},{}",
            emission.ts.format(CSV_TIMESTAMP_FORMAT),
            emission.reading
        ),
        // Serialising plain integers and a chrono timestamp cannot fail.
        OutputFormat::Jsonl => serde_json::to_string(emission).unwrap_or_default(),
    }
}
