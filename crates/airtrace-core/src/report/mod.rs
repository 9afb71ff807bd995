//! Flat CSV export of a sample log, and re-import of such a file.
//!
//! Null fields become empty cells. Cells containing a delimiter, quote or
//! line break are quoted with embedded quotes doubled.

mod reader;
mod writer;

pub use reader::ReportReader;
pub use writer::ReportWriter;

use crate::sample::Sample;

/// Fixed column order of an exported report.
pub const COLUMNS: [&str; 8] = [
    "Time", "Location", "SSID", "BSSID", "Signal", "Latency", "Download", "Upload",
];

/// Timestamp format used in the `Time` column.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serialize a sample log into CSV bytes.
pub fn export(samples: &[Sample]) -> Vec<u8> {
    ReportWriter::to_bytes(samples)
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
