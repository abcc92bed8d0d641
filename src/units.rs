//! Byte-count conversions shared by every report.
//!
//! All sizes are carried as `u64` bytes and only converted when a report is
//! rendered. Units are binary: 1 KB = 1024 bytes, 1 MB = 1,048,576 bytes.

pub const BYTES_PER_KB: u64 = 1024;
pub const BYTES_PER_MB: u64 = BYTES_PER_KB * 1024;

/// Bytes as kilobytes, rounded to 2 decimal places.
pub fn to_kb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_KB as f64)
}

/// Bytes as megabytes, rounded to 2 decimal places.
pub fn to_mb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_MB as f64)
}

pub fn format_kb(bytes: u64) -> String {
    format!("{:.2} KB", to_kb(bytes))
}

pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", to_mb(bytes))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
