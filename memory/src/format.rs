//! Human-readable memory figures. One MB here is 1024 * 1024 bytes.

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Formats bytes as MB with one decimal, e.g. `"50.0 MB"`.
pub fn format_mb(bytes: u64) -> String {
    let tenths = (bytes_to_mb(bytes) * 10.0).round() / 10.0;
    format!("{tenths:.1} MB")
}

/// Formats bytes as whole MB, rounding half away from zero, e.g. `"150 MB"`.
pub fn format_mb_rounded(bytes: u64) -> String {
    format!("{} MB", bytes_to_mb(bytes).round() as u64)
}
