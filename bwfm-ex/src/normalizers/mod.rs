//! Chunk normalizers
//!
//! Each normalizer turns one raw source into a partial [`BwfMetadata`]. A
//! field is only set when its source yields a usable value; empty strings are
//! never carried forward.
//!
//! [`BwfMetadata`]: crate::models::BwfMetadata

mod bext;
mod file;
mod fmt;
mod ixml;

pub use bext::normalize_bext;
pub use file::normalize_file;
pub use fmt::normalize_fmt;
pub use ixml::normalize_ixml;

/// Text passed through as written, or `None` when it is empty
pub(crate) fn present(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// `"24 bits"`
pub(crate) fn format_bit_depth(bits: impl std::fmt::Display) -> String {
    format!("{} bits", bits)
}

/// `"48 kHz"`, `"44.1 kHz"`
pub(crate) fn format_sample_rate(hz: u64) -> String {
    format!("{} kHz", hz as f64 / 1000.0)
}

/// Leading decimal digits of `text` after optional whitespace
pub(crate) fn leading_integer(text: &str) -> Option<u64> {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
