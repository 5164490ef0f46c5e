//! File handle normalizer

use super::present;
use crate::models::{BwfMetadata, FileInfo};

/// File name and size.
///
/// A size of zero is reported as absent, the same as a missing size.
pub fn normalize_file(file: &FileInfo) -> BwfMetadata {
    BwfMetadata {
        filename: present(&file.filename),
        size: Some(file.size_bytes).filter(|&size| size > 0),
        ..Default::default()
    }
}
