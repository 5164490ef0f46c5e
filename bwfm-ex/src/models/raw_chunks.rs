//! Raw per-file chunk payloads handed to the normalizers

use crate::ixml::XmlElement;
use crate::services::file_handle::FileHandle;
use crate::wav::{BextChunk, FmtChunk};

/// Name and size reported by the file handle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInfo {
    pub filename: String,
    pub size_bytes: u64,
}

impl FileInfo {
    pub fn new(filename: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            filename: filename.into(),
            size_bytes,
        }
    }

    pub fn from_handle(file: &dyn FileHandle) -> Self {
        Self::new(file.name(), file.size_bytes())
    }
}

/// Everything one extraction gathered before normalization.
///
/// Each source is independent and may be missing: an absent `fmt`/`bext`
/// chunk is `None`, an absent iXML chunk is an empty element.
#[derive(Debug, Clone, Default)]
pub struct RawChunkSet {
    pub fmt: Option<FmtChunk>,
    pub bext: Option<BextChunk>,
    pub ixml: XmlElement,
    pub file: FileInfo,
}
