//! Extraction services

pub mod duration_probe;
pub mod file_handle;
pub mod metadata_extractor;
pub mod metadata_merger;

pub use duration_probe::{DurationProbe, SymphoniaProbe};
pub use file_handle::{is_wav_file_name, FileBytes, FileHandle, InMemoryFile, LocalFile};
pub use metadata_extractor::{normalize_and_merge, MetadataExtractor};
pub use metadata_merger::merge;
