//! Data models for bwfm-ex

pub mod metadata;
pub mod raw_chunks;

pub use metadata::{BwfMetadata, TrackMetadata};
pub use raw_chunks::{FileInfo, RawChunkSet};
