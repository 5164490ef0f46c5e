//! bwfm-ex library interface
//!
//! Extracts production metadata (scene, take, timecode, tracks) from
//! Broadcast Wave files recorded on location.

pub mod error;
pub mod ixml;
pub mod models;
pub mod normalizers;
pub mod report;
pub mod services;
pub mod wav;

pub use crate::error::{ExtractionError, ExtractionResult};
pub use crate::models::{BwfMetadata, TrackMetadata};
pub use crate::report::render_report;
pub use crate::services::{FileHandle, InMemoryFile, LocalFile, MetadataExtractor};
