//! # BWFM Common Library
//!
//! Shared code for the BWF metadata tools including:
//! - Error types
//! - Configuration loading
//! - Frame rate resolution for broadcast timecode
//! - SMPTE timecode calculation and formatting

pub mod config;
pub mod error;
pub mod framerate;
pub mod timecode;

pub use error::{Error, Result};
pub use framerate::StandardRate;
