//! Test Helper Utilities
//!
//! Shared utilities for testing bwfm-ex

#![allow(dead_code)]

pub mod audio_generator;
pub mod bwf_builder;
pub mod log_capture;

pub use audio_generator::{generate_test_wav, AudioConfig};
pub use bwf_builder::BwfBuilder;
pub use log_capture::LogCapture;
