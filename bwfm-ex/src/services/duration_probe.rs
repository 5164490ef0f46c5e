//! Media duration probing
//!
//! Duration is optional: any probe failure leaves it absent.

use super::file_handle::FileBytes;
use std::io::Cursor;
use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Reports a file's playing time in seconds
pub trait DurationProbe: Send + Sync {
    fn probe(&self, bytes: FileBytes) -> Option<f64>;
}

/// Duration from the default audio track's frame count and sample rate
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaProbe;

impl DurationProbe for SymphoniaProbe {
    fn probe(&self, bytes: FileBytes) -> Option<f64> {
        let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

        let mut hint = Hint::new();
        hint.with_extension("wav");

        let probed = match symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        ) {
            Ok(probed) => probed,
            Err(e) => {
                debug!(error = %e, "Duration probe failed");
                return None;
            }
        };

        let track = probed
            .format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)?;

        let frames = track.codec_params.n_frames?;
        let sample_rate = track.codec_params.sample_rate.filter(|&hz| hz > 0)?;
        Some(frames as f64 / f64::from(sample_rate))
    }
}
