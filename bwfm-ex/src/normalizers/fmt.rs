//! `fmt ` chunk normalizer

use super::{format_bit_depth, format_sample_rate};
use crate::models::{BwfMetadata, TrackMetadata};
use crate::wav::FmtChunk;

/// Channel count, bit depth, sample rate and one unnamed track per channel
pub fn normalize_fmt(fmt: Option<&FmtChunk>) -> BwfMetadata {
    let Some(fmt) = fmt else {
        return BwfMetadata::default();
    };

    let channel_num = Some(fmt.num_channels).filter(|&n| n > 0);

    BwfMetadata {
        channel_num,
        bit_depth: Some(fmt.bits_per_sample)
            .filter(|&bits| bits > 0)
            .map(format_bit_depth),
        sample_rate: Some(fmt.sample_rate)
            .filter(|&hz| hz > 0)
            .map(|hz| format_sample_rate(u64::from(hz))),
        tracks: channel_num.map(|n| (1..=usize::from(n)).map(TrackMetadata::interleaved).collect()),
        ..Default::default()
    }
}
