//! SMPTE timecode calculation
//!
//! Field recorders store the start of a take as a sample count since
//! midnight. The count is converted to frames at the recorder's timecode rate
//! and rendered as `HH:MM:SS:FF`, or `HH:MM:SS;FF` for drop-frame.
//!
//! The raw (fractional) timecode rate drives the frame-count arithmetic; the
//! snapped [`StandardRate`] drives the frame numbering.

use crate::framerate::{RateRatio, StandardRate};
use std::fmt;

/// Drop-frame flag value written by recorders
pub const DROP_FRAME_FLAG: &str = "DF";

const SECONDS_PER_DAY: u64 = 86_400;

/// A formatted SMPTE timecode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timecode {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub frames: u64,
    pub drop_frame: bool,
}

impl Timecode {
    /// Build a timecode from a whole frame count.
    ///
    /// Drop-frame numbering is only applied to 29.97 and 59.94; for other
    /// rates the request is ignored and the timecode is non-drop. The count is
    /// reduced to one day before numbering, so hours wrap at 24.
    pub fn from_frame_count(frame_count: u64, rate: StandardRate, drop_frame: bool) -> Self {
        let drop_frame = drop_frame && rate.supports_drop_frame();
        let fps = rate.frames_per_second();

        let frame_number = if drop_frame {
            let dropped = rate.dropped_frames_per_minute();
            let frames_per_ten_minutes = fps * 600 - 9 * dropped;
            let frames_per_minute = fps * 60 - dropped;

            // 144 ten-minute blocks per day
            let frame_count = frame_count % (144 * frames_per_ten_minutes);
            let tens = frame_count / frames_per_ten_minutes;
            let mut remainder = frame_count % frames_per_ten_minutes;
            if remainder < dropped {
                remainder += dropped;
            }
            frame_count + 9 * dropped * tens + dropped * ((remainder - dropped) / frames_per_minute)
        } else {
            frame_count % (fps * SECONDS_PER_DAY)
        };

        Self {
            hours: (frame_number / (fps * 3600)) % 24,
            minutes: (frame_number / (fps * 60)) % 60,
            seconds: (frame_number / fps) % 60,
            frames: frame_number % fps,
            drop_frame,
        }
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.drop_frame { ';' } else { ':' };
        write!(
            f,
            "{:02}:{:02}:{:02}{}{:02}",
            self.hours, self.minutes, self.seconds, separator, self.frames
        )
    }
}

/// Convert a sample position into a formatted timecode.
///
/// Returns `None` when the frame count is not a finite, non-negative number
/// (for example a zero sample rate) or when the timecode rate does not snap
/// to a standard broadcast rate.
pub fn calculate_timecode(
    samples: u64,
    sample_rate: f64,
    rate: RateRatio,
    drop_flag: Option<&str>,
) -> Option<String> {
    let raw_rate = rate.raw();
    let frame_count = (samples as f64 / sample_rate) * raw_rate;
    if !frame_count.is_finite() || frame_count < 0.0 {
        tracing::debug!(samples, sample_rate, raw_rate, "Timecode frame count is not finite");
        return None;
    }

    let Some(standard) = StandardRate::from_raw(raw_rate) else {
        tracing::debug!(raw_rate, "No standard timecode base for rate");
        return None;
    };

    let is_drop_frame = drop_flag == Some(DROP_FRAME_FLAG);
    let timecode = Timecode::from_frame_count(frame_count.round() as u64, standard, is_drop_frame);
    Some(timecode.to_string())
}
