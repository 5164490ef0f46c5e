//! iXML normalizer
//!
//! Reads the production fields recorders write into `BWFXML`. Nested blocks
//! (`SPEED`, `HISTORY`, `BEXT`, `TRACK_LIST`) are read from their first entry.

use super::{format_bit_depth, format_sample_rate, leading_integer};
use crate::ixml::XmlElement;
use crate::models::{BwfMetadata, TrackMetadata};
use bwfm_common::framerate::{format_frame_rate, RateRatio};
use bwfm_common::timecode::calculate_timecode;
use once_cell::sync::Lazy;
use regex::Regex;

/// Sample rate field of a coding-history line: `A=PCM,F=48000,W=24,...`
static CODING_HISTORY_RATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r",F=(\d+),").expect("coding history pattern is valid")
});

/// Production fields carried by an iXML document.
///
/// `tracks` is always set: an empty list means the document names no tracks.
pub fn normalize_ixml(xml: &XmlElement) -> BwfMetadata {
    let speed = xml.first_element("SPEED");
    let text = |name: &str| xml.first_text(name).map(str::to_string);

    BwfMetadata {
        project: text("PROJECT"),
        scene: text("SCENE"),
        take: text("TAKE"),
        tape: text("TAPE"),
        note: text("NOTE"),
        userbits: text("UBITS"),
        original_filename: xml
            .first_element("HISTORY")
            .and_then(|history| history.first_text("ORIGINAL_FILENAME"))
            .map(str::to_string),
        bit_depth: speed
            .and_then(|s| s.first_text("AUDIO_BIT_DEPTH"))
            .map(format_bit_depth),
        sample_rate: speed
            .and_then(|s| s.first_text("FILE_SAMPLE_RATE"))
            .and_then(leading_integer)
            .map(format_sample_rate),
        framerate: speed.and_then(frame_rate),
        timecode: speed.and_then(|s| {
            speed_timecode(s).or_else(|| {
                xml.first_element("BEXT")
                    .and_then(|bext| coding_history_timecode(s, bext))
            })
        }),
        circled: circled(xml),
        tracks: Some(tracks(xml)),
        ..Default::default()
    }
}

/// `TIMECODE_RATE`, or the unknown rate when missing or unparsable
fn timecode_rate(speed: &XmlElement) -> RateRatio {
    speed
        .first_text("TIMECODE_RATE")
        .and_then(RateRatio::parse)
        .unwrap_or(RateRatio::UNKNOWN)
}

fn frame_rate(speed: &XmlElement) -> Option<String> {
    let rate = timecode_rate(speed);
    format_frame_rate(rate.numerator, rate.denominator, speed.first_text("TIMECODE_FLAG"))
}

/// Combine a `_LO`/`_HI` (or `_LOW`/`_HIGH`) pair of 32-bit halves.
///
/// The low half is required; a missing high half counts as zero.
fn sample_position(element: &XmlElement, low: &str, high: &str) -> Option<u64> {
    let low = element.first_text(low).and_then(leading_integer)?;
    let high = element
        .first_text(high)
        .and_then(leading_integer)
        .unwrap_or(0);
    Some(high.wrapping_shl(32).wrapping_add(low))
}

/// Timecode from the `SPEED` timestamp fields
fn speed_timecode(speed: &XmlElement) -> Option<String> {
    let sample_rate = speed
        .first_text("TIMESTAMP_SAMPLE_RATE")
        .and_then(leading_integer)?;
    let samples = sample_position(
        speed,
        "TIMESTAMP_SAMPLES_SINCE_MIDNIGHT_LO",
        "TIMESTAMP_SAMPLES_SINCE_MIDNIGHT_HI",
    )?;
    calculate_timecode(
        samples,
        sample_rate as f64,
        timecode_rate(speed),
        speed.first_text("TIMECODE_FLAG"),
    )
}

/// Timecode from the iXML copy of the bext time reference, with the sample
/// rate taken from the coding history
fn coding_history_timecode(speed: &XmlElement, bext: &XmlElement) -> Option<String> {
    let sample_rate = bext
        .first_text("BWF_CODING_HISTORY")
        .and_then(coding_history_sample_rate)
        .filter(|&hz| hz > 0)?;
    let samples = sample_position(bext, "BWF_TIME_REFERENCE_LOW", "BWF_TIME_REFERENCE_HIGH")?;
    calculate_timecode(
        samples,
        sample_rate as f64,
        timecode_rate(speed),
        speed.first_text("TIMECODE_FLAG"),
    )
}

fn coding_history_sample_rate(history: &str) -> Option<u64> {
    CODING_HISTORY_RATE
        .captures(history)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

fn circled(xml: &XmlElement) -> Option<bool> {
    match xml.first_text("CIRCLED")? {
        "TRUE" => Some(true),
        "FALSE" => Some(false),
        _ => None,
    }
}

fn tracks(xml: &XmlElement) -> Vec<TrackMetadata> {
    let Some(track_list) = xml.first_element("TRACK_LIST") else {
        return Vec::new();
    };

    track_list
        .elements("TRACK")
        .filter_map(|track| {
            let interleave_channel = track.first_text("INTERLEAVE_INDEX")?;
            Some(TrackMetadata {
                interleave_channel: interleave_channel.to_string(),
                recorder_channel: track.first_text("CHANNEL_INDEX").map(str::to_string),
                name: track.first_text("NAME").map(str::to_string),
            })
        })
        .collect()
}
