//! Canonical BWF production metadata
//!
//! Every field is optional. A field that is `None` is omitted from the
//! serialized record entirely, so downstream consumers never see `null` or an
//! empty-string placeholder.

use serde::{Deserialize, Serialize};

/// Canonical metadata record for one BWF file
///
/// Normalizers produce partial records of this type; the merger combines them
/// into the final record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BwfMetadata {
    // === Identity ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    // === Timing ===
    /// Origination date, source format preserved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    /// Origination time, source format preserved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_created: Option<String>,
    /// Duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    // === Production slate ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tape: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userbits: Option<String>,
    /// Circled take; `None` means the recorder did not say
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circled: Option<bool>,

    // === Audio format ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_num: Option<u16>,
    /// e.g. "24 bits"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_depth: Option<String>,
    /// e.g. "48 kHz"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<String>,

    // === Timecode ===
    /// e.g. "25" or "29.97 DF"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framerate: Option<String>,
    /// SMPTE start timecode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timecode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<TrackMetadata>>,
}

/// One audio track of the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackMetadata {
    /// 1-based position in the sample interleaving
    pub interleave_channel: String,
    /// Physical recorder input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorder_channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TrackMetadata {
    /// Track known only by its interleave position
    pub fn interleaved(channel: usize) -> Self {
        Self {
            interleave_channel: channel.to_string(),
            recorder_channel: None,
            name: None,
        }
    }
}

macro_rules! overlay_fields {
    ($base:ident, $top:ident, { $($field:ident),* $(,)? }) => {
        BwfMetadata {
            $($field: $top.$field.or($base.$field),)*
        }
    };
}

impl BwfMetadata {
    /// Field-wise union where `top` wins wherever it has a value
    pub fn overlay(self, top: BwfMetadata) -> BwfMetadata {
        let base = self;
        overlay_fields!(base, top, {
            filename,
            original_filename,
            size,
            date_created,
            time_created,
            duration,
            project,
            scene,
            take,
            tape,
            note,
            userbits,
            circled,
            channel_num,
            bit_depth,
            sample_rate,
            framerate,
            timecode,
            tracks,
        })
    }

    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        *self == BwfMetadata::default()
    }
}
