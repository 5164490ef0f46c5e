//! Human-readable metadata report

use crate::models::{BwfMetadata, TrackMetadata};

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Labelled report rows in display order; missing values are empty strings
pub fn report_rows(metadata: &BwfMetadata) -> Vec<(&'static str, String)> {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    vec![
        ("Filename", text(&metadata.filename)),
        ("Original Filename", text(&metadata.original_filename)),
        (
            "Size",
            metadata
                .size
                .filter(|&size| size > 0)
                .map(|size| format!("{:.2} MB", size as f64 / BYTES_PER_MB))
                .unwrap_or_default(),
        ),
        (
            "Length",
            metadata
                .duration
                .filter(|&seconds| seconds > 0.0)
                .map(|seconds| format!("{:.2} s", seconds))
                .unwrap_or_default(),
        ),
        ("Date", text(&metadata.date_created)),
        ("Time", text(&metadata.time_created)),
        ("Project", text(&metadata.project)),
        ("Tape", text(&metadata.tape)),
        ("Scene", text(&metadata.scene)),
        ("Take", text(&metadata.take)),
        ("Bit Depth", text(&metadata.bit_depth)),
        ("Sample Rate", text(&metadata.sample_rate)),
        ("Framerate", text(&metadata.framerate)),
        ("Timecode start", text(&metadata.timecode)),
        ("Userbits", text(&metadata.userbits)),
        (
            "Tracks",
            metadata
                .tracks
                .as_deref()
                .map(format_tracks)
                .unwrap_or_default(),
        ),
        (
            "Circled",
            match metadata.circled {
                Some(true) => "Yes".to_string(),
                Some(false) => "No".to_string(),
                None => String::new(),
            },
        ),
        ("Notes", text(&metadata.note)),
    ]
}

/// `interleave:recorder:name`, one track per line
fn format_tracks(tracks: &[TrackMetadata]) -> String {
    tracks
        .iter()
        .map(|track| {
            format!(
                "{}:{}:{}",
                track.interleave_channel,
                track.recorder_channel.as_deref().unwrap_or(""),
                track.name.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the report as aligned `Label: value` lines.
///
/// Multi-line values continue under the value column. An empty record
/// renders as an empty string.
pub fn render_report(metadata: &BwfMetadata) -> String {
    if metadata.is_empty() {
        return String::new();
    }

    let rows = report_rows(metadata);
    let width = rows.iter().map(|(label, _)| label.len() + 1).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in rows {
        let mut lines = value.lines();
        let first = lines.next().unwrap_or("");
        let heading = format!("{}:", label);
        out.push_str(format!("{:<width$} {}", heading, first, width = width).trim_end());
        out.push('\n');
        for line in lines {
            out.push_str(&format!("{:<width$} {}\n", "", line, width = width));
        }
    }
    out
}
