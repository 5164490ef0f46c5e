//! Merge of the per-source partial records
//!
//! Sources are layered in the order fmt, bext, iXML, file; a later source
//! wins wherever it has a value. Tracks are the exception: iXML's list is
//! used only when it names at least one track, otherwise the channel-derived
//! list from `fmt` stands.

use crate::models::BwfMetadata;

/// Combine the four normalizer outputs into one record
pub fn merge(
    mut fmt: BwfMetadata,
    bext: BwfMetadata,
    mut ixml: BwfMetadata,
    mut file: BwfMetadata,
) -> BwfMetadata {
    let ixml_tracks = ixml.tracks.take().filter(|tracks| !tracks.is_empty());
    let fmt_tracks = fmt.tracks.take();
    // File info never carries tracks
    file.tracks = None;

    let mut merged = fmt.overlay(bext).overlay(ixml).overlay(file);
    merged.tracks = ixml_tracks.or(fmt_tracks);
    merged
}
