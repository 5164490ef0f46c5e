//! RIFF/WAVE chunk decoding
//!
//! Walks the top-level chunks of a `RIFF`, `RF64` or `BW64` file and decodes
//! the three chunks that carry production metadata: `fmt `, `bext` and
//! `iXML`. Sample data is never decoded, only skipped.
//!
//! Chunks are word aligned: a chunk with an odd size is followed by one pad
//! byte that is not counted in its size field.

use crate::error::{ExtractionError, ExtractionResult};
use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, trace, warn};

mod bext;
mod fmt;

pub use bext::BextChunk;
pub use fmt::FmtChunk;

/// RIFF header size: id (4) + size (4) + form type (4)
const RIFF_HEADER_LEN: usize = 12;

/// Chunk header size: id (4) + size (4)
const CHUNK_HEADER_LEN: usize = 8;

/// 32-bit size placeholder used by RF64 for sizes stored in `ds64`
const RF64_SIZE_PLACEHOLDER: u32 = 0xFFFF_FFFF;

/// Chunks decoded from one WAV file
#[derive(Debug, Clone, Default)]
pub struct WavChunks {
    pub fmt: Option<FmtChunk>,
    pub bext: Option<BextChunk>,
    /// iXML document text, `None` when the chunk is missing or blank
    pub ixml: Option<String>,
    /// Size of the sample data in bytes
    pub data_size: Option<u64>,
}

impl WavChunks {
    /// Decode the chunk structure of a complete WAV file image.
    ///
    /// A truncated `data` chunk is tolerated (interrupted recordings end
    /// that way). Any other structural problem is
    /// [`ExtractionError::MalformedContainer`].
    pub fn parse(bytes: &[u8]) -> ExtractionResult<Self> {
        if bytes.len() < RIFF_HEADER_LEN {
            return Err(malformed(format!(
                "file too short for RIFF header ({} bytes)",
                bytes.len()
            )));
        }

        let container = &bytes[0..4];
        let is_rf64 = match container {
            b"RIFF" => false,
            b"RF64" | b"BW64" => true,
            other => {
                return Err(malformed(format!(
                    "missing RIFF header, found '{}'",
                    chunk_name(other)
                )))
            }
        };

        if &bytes[8..12] != b"WAVE" {
            return Err(malformed(format!(
                "could not find the 'WAVE' form type, found '{}'",
                chunk_name(&bytes[8..12])
            )));
        }

        let mut chunks = WavChunks::default();
        let mut ds64_data_size: Option<u64> = None;
        let mut offset = RIFF_HEADER_LEN;
        let mut truncated = false;

        while offset + CHUNK_HEADER_LEN <= bytes.len() {
            let id = &bytes[offset..offset + 4];
            let declared = LittleEndian::read_u32(&bytes[offset + 4..offset + 8]);
            let body_start = offset + CHUNK_HEADER_LEN;

            let size = match (id, ds64_data_size) {
                (b"data", Some(size)) if declared == RF64_SIZE_PLACEHOLDER => size,
                _ => u64::from(declared),
            };

            let remaining = (bytes.len() - body_start) as u64;
            if size > remaining {
                if id == b"data" {
                    warn!(
                        declared = size,
                        available = remaining,
                        "Truncated data chunk, using available bytes"
                    );
                    chunks.data_size = Some(remaining);
                    truncated = true;
                    break;
                }
                return Err(malformed(format!(
                    "chunk '{}' declares {} bytes but only {} remain",
                    chunk_name(id),
                    size,
                    remaining
                )));
            }

            let body_end = body_start + size as usize;
            let body = &bytes[body_start..body_end];

            match id {
                b"ds64" if is_rf64 => {
                    ds64_data_size = parse_ds64(body)?;
                }
                b"fmt " => {
                    if chunks.fmt.is_none() {
                        let fmt = FmtChunk::parse(body)?;
                        debug!(
                            format_tag = fmt.format_tag,
                            channels = fmt.num_channels,
                            sample_rate = fmt.sample_rate,
                            byte_rate = fmt.byte_rate,
                            block_align = fmt.block_align,
                            bits_per_sample = fmt.bits_per_sample,
                            "Decoded fmt chunk"
                        );
                        chunks.fmt = Some(fmt);
                    }
                }
                b"bext" => {
                    if chunks.bext.is_none() {
                        chunks.bext = BextChunk::parse(body);
                        if let Some(bext) = &chunks.bext {
                            debug!(
                                description = %bext.description,
                                originator = %bext.originator,
                                originator_reference = %bext.originator_reference,
                                time_reference = bext.time_reference,
                                version = bext.version,
                                coding_history = %bext.coding_history,
                                "Decoded bext chunk"
                            );
                        }
                    }
                }
                b"iXML" => {
                    if chunks.ixml.is_none() {
                        chunks.ixml = decode_ixml_text(body);
                    }
                }
                b"data" => {
                    chunks.data_size = Some(size);
                }
                other => {
                    trace!(chunk = %chunk_name(other), size, "Skipping chunk");
                }
            }

            // Word alignment pad byte
            offset = body_end + (size as usize & 1);
        }

        if !truncated && offset < bytes.len() {
            debug!(
                trailing = bytes.len() - offset,
                "Ignoring trailing bytes after last chunk"
            );
        }

        debug!(
            fmt = chunks.fmt.is_some(),
            bext = chunks.bext.is_some(),
            ixml = chunks.ixml.is_some(),
            data_size = ?chunks.data_size,
            "Decoded WAV chunks"
        );

        Ok(chunks)
    }
}

/// `ds64` body: RIFF size (8), data size (8), sample count (8), table...
fn parse_ds64(body: &[u8]) -> ExtractionResult<Option<u64>> {
    if body.len() < 16 {
        return Err(malformed(format!("ds64 chunk too short ({} bytes)", body.len())));
    }
    Ok(Some(LittleEndian::read_u64(&body[8..16])))
}

/// iXML is UTF-8 text, often NUL padded to reserve space for later edits
fn decode_ixml_text(body: &[u8]) -> Option<String> {
    let text = match std::str::from_utf8(body) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!(error = %e, "iXML chunk is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(body).into_owned()
        }
    };

    let trimmed = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Decode a fixed-width, NUL padded ASCII field
pub(crate) fn fixed_string(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).trim_end().to_string()
}

fn chunk_name(id: &[u8]) -> String {
    String::from_utf8_lossy(id).into_owned()
}

fn malformed(message: String) -> ExtractionError {
    ExtractionError::MalformedContainer(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(id);
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(body);
        if body.len() % 2 == 1 {
            out.push(0);
        }
        out
    }

    fn riff(container: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
        let body: Vec<u8> = chunks.concat();
        let mut out = Vec::new();
        out.extend_from_slice(container);
        out.extend_from_slice(&((body.len() + 4) as u32).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(&body);
        out
    }

    fn fmt_body(channels: u16, sample_rate: u32, bits: u16) -> Vec<u8> {
        let block_align = channels * bits / 8;
        let mut body = Vec::new();
        body.extend_from_slice(&1u16.to_le_bytes());
        body.extend_from_slice(&channels.to_le_bytes());
        body.extend_from_slice(&sample_rate.to_le_bytes());
        body.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
        body.extend_from_slice(&block_align.to_le_bytes());
        body.extend_from_slice(&bits.to_le_bytes());
        body
    }

    #[test]
    fn test_too_short() {
        let result = WavChunks::parse(b"RIFF");
        assert!(matches!(result, Err(ExtractionError::MalformedContainer(_))));
    }

    #[test]
    fn test_not_riff() {
        let result = WavChunks::parse(b"OggS\0\0\0\0WAVEfmt ");
        assert!(matches!(result, Err(ExtractionError::MalformedContainer(_))));
    }

    #[test]
    fn test_not_wave_form() {
        let bytes = riff(b"RIFF", &[]);
        let mut bytes = bytes;
        bytes[8..12].copy_from_slice(b"AVI ");
        let result = WavChunks::parse(&bytes);
        assert!(matches!(result, Err(ExtractionError::MalformedContainer(_))));
    }

    #[test]
    fn test_fmt_and_data() {
        let bytes = riff(
            b"RIFF",
            &[chunk(b"fmt ", &fmt_body(2, 48000, 24)), chunk(b"data", &[0u8; 12])],
        );
        let chunks = WavChunks::parse(&bytes).unwrap();
        let fmt = chunks.fmt.unwrap();
        assert_eq!(fmt.num_channels, 2);
        assert_eq!(fmt.sample_rate, 48000);
        assert_eq!(fmt.bits_per_sample, 24);
        assert_eq!(chunks.data_size, Some(12));
        assert!(chunks.bext.is_none());
        assert!(chunks.ixml.is_none());
    }

    #[test]
    fn test_odd_chunk_is_padded() {
        let bytes = riff(
            b"RIFF",
            &[
                chunk(b"junk", &[1, 2, 3]),
                chunk(b"iXML", b"<BWFXML/>"),
                chunk(b"fmt ", &fmt_body(1, 44100, 16)),
            ],
        );
        let chunks = WavChunks::parse(&bytes).unwrap();
        assert_eq!(chunks.ixml.as_deref(), Some("<BWFXML/>"));
        assert_eq!(chunks.fmt.unwrap().num_channels, 1);
    }

    #[test]
    fn test_ixml_padding_trimmed() {
        let mut body = b"  <BWFXML></BWFXML>\n".to_vec();
        body.extend_from_slice(&[0u8; 32]);
        let bytes = riff(b"RIFF", &[chunk(b"iXML", &body)]);
        let chunks = WavChunks::parse(&bytes).unwrap();
        assert_eq!(chunks.ixml.as_deref(), Some("<BWFXML></BWFXML>"));
    }

    #[test]
    fn test_blank_ixml_is_absent() {
        let bytes = riff(b"RIFF", &[chunk(b"iXML", &[0u8; 64])]);
        let chunks = WavChunks::parse(&bytes).unwrap();
        assert!(chunks.ixml.is_none());
    }

    #[test]
    fn test_truncated_data_tolerated() {
        let mut bytes = riff(b"RIFF", &[chunk(b"fmt ", &fmt_body(2, 48000, 16))]);
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&1000u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 10]);

        let chunks = WavChunks::parse(&bytes).unwrap();
        assert_eq!(chunks.data_size, Some(10));
        assert!(chunks.fmt.is_some());
    }

    #[test]
    fn test_truncated_metadata_chunk_is_malformed() {
        let mut bytes = riff(b"RIFF", &[chunk(b"fmt ", &fmt_body(2, 48000, 16))]);
        bytes.extend_from_slice(b"bext");
        bytes.extend_from_slice(&602u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 20]);

        let result = WavChunks::parse(&bytes);
        assert!(matches!(result, Err(ExtractionError::MalformedContainer(_))));
    }

    #[test]
    fn test_rf64_uses_ds64_data_size() {
        let mut ds64 = Vec::new();
        ds64.extend_from_slice(&0u64.to_le_bytes());
        ds64.extend_from_slice(&8u64.to_le_bytes());
        ds64.extend_from_slice(&0u64.to_le_bytes());
        ds64.extend_from_slice(&0u32.to_le_bytes());

        let mut data = Vec::new();
        data.extend_from_slice(b"data");
        data.extend_from_slice(&RF64_SIZE_PLACEHOLDER.to_le_bytes());
        data.extend_from_slice(&[0u8; 8]);

        let bytes = riff(
            b"RF64",
            &[chunk(b"ds64", &ds64), chunk(b"fmt ", &fmt_body(2, 48000, 24)), data],
        );
        let chunks = WavChunks::parse(&bytes).unwrap();
        assert_eq!(chunks.data_size, Some(8));
        assert_eq!(chunks.fmt.unwrap().bits_per_sample, 24);
    }

    #[test]
    fn test_missing_fmt_is_not_an_error() {
        let bytes = riff(b"RIFF", &[chunk(b"data", &[0u8; 4])]);
        let chunks = WavChunks::parse(&bytes).unwrap();
        assert!(chunks.fmt.is_none());
    }

    #[test]
    fn test_fixed_string() {
        assert_eq!(fixed_string(b"2024-05-01\0\0"), "2024-05-01");
        assert_eq!(fixed_string(b"abc  "), "abc");
        assert_eq!(fixed_string(&[0u8; 8]), "");
    }
}
