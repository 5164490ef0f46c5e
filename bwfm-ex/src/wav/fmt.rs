//! `fmt ` chunk decoding

use crate::error::{ExtractionError, ExtractionResult};
use byteorder::{ByteOrder, LittleEndian};

/// Minimum `fmt ` body: the PCM WAVEFORMAT fields
const FMT_MIN_LEN: usize = 16;

/// Audio format description from the `fmt ` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtChunk {
    /// 1 = PCM, 3 = IEEE float, 0xFFFE = extensible
    pub format_tag: u16,
    pub num_channels: u16,
    /// Samples per second per channel
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl FmtChunk {
    pub(crate) fn parse(body: &[u8]) -> ExtractionResult<Self> {
        if body.len() < FMT_MIN_LEN {
            return Err(ExtractionError::MalformedContainer(format!(
                "fmt chunk too short ({} bytes)",
                body.len()
            )));
        }

        Ok(Self {
            format_tag: LittleEndian::read_u16(&body[0..2]),
            num_channels: LittleEndian::read_u16(&body[2..4]),
            sample_rate: LittleEndian::read_u32(&body[4..8]),
            byte_rate: LittleEndian::read_u32(&body[8..12]),
            block_align: LittleEndian::read_u16(&body[12..14]),
            bits_per_sample: LittleEndian::read_u16(&body[14..16]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extensible_header() {
        let mut body = vec![
            0xFE, 0xFF, // extensible
            0x06, 0x00, // 6 channels
            0x80, 0xBB, 0x00, 0x00, // 48000
            0x00, 0x2F, 0x0D, 0x00, // 864000
            0x12, 0x00, // block align 18
            0x18, 0x00, // 24 bits
        ];
        body.extend_from_slice(&[22, 0]);
        body.extend_from_slice(&[0u8; 22]);

        let fmt = FmtChunk::parse(&body).unwrap();
        assert_eq!(fmt.format_tag, 0xFFFE);
        assert_eq!(fmt.num_channels, 6);
        assert_eq!(fmt.sample_rate, 48000);
        assert_eq!(fmt.byte_rate, 864000);
        assert_eq!(fmt.block_align, 18);
        assert_eq!(fmt.bits_per_sample, 24);
    }

    #[test]
    fn test_short_fmt_is_malformed() {
        let result = FmtChunk::parse(&[1, 0, 2, 0]);
        assert!(matches!(result, Err(ExtractionError::MalformedContainer(_))));
    }
}
