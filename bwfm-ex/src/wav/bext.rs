//! `bext` (Broadcast Audio Extension) chunk decoding
//!
//! Fixed layout per EBU Tech 3285:
//!
//! | Field                 | Bytes |
//! |-----------------------|-------|
//! | Description           | 256   |
//! | Originator            | 32    |
//! | OriginatorReference   | 32    |
//! | OriginationDate       | 10    |
//! | OriginationTime       | 8     |
//! | TimeReferenceLow      | 4     |
//! | TimeReferenceHigh     | 4     |
//! | Version               | 2     |
//! | UMID                  | 64    |
//! | Loudness fields       | 10    |
//! | Reserved              | 180   |
//! | CodingHistory         | rest  |

use super::fixed_string;
use byteorder::{ByteOrder, LittleEndian};
use tracing::warn;

const DESCRIPTION: std::ops::Range<usize> = 0..256;
const ORIGINATOR: std::ops::Range<usize> = 256..288;
const ORIGINATOR_REFERENCE: std::ops::Range<usize> = 288..320;
const ORIGINATION_DATE: std::ops::Range<usize> = 320..330;
const ORIGINATION_TIME: std::ops::Range<usize> = 330..338;
const TIME_REFERENCE_LOW: std::ops::Range<usize> = 338..342;
const TIME_REFERENCE_HIGH: std::ops::Range<usize> = 342..346;
const VERSION: std::ops::Range<usize> = 346..348;

/// Offset of the free-text coding history
const CODING_HISTORY_OFFSET: usize = 602;

/// Broadcast Audio Extension fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BextChunk {
    pub description: String,
    pub originator: String,
    pub originator_reference: String,
    /// `YYYY-MM-DD` as written by the recorder
    pub origination_date: String,
    /// `HH:MM:SS` as written by the recorder
    pub origination_time: String,
    /// First sample's position in samples since midnight
    pub time_reference: u64,
    pub version: u16,
    pub coding_history: String,
}

impl BextChunk {
    /// Decode a `bext` body. Bodies too short to hold the fixed fields are
    /// treated as a missing chunk.
    pub(crate) fn parse(body: &[u8]) -> Option<Self> {
        if body.len() < VERSION.end {
            warn!(len = body.len(), "bext chunk too short, ignoring");
            return None;
        }

        let low = LittleEndian::read_u32(&body[TIME_REFERENCE_LOW]);
        let high = LittleEndian::read_u32(&body[TIME_REFERENCE_HIGH]);

        let coding_history = if body.len() > CODING_HISTORY_OFFSET {
            fixed_string(&body[CODING_HISTORY_OFFSET..])
        } else {
            String::new()
        };

        Some(Self {
            description: fixed_string(&body[DESCRIPTION]),
            originator: fixed_string(&body[ORIGINATOR]),
            originator_reference: fixed_string(&body[ORIGINATOR_REFERENCE]),
            origination_date: fixed_string(&body[ORIGINATION_DATE]),
            origination_time: fixed_string(&body[ORIGINATION_TIME]),
            time_reference: (u64::from(high) << 32) | u64::from(low),
            version: LittleEndian::read_u16(&body[VERSION]),
            coding_history,
        })
    }
}
