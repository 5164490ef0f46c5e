//! `bext` chunk normalizer

use super::present;
use crate::models::BwfMetadata;
use crate::wav::BextChunk;

/// Origination date and time, passed through as written
pub fn normalize_bext(bext: Option<&BextChunk>) -> BwfMetadata {
    let Some(bext) = bext else {
        return BwfMetadata::default();
    };

    BwfMetadata {
        date_created: present(&bext.origination_date),
        time_created: present(&bext.origination_time),
        ..Default::default()
    }
}
