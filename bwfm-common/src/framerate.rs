//! Broadcast frame rate resolution
//!
//! Recorders store the timecode rate as a ratio (`30000/1001`, `25/1`). SMPTE
//! timecode is only defined for a small set of broadcast rates, so raw rates
//! are snapped onto that set by their integer part. Anything outside the set
//! is "rate unknown", which callers treat as an absent value rather than an
//! error.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Raw rate used when a ratio is missing or cannot be divided
pub const UNKNOWN_RATE: f64 = 1.0;

static RATIO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)/(\d+)").expect("ratio pattern is valid"));

/// Standard broadcast frame rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardRate {
    /// 24000/1001
    Fps23_976,
    Fps24,
    Fps25,
    /// 30000/1001
    Fps29_97,
    Fps30,
    Fps50,
    /// 60000/1001
    Fps59_94,
    Fps60,
}

impl StandardRate {
    /// Snap a raw rate onto the standard set by truncating it to an integer.
    ///
    /// `23.976` and `23.9` both truncate to 23 and resolve to
    /// [`StandardRate::Fps23_976`]; `31.0` resolves to nothing.
    pub fn from_raw(raw: f64) -> Option<Self> {
        if !raw.is_finite() {
            return None;
        }

        match raw.trunc() as i64 {
            23 => Some(Self::Fps23_976),
            24 => Some(Self::Fps24),
            25 => Some(Self::Fps25),
            29 => Some(Self::Fps29_97),
            30 => Some(Self::Fps30),
            50 => Some(Self::Fps50),
            59 => Some(Self::Fps59_94),
            60 => Some(Self::Fps60),
            _ => None,
        }
    }

    /// Decimal label as shown to users
    pub fn label(self) -> &'static str {
        match self {
            Self::Fps23_976 => "23.976",
            Self::Fps24 => "24",
            Self::Fps25 => "25",
            Self::Fps29_97 => "29.97",
            Self::Fps30 => "30",
            Self::Fps50 => "50",
            Self::Fps59_94 => "59.94",
            Self::Fps60 => "60",
        }
    }

    /// Nominal rate as a number
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Fps23_976 => 23.976,
            Self::Fps24 => 24.0,
            Self::Fps25 => 25.0,
            Self::Fps29_97 => 29.97,
            Self::Fps30 => 30.0,
            Self::Fps50 => 50.0,
            Self::Fps59_94 => 59.94,
            Self::Fps60 => 60.0,
        }
    }

    /// Frame numbers per timecode second (the rounded nominal rate)
    pub fn frames_per_second(self) -> u64 {
        self.as_f64().round() as u64
    }

    /// Whether SMPTE drop-frame numbering exists for this rate
    pub fn supports_drop_frame(self) -> bool {
        matches!(self, Self::Fps29_97 | Self::Fps59_94)
    }

    /// Frame numbers skipped at the start of each non-tenth minute
    pub fn dropped_frames_per_minute(self) -> u64 {
        match self {
            Self::Fps29_97 => 2,
            Self::Fps59_94 => 4,
            _ => 0,
        }
    }
}

impl fmt::Display for StandardRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolve a raw rate to a standard broadcast rate
pub fn standard_rate(raw: f64) -> Option<StandardRate> {
    StandardRate::from_raw(raw)
}

/// Timecode rate as written by the recorder, e.g. `30000/1001`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateRatio {
    pub numerator: f64,
    pub denominator: f64,
}

impl RateRatio {
    /// Ratio used when the recorder gave no usable rate
    pub const UNKNOWN: RateRatio = RateRatio {
        numerator: UNKNOWN_RATE,
        denominator: 1.0,
    };

    pub fn new(numerator: f64, denominator: f64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Find the first `<digits>/<digits>` pair in `text`
    pub fn parse(text: &str) -> Option<Self> {
        let captures = RATIO_PATTERN.captures(text)?;
        let numerator = captures.get(1)?.as_str().parse::<f64>().ok()?;
        let denominator = captures.get(2)?.as_str().parse::<f64>().ok()?;
        Some(Self::new(numerator, denominator))
    }

    /// Divided rate; a failed division (zero denominator) is the unknown rate
    pub fn raw(&self) -> f64 {
        let rate = self.numerator / self.denominator;
        if rate.is_finite() {
            rate
        } else {
            UNKNOWN_RATE
        }
    }

    pub fn standard(&self) -> Option<StandardRate> {
        standard_rate(self.raw())
    }
}

/// Format a timecode rate for display.
///
/// Drop-frame capable rates carry the recorder's flag verbatim
/// (`"29.97 DF"`, `"59.94 NDF"`). Returns `None` when the rate is unknown.
pub fn format_frame_rate(
    numerator: f64,
    denominator: f64,
    drop_flag: Option<&str>,
) -> Option<String> {
    let rate = RateRatio::new(numerator, denominator);
    let Some(standard) = rate.standard() else {
        tracing::debug!(raw_rate = rate.raw(), "Unrecognized frame rate");
        return None;
    };

    match drop_flag {
        Some(flag) if standard.supports_drop_frame() => Some(format!("{} {}", standard, flag)),
        _ => Some(standard.to_string()),
    }
}
