//! Fixed-width resampling intervals.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::TradekitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeframe {
    seconds: i64,
}

impl Timeframe {
    pub const DAILY: Timeframe = Timeframe { seconds: 86_400 };

    pub fn from_seconds(seconds: i64) -> Option<Self> {
        (seconds > 0).then_some(Self { seconds })
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Self::DAILY
    }
}

/// Accepts `<n><unit>` with `n` optional (default 1) and unit one of
/// `s`/`S`, `min`/`T`/`m`, `h`/`H`, `d`/`D`.
impl FromStr for Timeframe {
    type Err = TradekitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| TradekitError::InvalidTimeframe {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let text = s.trim();
        let split = text
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| invalid("missing unit"))?;
        let (count, unit) = text.split_at(split);

        let count: i64 = if count.is_empty() {
            1
        } else {
            count.parse().map_err(|_| invalid("count out of range"))?
        };
        if count <= 0 {
            return Err(invalid("count must be positive"));
        }

        let unit_seconds = match unit {
            "s" | "S" => 1,
            "min" | "T" | "m" => 60,
            "h" | "H" => 3_600,
            "d" | "D" => 86_400,
            _ => return Err(invalid("unit must be one of s, min, h, D")),
        };

        count
            .checked_mul(unit_seconds)
            .and_then(Timeframe::from_seconds)
            .ok_or_else(|| invalid("count out of range"))
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.seconds;
        if s % 86_400 == 0 {
            write!(f, "{}D", s / 86_400)
        } else if s % 3_600 == 0 {
            write!(f, "{}h", s / 3_600)
        } else if s % 60 == 0 {
            write!(f, "{}min", s / 60)
        } else {
            write!(f, "{}s", s)
        }
    }
}
