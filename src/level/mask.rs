//! Verbosity mask.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use crate::level::severity::{Severity, UnknownSeverity};

/// Bitset selecting which severities produce output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OutputMask(u8);

impl OutputMask {
    pub const NONE: OutputMask = OutputMask(0b0000_0000);
    pub const FATAL: OutputMask = OutputMask(0b0000_0001);
    pub const ERROR: OutputMask = OutputMask(0b0000_0010);
    pub const WARNING: OutputMask = OutputMask(0b0000_0100);
    pub const NOTICE: OutputMask = OutputMask(0b0000_1000);
    pub const INFO: OutputMask = OutputMask(0b0001_0000);
    pub const TRACE: OutputMask = OutputMask(0b0010_0000);
    pub const DEBUG: OutputMask = OutputMask(0b0100_0000);

    /// Fatal, error, warning and notice.
    pub const IMPORTANT: OutputMask =
        OutputMask(Self::FATAL.0 | Self::ERROR.0 | Self::WARNING.0 | Self::NOTICE.0);
    /// `IMPORTANT` plus info.
    pub const DETAIL: OutputMask = OutputMask(Self::IMPORTANT.0 | Self::INFO.0);
    /// `DETAIL` plus debug. Trace still has to be added explicitly.
    pub const ALL: OutputMask = OutputMask(Self::DETAIL.0 | Self::DEBUG.0);

    /// Every defined bit.
    const DEFINED: u8 = 0b0111_1111;

    /// Build a mask from raw bits. Undefined bits are dropped.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        OutputMask(bits & Self::DEFINED)
    }

    /// Build a mask from raw bits, rejecting undefined bits.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::DEFINED == 0 {
            Some(OutputMask(bits))
        } else {
            None
        }
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True when every bit of `other` is set in `self`.
    pub const fn contains(self, other: OutputMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when `severity` produces output under this mask.
    #[inline]
    pub const fn enables(self, severity: Severity) -> bool {
        self.0 & severity.flag().0 != 0
    }
}

impl BitOr for OutputMask {
    type Output = OutputMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        OutputMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for OutputMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for OutputMask {
    type Output = OutputMask;

    fn bitand(self, rhs: Self) -> Self::Output {
        OutputMask(self.0 & rhs.0)
    }
}

impl From<Severity> for OutputMask {
    fn from(severity: Severity) -> Self {
        severity.flag()
    }
}

impl fmt::Display for OutputMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#09b}", self.0)
    }
}

/// Parses a preset name (`none`, `important`, `detail`, `all`), a list of
/// severity names joined by `|` or `,`, or raw bits (`0b...`, `0x...`, decimal).
impl FromStr for OutputMask {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(bits) = parse_bits(s) {
            return OutputMask::from_bits(bits).ok_or_else(|| UnknownSeverity(s.to_string()));
        }

        let mut mask = OutputMask::NONE;
        for part in s.split(['|', ',']).map(str::trim).filter(|p| !p.is_empty()) {
            mask |= match part.to_ascii_lowercase().as_str() {
                "none" => OutputMask::NONE,
                "important" => OutputMask::IMPORTANT,
                "detail" => OutputMask::DETAIL,
                "all" => OutputMask::ALL,
                _ => part.parse::<Severity>()?.flag(),
            };
        }
        Ok(mask)
    }
}

fn parse_bits(s: &str) -> Option<u8> {
    if let Some(bin) = s.strip_prefix("0b") {
        u8::from_str_radix(&bin.replace('_', ""), 2).ok()
    } else if let Some(hex) = s.strip_prefix("0x") {
        u8::from_str_radix(hex, 16).ok()
    } else {
        s.parse::<u8>().ok()
    }
}
