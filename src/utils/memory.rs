//! Memory quantities are held in kilobytes (1024 bytes) everywhere.
//! Multipliers are always 1024, never 1000.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::AppError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"[ \t]+").unwrap();
    static ref QUANTITY: Regex = Regex::new(r"^(?P<number>.+?)(?P<unit>kb|mb|gb|tb)?$").unwrap();
}

const RADIX: f64 = 1024.0;

/// Largest total that still renders as a whole number of kB.
const MAX_KILOBYTES: f64 = u64::MAX as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryUnit {
    Kilobytes,
    Megabytes,
    Gigabytes,
    Terabytes,
}

impl MemoryUnit {
    /// Size of one unit, in kilobytes.
    pub fn multiplier(self) -> f64 {
        match self {
            MemoryUnit::Kilobytes => 1.0,
            MemoryUnit::Megabytes => RADIX,
            MemoryUnit::Gigabytes => RADIX * RADIX,
            MemoryUnit::Terabytes => RADIX * RADIX * RADIX,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MemoryUnit::Kilobytes => "kB",
            MemoryUnit::Megabytes => "MB",
            MemoryUnit::Gigabytes => "GB",
            MemoryUnit::Terabytes => "TB",
        }
    }

    /// Matches a lower case suffix (`kb`, `mb`, `gb`, `tb`).
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "kb" => Some(MemoryUnit::Kilobytes),
            "mb" => Some(MemoryUnit::Megabytes),
            "gb" => Some(MemoryUnit::Gigabytes),
            "tb" => Some(MemoryUnit::Terabytes),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            MemoryUnit::Kilobytes => Some(MemoryUnit::Megabytes),
            MemoryUnit::Megabytes => Some(MemoryUnit::Gigabytes),
            MemoryUnit::Gigabytes => Some(MemoryUnit::Terabytes),
            MemoryUnit::Terabytes => None,
        }
    }
}

impl std::fmt::Display for MemoryUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parse an operator supplied memory amount such as `8GB`, `512 mb` or `16`.
///
/// Whitespace is ignored and suffixes are case insensitive. A value without
/// a unit is taken as gigabytes.
pub fn parse_memory_to_kilobytes(mem: &str) -> Result<f64, AppError> {
    let normalized = WHITESPACE.replace_all(mem, "").to_lowercase();

    let invalid = |reason: String| AppError::InvalidMemory {
        input: mem.to_string(),
        reason,
    };

    let caps = QUANTITY
        .captures(&normalized)
        .ok_or_else(|| invalid("no value given".into()))?;

    let unit = caps
        .name("unit")
        .and_then(|m| MemoryUnit::from_suffix(m.as_str()))
        .unwrap_or(MemoryUnit::Gigabytes);

    let value: f64 = caps["number"]
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;

    if value < 0.0 {
        return Err(invalid("value must not be negative".into()));
    }

    let kilobytes = value * unit.multiplier();
    if !kilobytes.is_finite() {
        return Err(invalid("value must be finite".into()));
    }
    if kilobytes >= MAX_KILOBYTES {
        return Err(invalid(format!("value exceeds {} kB", u64::MAX)));
    }

    Ok(kilobytes)
}

/// Render kilobytes using the largest unit the value divides into exactly.
///
/// With `floor_to_mb`, a value that is not a whole number of megabytes is
/// truncated to megabytes instead of being shown in kilobytes.
pub fn format_kilobytes(kilobytes: f64, floor_to_mb: bool) -> String {
    let mut value = kilobytes;
    let mut unit = MemoryUnit::Kilobytes;

    if value % RADIX == 0.0 {
        while value % RADIX == 0.0 {
            match unit.next() {
                Some(next) => {
                    value /= RADIX;
                    unit = next;
                }
                None => break,
            }
        }
    } else if floor_to_mb {
        value = (value / RADIX).floor();
        unit = MemoryUnit::Megabytes;
    }

    format!("{}{}", value.round() as u64, unit)
}
