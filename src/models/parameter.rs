use crate::utils::memory::format_kilobytes;

/// A single recommended `postgresql.conf` setting.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: &'static str,
    pub value: SettingValue,
    pub annotation: Annotation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// Memory amount in kilobytes
    Memory { kilobytes: f64, floor_to_mb: bool },
    Integer(u64),
    Minutes(u64),
    /// Emitted verbatim (durations, fractions, costs)
    Literal(&'static str),
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Memory {
                kilobytes,
                floor_to_mb,
            } => write!(f, "{}", format_kilobytes(*kilobytes, *floor_to_mb)),
            SettingValue::Integer(n) => write!(f, "{}", n),
            SettingValue::Minutes(n) => write!(f, "{}min", n),
            SettingValue::Literal(s) => write!(f, "{}", s),
        }
    }
}

/// Informational comment block printed above each setting.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub description: &'static str,
    pub default: String,
    pub limitations: Option<&'static str>,
    pub multipliers: Option<&'static str>,
    pub recommended: String,
    /// Path below `https://www.postgresql.org/docs`
    pub reference: &'static str,
}
