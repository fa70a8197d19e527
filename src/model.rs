use std::str::FromStr;

use crate::error::Error;

/// Print head of the target printer.
///
/// Only the number of dots across the paper matters for image printing, it is
/// the width an image is scaled to when scaling is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
    /// 80 mm roll, 72 mm printable at 203 dpi.
    #[default]
    Paper80mm,
    /// 58 mm roll, 48 mm printable at 203 dpi.
    Paper58mm,
    Custom(u16),
}

impl Model {
    pub fn dots(&self) -> u32 {
        match self {
            Self::Paper80mm => crate::DEFAULT_PRINT_WIDTH,
            Self::Paper58mm => crate::NARROW_PRINT_WIDTH,
            Self::Custom(dots) => *dots as u32,
        }
    }
}

impl FromStr for Model {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "80" | "80mm" => Ok(Self::Paper80mm),
            "58" | "58mm" => Ok(Self::Paper58mm),
            other => match other.parse::<u16>() {
                Ok(dots) if dots > 0 => Ok(Self::Custom(dots)),
                _ => Err(Error::InvalidConfig(format!("unknown printer model '{}'", s))),
            },
        }
    }
}
