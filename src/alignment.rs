use std::str::FromStr;

use crate::error::Error;

/// Horizontal position of the image on the paper (`ESC a n`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Value of the `n` parameter of `ESC a n`.
    pub fn code(&self) -> u8 {
        match self {
            Self::Left => 0x00,
            Self::Center => 0x01,
            Self::Right => 0x02,
        }
    }
}

impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "center" | "centre" | "c" => Ok(Self::Center),
            "right" | "r" => Ok(Self::Right),
            _ => Err(Error::InvalidConfig(format!("unknown alignment '{}'", s))),
        }
    }
}
