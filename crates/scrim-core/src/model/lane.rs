use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Lane {
    Top = 0,
    Jungle = 1,
    Mid = 2,
    Adc = 3,
    Support = 4,
}

impl Lane {
    /// Canonical lane order; lane permutations are enumerated over this sequence.
    pub const ALL: [Lane; 5] = [Lane::Top, Lane::Jungle, Lane::Mid, Lane::Adc, Lane::Support];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Some(Lane::Top),
            "jungle" => Some(Lane::Jungle),
            "mid" => Some(Lane::Mid),
            "adc" => Some(Lane::Adc),
            "support" => Some(Lane::Support),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Lane::Top => "top",
            Lane::Jungle => "jungle",
            Lane::Mid => "mid",
            Lane::Adc => "adc",
            Lane::Support => "support",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
