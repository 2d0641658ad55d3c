use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Tier {
    Iron = 0,
    Bronze = 1,
    Silver = 2,
    Gold = 3,
    Platinum = 4,
    Emerald = 5,
    Diamond = 6,
    Master = 7,
    Grandmaster = 8,
    Challenger = 9,
}

impl Tier {
    pub const ORDERED: [Tier; 10] = [
        Tier::Iron,
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Emerald,
        Tier::Diamond,
        Tier::Master,
        Tier::Grandmaster,
        Tier::Challenger,
    ];

    /// Points between the floors of two adjacent tiers.
    pub const STEP: u32 = 400;

    pub const fn base_score(self) -> u32 {
        self as u32 * Self::STEP
    }

    /// Master and above have no divisions; league points accumulate directly.
    pub const fn is_apex(self) -> bool {
        matches!(self, Tier::Master | Tier::Grandmaster | Tier::Challenger)
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "IRON" => Some(Tier::Iron),
            "BRONZE" => Some(Tier::Bronze),
            "SILVER" => Some(Tier::Silver),
            "GOLD" => Some(Tier::Gold),
            "PLATINUM" => Some(Tier::Platinum),
            "EMERALD" => Some(Tier::Emerald),
            "DIAMOND" => Some(Tier::Diamond),
            "MASTER" => Some(Tier::Master),
            "GRANDMASTER" => Some(Tier::Grandmaster),
            "CHALLENGER" => Some(Tier::Challenger),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Tier::Iron => "IRON",
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
            Tier::Emerald => "EMERALD",
            Tier::Diamond => "DIAMOND",
            Tier::Master => "MASTER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Challenger => "CHALLENGER",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Division {
    #[serde(rename = "IV")]
    Four = 0,
    #[serde(rename = "III")]
    Three = 1,
    #[serde(rename = "II")]
    Two = 2,
    #[serde(rename = "I")]
    One = 3,
}

impl Division {
    pub const ORDERED: [Division; 4] = [
        Division::Four,
        Division::Three,
        Division::Two,
        Division::One,
    ];

    pub const STEP: u32 = 100;

    pub const fn bonus(self) -> u32 {
        self as u32 * Self::STEP
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "IV" => Some(Division::Four),
            "III" => Some(Division::Three),
            "II" => Some(Division::Two),
            "I" => Some(Division::One),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Division::Four => "IV",
            Division::Three => "III",
            Division::Two => "II",
            Division::One => "I",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
