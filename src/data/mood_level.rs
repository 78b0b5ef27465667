use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Theme-independent identity of a logged mood. Level 1 is the most
/// positive, level 5 the most negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoodLevel {
    Fantastic = 1,
    Fine = 2,
    Okay = 3,
    Low = 4,
    Down = 5,
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown mood '{0}' (expected 1-5 or fantastic, fine, okay, low, down)")]
pub struct ParseMoodError(pub String);

impl MoodLevel {
    pub const ALL: [MoodLevel; 5] = [
        MoodLevel::Fantastic,
        MoodLevel::Fine,
        MoodLevel::Okay,
        MoodLevel::Low,
        MoodLevel::Down,
    ];

    /// Level used whenever a stored colour cannot be matched.
    pub const NEUTRAL: MoodLevel = MoodLevel::Okay;

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(MoodLevel::Fantastic),
            2 => Some(MoodLevel::Fine),
            3 => Some(MoodLevel::Okay),
            4 => Some(MoodLevel::Low),
            5 => Some(MoodLevel::Down),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            MoodLevel::Fantastic => "fantastic",
            MoodLevel::Fine => "fine",
            MoodLevel::Okay => "okay",
            MoodLevel::Low => "low",
            MoodLevel::Down => "down",
        }
    }

    /// Zero-based position in a template's level table.
    pub fn index(self) -> usize {
        self.value() as usize - 1
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MoodLevel {
    type Err = ParseMoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u8>() {
            return MoodLevel::from_value(n).ok_or_else(|| ParseMoodError(s.to_string()));
        }
        let lower = trimmed.to_lowercase();
        MoodLevel::ALL
            .into_iter()
            .find(|level| level.key() == lower)
            .ok_or_else(|| ParseMoodError(s.to_string()))
    }
}
