//! CEFR proficiency levels and their tuning profiles.
//!
//! Every difficulty knob in the pipeline is driven by the learner's CEFR
//! level. Rather than scattering threshold checks through the generators,
//! all tuning lives in one ordered lookup table:
//!
//! ```text
//! level  chunk budget  detail items  adapted options
//! A1     180 chars     3             2
//! A2     210 chars     4             3
//! B1     250 chars     5             3
//! B2     290 chars     5             4
//! C1     320 chars     6             4
//! C2     340 chars     6             4
//! ```
//!
//! Lower levels get smaller listening chunks (working-memory limits),
//! fewer detail questions, and fewer options in the Adapted variant.

use serde::{Deserialize, Serialize};

/// A CEFR proficiency level, A1 (lowest) through C2 (highest).
///
/// Levels are totally ordered, so gating rules read naturally:
///
/// ```rust
/// use earshot::Level;
///
/// assert!(Level::B2 >= Level::A2);
/// assert_eq!(Level::A1.profile().chunk_budget, 180);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Beginner.
    A1,
    /// Elementary.
    A2,
    /// Intermediate.
    B1,
    /// Upper intermediate.
    B2,
    /// Advanced.
    C1,
    /// Proficient.
    C2,
}

/// Coarse difficulty band used by the focus-preset lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// A1-A2.
    Low,
    /// B1-B2.
    Mid,
    /// C1-C2.
    High,
}

/// Per-level tuning values.
///
/// One row of the lookup table above. Returned by value; all fields are
/// plain numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProfile {
    /// Target chunk size in characters.
    pub chunk_budget: usize,
    /// Maximum number of detail questions (one per chunk, capped here).
    pub max_detail: usize,
    /// Number of options shown in the Adapted variant of an MCQ (2..=4).
    pub adapted_options: usize,
}

/// Rows ordered A1..C2, indexed by `Level as usize`.
const PROFILES: [LevelProfile; 6] = [
    LevelProfile { chunk_budget: 180, max_detail: 3, adapted_options: 2 },
    LevelProfile { chunk_budget: 210, max_detail: 4, adapted_options: 3 },
    LevelProfile { chunk_budget: 250, max_detail: 5, adapted_options: 3 },
    LevelProfile { chunk_budget: 290, max_detail: 5, adapted_options: 4 },
    LevelProfile { chunk_budget: 320, max_detail: 6, adapted_options: 4 },
    LevelProfile { chunk_budget: 340, max_detail: 6, adapted_options: 4 },
];

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Self; 6] = [
        Self::A1,
        Self::A2,
        Self::B1,
        Self::B2,
        Self::C1,
        Self::C2,
    ];

    /// The tuning profile for this level.
    #[must_use]
    pub const fn profile(self) -> LevelProfile {
        PROFILES[self as usize]
    }

    /// The coarse difficulty band this level falls in.
    #[must_use]
    pub const fn tier(self) -> Tier {
        match self {
            Self::A1 | Self::A2 => Tier::Low,
            Self::B1 | Self::B2 => Tier::Mid,
            Self::C1 | Self::C2 => Tier::High,
        }
    }

    /// Display form, e.g. `"B1"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(Self::A1),
            "A2" => Ok(Self::A2),
            "B1" => Ok(Self::B1),
            "B2" => Ok(Self::B2),
            "C1" => Ok(Self::C1),
            "C2" => Ok(Self::C2),
            other => Err(format!("unknown CEFR level: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budgets_scale_with_level() {
        let mut prev = 0;
        for level in Level::ALL {
            let budget = level.profile().chunk_budget;
            assert!(budget >= prev, "{level} budget regressed");
            prev = budget;
        }
        assert_eq!(Level::A1.profile().chunk_budget, 180);
        assert_eq!(Level::C2.profile().chunk_budget, 340);
    }

    #[test]
    fn test_adapted_options_in_range() {
        for level in Level::ALL {
            let n = level.profile().adapted_options;
            assert!((2..=4).contains(&n));
        }
    }

    #[test]
    fn test_tiers() {
        assert_eq!(Level::A2.tier(), Tier::Low);
        assert_eq!(Level::B1.tier(), Tier::Mid);
        assert_eq!(Level::C2.tier(), Tier::High);
    }

    #[test]
    fn test_parse_roundtrip() {
        for level in Level::ALL {
            assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
        }
        assert!("b2".parse::<Level>().is_ok());
        assert!("Z9".parse::<Level>().is_err());
    }
}
