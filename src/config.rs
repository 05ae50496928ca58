//! Match configuration
//!
//! Mode, difficulty tier, and length are read once at match setup and are
//! immutable for the life of the match. Validation fails fast with a
//! descriptive error instead of silently fixing up a bad request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::career;
use crate::consts::MATCH_SECS;
use crate::sim::BotProfile;

/// Named bot difficulty tiers. The in-between tiers exist for the early
/// career ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    BelowEasy,
    Easy,
    MediumEasy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::BelowEasy => "below-easy",
            Difficulty::Easy => "easy",
            Difficulty::MediumEasy => "medium-easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "below-easy" | "beloweasy" => Some(Difficulty::BelowEasy),
            "easy" => Some(Difficulty::Easy),
            "medium-easy" | "mediumeasy" => Some(Difficulty::MediumEasy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// The tuning knobs for this tier
    pub fn profile(&self) -> BotProfile {
        match self {
            Difficulty::BelowEasy => BotProfile {
                reaction_ms: 700.0,
                accuracy: 0.35,
                speed: 0.5,
                jump_chance: 0.15,
                kick_range: 70.0,
            },
            Difficulty::Easy => BotProfile {
                reaction_ms: 500.0,
                accuracy: 0.5,
                speed: 0.6,
                jump_chance: 0.2,
                kick_range: 80.0,
            },
            Difficulty::MediumEasy => BotProfile {
                reaction_ms: 400.0,
                accuracy: 0.6,
                speed: 0.7,
                jump_chance: 0.3,
                kick_range: 85.0,
            },
            Difficulty::Medium => BotProfile {
                reaction_ms: 300.0,
                accuracy: 0.75,
                speed: 0.8,
                jump_chance: 0.4,
                kick_range: 90.0,
            },
            Difficulty::Hard => BotProfile {
                reaction_ms: 150.0,
                accuracy: 0.9,
                speed: 1.0,
                jump_chance: 0.6,
                kick_range: 100.0,
            },
        }
    }
}

/// What kind of match to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// 1v1. `right_bot: None` is human-vs-human.
    Duel { right_bot: Option<Difficulty> },
    /// 2v2. `right_bots: None` is four humans; otherwise the right pair
    /// is botted at the given tier.
    Pairs { right_bots: Option<Difficulty> },
    /// One human against the level's bot pack
    Career { level: u32 },
}

/// Everything a match needs at setup. Opaque to the simulation afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub mode: GameMode,
    /// Replaces the tier profile for every bot when set
    pub profile_override: Option<BotProfile>,
    /// Match length, seconds
    pub match_secs: u32,
    /// RNG seed for bot decision rolls
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Duel { right_bot: None },
            profile_override: None,
            match_secs: MATCH_SECS,
            seed: 0,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown career level {0} (valid: 1-{max})", max = career::LEVELS)]
    UnknownLevel(u32),
    #[error("match duration must be at least 1 second")]
    ZeroDuration,
    #[error("bot profile override rejected: {0}")]
    BadProfile(&'static str),
}

impl MatchConfig {
    /// Reject impossible setups before any entity is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.match_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if let GameMode::Career { level } = self.mode
            && career::level(level).is_none()
        {
            return Err(ConfigError::UnknownLevel(level));
        }
        if let Some(p) = &self.profile_override {
            if !(p.accuracy.is_finite() && (0.0..=1.0).contains(&p.accuracy)) {
                return Err(ConfigError::BadProfile("accuracy must be in [0, 1]"));
            }
            if !(p.jump_chance.is_finite() && (0.0..=1.0).contains(&p.jump_chance)) {
                return Err(ConfigError::BadProfile("jump chance must be in [0, 1]"));
            }
            if !(p.speed.is_finite() && p.speed > 0.0) {
                return Err(ConfigError::BadProfile("speed must be positive"));
            }
            if !(p.reaction_ms.is_finite() && p.reaction_ms >= 0.0) {
                return Err(ConfigError::BadProfile("reaction time must be >= 0"));
            }
            if !(p.kick_range.is_finite() && p.kick_range > 0.0) {
                return Err(ConfigError::BadProfile("kick range must be positive"));
            }
        }
        Ok(())
    }
}
