//! Career ladder and persistent progress
//!
//! Ten levels against growing bot packs. The simulation emits a
//! [`MatchReport`] when a career match ends; [`CareerProgress`] turns
//! victories into unlock/completion bookkeeping and round-trips through a
//! JSON file. Unlock policy lives entirely here - the simulation never
//! checks it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Difficulty;

/// Number of career levels
pub const LEVELS: u32 = 10;

/// One rung of the ladder
#[derive(Debug, Clone, Copy)]
pub struct CareerLevel {
    pub level: u32,
    /// Bots fielded against the lone human
    pub opponents: u8,
    pub tier: Difficulty,
    pub label: &'static str,
}

const LADDER: [CareerLevel; LEVELS as usize] = [
    CareerLevel { level: 1, opponents: 1, tier: Difficulty::BelowEasy, label: "1 vs 1 Bot (Below Easy)" },
    CareerLevel { level: 2, opponents: 1, tier: Difficulty::Easy, label: "1 vs 1 Bot (Easy)" },
    CareerLevel { level: 3, opponents: 1, tier: Difficulty::MediumEasy, label: "1 vs 1 Bot (Medium Easy)" },
    CareerLevel { level: 4, opponents: 2, tier: Difficulty::Easy, label: "1 vs 2 Bots (Easy)" },
    CareerLevel { level: 5, opponents: 2, tier: Difficulty::Medium, label: "1 vs 2 Bots (Medium)" },
    CareerLevel { level: 6, opponents: 2, tier: Difficulty::Hard, label: "1 vs 2 Bots (Hard)" },
    CareerLevel { level: 7, opponents: 3, tier: Difficulty::Easy, label: "1 vs 3 Bots (Easy)" },
    CareerLevel { level: 8, opponents: 3, tier: Difficulty::Medium, label: "1 vs 3 Bots (Medium)" },
    CareerLevel { level: 9, opponents: 3, tier: Difficulty::Hard, label: "1 vs 3 Bots (Hard)" },
    CareerLevel { level: 10, opponents: 4, tier: Difficulty::Hard, label: "BOSS: 1 vs 4 Bots (All Hard)" },
];

/// Look up a rung by 1-based level number
pub fn level(n: u32) -> Option<&'static CareerLevel> {
    LADDER.get(n.checked_sub(1)? as usize)
}

/// Outcome of one career match, as emitted by the match director
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub level: u32,
    /// Human side strictly outscored the bots
    pub victory: bool,
    /// (human, bots)
    pub score: (u32, u32),
}

/// Saved career state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerProgress {
    pub completed: Vec<u32>,
    pub current: u32,
    pub highest_unlocked: u32,
}

impl Default for CareerProgress {
    fn default() -> Self {
        Self {
            completed: Vec::new(),
            current: 1,
            highest_unlocked: 1,
        }
    }
}

impl CareerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= 1 && level <= self.highest_unlocked
    }

    pub fn is_completed(&self, level: u32) -> bool {
        self.completed.contains(&level)
    }

    /// Fold a match outcome in. Defeats change nothing; a victory marks
    /// the level complete and unlocks the next rung.
    pub fn record(&mut self, report: &MatchReport) {
        if !report.victory {
            return;
        }
        if !self.completed.contains(&report.level) {
            self.completed.push(report.level);
        }
        let next = (report.level + 1).min(LEVELS);
        self.current = next;
        self.highest_unlocked = self.highest_unlocked.max(next);
        log::info!(
            "career level {} complete ({}/{} done)",
            report.level,
            self.completed.len(),
            LEVELS
        );
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Load saved progress, or start fresh if the file is missing or
    /// unreadable
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(progress) => {
                    log::info!("loaded career progress from {}", path.display());
                    progress
                }
                Err(err) => {
                    log::warn!("career progress file corrupt ({err}), starting fresh");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no career progress at {}, starting fresh", path.display());
                Self::default()
            }
        }
    }

    /// Best-effort save; failures are logged, not fatal
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("could not serialize career progress: {err}");
                return;
            }
        };
        if let Err(err) = std::fs::write(path, json) {
            log::warn!("could not save career progress to {}: {err}", path.display());
        } else {
            log::info!("career progress saved");
        }
    }
}
