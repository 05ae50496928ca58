//! Rule-based bot controller
//!
//! Each bot re-decides only when its reaction timer expires; between
//! decisions it coasts on whatever it chose last. The reaction time is the
//! whole difficulty "lag" - easier bots simply think less often. Accuracy
//! models imperfect play by *skipping* actions (a failed roll means the bot
//! does nothing this decision), never by acting on a wrong answer.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::field::Side;
use super::state::{Body, Control, Player, Role};
use crate::consts::*;
use crate::distance;

/// Stop moving when this close to the target x
const DEAD_ZONE: f32 = 30.0;
/// Ball must be at least this far above the bot to consider jumping
const JUMP_BALL_ABOVE: f32 = 50.0;
/// ...and within this range
const JUMP_TRIGGER_DIST: f32 = 150.0;
/// Teammates closer than this push each other's targets apart
const TEAMMATE_SPACING: f32 = 80.0;
const TEAMMATE_SHOVE: f32 = 40.0;
/// Team-play pace and reach tweaks per role
const ATTACKER_PACE: f32 = 1.1;
const DEFENDER_PACE: f32 = 0.9;
const ATTACKER_REACH: f32 = 1.2;

/// Immutable difficulty knobs for one bot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BotProfile {
    /// Required idle time between decisions, milliseconds
    pub reaction_ms: f32,
    /// Chance in [0,1] that a planned action actually executes
    pub accuracy: f32,
    /// Multiplier on the base player speed
    pub speed: f32,
    /// Chance in [0,1] to jump when the ball is overhead
    pub jump_chance: f32,
    /// Distance at which the bot will attempt a kick
    pub kick_range: f32,
}

/// How a bot picks its spot on the pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tactic {
    /// 1v1: shadow the ball, fall back when play is on the far half
    Solo,
    /// 2v2: position by role (attacker/defender), avoid teammate overlap
    Team,
    /// Career pack: fan out by index so bots don't stack on one x
    Squad { index: u8, pack: u8 },
}

/// Per-bot mutable state
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BotBrain {
    pub profile: BotProfile,
    pub tactic: Tactic,
    /// Accumulated delta time since the last decision, milliseconds
    pub reaction: f32,
}

impl BotBrain {
    pub fn new(profile: BotProfile, tactic: Tactic) -> Self {
        Self {
            profile,
            tactic,
            reaction: 0.0,
        }
    }
}

/// Outcome of one decision. `None`/`false` everywhere means "coast".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Decision {
    /// New horizontal velocity, if the movement roll passed
    pub run: Option<f32>,
    pub jump: bool,
    /// Kick attempt, carrying the effective kick range
    pub swing: Option<f32>,
}

/// Tick one bot. Returns the default (coasting) decision unless the
/// reaction timer expired this frame.
///
/// `others` are the positions and sides of every *other* player, snapshot
/// before any decisions are applied so iteration order doesn't matter.
pub fn think(
    player: &mut Player,
    ball: &Body,
    others: &[(Vec2, Side)],
    dt: f32,
    rng: &mut impl Rng,
) -> Decision {
    let Control::Bot(brain) = &mut player.control else {
        return Decision::default();
    };

    brain.reaction += dt * 1000.0;
    if brain.reaction < brain.profile.reaction_ms {
        return Decision::default();
    }
    brain.reaction = 0.0;

    let profile = brain.profile;
    let tactic = brain.tactic;
    let me = &player.body;
    let ball_dist = distance(me.pos, ball.pos);

    let mut target = target_x(tactic, player.side, player.role, ball.pos);

    // Spread teammates that have bunched up
    if tactic == Tactic::Team {
        for &(pos, side) in others {
            if side == player.side && distance(me.pos, pos) < TEAMMATE_SPACING {
                target += if me.pos.x < pos.x {
                    -TEAMMATE_SHOVE
                } else {
                    TEAMMATE_SHOVE
                };
            }
        }
    }

    let (pace, reach) = match (tactic, player.role) {
        (Tactic::Team, Role::Attacker) => (ATTACKER_PACE, ATTACKER_REACH),
        (Tactic::Team, Role::Defender) => (DEFENDER_PACE, 1.0),
        _ => (1.0, 1.0),
    };

    let mut decision = Decision::default();

    // One accuracy roll gates the whole movement decision
    if rng.random::<f32>() < profile.accuracy {
        let speed = PLAYER_SPEED * profile.speed * pace;
        decision.run = Some(if me.pos.x < target - DEAD_ZONE {
            speed
        } else if me.pos.x > target + DEAD_ZONE {
            -speed
        } else {
            0.0
        });
    }

    if ball.pos.y < me.pos.y - JUMP_BALL_ABOVE
        && ball_dist < JUMP_TRIGGER_DIST
        && me.resting
        && rng.random::<f32>() < profile.jump_chance
    {
        decision.jump = true;
    }

    // Kick roll is independent of the movement roll
    let kick_range = profile.kick_range * reach;
    if ball_dist < kick_range && rng.random::<f32>() < profile.accuracy {
        decision.swing = Some(kick_range);
    }

    decision
}

/// Horizontal spot a bot wants to occupy
fn target_x(tactic: Tactic, side: Side, role: Role, ball: Vec2) -> f32 {
    let half_line = FIELD_WIDTH / 2.0;
    match tactic {
        Tactic::Solo => {
            // Hold a spot in front of our goal while play is on the far half
            let (home, far_half) = match side {
                Side::Right => (900.0, ball.x < half_line),
                Side::Left => (300.0, ball.x > half_line),
            };
            if far_half { home } else { ball.x }
        }
        Tactic::Team => match role {
            Role::Defender => {
                // Hold home until the ball crosses into our half, then track it
                let (home, threshold) = match side {
                    Side::Left => (250.0, 400.0),
                    Side::Right => (950.0, 800.0),
                };
                let ball_in_our_half = match side {
                    Side::Left => ball.x < threshold,
                    Side::Right => ball.x > threshold,
                };
                if ball_in_our_half { ball.x } else { home }
            }
            // Attackers play ahead of the ball, toward the opponent goal
            Role::Attacker => match side {
                Side::Left => (ball.x + 50.0).min(1000.0),
                Side::Right => (ball.x - 50.0).max(200.0),
            },
        },
        Tactic::Squad { index, pack } => {
            let i = index as f32;
            if pack <= 1 {
                // Lone opponent: chase on our half, otherwise wait deep
                if ball.x < half_line { ball.x + 100.0 } else { 900.0 }
            } else if ball.x < half_line {
                // Press forward in staggered file
                (ball.x + i * 150.0).min(1000.0 - i * 50.0)
            } else {
                // Layered defensive screen
                900.0 - i * 75.0
            }
        }
    }
}
