//! Match entities and the director-owned match state

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::{BotBrain, Tactic};
use super::field::{Field, Side};
use crate::career::{self, MatchReport};
use crate::config::{ConfigError, GameMode, MatchConfig};
use crate::consts::*;

/// A simulated circular rigid body
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Rebound scale against static geometry
    pub bounce: f32,
    pub gravity: bool,
    /// Speed cap, direction-preserving (ball only)
    pub max_speed: Option<f32>,
    /// Standing on the ground as of the last resolution pass.
    /// Gates jump eligibility.
    pub resting: bool,
}

impl Body {
    pub fn player(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            bounce: PLAYER_BOUNCE,
            gravity: true,
            max_speed: None,
            resting: false,
        }
    }

    pub fn ball(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            bounce: BALL_BOUNCE,
            gravity: true,
            max_speed: Some(BALL_MAX_SPEED),
            resting: false,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Position duty in team play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Attacker,
    Defender,
}

/// Who drives a player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Control {
    /// Index into the per-frame human input array
    Human { slot: usize },
    Bot(BotBrain),
}

/// One swing of a player's leg. `remaining == 0` means idle; a fresh swing
/// can't start until the previous window runs out, whether or not it
/// connected. `remaining` is also what a renderer animates against.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct KickState {
    /// Seconds left in the swing window
    pub remaining: f32,
    /// Extended foot hit-region center while swinging
    pub foot: Vec2,
    /// A swing strikes the ball at most once
    pub struck: bool,
}

impl KickState {
    #[inline]
    pub fn swinging(&self) -> bool {
        self.remaining > 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub side: Side,
    pub role: Role,
    /// Kickoff position
    pub spawn: Vec2,
    pub body: Body,
    pub kick: KickState,
    pub control: Control,
}

impl Player {
    pub fn human(id: u32, side: Side, role: Role, spawn: Vec2, slot: usize) -> Self {
        Self {
            id,
            side,
            role,
            spawn,
            body: Body::player(spawn),
            kick: KickState::default(),
            control: Control::Human { slot },
        }
    }

    pub fn bot(id: u32, side: Side, role: Role, spawn: Vec2, brain: BotBrain) -> Self {
        Self {
            id,
            side,
            role,
            spawn,
            body: Body::player(spawn),
            kick: KickState::default(),
            control: Control::Bot(brain),
        }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.control, Control::Bot(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Live play: physics, inputs, bots, clock
    Playing,
    /// Frozen after a goal, waiting for the kickoff reset
    GoalPause,
    /// Clock hit zero; nothing moves the score anymore
    Ended,
}

/// Goals per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn side(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn add(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }
}

/// What the outside world needs to hear about a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    Goal { scorer: Side },
    /// Positions reset after the goal pause; play is live again
    Kickoff,
    Ended { score: Score },
}

/// Complete state of one running match. Created at match start, torn down
/// with the match; public fields double as the per-frame render snapshot.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub config: MatchConfig,
    pub field: Field,
    pub players: Vec<Player>,
    pub ball: Body,
    pub phase: MatchPhase,
    /// Suspends ticking without touching any latch
    pub paused: bool,
    pub score: Score,
    /// Remaining whole seconds
    pub clock: u32,
    /// Countdown to kickoff while in `GoalPause`
    pub goal_pause: f32,
    pub(crate) rng: Pcg32,
}

const BALL_SPAWN: Vec2 = Vec2::new(600.0, 300.0);
/// Career bots stack up in front of their goal
const SQUAD_SPAWNS: [Vec2; 4] = [
    Vec2::new(1000.0, 450.0),
    Vec2::new(850.0, 480.0),
    Vec2::new(900.0, 420.0),
    Vec2::new(950.0, 500.0),
];

impl MatchState {
    /// Validate the config and lay out the match
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let players = roster(&config);
        let rng = Pcg32::seed_from_u64(config.seed);
        let mut state = Self {
            clock: config.match_secs,
            config,
            field: Field::standard(),
            players,
            ball: Body::ball(BALL_SPAWN),
            phase: MatchPhase::Playing,
            paused: false,
            score: Score::default(),
            goal_pause: 0.0,
            rng,
        };
        state.kickoff();
        Ok(state)
    }

    /// Put everyone back on their spawn spots with zeroed motion
    pub fn kickoff(&mut self) {
        for p in &mut self.players {
            p.body = Body::player(p.spawn);
            p.kick = KickState::default();
        }
        self.ball = Body::ball(BALL_SPAWN);
    }

    /// Number of human input slots this lineup expects
    pub fn human_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_bot()).count()
    }

    pub fn time_remaining(&self) -> u32 {
        self.clock
    }

    /// Career outcome payload, available once the match has ended
    pub fn report(&self) -> Option<MatchReport> {
        match (&self.phase, &self.config.mode) {
            (MatchPhase::Ended, GameMode::Career { level }) => Some(MatchReport {
                level: *level,
                victory: self.score.left > self.score.right,
                score: (self.score.left, self.score.right),
            }),
            _ => None,
        }
    }
}

/// Build the lineup for a mode. Assumes the config already validated.
fn roster(config: &MatchConfig) -> Vec<Player> {
    let brain = |tier: crate::config::Difficulty, tactic| {
        BotBrain::new(config.profile_override.unwrap_or_else(|| tier.profile()), tactic)
    };
    match &config.mode {
        GameMode::Duel { right_bot } => {
            let left = Player::human(0, Side::Left, Role::Attacker, Vec2::new(200.0, 450.0), 0);
            let right_spawn = Vec2::new(1000.0, 450.0);
            let right = match right_bot {
                None => Player::human(1, Side::Right, Role::Attacker, right_spawn, 1),
                Some(tier) => Player::bot(
                    1,
                    Side::Right,
                    Role::Attacker,
                    right_spawn,
                    brain(*tier, Tactic::Solo),
                ),
            };
            vec![left, right]
        }
        GameMode::Pairs { right_bots } => {
            let mut players = vec![Player::human(
                0,
                Side::Left,
                Role::Attacker,
                Vec2::new(150.0, 420.0),
                0,
            )];
            let r_att = Vec2::new(1050.0, 420.0);
            let r_def = Vec2::new(950.0, 480.0);
            let l_def = Vec2::new(250.0, 480.0);
            match right_bots {
                None => {
                    players.push(Player::human(1, Side::Right, Role::Attacker, r_att, 1));
                    players.push(Player::human(2, Side::Left, Role::Defender, l_def, 2));
                    players.push(Player::human(3, Side::Right, Role::Defender, r_def, 3));
                }
                Some(tier) => {
                    players.push(Player::bot(
                        1,
                        Side::Right,
                        Role::Attacker,
                        r_att,
                        brain(*tier, Tactic::Team),
                    ));
                    players.push(Player::human(2, Side::Left, Role::Defender, l_def, 1));
                    players.push(Player::bot(
                        3,
                        Side::Right,
                        Role::Defender,
                        r_def,
                        brain(*tier, Tactic::Team),
                    ));
                }
            }
            players
        }
        GameMode::Career { level } => {
            // Validation guarantees the level exists
            let rung = career::level(*level).expect("validated career level");
            let mut players = vec![Player::human(
                0,
                Side::Left,
                Role::Attacker,
                Vec2::new(200.0, 450.0),
                0,
            )];
            for i in 0..rung.opponents {
                players.push(Player::bot(
                    1 + i as u32,
                    Side::Right,
                    Role::Attacker,
                    SQUAD_SPAWNS[i as usize],
                    brain(
                        rung.tier,
                        Tactic::Squad {
                            index: i,
                            pack: rung.opponents,
                        },
                    ),
                ));
            }
            players
        }
    }
}
