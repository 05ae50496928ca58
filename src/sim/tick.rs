//! Per-frame match advancement
//!
//! The host loop calls [`tick`] once per rendered frame with the elapsed
//! delta time, and [`second_elapsed`] once per wall-clock second for the
//! match clock - the clock is the only wall-time-driven piece, everything
//! else accumulates dt and therefore freezes for free while paused.
//!
//! Frame order is fixed: physics integration and resolution, then contact
//! consumption (goals first, passive touches, then the pinch rule), then
//! swing windows, then human inputs and bot decisions for the next frame.

use glam::Vec2;
use rand::Rng;

use super::ai;
use super::field::Side;
use super::kick;
use super::physics::{self, Contact};
use super::state::{Control, MatchEvent, MatchPhase, MatchState};
use crate::consts::*;
use crate::distance;

/// Discrete input signals for one human player for one frame.
/// `kick` is edge-triggered: true only on the frame the key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub kick: bool,
}

/// Inputs for every human slot this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub players: [PlayerInput; MAX_HUMANS],
}

/// Advance the match by one frame. Returns the frame's events.
pub fn tick(state: &mut MatchState, input: &TickInput, dt: f32) -> Vec<MatchEvent> {
    let mut events = Vec::new();

    if state.paused || state.phase == MatchPhase::Ended {
        return events;
    }

    if state.phase == MatchPhase::GoalPause {
        state.goal_pause -= dt;
        if state.goal_pause <= 0.0 {
            state.kickoff();
            state.phase = MatchPhase::Playing;
            events.push(MatchEvent::Kickoff);
        }
        return events;
    }

    let contacts = physics::step(&mut state.players, &mut state.ball, &state.field, dt);

    // Goals outrank everything; the first one freezes the frame
    for contact in &contacts {
        if let Contact::BallInGoal { side } = contact {
            let scorer = side.opponent();
            state.score.add(scorer);
            state.phase = MatchPhase::GoalPause;
            state.goal_pause = GOAL_RESET_SECS;
            log::info!(
                "goal for {} ({} - {})",
                scorer.as_str(),
                state.score.left,
                state.score.right
            );
            events.push(MatchEvent::Goal { scorer });
            return events;
        }
    }

    // Passive body touches deflect the ball
    for contact in &contacts {
        if let Contact::BallPlayer { player } = contact
            && let Some(p) = state.players.iter().find(|p| p.id == *player)
        {
            kick::deflect(&mut state.ball, p.body.pos);
        }
    }

    // Pinch rule last so it wins: a ball wedged between two colliding
    // players pops up and out instead of sitting dead
    for contact in &contacts {
        if let Contact::Players { a, b } = contact {
            let pos_of = |id: u32| {
                state
                    .players
                    .iter()
                    .find(|p| p.id == id)
                    .map(|p| p.body.pos)
            };
            let (Some(pa), Some(pb)) = (pos_of(*a), pos_of(*b)) else {
                continue;
            };
            if distance(pa, state.ball.pos) < PINCH_RADIUS
                && distance(pb, state.ball.pos) < PINCH_RADIUS
            {
                let magnitude = state.rng.random_range(60.0..200.0);
                let sign = if state.rng.random::<bool>() { 1.0 } else { -1.0 };
                state.ball.vel = Vec2::new(sign * magnitude, PINCH_LAUNCH);
            }
        }
    }

    kick::update_swings(&mut state.players, &mut state.ball, dt);

    apply_human_inputs(state, input);
    run_bots(state, dt);

    events
}

/// Wall-clock hook: the host calls this once per real second. The clock
/// only runs during live, unpaused play.
pub fn second_elapsed(state: &mut MatchState) -> Vec<MatchEvent> {
    let mut events = Vec::new();
    if state.paused || state.phase != MatchPhase::Playing {
        return events;
    }
    state.clock = state.clock.saturating_sub(1);
    if state.clock == 0 {
        state.phase = MatchPhase::Ended;
        log::info!(
            "full time: {} - {}",
            state.score.left,
            state.score.right
        );
        events.push(MatchEvent::Ended { score: state.score });
    }
    events
}

fn apply_human_inputs(state: &mut MatchState, input: &TickInput) {
    let ball_pos = state.ball.pos;
    for p in &mut state.players {
        let Control::Human { slot } = p.control else {
            continue;
        };
        let keys = input.players[slot];

        if keys.left {
            p.body.vel.x = -PLAYER_SPEED;
        } else if keys.right {
            p.body.vel.x = PLAYER_SPEED;
        } else {
            p.body.vel.x = 0.0;
        }

        if keys.jump && p.body.resting {
            p.body.vel.y = JUMP_VELOCITY;
            p.body.resting = false;
        }

        if keys.kick {
            kick::start_swing(p, &mut state.ball, ball_pos, KICK_RANGE);
        }
    }
}

fn run_bots(state: &mut MatchState, dt: f32) {
    // Positions snapshot before any decision applies, so bot order is moot
    let roster: Vec<(Vec2, Side)> = state
        .players
        .iter()
        .map(|p| (p.body.pos, p.side))
        .collect();

    for i in 0..state.players.len() {
        if !state.players[i].is_bot() {
            continue;
        }
        let others: Vec<(Vec2, Side)> = roster
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, &v)| v)
            .collect();

        let decision = ai::think(
            &mut state.players[i],
            &state.ball,
            &others,
            dt,
            &mut state.rng,
        );

        let p = &mut state.players[i];
        if let Some(vx) = decision.run {
            p.body.vel.x = vx;
        }
        if decision.jump {
            p.body.vel.y = JUMP_VELOCITY;
            p.body.resting = false;
        }
        if let Some(range) = decision.swing {
            // Swing toward the goal being attacked; the strike itself
            // resolves off the ball angle like any other kick
            let aim = p.side.opponent().goal_center();
            kick::start_swing(p, &mut state.ball, aim, range);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Difficulty, GameMode, MatchConfig};
    use crate::sim::state::Score;

    fn duel_pvp() -> MatchState {
        MatchState::new(MatchConfig::default()).unwrap()
    }

    fn press(slot: usize, input: PlayerInput) -> TickInput {
        let mut t = TickInput::default();
        t.players[slot] = input;
        t
    }

    #[test]
    fn test_goal_latch_prevents_double_count() {
        let mut state = duel_pvp();
        // Park the ball inside the left mouth
        state.ball.pos = Vec2::new(40.0, GOAL_Y);
        state.ball.vel = Vec2::ZERO;
        state.ball.gravity = false;
        let events = tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        assert_eq!(events, vec![MatchEvent::Goal { scorer: Side::Right }]);
        assert_eq!(state.score, Score { left: 0, right: 1 });
        assert_eq!(state.phase, MatchPhase::GoalPause);
        // Sensor still overlapped on the next frame: the latch holds
        let events = tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        assert!(events.is_empty());
        assert_eq!(state.score, Score { left: 0, right: 1 });
    }

    #[test]
    fn test_goal_pause_resets_to_kickoff_once() {
        let mut state = duel_pvp();
        state.ball.pos = Vec2::new(1160.0, GOAL_Y);
        tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        assert_eq!(state.phase, MatchPhase::GoalPause);
        // Pause window elapses: exactly one kickoff
        let events = tick(&mut state, &TickInput::default(), GOAL_RESET_SECS + 0.1);
        assert_eq!(events, vec![MatchEvent::Kickoff]);
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.ball.pos, Vec2::new(600.0, 300.0));
        let events = tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        assert!(events.is_empty());
        assert_eq!(state.score, Score { left: 1, right: 0 });
    }

    #[test]
    fn test_final_second_ends_the_match() {
        let mut state = MatchState::new(MatchConfig {
            match_secs: 1,
            ..MatchConfig::default()
        })
        .unwrap();
        assert_eq!(state.time_remaining(), 1);
        let events = second_elapsed(&mut state);
        assert_eq!(state.time_remaining(), 0);
        assert_eq!(
            events,
            vec![MatchEvent::Ended {
                score: Score::default()
            }]
        );
        assert_eq!(state.phase, MatchPhase::Ended);
        // Post-match frames change nothing, even with the ball in a mouth
        state.ball.pos = Vec2::new(40.0, GOAL_Y);
        let events = tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        assert!(events.is_empty());
        assert_eq!(state.score, Score::default());
        assert!(second_elapsed(&mut state).is_empty());
    }

    #[test]
    fn test_clock_freezes_during_goal_pause_and_pause() {
        let mut state = duel_pvp();
        state.phase = MatchPhase::GoalPause;
        second_elapsed(&mut state);
        assert_eq!(state.time_remaining(), MATCH_SECS);
        state.phase = MatchPhase::Playing;
        state.paused = true;
        second_elapsed(&mut state);
        assert_eq!(state.time_remaining(), MATCH_SECS);
        state.paused = false;
        second_elapsed(&mut state);
        assert_eq!(state.time_remaining(), MATCH_SECS - 1);
    }

    #[test]
    fn test_pause_freezes_motion_and_resumes_in_place() {
        let mut state = duel_pvp();
        state.ball.vel = Vec2::new(200.0, 0.0);
        let before_ball = state.ball.pos;
        state.paused = true;
        let input = press(0, PlayerInput { right: true, ..Default::default() });
        assert!(tick(&mut state, &input, 0.5).is_empty());
        assert_eq!(state.ball.pos, before_ball);
        state.paused = false;
        tick(&mut state, &input, 1.0 / 60.0);
        assert!(state.ball.pos.x > before_ball.x);
        assert!(state.players[0].body.vel.x > 0.0);
    }

    #[test]
    fn test_pinched_ball_pops_out() {
        let mut state = duel_pvp();
        // Two players overlapping with the ball dead between them
        state.players[0].body.pos = Vec2::new(585.0, 550.0);
        state.players[1].body.pos = Vec2::new(615.0, 550.0);
        state.ball.pos = Vec2::new(600.0, 552.0);
        state.ball.vel = Vec2::ZERO;
        tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        assert_eq!(state.ball.vel.y, PINCH_LAUNCH);
        assert!(state.ball.vel.x.abs() >= 60.0);
    }

    #[test]
    fn test_passive_touch_deflects_ball() {
        let mut state = duel_pvp();
        state.players[0].body.pos = Vec2::new(600.0, 300.0);
        state.players[0].body.gravity = false;
        state.ball.pos = Vec2::new(635.0, 300.0);
        state.ball.gravity = false;
        state.ball.vel = Vec2::ZERO;
        tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        // Deflected away from the player at the fixed touch speed
        assert!(state.ball.vel.x > 0.0);
        assert!((state.ball.speed() - TOUCH_SPEED).abs() < 1.0);
    }

    #[test]
    fn test_human_movement_and_edge_kick() {
        let mut state = duel_pvp();
        let input = press(0, PlayerInput { right: true, ..Default::default() });
        tick(&mut state, &input, 1.0 / 60.0);
        assert_eq!(state.players[0].body.vel.x, PLAYER_SPEED);
        // Kick press opens a swing even with the ball across the pitch
        let input = press(0, PlayerInput { kick: true, ..Default::default() });
        tick(&mut state, &input, 1.0 / 60.0);
        assert!(state.players[0].kick.swinging());
    }

    #[test]
    fn test_jump_needs_footing() {
        let mut state = duel_pvp();
        // Settle onto the ground first
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        }
        assert!(state.players[0].body.resting);
        let input = press(0, PlayerInput { jump: true, ..Default::default() });
        tick(&mut state, &input, 1.0 / 60.0);
        assert!(state.players[0].body.vel.y < 0.0);
        // Airborne now; a held jump key adds nothing
        let vy = state.players[0].body.vel.y;
        tick(&mut state, &input, 1.0 / 60.0);
        assert!(state.players[0].body.vel.y >= vy);
    }

    #[test]
    fn test_bots_drive_toward_play() {
        let mut state = MatchState::new(MatchConfig {
            mode: GameMode::Duel {
                right_bot: Some(Difficulty::Hard),
            },
            seed: 11,
            ..MatchConfig::default()
        })
        .unwrap();
        // Ball on the bot's half: within a few frames the hard bot
        // (150 ms reaction) starts moving
        state.ball.pos = Vec2::new(800.0, 400.0);
        state.ball.gravity = false;
        let mut moved = false;
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
            if state.players[1].body.vel.x.abs() > 0.0 {
                moved = true;
                break;
            }
        }
        assert!(moved);
    }

    #[test]
    fn test_zero_accuracy_bot_never_acts() {
        use crate::sim::ai::BotProfile;
        let mut state = MatchState::new(MatchConfig {
            mode: GameMode::Duel {
                right_bot: Some(Difficulty::Easy),
            },
            profile_override: Some(BotProfile {
                reaction_ms: 0.0,
                accuracy: 0.0,
                speed: 1.0,
                jump_chance: 0.0,
                kick_range: 200.0,
            }),
            seed: 5,
            ..MatchConfig::default()
        })
        .unwrap();
        // Ball parked right next to the bot
        state.ball.pos = Vec2::new(960.0, 540.0);
        state.ball.gravity = false;
        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
            state.ball.pos = Vec2::new(960.0, 540.0);
            state.ball.vel = Vec2::ZERO;
            assert_eq!(state.players[1].body.vel.x, 0.0);
            assert!(!state.players[1].kick.swinging());
        }
    }
}
