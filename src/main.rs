//! Headball exhibition runner
//!
//! Plays an unattended 1v1 match against a bot at a fixed 60 Hz timestep,
//! with a scripted stand-in driving the human slot. Useful for smoke
//! testing the whole simulation and for eyeballing bot tiers from logs.
//!
//! Usage: headball [difficulty] [seed]

use headball::config::{Difficulty, GameMode, MatchConfig};
use headball::consts::*;
use headball::distance;
use headball::sim::{
    MatchEvent, MatchPhase, MatchState, PlayerInput, TickInput, second_elapsed, tick,
};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let difficulty = match args.next() {
        Some(s) => match Difficulty::from_str(&s) {
            Some(d) => d,
            None => {
                eprintln!("unknown difficulty '{s}' (below-easy/easy/medium-easy/medium/hard)");
                std::process::exit(2);
            }
        },
        None => Difficulty::Medium,
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0xB411);

    let config = MatchConfig {
        mode: GameMode::Duel {
            right_bot: Some(difficulty),
        },
        seed,
        ..MatchConfig::default()
    };

    let mut state = match MatchState::new(config) {
        Ok(state) => state,
        Err(err) => {
            log::error!("match setup rejected: {err}");
            std::process::exit(2);
        }
    };

    log::info!(
        "exhibition: scripted player vs {} bot, seed {seed}",
        difficulty.as_str()
    );

    let frames_per_second = (1.0 / SIM_DT).round() as u32;
    'outer: while state.phase != MatchPhase::Ended {
        for _ in 0..frames_per_second {
            let input = TickInput {
                players: [autopilot(&state), PlayerInput::default(), PlayerInput::default(), PlayerInput::default()],
            };
            for event in tick(&mut state, &input, SIM_DT) {
                announce(&state, &event);
            }
        }
        for event in second_elapsed(&mut state) {
            announce(&state, &event);
            if matches!(event, MatchEvent::Ended { .. }) {
                break 'outer;
            }
        }
    }

    println!(
        "final score {} - {} (scripted player vs {} bot)",
        state.score.left,
        state.score.right,
        difficulty.as_str()
    );
}

/// Scripted stand-in for the human slot: chase the ball, jump under high
/// balls, swing when in reach. Kick stays edge-triggered by only pressing
/// while no swing is in flight.
fn autopilot(state: &MatchState) -> PlayerInput {
    let me = &state.players[0];
    let ball = &state.ball;

    let mut input = PlayerInput::default();
    let lead = ball.pos + ball.vel * 0.1;
    if me.body.pos.x < lead.x - 30.0 {
        input.right = true;
    } else if me.body.pos.x > lead.x + 30.0 {
        input.left = true;
    }

    let ball_dist = distance(me.body.pos, ball.pos);
    if ball.pos.y < me.body.pos.y - 50.0 && ball_dist < 150.0 && me.body.resting {
        input.jump = true;
    }
    if ball_dist < KICK_RANGE && !me.kick.swinging() {
        input.kick = true;
    }
    input
}

/// Log a frame event with the current scoreboard
fn announce(state: &MatchState, event: &MatchEvent) {
    match event {
        MatchEvent::Goal { scorer } => log::info!(
            "{}' goal, {} side ({} - {})",
            state.config.match_secs - state.clock,
            scorer.as_str(),
            state.score.left,
            state.score.right
        ),
        MatchEvent::Kickoff => log::debug!("kickoff"),
        MatchEvent::Ended { score } => {
            log::info!("match over {} - {}", score.left, score.right)
        }
    }
}
