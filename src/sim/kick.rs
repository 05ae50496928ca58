//! Ball contact resolution: passive touches and deliberate kicks
//!
//! Two pathways move the ball off a player. A passive touch (any overlap
//! with the body) *sets* the ball velocity to a fixed magnitude along the
//! body-to-ball angle - no momentum is conserved, which keeps deflections
//! predictable at any incoming speed. A deliberate kick opens a short
//! swing window; it strikes with the body power if the ball is in range at
//! trigger time, and with the stronger foot power if the ball meets the
//! extended foot mid-swing. A swing can whiff entirely.

use glam::Vec2;

use super::state::{Body, Player};
use crate::consts::*;
use crate::{aim_angle, distance, from_angle};

/// Passive body touch: fixed-speed deflection away from the player
pub fn deflect(ball: &mut Body, player_pos: Vec2) {
    let theta = aim_angle(player_pos, ball.pos);
    ball.vel = from_angle(theta) * TOUCH_SPEED;
    // Never leave the ball dribbling under a player's feet
    if ball.vel.y > TOUCH_UPWARD_EPS && ball.pos.y > GROUND_Y - GROUND_SLACK {
        ball.vel.y = TOUCH_MIN_UPWARD;
    }
}

/// Set the ball moving away from `origin` at kick strength. Vertical
/// component is damped so shots stay line-driven, except kicks taken off
/// the turf get a guaranteed launch.
fn strike(ball: &mut Body, origin: Vec2, power: f32) {
    let theta = aim_angle(origin, ball.pos);
    ball.vel = Vec2::new(
        theta.cos() * power,
        theta.sin() * power * KICK_VERTICAL_SCALE,
    );
    if ball.pos.y > GROUND_Y - GROUND_SLACK {
        ball.vel.y = ball.vel.y.min(-KICK_MIN_LAUNCH);
    }
}

/// Try to open a swing. Returns false while a previous swing is still in
/// flight (at most one per player at a time). The foot extends toward
/// `aim`; the ball is struck immediately if within `range`, and may still
/// be met by the foot later in the window.
pub fn start_swing(player: &mut Player, ball: &mut Body, aim: Vec2, range: f32) -> bool {
    if player.kick.swinging() {
        return false;
    }

    let mut dir = (aim - player.body.pos).normalize_or_zero();
    if dir == Vec2::ZERO {
        dir = Vec2::X;
    }
    player.kick.remaining = SWING_SECS;
    player.kick.struck = false;
    player.kick.foot = player.body.pos + Vec2::new(0.0, HIP_DROP) + dir * LEG_REACH;

    if distance(player.body.pos, ball.pos) < range {
        strike(ball, player.body.pos, KICK_POWER);
    }
    true
}

/// Run down every active swing window and resolve foot-on-ball strikes.
/// Each swing connects at most once.
pub fn update_swings(players: &mut [Player], ball: &mut Body, dt: f32) {
    for p in players.iter_mut() {
        if !p.kick.swinging() {
            continue;
        }
        p.kick.remaining = (p.kick.remaining - dt).max(0.0);
        if !p.kick.struck && distance(p.kick.foot, ball.pos) < ball.radius + FOOT_RADIUS {
            strike(ball, p.body.pos, FOOT_KICK_POWER);
            p.kick.struck = true;
        }
    }
}
