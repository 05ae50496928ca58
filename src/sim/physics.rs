//! Gravity integration and collision resolution
//!
//! Each frame every non-static body is integrated, resolved against the
//! static pitch geometry, then overlap-tested against the other bodies.
//! Overlaps come back as a typed contact list; the match director consumes
//! that list in a fixed order, so nothing here fires callbacks or depends
//! on registration order.

use glam::Vec2;

use super::field::{Field, Rect, Side};
use super::state::{Body, Player};
use crate::consts::*;

/// A discrete overlap observed during one resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Ball touched a player's main body
    BallPlayer { player: u32 },
    /// Two players ran into each other
    Players { a: u32, b: u32 },
    /// Ball bounced off a goal crossbar
    BallCrossbar { side: Side },
    /// Ball is inside a goal mouth sensor. `side` names the goal, so the
    /// *other* side scored.
    BallInGoal { side: Side },
}

/// Advance one body by `dt`
pub fn integrate(body: &mut Body, dt: f32) {
    if body.gravity {
        body.vel.y += GRAVITY * dt;
    }
    body.pos += body.vel * dt;
}

/// Resolve a body against ground, walls, ceiling and (for the ball) the
/// goal crossbars. Returns the crossbar side on a rim hit.
pub fn resolve_static(body: &mut Body, field: &Field, solid_crossbars: bool) -> Option<Side> {
    sanitize(body);
    let r = body.radius;
    body.resting = false;

    // Ground is one-sided: only descending bodies land on it
    if body.pos.y + r > GROUND_Y && body.vel.y >= 0.0 {
        body.pos.y = GROUND_Y - r;
        body.vel.y = -body.vel.y * body.bounce;
        if body.vel.y.abs() < REST_SNAP_SPEED {
            body.vel.y = 0.0;
            body.resting = true;
        }
    }

    // Side walls hard-clamp; rebound goes through the bounce coefficient
    if body.pos.x - r < 0.0 {
        body.pos.x = r;
        body.vel.x = -body.vel.x * body.bounce;
    } else if body.pos.x + r > FIELD_WIDTH {
        body.pos.x = FIELD_WIDTH - r;
        body.vel.x = -body.vel.x * body.bounce;
    }

    // Ceiling
    if body.pos.y - r < 0.0 {
        body.pos.y = r;
        body.vel.y = -body.vel.y * body.bounce;
    }

    let mut rim_hit = None;
    if solid_crossbars {
        for goal in &field.goals {
            if circle_rect_resolve(body, &goal.crossbar) {
                rim_hit = Some(goal.side);
            }
        }
    }

    if let Some(max) = body.max_speed {
        clamp_speed(body, max);
    }

    rim_hit
}

/// Uniform scale-down that preserves direction
#[inline]
pub fn clamp_speed(body: &mut Body, max: f32) {
    let speed = body.vel.length();
    if speed > max {
        body.vel *= max / speed;
    }
}

/// Push a circle out of a solid box and reflect the penetrating velocity
/// component, scaled by the body's bounce. Returns true on contact.
fn circle_rect_resolve(body: &mut Body, rect: &Rect) -> bool {
    let closest = rect.closest_point(body.pos);
    let delta = body.pos - closest;
    let dist_sq = delta.length_squared();
    if dist_sq >= body.radius * body.radius {
        return false;
    }

    let (normal, depth) = if dist_sq > 1e-6 {
        let dist = dist_sq.sqrt();
        (delta / dist, body.radius - dist)
    } else {
        // Center inside the box; eject upward
        (Vec2::new(0.0, -1.0), body.radius)
    };

    body.pos += normal * depth;
    let along = body.vel.dot(normal);
    if along < 0.0 {
        body.vel -= (1.0 + body.bounce) * along * normal;
    }
    true
}

#[inline]
fn circles_touch(a: &Body, b: &Body) -> bool {
    let reach = a.radius + b.radius;
    (a.pos - b.pos).length_squared() < reach * reach
}

/// A body should never go non-finite; if an upstream bug produces one,
/// clamp it back onto the pitch rather than crash mid-frame.
fn sanitize(body: &mut Body) {
    if body.pos.is_finite() && body.vel.is_finite() {
        return;
    }
    debug_assert!(false, "non-finite body: pos {:?} vel {:?}", body.pos, body.vel);
    log::warn!(
        "non-finite body reset (pos {:?}, vel {:?})",
        body.pos,
        body.vel
    );
    body.pos = Vec2::new(FIELD_WIDTH / 2.0, GROUND_Y - body.radius);
    body.vel = Vec2::ZERO;
}

/// One full physics pass: integrate and resolve every body, then collect
/// the frame's contacts.
pub fn step(players: &mut [Player], ball: &mut Body, field: &Field, dt: f32) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for p in players.iter_mut() {
        integrate(&mut p.body, dt);
        resolve_static(&mut p.body, field, false);
    }

    integrate(ball, dt);
    if let Some(side) = resolve_static(ball, field, true) {
        contacts.push(Contact::BallCrossbar { side });
    }

    for goal in &field.goals {
        if goal.mouth.overlaps_circle(ball.pos, ball.radius) {
            contacts.push(Contact::BallInGoal { side: goal.side });
        }
    }

    for i in 0..players.len() {
        if circles_touch(&players[i].body, ball) {
            contacts.push(Contact::BallPlayer {
                player: players[i].id,
            });
        }
        for j in i + 1..players.len() {
            if circles_touch(&players[i].body, &players[j].body) {
                contacts.push(Contact::Players {
                    a: players[i].id,
                    b: players[j].id,
                });
            }
        }
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ground_is_one_sided() {
        let field = Field::standard();
        let mut body = Body::player(Vec2::new(600.0, GROUND_Y - 10.0));
        body.vel = Vec2::new(0.0, 400.0);
        integrate(&mut body, 0.1);
        resolve_static(&mut body, &field, false);
        assert_eq!(body.pos.y, GROUND_Y - body.radius);
        // A body moving up through the ground line is left alone
        let mut riser = Body::ball(Vec2::new(600.0, GROUND_Y + 5.0));
        riser.vel = Vec2::new(0.0, -300.0);
        resolve_static(&mut riser, &field, false);
        assert_eq!(riser.pos.y, GROUND_Y + 5.0);
    }

    #[test]
    fn test_landing_slow_snaps_to_rest() {
        let field = Field::standard();
        let mut body = Body::player(Vec2::new(600.0, GROUND_Y - 25.0));
        body.vel = Vec2::new(0.0, 100.0);
        integrate(&mut body, 1.0 / 60.0);
        resolve_static(&mut body, &field, false);
        assert!(body.resting);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_ball_keeps_bouncing_when_fast() {
        let field = Field::standard();
        let mut ball = Body::ball(Vec2::new(600.0, GROUND_Y - 20.0));
        ball.vel = Vec2::new(0.0, 600.0);
        integrate(&mut ball, 1.0 / 60.0);
        resolve_static(&mut ball, &field, true);
        assert!(!ball.resting);
        // Rebound is upward, scaled by the bounce coefficient
        assert!(ball.vel.y < 0.0);
        assert!((ball.vel.y.abs() - 600.0 * BALL_BOUNCE).abs() < 50.0);
    }

    #[test]
    fn test_wall_clamp() {
        let field = Field::standard();
        let mut ball = Body::ball(Vec2::new(FIELD_WIDTH - 5.0, 300.0));
        ball.vel = Vec2::new(500.0, 0.0);
        resolve_static(&mut ball, &field, false);
        assert_eq!(ball.pos.x, FIELD_WIDTH - ball.radius);
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_speed_clamp_preserves_direction() {
        let mut ball = Body::ball(Vec2::new(600.0, 300.0));
        ball.vel = Vec2::new(900.0, -1200.0);
        let before = ball.vel.normalize();
        clamp_speed(&mut ball, BALL_MAX_SPEED);
        assert!((ball.speed() - BALL_MAX_SPEED).abs() < 0.01);
        assert!((ball.vel.normalize() - before).length() < 1e-5);
    }

    #[test]
    fn test_crossbar_bounces_ball() {
        let field = Field::standard();
        // Drop the ball onto the left crossbar from above
        let bar = field.goal(Side::Left).crossbar;
        let mut ball = Body::ball(Vec2::new(bar.center().x, bar.min.y - 10.0));
        ball.vel = Vec2::new(0.0, 300.0);
        integrate(&mut ball, 1.0 / 60.0);
        let hit = resolve_static(&mut ball, &field, true);
        assert_eq!(hit, Some(Side::Left));
        assert!(ball.vel.y < 0.0);
        // Players pass straight through the rim
        let mut p = Body::player(Vec2::new(bar.center().x, bar.min.y - 10.0));
        p.vel = Vec2::new(0.0, 300.0);
        integrate(&mut p, 1.0 / 60.0);
        assert_eq!(resolve_static(&mut p, &field, false), None);
    }

    #[test]
    fn test_step_reports_goal_contact() {
        let field = Field::standard();
        let mut ball = Body::ball(Vec2::new(40.0, GOAL_Y));
        ball.gravity = false;
        let contacts = step(&mut [], &mut ball, &field, 1.0 / 60.0);
        assert!(contacts.contains(&Contact::BallInGoal { side: Side::Left }));
    }

    #[test]
    #[should_panic(expected = "non-finite body")]
    fn test_non_finite_body_is_fatal_in_tests() {
        let field = Field::standard();
        let mut ball = Body::ball(Vec2::new(f32::NAN, 300.0));
        resolve_static(&mut ball, &field, true);
    }

    proptest! {
        /// Once resolution has run, nothing leaves the pitch and the ball
        /// never beats its speed cap.
        #[test]
        fn prop_ball_stays_on_pitch(
            x in 20.0f32..1180.0,
            y in 20.0f32..420.0,
            vx in -800.0f32..800.0,
            vy in -800.0f32..800.0,
        ) {
            let field = Field::standard();
            let mut ball = Body::ball(Vec2::new(x, y));
            ball.vel = Vec2::new(vx, vy);
            for _ in 0..600 {
                integrate(&mut ball, 1.0 / 60.0);
                resolve_static(&mut ball, &field, true);
                prop_assert!(ball.pos.x >= ball.radius - 1.0);
                prop_assert!(ball.pos.x <= FIELD_WIDTH - ball.radius + 1.0);
                prop_assert!(ball.pos.y >= ball.radius - 1.0);
                prop_assert!(ball.pos.y <= GROUND_Y - ball.radius + 1.0);
                prop_assert!(ball.speed() <= BALL_MAX_SPEED + 0.01);
            }
        }

        #[test]
        fn prop_players_stay_on_pitch(
            x in 30.0f32..1170.0,
            vx in -400.0f32..400.0,
        ) {
            let field = Field::standard();
            let mut p = Body::player(Vec2::new(x, 450.0));
            p.vel = Vec2::new(vx, JUMP_VELOCITY);
            for _ in 0..600 {
                integrate(&mut p, 1.0 / 60.0);
                resolve_static(&mut p, &field, false);
                prop_assert!(p.pos.x >= p.radius - 1.0);
                prop_assert!(p.pos.x <= FIELD_WIDTH - p.radius + 1.0);
                prop_assert!(p.pos.y <= GROUND_Y - p.radius + 1.0);
            }
        }
    }
}
