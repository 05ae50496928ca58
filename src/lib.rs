//! Headball - a 2D head-to-head arcade football game
//!
//! Core modules:
//! - `sim`: Real-time match simulation (physics, kicks, bot AI, match flow)
//! - `config`: Match setup (modes, difficulty tiers, validation)
//! - `career`: Career ladder and persistent progress

pub mod career;
pub mod config;
pub mod sim;

pub use career::{CareerProgress, MatchReport};
pub use config::{Difficulty, GameMode, MatchConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Suggested fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Field dimensions (y grows downward, screen style)
    pub const FIELD_WIDTH: f32 = 1200.0;
    pub const FIELD_HEIGHT: f32 = 650.0;
    /// Top surface of the pitch
    pub const GROUND_Y: f32 = 580.0;
    /// Downward gravity, px/s²
    pub const GRAVITY: f32 = 1000.0;
    /// Default match length in seconds
    pub const MATCH_SECS: u32 = 90;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_BOUNCE: f32 = 0.2;
    /// Upward (negative y) jump velocity
    pub const JUMP_VELOCITY: f32 = -550.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    pub const BALL_BOUNCE: f32 = 0.8;
    /// Hard cap on ball speed (direction-preserving rescale)
    pub const BALL_MAX_SPEED: f32 = 800.0;

    /// Kick tuning
    pub const KICK_POWER: f32 = 900.0;
    /// Stronger strike when the extended foot connects mid-swing
    pub const FOOT_KICK_POWER: f32 = 1000.0;
    /// Upward floor applied to kicks taken off the turf
    pub const KICK_MIN_LAUNCH: f32 = 700.0;
    /// Kicks are mostly line-driven, not lobs
    pub const KICK_VERTICAL_SCALE: f32 = 0.6;
    pub const KICK_RANGE: f32 = 80.0;
    pub const LEG_REACH: f32 = 35.0;
    /// Hip anchor offset below the body center
    pub const HIP_DROP: f32 = 20.0;
    pub const FOOT_RADIUS: f32 = 5.0;
    /// Swing animation window; gates re-triggering
    pub const SWING_SECS: f32 = 0.2;

    /// Passive body-touch deflection
    pub const TOUCH_SPEED: f32 = 300.0;
    /// Minimum upward velocity forced on low ground touches
    pub const TOUCH_MIN_UPWARD: f32 = -350.0;
    /// A touch leaving the ball slower-rising than this counts as "not upward"
    pub const TOUCH_UPWARD_EPS: f32 = -100.0;
    /// "Near the ground" band for the minimum-upward rules
    pub const GROUND_SLACK: f32 = 50.0;

    /// Ball wedged between two colliding players
    pub const PINCH_RADIUS: f32 = 100.0;
    pub const PINCH_LAUNCH: f32 = -400.0;

    /// Goal geometry
    pub const GOAL_WIDTH: f32 = 80.0;
    pub const GOAL_HEIGHT: f32 = 150.0;
    pub const GOAL_Y: f32 = GROUND_Y - GOAL_HEIGHT / 2.0;
    /// Freeze-and-reset window after a goal
    pub const GOAL_RESET_SECS: f32 = 1.5;

    /// Rebounds slower than this snap to rest on the ground
    pub const REST_SNAP_SPEED: f32 = 150.0;

    /// Human input slots (2v2 all-human is the widest lineup)
    pub const MAX_HUMANS: usize = 4;
}

/// Distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Angle of the ray from `from` to `to`, radians
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit vector for an angle
#[inline]
pub fn from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
        assert_eq!(distance(Vec2::ONE, Vec2::ONE), 0.0);
    }

    #[test]
    fn test_aim_angle_cardinals() {
        let o = Vec2::ZERO;
        assert!((aim_angle(o, Vec2::new(10.0, 0.0))).abs() < 1e-6);
        assert!((aim_angle(o, Vec2::new(0.0, 10.0)) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((aim_angle(o, Vec2::new(-10.0, 0.0)).abs() - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_from_angle_round_trip() {
        let v = from_angle(aim_angle(Vec2::ZERO, Vec2::new(1.0, -1.0)));
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!(v.x > 0.0 && v.y < 0.0);
    }
}
