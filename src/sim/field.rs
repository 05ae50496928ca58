//! Static pitch geometry
//!
//! The pitch is a bounded rectangle: ground plane (top surface only), two
//! side walls, and a goal at each end. Goal mouths are non-solid sensors;
//! the crossbars are solid for the ball. Goalposts are a rendering detail
//! and have no collision here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which end of the pitch a player defends. Doubles as the team tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Center of the goal mouth this side defends
    pub fn goal_center(self) -> Vec2 {
        match self {
            Side::Left => Vec2::new(GOAL_WIDTH / 2.0, GOAL_Y),
            Side::Right => Vec2::new(FIELD_WIDTH - GOAL_WIDTH / 2.0, GOAL_Y),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        let half = Vec2::new(width / 2.0, height / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Closest point on or inside the box to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    /// Circle-vs-box overlap test
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        (center - self.closest_point(center)).length_squared() < radius * radius
    }
}

/// One end of the pitch
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Goal {
    pub side: Side,
    /// Scoring sensor, tucked inside the frame. Overlap-only.
    pub mouth: Rect,
    /// Solid rim along the top of the frame (ball bounces off it)
    pub crossbar: Rect,
}

/// All static geometry for a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub goals: [Goal; 2],
}

impl Field {
    /// The standard pitch layout
    pub fn standard() -> Self {
        const POST: f32 = 8.0;
        let goal_at = |side: Side| {
            let center = side.goal_center();
            let bar_y = GOAL_Y - GOAL_HEIGHT / 2.0;
            Goal {
                side,
                // Sensor is narrower/shorter than the frame so grazing
                // shots off the post line don't count
                mouth: Rect::centered(center, GOAL_WIDTH - 30.0, GOAL_HEIGHT - 20.0),
                crossbar: Rect::centered(
                    Vec2::new(center.x, bar_y),
                    GOAL_WIDTH + POST,
                    POST,
                ),
            }
        };
        Self {
            goals: [goal_at(Side::Left), goal_at(Side::Right)],
        }
    }

    pub fn goal(&self, side: Side) -> &Goal {
        &self.goals[match side {
            Side::Left => 0,
            Side::Right => 1,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_point() {
        let r = Rect::centered(Vec2::new(10.0, 10.0), 4.0, 4.0);
        // Inside stays put
        assert_eq!(r.closest_point(Vec2::new(10.0, 11.0)), Vec2::new(10.0, 11.0));
        // Outside clamps to the edge
        assert_eq!(r.closest_point(Vec2::new(20.0, 10.0)), Vec2::new(12.0, 10.0));
        assert_eq!(r.closest_point(Vec2::new(0.0, 0.0)), Vec2::new(8.0, 8.0));
    }

    #[test]
    fn test_overlaps_circle() {
        let r = Rect::centered(Vec2::ZERO, 10.0, 10.0);
        assert!(r.overlaps_circle(Vec2::new(7.0, 0.0), 3.0));
        assert!(!r.overlaps_circle(Vec2::new(9.0, 0.0), 3.0));
        // Corner case: diagonal distance matters, not per-axis
        assert!(!r.overlaps_circle(Vec2::new(7.5, 7.5), 3.0));
    }

    #[test]
    fn test_goal_layout() {
        let field = Field::standard();
        let left = field.goal(Side::Left);
        let right = field.goal(Side::Right);
        assert_eq!(left.mouth.center().x, 40.0);
        assert_eq!(right.mouth.center().x, FIELD_WIDTH - 40.0);
        // Crossbar sits on top of the mouth
        assert!(left.crossbar.center().y < left.mouth.min.y);
        // Ball-sized circle in the mouth registers, one in open play doesn't
        assert!(left.mouth.overlaps_circle(Vec2::new(40.0, GOAL_Y), BALL_RADIUS));
        assert!(!left.mouth.overlaps_circle(Vec2::new(300.0, GOAL_Y), BALL_RADIUS));
    }

    #[test]
    fn test_side_helpers() {
        assert_eq!(Side::Left.opponent(), Side::Right);
        assert_eq!(Side::Left.goal_center().x, 40.0);
        assert_eq!(Side::Right.goal_center().x, 1160.0);
    }
}
