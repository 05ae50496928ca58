//! Real-time match simulation
//!
//! Everything that moves during a match lives here. The module is
//! host-agnostic and single-threaded: the embedding loop feeds
//! [`tick`] delta times and per-frame inputs, reads the public
//! [`MatchState`] fields back as its render snapshot, and pings
//! [`second_elapsed`] off its own wall clock.

pub mod ai;
pub mod field;
pub mod kick;
pub mod physics;
pub mod state;
pub mod tick;

pub use ai::{BotBrain, BotProfile, Tactic};
pub use field::{Field, Goal, Rect, Side};
pub use physics::Contact;
pub use state::{
    Body, Control, KickState, MatchEvent, MatchPhase, MatchState, Player, Role, Score,
};
pub use tick::{PlayerInput, TickInput, second_elapsed, tick};
