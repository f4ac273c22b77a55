//! Ledgewalk - movement and collision core for a 2D side-scrolling platformer
//!
//! Core modules:
//! - `terrain`: sorted line-segment index for a loaded level
//! - `collision`: geometry predicates and direction-tagged contact flags
//! - `state`: entity record, motion states, hitbox derivation
//! - `rules`: per-archetype movement tuning, loaded from JSON
//! - `mover`: swept sub-step movement against terrain
//! - `tick`: per-tick motion rules and the motion state machine
//!
//! The crate is the simulation half only. Rendering, input devices and
//! animation playback live with the caller; they feed `tick::advance` a
//! per-tick [`tick::Intent`] and consume the resulting position, facing
//! and motion state.
//!
//! Everything runs on an integer pixel grid with y growing downward, so
//! "up" is a negative y displacement throughout.

pub mod collision;
pub mod mover;
pub mod rules;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collision::{Contact, Rect};
pub use mover::MoveResult;
pub use rules::{MovementRule, RulePatch, RuleSet};
pub use state::{Entity, Facing, JumpKind, Motion};
pub use terrain::{Level, Segment, Terrain};
pub use tick::{Intent, Tick, advance, place};

/// Core tuning constants
pub mod consts {
    /// Horizontal nudge applied when a walk dies against a wall corner,
    /// keeping the sprite from visually embedding in it.
    pub const KICK_DIST: i32 = 2;
}
