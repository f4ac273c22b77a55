//! Entity record and motion states
//!
//! Each state variant carries only the data that is meaningful in it, so
//! invariants like "a jump timer only exists while jumping" hold by
//! construction instead of by discipline.

use std::sync::Arc;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::collision::Rect;
use crate::rules::MovementRule;

/// Horizontal facing, also the sign of horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    #[inline]
    pub fn step(self) -> i32 {
        match self {
            Facing::Left => -1,
            Facing::Right => 1,
        }
    }
}

/// Which jump profile an active jump follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpKind {
    /// Running jump: horizontal component, wide-factor arc.
    Wide,
    /// Standing jump: vertical only, high-factor arc.
    High,
    /// Jump out of a ledge hang: vertical only.
    HangRelease,
}

/// Discrete motion state, derived each tick from the movement outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Motion {
    #[default]
    Idle,
    Walk,
    /// Airborne and descending; `timer` is ticks spent falling and feeds
    /// the accelerating fall distance.
    Fall { timer: i32 },
    /// Ascending; `timer` is ticks of arc remaining.
    Jump { timer: i32, kind: JumpKind },
    /// Holding onto a ledge corner; gravity is suspended.
    Hang,
}

impl Motion {
    /// Stable lowercase name, used by callers to look up animation
    /// sequences and in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Motion::Idle => "idle",
            Motion::Walk => "walk",
            Motion::Fall { .. } => "fall",
            Motion::Jump { .. } => "jump",
            Motion::Hang => "hang",
        }
    }

    /// Same discrete state, ignoring per-state data. A timer change alone
    /// is not an animation change.
    pub fn same_state(&self, other: &Motion) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// The mutable per-entity record the core operates on.
#[derive(Debug, Clone)]
pub struct Entity {
    pub pos: IVec2,
    pub spawn: IVec2,
    pub facing: Facing,
    pub motion: Motion,
    /// Shared archetype rule, or a private patched copy (see
    /// [`crate::rules::RulePatch`]). Never mutated after creation.
    pub rule: Arc<MovementRule>,
}

impl Entity {
    pub fn spawn(pos: IVec2, rule: Arc<MovementRule>) -> Self {
        Self {
            pos,
            spawn: pos,
            facing: Facing::Left,
            motion: Motion::Idle,
            rule,
        }
    }

    /// Reset to the spawn point, facing left and idle.
    pub fn respawn(&mut self) {
        self.pos = self.spawn;
        self.facing = Facing::Left;
        self.motion = Motion::Idle;
    }

    /// Current hitbox, recomputed on demand. The rule's hitbox offset is
    /// given for a left-facing sprite; facing right mirrors it across the
    /// frame width.
    pub fn hitbox(&self) -> Rect {
        let r = &self.rule;
        let off_x = match self.facing {
            Facing::Left => r.hitbox.offset.x,
            Facing::Right => r.frame_width - r.hitbox.offset.x - r.hitbox.size.x,
        };
        Rect {
            pos: IVec2::new(self.pos.x + off_x, self.pos.y + r.hitbox.offset.y),
            size: r.hitbox.size,
        }
    }
}
