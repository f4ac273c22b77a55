//! Per-tick motion rules and the motion state machine
//!
//! One call to [`advance`] moves one entity through one simulation tick:
//! the intent is turned into sweep requests (walk, jump arc, fall), the
//! geometric outcome is folded into terrain contact flags, and the next
//! discrete motion state is derived at the end. The caller reloads the
//! entity's animation whenever `state_changed` comes back true.

use glam::IVec2;

use crate::collision::{self, Contact};
use crate::consts;
use crate::mover::{self, MoveResult};
use crate::rules::MovementRule;
use crate::state::{Entity, Facing, JumpKind, Motion};
use crate::terrain::Terrain;

/// Movement intent for one tick, built fresh from input or AI and consumed
/// once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl Intent {
    /// Either horizontal direction is held.
    #[inline]
    pub fn walks(&self) -> bool {
        self.left || self.right
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.left && !self.right && !self.jump
    }
}

/// Outcome of one [`advance`] call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tick {
    /// The discrete motion state changed; the caller should resynchronize
    /// the entity's animation sequence.
    pub state_changed: bool,
    /// Terrain contact accumulated across this tick's sweeps.
    pub contact: Contact,
}

/// Advance one entity through one simulation tick.
pub fn advance(entity: &mut Entity, intent: &Intent, terrain: &Terrain) -> Tick {
    let rule = entity.rule.clone();
    let before = entity.motion;

    // Holding a ledge with no intent: stay put, gravity suspended. Any
    // intent at all exits the hang into normal processing.
    let hanging = matches!(entity.motion, Motion::Hang);
    if hanging && intent.is_empty() {
        return Tick::default();
    }

    if intent.left {
        entity.facing = Facing::Left;
    } else if intent.right {
        entity.facing = Facing::Right;
    }

    let mut contact = Contact::empty();
    let mut hung = false;
    let grounded = collision::on_ground(&entity.hitbox(), terrain);

    // Walk. Gravity entities only walk while on the ground; steering in
    // the air is folded into the fall displacement instead.
    let mut walked = 0;
    if intent.walks() && (grounded || !rule.has_gravity) {
        let delta = IVec2::new(entity.facing.step() * rule.walk_dist, 0);
        let res = mover::sweep(entity, delta, terrain, rule.has_gravity);
        walked = res.moved.x;
        contact |= res.blocked;
        hung |= rule.has_gravity && res.blocked.ledge_grab();
        contact |= kick_off_wall(entity, &res, terrain);
    }

    // Jump start. Grounded (or hanging, or gravity-less) plus jump intent
    // arms the timer; the first arc step runs in this same tick below.
    let mid_jump = matches!(entity.motion, Motion::Jump { timer, .. } if timer > 0);
    if intent.jump && !mid_jump && (grounded || hanging || !rule.has_gravity) {
        let kind = if hanging {
            JumpKind::HangRelease
        } else if intent.walks() && rule.has_gravity {
            JumpKind::Wide
        } else {
            JumpKind::High
        };
        entity.motion = Motion::Jump {
            timer: rule.jump_time,
            kind,
        };
    }

    // Jump continuation.
    if let Motion::Jump { timer, kind } = entity.motion {
        if timer > 0 {
            let timer = timer - 1;
            let rise = jump_rise(&rule, kind, timer);
            let run = if kind == JumpKind::Wide {
                entity.facing.step() * rule.jump_dist_x
            } else {
                0
            };
            let res = mover::sweep(entity, IVec2::new(run, -rise), terrain, false);
            contact |= res.blocked;
            // A release jump never re-grabs the lip it just let go of.
            hung |= rule.has_gravity
                && kind != JumpKind::HangRelease
                && res.blocked.ledge_grab();
            // Anything short of the full rise means a ceiling; end the arc
            // cleanly instead of grinding against it.
            let timer = if res.moved.y == -rise { timer } else { 0 };
            entity.motion = Motion::Jump { timer, kind };
        }
    }

    // Fall. Grabbing a ledge this tick suspends it; the entity stops where
    // it caught on.
    let mid_jump = matches!(entity.motion, Motion::Jump { timer, .. } if timer > 0);
    let mut fall_timer = match entity.motion {
        Motion::Fall { timer } => timer,
        _ => 0,
    };
    if rule.has_gravity && !mid_jump && !hung && !collision::on_ground(&entity.hitbox(), terrain) {
        fall_timer += 1;
        let run = if intent.walks() {
            entity.facing.step() * rule.walk_dist
        } else {
            0
        };
        let drop = rule.fall_dist + fall_timer;
        let res = mover::sweep(entity, IVec2::new(run, drop), terrain, false);
        contact |= res.blocked;
        if res.moved.y < drop {
            // Ground reached
            fall_timer = 0;
        }
    }
    debug_assert!(fall_timer >= 0);

    entity.motion = next_motion(entity, terrain, &rule, hung, walked, fall_timer);

    let state_changed = !before.same_state(&entity.motion);
    if state_changed {
        log::debug!("motion {} -> {}", before.name(), entity.motion.name());
    }
    Tick {
        state_changed,
        contact,
    }
}

/// Ground-contact query for spawn/respawn placement. Resets motion to Idle
/// and reports whether the entity's feet rest on terrain.
pub fn place(entity: &mut Entity, terrain: &Terrain) -> bool {
    entity.motion = Motion::Idle;
    collision::on_ground(&entity.hitbox(), terrain)
}

/// Vertical distance of one jump arc step. Gravity entities front-load the
/// arc while the timer is high, giving a decelerating rise; gravity-less
/// ones rise a flat amount per tick.
fn jump_rise(rule: &MovementRule, kind: JumpKind, timer: i32) -> i32 {
    if !rule.has_gravity {
        return rule.jump_dist_y;
    }
    let factor = match kind {
        JumpKind::Wide => rule.wide_jump_factor,
        JumpKind::High | JumpKind::HangRelease => rule.high_jump_factor,
    };
    rule.jump_dist_y + (factor * timer as f64).round() as i32
}

/// A walk that died against exactly one side, with nothing overhead, nudges
/// the entity back off the wall so the sprite does not embed in the corner.
/// Returns whatever the nudge itself ran into.
fn kick_off_wall(entity: &mut Entity, res: &MoveResult, terrain: &Terrain) -> Contact {
    let b = res.blocked;
    if b.one_side() && !b.has_top() {
        let away = if b.has_left() { 1 } else { -1 };
        let res = mover::sweep(
            entity,
            IVec2::new(away * consts::KICK_DIST, 0),
            terrain,
            false,
        );
        return res.blocked;
    }
    Contact::empty()
}

/// The flat five-state machine, evaluated once after all movement.
fn next_motion(
    entity: &Entity,
    terrain: &Terrain,
    rule: &MovementRule,
    hung: bool,
    walked: i32,
    fall_timer: i32,
) -> Motion {
    if let Motion::Jump { timer, kind } = entity.motion {
        if timer > 0 {
            return Motion::Jump { timer, kind };
        }
    }
    if hung {
        return Motion::Hang;
    }
    if rule.has_gravity && !collision::on_ground(&entity.hitbox(), terrain) {
        return Motion::Fall { timer: fall_timer };
    }
    if walked != 0 {
        return Motion::Walk;
    }
    Motion::Idle
}
