//! Swept sub-step movement
//!
//! A requested displacement is walked in `max(|dx|, |dy|)` unit sub-steps,
//! each tested against terrain before it is taken. Per-tick velocities are
//! small bounded integers, so the O(velocity) predicate cost is fine and
//! nothing can tunnel through a segment thinner than the velocity.

use glam::IVec2;

use crate::collision::{self, Contact};
use crate::state::Entity;
use crate::terrain::Terrain;

/// Outcome of one sweep: the displacement actually committed and the
/// terrain contact of the step that stopped it (empty if unobstructed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveResult {
    pub moved: IVec2,
    pub blocked: Contact,
}

/// Advance `entity` along `delta`, stopping before the first sub-step that
/// would intersect terrain or, when `needs_ground` is set, leave the
/// ground. The committed displacement is applied to `entity.pos`.
///
/// Each candidate offset is computed proportionally from the *starting*
/// hitbox rather than accumulated step by step, so integer rounding cannot
/// drift the path.
///
/// `needs_ground` is the walking case for gravity entities: stepping off a
/// platform edge stops the move there instead of silently carrying the
/// entity into the air.
pub fn sweep(entity: &mut Entity, delta: IVec2, terrain: &Terrain, needs_ground: bool) -> MoveResult {
    let steps = delta.x.abs().max(delta.y.abs());
    if steps == 0 {
        return MoveResult::default();
    }

    let start = entity.hitbox();
    let mut applied = IVec2::ZERO;
    let mut blocked = Contact::empty();

    for i in 1..=steps {
        let offset = IVec2::new(i * delta.x / steps, i * delta.y / steps);
        let candidate = start.translated(offset);

        let contact = collision::hit_terrain(&candidate, terrain);
        if !contact.is_empty() {
            blocked = contact;
            break;
        }
        if needs_ground && !collision::on_ground(&candidate, terrain) {
            break;
        }

        applied = offset;
    }

    entity.pos += applied;
    MoveResult {
        moved: applied,
        blocked,
    }
}
