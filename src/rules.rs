//! Per-archetype movement tuning
//!
//! Rules are loaded once from JSON (kebab-case keys, matching the game's
//! config files), shared between entities of the same archetype through an
//! `Arc`, and never mutated afterwards. A single entity can instead carry a
//! private copy produced by merging a [`RulePatch`] over a base rule.

use std::collections::HashMap;
use std::sync::Arc;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Hitbox placement within the sprite frame, for a left-facing sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hitbox {
    pub offset: IVec2,
    pub size: IVec2,
}

impl Default for Hitbox {
    fn default() -> Self {
        Self {
            offset: IVec2::ZERO,
            size: IVec2::new(16, 32),
        }
    }
}

/// Immutable movement tuning for one entity archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MovementRule {
    /// Horizontal distance per walking tick.
    pub walk_dist: i32,
    /// Horizontal distance per jump tick (wide jumps only).
    pub jump_dist_x: i32,
    /// Base vertical distance per jump tick.
    pub jump_dist_y: i32,
    /// Jump arc length in ticks.
    pub jump_time: i32,
    /// Base vertical distance per falling tick.
    pub fall_dist: i32,
    /// Whether the entity falls and needs ground to walk on. Flying and
    /// ghost archetypes clear this.
    pub has_gravity: bool,
    /// Scale on the timer term of a wide jump's arc.
    pub wide_jump_factor: f64,
    /// Scale on the timer term of a high jump's arc.
    pub high_jump_factor: f64,
    /// Sprite frame width, used to mirror the hitbox when facing right.
    pub frame_width: i32,
    pub hitbox: Hitbox,
}

impl Default for MovementRule {
    fn default() -> Self {
        Self {
            walk_dist: 4,
            jump_dist_x: 4,
            jump_dist_y: 6,
            jump_time: 8,
            fall_dist: 6,
            has_gravity: true,
            wide_jump_factor: 1.0,
            high_jump_factor: 1.0,
            frame_width: 16,
            hitbox: Hitbox::default(),
        }
    }
}

/// Partial rule override. Only the present fields replace the base rule's
/// values; everything else is inherited.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RulePatch {
    pub walk_dist: Option<i32>,
    pub jump_dist_x: Option<i32>,
    pub jump_dist_y: Option<i32>,
    pub jump_time: Option<i32>,
    pub fall_dist: Option<i32>,
    pub has_gravity: Option<bool>,
    pub wide_jump_factor: Option<f64>,
    pub high_jump_factor: Option<f64>,
}

impl RulePatch {
    /// Merge over `base`, producing an owned rule for one entity.
    pub fn apply(&self, base: &MovementRule) -> MovementRule {
        MovementRule {
            walk_dist: self.walk_dist.unwrap_or(base.walk_dist),
            jump_dist_x: self.jump_dist_x.unwrap_or(base.jump_dist_x),
            jump_dist_y: self.jump_dist_y.unwrap_or(base.jump_dist_y),
            jump_time: self.jump_time.unwrap_or(base.jump_time),
            fall_dist: self.fall_dist.unwrap_or(base.fall_dist),
            has_gravity: self.has_gravity.unwrap_or(base.has_gravity),
            wide_jump_factor: self.wide_jump_factor.unwrap_or(base.wide_jump_factor),
            high_jump_factor: self.high_jump_factor.unwrap_or(base.high_jump_factor),
            frame_width: base.frame_width,
            hitbox: base.hitbox,
        }
    }
}

/// The load-time rule table: one shared, immutable rule per archetype name.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: HashMap<String, Arc<MovementRule>>,
}

impl RuleSet {
    /// Parse `{ "player": { "walk-dist": 5, ... }, "ghost": { ... } }`.
    pub fn from_json(src: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, MovementRule> = serde_json::from_str(src)?;
        let rules = raw
            .into_iter()
            .map(|(name, rule)| (name, Arc::new(rule)))
            .collect();
        Ok(Self { rules })
    }

    pub fn insert(&mut self, name: impl Into<String>, rule: MovementRule) {
        self.rules.insert(name.into(), Arc::new(rule));
    }

    pub fn get(&self, name: &str) -> Option<Arc<MovementRule>> {
        self.rules.get(name).cloned()
    }

    /// A private copy of a named rule with `patch` merged over it, for a
    /// single entity that deviates from its archetype.
    pub fn patched(&self, name: &str, patch: &RulePatch) -> Option<Arc<MovementRule>> {
        self.rules
            .get(name)
            .map(|base| Arc::new(patch.apply(base)))
    }
}
