//! Geometry predicates and direction-tagged contact flags
//!
//! The tricky part of the core: a single rectangle test that can tell
//! "bumped a wall on the right" from "bonked a flat ceiling" from "caught
//! a ledge corner". The rectangle is conceptually split at its midpoints,
//! and every hit carries both the side of the split it landed in and the
//! half of the rectangle it was found in, OR'ed into one flag set.

use bitflags::bitflags;
use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::terrain::{Segment, Terrain};

bitflags! {
    /// Which edges of a hitbox a collision test found terrain against.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Contact: u8 {
        const TOP    = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT   = 1 << 2;
        const RIGHT  = 1 << 3;
    }
}

impl Contact {
    #[inline]
    pub fn has_top(self) -> bool {
        self.contains(Contact::TOP)
    }

    #[inline]
    pub fn has_bottom(self) -> bool {
        self.contains(Contact::BOTTOM)
    }

    #[inline]
    pub fn has_left(self) -> bool {
        self.contains(Contact::LEFT)
    }

    #[inline]
    pub fn has_right(self) -> bool {
        self.contains(Contact::RIGHT)
    }

    /// Exactly one horizontal side is blocked.
    #[inline]
    pub fn one_side(self) -> bool {
        self.has_left() != self.has_right()
    }

    /// A contact counts as a ledge grab when something is overhead but not
    /// underfoot and the entity is not wedged between both sides. A flat
    /// ceiling comes back as TOP|LEFT|RIGHT and is rejected here.
    #[inline]
    pub fn ledge_grab(self) -> bool {
        self.has_top() && !self.has_bottom() && !(self.has_left() && self.has_right())
    }
}

/// An axis-aligned hitbox rectangle on the integer grid.
///
/// Derived from an entity's position, facing and rule data; never stored.
/// Only the position moves at runtime, the size is static rule data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn mid_x(&self) -> i32 {
        self.pos.x + self.size.x / 2
    }

    #[inline]
    pub fn mid_y(&self) -> i32 {
        self.pos.y + self.size.y / 2
    }

    /// Feet point: center of the bottom edge. Ground contact is a point-on-
    /// line test at this point, not a swept test.
    #[inline]
    pub fn feet(&self) -> IVec2 {
        IVec2::new(self.mid_x(), self.bottom())
    }

    pub fn translated(&self, offset: IVec2) -> Self {
        Self {
            pos: self.pos + offset,
            size: self.size,
        }
    }

    /// Upper and lower halves, `size.y / 2` each.
    fn split_h(&self) -> (Rect, Rect) {
        let half = self.size.y / 2;
        (
            Rect::new(self.pos.x, self.pos.y, self.size.x, half),
            Rect::new(self.pos.x, self.pos.y + half, self.size.x, self.size.y - half),
        )
    }

    /// Left and right halves, `size.x / 2` each.
    fn split_v(&self) -> (Rect, Rect) {
        let half = self.size.x / 2;
        (
            Rect::new(self.pos.x, self.pos.y, half, self.size.y),
            Rect::new(self.pos.x + half, self.pos.y, self.size.x - half, self.size.y),
        )
    }
}

/// Does a vertical segment block `rect`, and in which horizontal half?
///
/// The fixed coordinate must lie strictly inside the rect: a rectangle
/// whose edge merely touches a line is resting against it, not blocked by
/// it. The span overlap is inclusive to catch corner contacts.
pub fn vertical_crosses(seg: &Segment, rect: &Rect) -> Contact {
    if rect.left() < seg.at && seg.at < rect.right() && seg.span_overlaps(rect.top(), rect.bottom())
    {
        if seg.at <= rect.mid_x() {
            Contact::LEFT
        } else {
            Contact::RIGHT
        }
    } else {
        Contact::empty()
    }
}

/// Does a horizontal segment block `rect`, and in which vertical half?
pub fn horizontal_crosses(seg: &Segment, rect: &Rect) -> Contact {
    if rect.top() < seg.at && seg.at < rect.bottom() && seg.span_overlaps(rect.left(), rect.right())
    {
        if seg.at <= rect.mid_y() {
            Contact::TOP
        } else {
            Contact::BOTTOM
        }
    } else {
        Contact::empty()
    }
}

/// Is `feet` resting exactly on this horizontal segment?
#[inline]
pub fn supports(seg: &Segment, feet: IVec2) -> bool {
    seg.at == feet.y && seg.lo <= feet.x && feet.x <= seg.hi
}

/// Four-way tagged collision test of a rect against the whole terrain.
///
/// Vertical segments are tested against the rect's upper and lower halves
/// (adding TOP/BOTTOM to their LEFT/RIGHT tag); horizontal segments are
/// tested against the left and right halves (adding LEFT/RIGHT to their
/// TOP/BOTTOM tag). All hits OR together.
pub fn hit_terrain(rect: &Rect, terrain: &Terrain) -> Contact {
    let mut contact = Contact::empty();

    let (upper, lower) = rect.split_h();
    for seg in terrain.verticals_in(rect.left(), rect.right()) {
        let f = vertical_crosses(seg, &upper);
        if !f.is_empty() {
            contact |= f | Contact::TOP;
        }
        let f = vertical_crosses(seg, &lower);
        if !f.is_empty() {
            contact |= f | Contact::BOTTOM;
        }
    }

    let (lhalf, rhalf) = rect.split_v();
    for seg in terrain.horizontals_in(rect.top(), rect.bottom()) {
        let f = horizontal_crosses(seg, &lhalf);
        if !f.is_empty() {
            contact |= f | Contact::LEFT;
        }
        let f = horizontal_crosses(seg, &rhalf);
        if !f.is_empty() {
            contact |= f | Contact::RIGHT;
        }
    }

    contact
}

/// Is the rect's feet point resting on any horizontal segment?
pub fn on_ground(rect: &Rect, terrain: &Terrain) -> bool {
    let feet = rect.feet();
    terrain
        .horizontals_in(feet.y, feet.y)
        .any(|seg| supports(seg, feet))
}
