//! Static level geometry as a sorted line-segment index
//!
//! A level's solid surfaces are axis-aligned line segments, split into a
//! horizontal and a vertical collection, each kept sorted by the fixed
//! coordinate. The index is built once when a level loads and is read-only
//! for the rest of the level's life, which is what makes it safe to share
//! across every mover query of every tick.

use serde::{Deserialize, Serialize};

/// One axis-aligned line segment.
///
/// `at` is the fixed coordinate (y for horizontal segments, x for vertical
/// ones); `lo..hi` is the extent along the other axis. Spans are normalized
/// so `lo < hi` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub at: i32,
    pub lo: i32,
    pub hi: i32,
}

impl Segment {
    pub fn new(at: i32, a: i32, b: i32) -> Self {
        debug_assert_ne!(a, b, "zero-length segment span");
        Self {
            at,
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// Inclusive span overlap: touching at an endpoint counts, which is
    /// what catches exact corner contacts.
    #[inline]
    pub fn span_overlaps(&self, lo: i32, hi: i32) -> bool {
        self.lo <= hi && self.hi >= lo
    }
}

/// Raw level geometry as it comes from the level file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Solid lines as `[x1, y1, x2, y2]` tuples, order irrelevant.
    pub lines: Vec<[i32; 4]>,
}

/// The immutable per-level terrain index.
#[derive(Debug, Clone, Default)]
pub struct Terrain {
    horizontal: Vec<Segment>,
    vertical: Vec<Segment>,
}

impl Terrain {
    /// Classify raw 4-tuples into horizontal (`y1 == y2`) and vertical
    /// (`x1 == x2`) segments and build the sorted index. Diagonal and
    /// degenerate (point) tuples are not supported; they are logged and
    /// skipped rather than guessed at.
    pub fn from_lines(lines: &[[i32; 4]]) -> Self {
        let mut horizontal = Vec::new();
        let mut vertical = Vec::new();

        for &[x1, y1, x2, y2] in lines {
            if y1 == y2 && x1 != x2 {
                horizontal.push(Segment::new(y1, x1, x2));
            } else if x1 == x2 && y1 != y2 {
                vertical.push(Segment::new(x1, y1, y2));
            } else {
                log::warn!(
                    "skipping unsupported terrain line ({x1},{y1})-({x2},{y2})"
                );
            }
        }

        horizontal.sort_unstable_by_key(|s| (s.at, s.lo));
        vertical.sort_unstable_by_key(|s| (s.at, s.lo));

        log::debug!(
            "terrain loaded: {} horizontal, {} vertical segments",
            horizontal.len(),
            vertical.len()
        );

        Self {
            horizontal,
            vertical,
        }
    }

    pub fn from_level(level: &Level) -> Self {
        Self::from_lines(&level.lines)
    }

    /// Horizontal segments with `lo <= at <= hi`, ascending by `at`.
    ///
    /// Binary search to the first candidate, then a linear scan while the
    /// coordinate stays in range. The mover issues many of these per tick,
    /// so a full-collection scan is off the table.
    pub fn horizontals_in(&self, lo: i32, hi: i32) -> impl Iterator<Item = &Segment> {
        Self::range(&self.horizontal, lo, hi)
    }

    /// Vertical segments with `lo <= at <= hi`, ascending by `at`.
    pub fn verticals_in(&self, lo: i32, hi: i32) -> impl Iterator<Item = &Segment> {
        Self::range(&self.vertical, lo, hi)
    }

    fn range(sorted: &[Segment], lo: i32, hi: i32) -> impl Iterator<Item = &Segment> {
        let start = sorted.partition_point(|s| s.at < lo);
        sorted[start..].iter().take_while(move |s| s.at <= hi)
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }
}
