use std::collections::VecDeque;

use gemgrid_core::{Point, Range};

/// A position with an associated cost, returned from BFS map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

/// Sentinel value meaning "unreachable" in BFS maps.
pub const UNREACHABLE: i32 = i32::MAX;

/// Sentinel parent index for search roots.
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Central coordinator for connectivity queries on a board rectangle.
///
/// `PathRange` owns the BFS distance map, parent links, queue and result
/// buffers so that repeated queries (board validation checks every item)
/// incur no allocations after the first use.
#[derive(Debug)]
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) bfs_map: Vec<i32>,
    pub(crate) bfs_parent: Vec<usize>,
    pub(crate) bfs_queue: VecDeque<usize>,
    pub(crate) bfs_results: Vec<PathNode>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given rectangle.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            width: rng.width().max(0) as usize,
            bfs_map: vec![UNREACHABLE; len],
            bfs_parent: vec![NO_PARENT; len],
            bfs_queue: VecDeque::new(),
            bfs_results: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range. Caches are reallocated only when the
    /// rectangle actually changes.
    pub fn set_range(&mut self, rng: Range) {
        if rng == self.rng {
            return;
        }
        *self = Self::new(rng);
    }

    /// The rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }

    pub(crate) fn reset_bfs(&mut self) {
        self.bfs_map.fill(UNREACHABLE);
        self.bfs_parent.fill(NO_PARENT);
        self.bfs_queue.clear();
        self.bfs_results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip_with_offset() {
        let pr = PathRange::new(Range::new(2, 3, 6, 8));
        let p = Point::new(4, 5);
        let i = pr.idx(p).unwrap();
        assert_eq!(i, 2 * 4 + 2);
        assert_eq!(pr.point(i), p);
        assert_eq!(pr.idx(Point::new(6, 5)), None);
    }

    #[test]
    fn set_range_reallocates_on_change() {
        let mut pr = PathRange::new(Range::new(0, 0, 3, 3));
        pr.set_range(Range::new(0, 0, 3, 3));
        assert_eq!(pr.bfs_map.len(), 9);
        pr.set_range(Range::new(0, 0, 5, 4));
        assert_eq!(pr.range(), Range::new(0, 0, 5, 4));
        assert_eq!(pr.bfs_map.len(), 20);
        assert_eq!(pr.bfs_parent.len(), 20);
        assert_eq!(pr.width, 5);
    }
}
