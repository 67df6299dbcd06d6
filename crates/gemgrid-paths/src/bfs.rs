//! Breadth-first connectivity: distance maps, shortest paths and
//! reachability tests.

use gemgrid_core::{Board, Point};

use crate::PathRange;
use crate::pathrange::{NO_PARENT, PathNode, UNREACHABLE};
use crate::traits::Pather;

impl PathRange {
    /// Compute a multi-source breadth-first search distance map.
    ///
    /// Each step has cost 1. Expansion stops when the distance exceeds
    /// `max_dist`. Returns a slice of all reached nodes in discovery order.
    pub fn bfs_map<P: Pather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_dist: i32,
    ) -> &[PathNode] {
        self.reset_bfs();

        for &src in sources {
            if let Some(si) = self.idx(src) {
                if self.bfs_map[si] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[si] = 0;
                self.bfs_queue.push_back(si);
                self.bfs_results.push(PathNode { pos: src, cost: 0 });
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = self.bfs_queue.pop_front() {
            let nd = self.bfs_map[ci] + 1;
            if nd > max_dist {
                continue;
            }
            nbuf.clear();
            pather.neighbors(self.point(ci), &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_map[ni] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[ni] = nd;
                self.bfs_parent[ni] = ci;
                self.bfs_queue.push_back(ni);
                self.bfs_results.push(PathNode { pos: np, cost: nd });
            }
        }

        self.nbuf = nbuf;
        &self.bfs_results
    }

    /// Query the BFS distance at a specific point.
    ///
    /// Returns [`UNREACHABLE`] if the point is outside the range or was not
    /// reached by the last BFS call.
    pub fn bfs_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.bfs_map[i],
            None => UNREACHABLE,
        }
    }

    /// Compute some shortest path from `from` to `to`.
    ///
    /// Returns the full path (including both endpoints) or `None` if `to`
    /// cannot be reached. Which of several equal-length paths is returned
    /// depends on the pather's neighbor order.
    pub fn bfs_path<P: Pather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        self.reset_bfs();
        self.bfs_map[start_idx] = 0;
        self.bfs_queue.push_back(start_idx);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        'search: while let Some(ci) = self.bfs_queue.pop_front() {
            let nd = self.bfs_map[ci] + 1;
            nbuf.clear();
            pather.neighbors(self.point(ci), &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_map[ni] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[ni] = nd;
                self.bfs_parent[ni] = ci;
                if ni == goal_idx {
                    break 'search;
                }
                self.bfs_queue.push_back(ni);
            }
        }

        self.nbuf = nbuf;

        if self.bfs_map[goal_idx] == UNREACHABLE {
            return None;
        }

        let mut path = Vec::with_capacity(self.bfs_map[goal_idx] as usize + 1);
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.bfs_parent[ci];
        }
        path.reverse();
        Some(path)
    }

    /// Whether `to` can be reached from `from` on `board`.
    ///
    /// Walls and off-board cells are never reachable, not even from
    /// themselves.
    pub fn reachable(&mut self, board: &Board, from: Point, to: Point) -> bool {
        self.shortest_path(board, from, to).is_some()
    }

    /// Some shortest path between two passable cells of `board`.
    pub fn shortest_path(&mut self, board: &Board, from: Point, to: Point) -> Option<Vec<Point>> {
        if !board.passable(from) || !board.passable(to) {
            return None;
        }
        self.set_range(board.bounds());
        self.bfs_path(board, from, to)
    }
}

/// Whether `to` can be reached from `from` on `board`.
///
/// Allocates a fresh [`PathRange`]; use [`PathRange::reachable`] for repeated
/// queries.
pub fn reachable(board: &Board, from: Point, to: Point) -> bool {
    PathRange::new(board.bounds()).reachable(board, from, to)
}

/// Some shortest path from `from` to `to` on `board`, both endpoints
/// included.
pub fn shortest_path(board: &Board, from: Point, to: Point) -> Option<Vec<Point>> {
    PathRange::new(board.bounds()).shortest_path(board, from, to)
}
