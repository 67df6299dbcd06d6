//! Item-collecting searches over the augmented `(cell, mask)` state space.
//!
//! A state is a board cell plus the set of items collected on some path
//! reaching it. Stepping onto an uncollected item adds its bit to the mask;
//! every other step keeps the mask. Two states at the same cell with
//! different masks are different states, so the space holds up to
//! `rows · cols · 2^items` states: item-dense boards get expensive quickly.
//!
//! Both searches are plain BFS, so the layer of a state is its distance from
//! the start and the first goal state dequeued lies on a shortest path.

use std::collections::{HashMap, VecDeque};

use gemgrid_core::{Board, CellState, ItemList, ItemMask, ItemSet, MaskWidth, Point};

use crate::error::{PlanError, check_target};
use crate::pathrange::NO_PARENT;
use crate::traits::Pather;

#[derive(Debug)]
struct Node<M> {
    pos: Point,
    mask: M,
    dist: i32,
    parent: usize,
}

/// One search invocation. Owns every map it builds; nothing outlives the run.
struct StateSearch<'a, M: ItemMask> {
    board: &'a Board,
    item_at: Vec<Option<usize>>,
    items: usize,
    nodes: Vec<Node<M>>,
    seen: HashMap<(Point, M), usize>,
    queue: VecDeque<usize>,
}

impl<'a, M: ItemMask> StateSearch<'a, M> {
    /// Items whose cell no longer holds [`CellState::Item`] are ignored, so a
    /// board that has been partly collected can be planned again.
    fn new(board: &'a Board, items: &ItemList) -> Self {
        let mut item_at = vec![None; board.bounds().len()];
        for (i, p) in items.iter().enumerate() {
            if board.at(p) == Some(CellState::Item) {
                item_at[(p.y * board.cols() + p.x) as usize] = Some(i);
            }
        }
        Self {
            board,
            item_at,
            items: items.len(),
            nodes: Vec::new(),
            seen: HashMap::new(),
            queue: VecDeque::new(),
        }
    }

    fn item_index(&self, p: Point) -> Option<usize> {
        if !self.board.contains(p) {
            return None;
        }
        self.item_at[(p.y * self.board.cols() + p.x) as usize]
    }

    /// Mask after stepping onto `p` holding `mask`.
    fn step_mask(&self, p: Point, mask: &M) -> M {
        match self.item_index(p) {
            Some(i) if !mask.contains(i) => mask.with(i),
            _ => mask.clone(),
        }
    }

    /// Record a state the first time it is seen and queue it.
    fn discover(&mut self, pos: Point, mask: M, dist: i32, parent: usize) {
        let key = (pos, mask);
        if self.seen.contains_key(&key) {
            return;
        }
        let idx = self.nodes.len();
        self.nodes.push(Node {
            pos,
            mask: key.1.clone(),
            dist,
            parent,
        });
        self.seen.insert(key, idx);
        self.queue.push_back(idx);
    }

    fn seed(&mut self) {
        let start = self.board.start();
        let mask = self.step_mask(start, &M::empty(self.items));
        self.discover(start, mask, 0, NO_PARENT);
    }

    /// Queue every successor of node `ci` whose mask holds at most `limit`
    /// items.
    fn expand(&mut self, ci: usize, limit: usize, nbuf: &mut Vec<Point>) {
        let pos = self.nodes[ci].pos;
        let dist = self.nodes[ci].dist;
        let mask = self.nodes[ci].mask.clone();
        nbuf.clear();
        self.board.neighbors(pos, nbuf);
        for &np in nbuf.iter() {
            let next = self.step_mask(np, &mask);
            if next.count() > limit {
                continue;
            }
            self.discover(np, next, dist + 1, ci);
        }
    }

    fn path(&self, mut ci: usize) -> Vec<Point> {
        let mut path = Vec::with_capacity(self.nodes[ci].dist as usize + 1);
        while ci != NO_PARENT {
            path.push(self.nodes[ci].pos);
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }

    /// Shortest path to the finish, collecting as many items as any path of
    /// that length can.
    ///
    /// Among finish states at the shortest distance, the one with the most
    /// items wins; on a tie the first one dequeued is kept.
    fn max_collection(mut self) -> Option<Vec<Point>> {
        let finish = self.board.finish();
        let mut nbuf = Vec::with_capacity(4);
        let mut finish_dist: Option<i32> = None;
        let mut best: Option<usize> = None;

        self.seed();
        while let Some(ci) = self.queue.pop_front() {
            let dist = self.nodes[ci].dist;
            if finish_dist.is_some_and(|d| dist > d) {
                break;
            }
            if self.nodes[ci].pos == finish {
                finish_dist = Some(dist);
                let better = best.is_none_or(|b| {
                    self.nodes[ci].mask.count() > self.nodes[b].mask.count()
                });
                if better {
                    best = Some(ci);
                }
                continue;
            }
            // successors would land beyond the finish layer
            if finish_dist.is_some() {
                continue;
            }
            self.expand(ci, usize::MAX, &mut nbuf);
        }

        log::debug!(
            "max-collection search explored {} states over {} items",
            self.nodes.len(),
            self.items
        );
        best.map(|b| self.path(b))
    }

    /// Shortest path to the finish collecting exactly `target` items.
    fn exact_count(mut self, target: usize) -> Option<Vec<Point>> {
        let finish = self.board.finish();
        let mut nbuf = Vec::with_capacity(4);

        self.seed();
        if self.nodes[0].mask.count() > target {
            return None;
        }
        while let Some(ci) = self.queue.pop_front() {
            let node = &self.nodes[ci];
            if node.pos == finish && node.mask.count() == target {
                log::debug!(
                    "exact-count search for {target} items explored {} states",
                    self.nodes.len()
                );
                return Some(self.path(ci));
            }
            self.expand(ci, target, &mut nbuf);
        }

        log::debug!(
            "exact-count search for {target} items exhausted {} states",
            self.nodes.len()
        );
        None
    }
}

/// Shortest start-to-finish path that, among all shortest paths, collects
/// the most items.
///
/// The mask type is sized to the item count (see [`MaskWidth`]).
pub fn max_collection_path(board: &Board, items: &ItemList) -> Result<Vec<Point>, PlanError> {
    let path = match MaskWidth::for_items(items.len()) {
        MaskWidth::Word => StateSearch::<u64>::new(board, items).max_collection(),
        MaskWidth::DoubleWord => StateSearch::<u128>::new(board, items).max_collection(),
        MaskWidth::Set => StateSearch::<ItemSet>::new(board, items).max_collection(),
    };
    path.ok_or(PlanError::NoPath)
}

/// Shortest start-to-finish path collecting exactly `target` items.
///
/// `target` is checked against the item count before any search runs;
/// `target == items.len()` means "collect everything".
pub fn exact_count_path(
    board: &Board,
    items: &ItemList,
    target: i64,
) -> Result<Vec<Point>, PlanError> {
    let target = check_target(target, items.len())?;
    let path = match MaskWidth::for_items(items.len()) {
        MaskWidth::Word => StateSearch::<u64>::new(board, items).exact_count(target),
        MaskWidth::DoubleWord => StateSearch::<u128>::new(board, items).exact_count(target),
        MaskWidth::Set => StateSearch::<ItemSet>::new(board, items).exact_count(target),
    };
    path.ok_or(PlanError::NoPath)
}

/// Number of distinct items a path steps on.
pub fn items_on_path(items: &ItemList, path: &[Point]) -> usize {
    items.iter().filter(|p| path.contains(p)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::shortest_path;

    fn rc(row: i32, col: i32) -> Point {
        Point::from_row_col(row, col)
    }

    fn assert_valid(board: &Board, path: &[Point]) {
        assert_eq!(path.first(), Some(&board.start()));
        assert_eq!(path.last(), Some(&board.finish()));
        assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
        assert!(path.iter().all(|&p| board.passable(p)));
    }

    /// Every simple start-to-finish path with exactly `len` cells.
    fn enumerate(board: &Board, len: usize) -> Vec<Vec<Point>> {
        fn go(board: &Board, len: usize, path: &mut Vec<Point>, out: &mut Vec<Vec<Point>>) {
            let cur = *path.last().unwrap();
            if path.len() == len {
                if cur == board.finish() {
                    out.push(path.clone());
                }
                return;
            }
            let mut buf = Vec::new();
            board.neighbors(cur, &mut buf);
            for n in buf {
                if !path.contains(&n) {
                    path.push(n);
                    go(board, len, path, out);
                    path.pop();
                }
            }
        }
        let mut out = Vec::new();
        go(board, len, &mut vec![board.start()], &mut out);
        out
    }

    #[test]
    fn three_by_three_scenario() {
        let board = Board::parse("...\n.*.\n...").unwrap();
        let items = board.items();

        let free = max_collection_path(&board, &items).unwrap();
        assert_eq!(free, vec![rc(0, 0), rc(0, 1), rc(1, 1), rc(1, 2), rc(2, 2)]);

        let one = exact_count_path(&board, &items, 1).unwrap();
        assert_eq!(one, free);

        let zero = exact_count_path(&board, &items, 0).unwrap();
        assert_eq!(zero, vec![rc(0, 0), rc(0, 1), rc(0, 2), rc(1, 2), rc(2, 2)]);
    }

    #[test]
    fn max_collection_matches_shortest_distance_and_brute_force() {
        let boards = [
            "..*.\n*#..\n..*.\n.*..",
            ".*..\n.#*.\n*...\n..#.",
            "..**\n.#*.\n....\n*.#.",
            ".**\n*.*\n**.",
        ];
        for text in boards {
            let board = Board::parse(text).unwrap();
            let items = board.items();
            let path = max_collection_path(&board, &items).unwrap();
            assert_valid(&board, &path);

            let shortest = shortest_path(&board, board.start(), board.finish()).unwrap();
            assert_eq!(path.len(), shortest.len(), "board:\n{text}");

            let best = enumerate(&board, shortest.len())
                .iter()
                .map(|p| items_on_path(&items, p))
                .max()
                .unwrap();
            assert_eq!(items_on_path(&items, &path), best, "board:\n{text}");
        }
    }

    #[test]
    fn max_collection_is_deterministic() {
        let board = Board::parse("..*..\n*.#.*\n..*..\n.*.#.\n...*.").unwrap();
        let items = board.items();
        let a = max_collection_path(&board, &items).unwrap();
        let b = max_collection_path(&board, &items).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unreachable_finish_yields_no_path() {
        let board = Board::parse(".*#\n.#.\n#..").unwrap();
        let items = board.items();
        assert_eq!(max_collection_path(&board, &items), Err(PlanError::NoPath));
        assert_eq!(exact_count_path(&board, &items, 0), Err(PlanError::NoPath));
    }

    #[test]
    fn exact_zero_on_empty_board_matches_shortest_path() {
        let board = Board::parse("....\n.##.\n.#..\n....").unwrap();
        let items = board.items();
        assert!(items.is_empty());
        let path = exact_count_path(&board, &items, 0).unwrap();
        let shortest = shortest_path(&board, board.start(), board.finish()).unwrap();
        assert_eq!(path.len(), shortest.len());
        assert_valid(&board, &path);
    }

    #[test]
    fn exact_count_takes_detours_when_needed() {
        // The item sits in a dead end off the shortest route.
        let board = Board::parse("...\n##.\n*..").unwrap();
        let items = board.items();
        let all = exact_count_path(&board, &items, 1).unwrap();
        assert_valid(&board, &all);
        assert_eq!(all.len(), 5 + 4);
        assert!(all.contains(&rc(2, 0)));

        let none = exact_count_path(&board, &items, 0).unwrap();
        assert_eq!(none.len(), 5);
        assert!(!none.contains(&rc(2, 0)));
    }

    #[test]
    fn exact_count_refuses_forced_items() {
        // Every route crosses the item, so collecting zero is impossible.
        let board = Board::parse(".*\n#.").unwrap();
        let items = board.items();
        assert_eq!(exact_count_path(&board, &items, 0), Err(PlanError::NoPath));
        assert_eq!(exact_count_path(&board, &items, 1).unwrap().len(), 3);
    }

    #[test]
    fn exact_count_unreachable_target() {
        let board = Board::parse("..#*\n..#.\n....").unwrap();
        let items = board.items();
        assert!(exact_count_path(&board, &items, 1).is_ok());

        // same item, walled in
        let board = Board::parse("..#*\n..##\n....").unwrap();
        let items = board.items();
        assert_eq!(exact_count_path(&board, &items, 1), Err(PlanError::NoPath));
    }

    #[test]
    fn exact_count_rejects_bad_targets() {
        let board = Board::parse("...\n.*.\n...").unwrap();
        let items = board.items();
        assert_eq!(
            exact_count_path(&board, &items, -1),
            Err(PlanError::InvalidTarget {
                target: -1,
                available: 1
            })
        );
        assert_eq!(
            exact_count_path(&board, &items, 2),
            Err(PlanError::InvalidTarget {
                target: 2,
                available: 1
            })
        );
    }

    #[test]
    fn collected_items_are_ignored() {
        let mut board = Board::parse("...\n.*.\n...").unwrap();
        let items = board.items();
        board.collect(rc(1, 1));
        let path = max_collection_path(&board, &items).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(exact_count_path(&board, &items, 1), Err(PlanError::NoPath));
    }

    #[test]
    fn wide_masks_agree_with_word_masks() {
        let board = Board::parse("..*.\n*#..\n..*.\n.*..").unwrap();
        let items = board.items();
        for target in 0..=items.len() {
            let word = StateSearch::<u64>::new(&board, &items).exact_count(target);
            let wide = StateSearch::<u128>::new(&board, &items).exact_count(target);
            let set = StateSearch::<ItemSet>::new(&board, &items).exact_count(target);
            assert_eq!(word, wide);
            assert_eq!(word, set);
        }
        let word = StateSearch::<u64>::new(&board, &items).max_collection();
        let set = StateSearch::<ItemSet>::new(&board, &items).max_collection();
        assert_eq!(word, set);
    }

    #[test]
    fn many_items_use_a_bit_set() {
        // 1 x 70 corridor: 68 items between start and finish.
        let mut line = String::from(".");
        line.push_str(&"*".repeat(68));
        line.push('.');
        let board = Board::parse(&line).unwrap();
        let items = board.items();
        assert_eq!(MaskWidth::for_items(items.len()), MaskWidth::DoubleWord);
        let path = exact_count_path(&board, &items, 68).unwrap();
        assert_eq!(path.len(), 70);
        assert_eq!(exact_count_path(&board, &items, 67), Err(PlanError::NoPath));

        let mut line = String::from(".");
        line.push_str(&"*".repeat(130));
        line.push('.');
        let board = Board::parse(&line).unwrap();
        let items = board.items();
        assert_eq!(MaskWidth::for_items(items.len()), MaskWidth::Set);
        let path = max_collection_path(&board, &items).unwrap();
        assert_eq!(items_on_path(&items, &path), 130);
    }
}
