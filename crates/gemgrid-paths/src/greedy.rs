//! Greedy nearest-first collection.
//!
//! A fast approximation of the exact-count search: it neither guarantees the
//! shortest route nor an exact item count, but it only ever runs one BFS per
//! leg instead of exploring the full `(cell, mask)` space.

use gemgrid_core::{Board, CellState, ItemList, Point};

use crate::PathRange;
use crate::distance::manhattan;
use crate::error::{PlanError, check_target};

impl PathRange {
    /// Plan a start-to-finish path by repeatedly walking to the nearest
    /// uncollected item.
    ///
    /// - The next item is the uncollected one with the least Manhattan
    ///   distance to the current cell; ties go to the lower list index.
    /// - Each leg is a BFS shortest path. Items crossed on the way are
    ///   collected too, so the final count may exceed `target`.
    /// - An item with no route is dropped from the candidates.
    /// - If a leg crosses the finish before reaching its item, the plan stops
    ///   right there.
    ///
    /// Once `target` items are collected, or none remain, the route to the
    /// finish is appended.
    pub fn greedy_path(
        &mut self,
        board: &Board,
        items: &ItemList,
        target: i64,
    ) -> Result<Vec<Point>, PlanError> {
        let target = check_target(target, items.len())?;
        self.set_range(board.bounds());

        let finish = board.finish();
        let mut cur = board.start();
        let mut path = vec![cur];
        let mut pending: Vec<bool> = items
            .iter()
            .map(|p| board.at(p) == Some(CellState::Item) && p != cur)
            .collect();
        let mut collected = 0;

        while collected < target {
            let Some(next) = nearest(items, &pending, cur) else {
                break;
            };
            pending[next] = false;
            let goal = items.as_slice()[next];
            let Some(leg) = self.bfs_path(board, cur, goal) else {
                log::debug!("greedy: item {next} at {goal} has no route, dropped");
                continue;
            };
            for &p in &leg[1..] {
                path.push(p);
                if let Some(i) = items.index_of(p) {
                    if p == goal || pending[i] {
                        pending[i] = false;
                        collected += 1;
                    }
                }
                if p == finish && p != goal {
                    log::debug!("greedy: crossed the finish on the way to {goal}, stopping");
                    return Ok(path);
                }
            }
            cur = goal;
        }

        let tail = self
            .shortest_path(board, cur, finish)
            .ok_or(PlanError::NoPath)?;
        path.extend_from_slice(&tail[1..]);
        log::debug!(
            "greedy: {} steps, {collected} of {target} items",
            path.len() - 1
        );
        Ok(path)
    }
}

/// Index of the pending item closest to `from`, first in list order on ties.
fn nearest(items: &ItemList, pending: &[bool], from: Point) -> Option<usize> {
    items
        .iter()
        .enumerate()
        .filter(|&(i, _)| pending[i])
        .min_by_key(|&(i, p)| (manhattan(from, p), i))
        .map(|(i, _)| i)
}

/// Greedy nearest-first plan on `board`. See [`PathRange::greedy_path`].
pub fn greedy_path(board: &Board, items: &ItemList, target: i64) -> Result<Vec<Point>, PlanError> {
    PathRange::new(board.bounds()).greedy_path(board, items, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::{exact_count_path, items_on_path};

    fn rc(row: i32, col: i32) -> Point {
        Point::from_row_col(row, col)
    }

    fn assert_valid(board: &Board, path: &[Point]) {
        assert_eq!(path.first(), Some(&board.start()));
        assert_eq!(path.last(), Some(&board.finish()));
        assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
        assert!(path.iter().all(|&p| board.passable(p)));
    }

    #[test]
    fn nearest_breaks_ties_by_index() {
        let items: ItemList = vec![rc(0, 2), rc(2, 0), rc(1, 1)].into();
        assert_eq!(nearest(&items, &[true, true, true], rc(0, 0)), Some(0));
        assert_eq!(nearest(&items, &[false, true, true], rc(0, 0)), Some(1));
        assert_eq!(nearest(&items, &[true, true, true], rc(1, 0)), Some(1));
        assert_eq!(nearest(&items, &[false, false, false], rc(0, 0)), None);
    }

    #[test]
    fn greedy_detour_is_still_a_valid_path() {
        // Nearest-first visits the left column, then the right one, and
        // has to walk back down to the finish at the end.
        let board = Board::parse(
            "\
.....*
.####.
*#....
..#.#.
.....*
*....."
        )
        .unwrap();
        let items = board.items();
        let total = items.len() as i64;

        let greedy = greedy_path(&board, &items, total).unwrap();
        assert_valid(&board, &greedy);
        assert_eq!(items_on_path(&items, &greedy), items.len());

        let exact = exact_count_path(&board, &items, total).unwrap();
        assert!(greedy.len() >= exact.len());
    }

    #[test]
    fn greedy_stops_at_target() {
        let board = Board::parse(".*.\n...\n.*.").unwrap();
        let items = board.items();
        let path = greedy_path(&board, &items, 1).unwrap();
        assert_valid(&board, &path);
        assert_eq!(path, vec![rc(0, 0), rc(0, 1), rc(0, 2), rc(1, 2), rc(2, 2)]);
    }

    #[test]
    fn greedy_zero_target_is_shortest_path() {
        let board = Board::parse("..*\n.#.\n*..").unwrap();
        let items = board.items();
        let path = greedy_path(&board, &items, 0).unwrap();
        assert_eq!(path.len(), 5);
        assert_valid(&board, &path);
    }

    #[test]
    fn greedy_truncates_at_finish() {
        // The only route to the item runs through the finish.
        let board = Board::parse("...\n##.\n*..").unwrap();
        let items = board.items();
        let path = greedy_path(&board, &items, 1).unwrap();
        assert_eq!(path, vec![rc(0, 0), rc(0, 1), rc(0, 2), rc(1, 2), rc(2, 2)]);
        assert_eq!(path.last(), Some(&board.finish()));
    }

    #[test]
    fn greedy_drops_unroutable_items() {
        let board = Board::parse("..#*\n..##\n....").unwrap();
        let items = board.items();
        let path = greedy_path(&board, &items, 1).unwrap();
        assert_valid(&board, &path);
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn greedy_rejects_bad_targets_and_blocked_finish() {
        let board = Board::parse(".*\n..").unwrap();
        let items = board.items();
        assert!(matches!(
            greedy_path(&board, &items, 2),
            Err(PlanError::InvalidTarget { .. })
        ));
        assert!(matches!(
            greedy_path(&board, &items, -3),
            Err(PlanError::InvalidTarget { .. })
        ));

        let board = Board::parse(".*#\n.#.\n#..").unwrap();
        let items = board.items();
        assert_eq!(greedy_path(&board, &items, 1), Err(PlanError::NoPath));
    }
}
