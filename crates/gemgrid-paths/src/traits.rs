use gemgrid_core::{Board, Point};

/// Neighbor enumeration for the connectivity searches.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Boards are 4-connected; walls and off-board cells are never neighbors.
impl Pather for Board {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.passable(n)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_neighbors_skip_walls_and_edges() {
        let board = Board::parse(".#\n..").unwrap();
        let mut buf = Vec::new();
        board.neighbors(Point::ZERO, &mut buf);
        assert_eq!(buf, vec![Point::new(0, 1)]);
        buf.clear();
        board.neighbors(Point::new(0, 1), &mut buf);
        assert_eq!(buf, vec![Point::ZERO, Point::new(1, 1)]);
    }
}
