use gridpath_core::{Grid, Point, Range};

/// The graph a search runs over.
pub trait Pather {
    /// The rectangle every position lives in.
    fn bounds(&self) -> Range;

    /// Append the in-bounds neighbours of `p` into `buf`, blocked ones
    /// included. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);

    /// Whether `p` can never be settled.
    fn is_blocked(&self, p: Point) -> bool;

    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

/// Orthogonal moves of cost 1; walls are blocked.
impl Pather for Grid {
    fn bounds(&self) -> Range {
        Grid::bounds(self)
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&q| self.contains(q)));
    }

    fn is_blocked(&self, p: Point) -> bool {
        self.is_wall(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_neighbors_are_bounds_checked_and_keep_walls() {
        let g = Grid::build(3, 3, Point::new(0, 0), Point::new(2, 2))
            .unwrap()
            .toggle_wall(Point::new(0, 1))
            .unwrap();
        let mut buf = Vec::new();
        g.neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(1, 0), Point::new(0, 1)]);

        buf.clear();
        g.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 4);

        assert!(g.is_blocked(Point::new(0, 1)));
        assert!(!g.is_blocked(Point::new(1, 1)));
        assert_eq!(g.cost(Point::new(0, 0), Point::new(1, 0)), 1);
    }
}
