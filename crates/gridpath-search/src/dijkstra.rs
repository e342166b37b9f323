use gridpath_core::{Grid, Point, Role};

use crate::PathEngine;
use crate::engine::{NodeRef, PathNode, UNREACHABLE};
use crate::result::{SearchError, SearchResult, Termination};
use crate::traits::Pather;

impl PathEngine {
    /// Run a single-source shortest-path search from `start` until `finish`
    /// is settled.
    ///
    /// Every cell starts in the frontier. The frontier member with the
    /// smallest distance is removed each step, ties broken in row-major scan
    /// order. Blocked cells are discarded when removed; an infinite minimum
    /// ends the run early. Otherwise the cell is settled and each unsettled
    /// neighbour is relaxed when the new distance is strictly smaller.
    pub fn search<P: Pather>(
        &mut self,
        pather: &P,
        start: Point,
        finish: Point,
    ) -> Result<SearchResult, SearchError> {
        let rng = pather.bounds();
        if rng != self.rng {
            self.set_range(rng);
        }
        let si = self.endpoint_idx(Role::Start, start)?;
        let fi = self.endpoint_idx(Role::Finish, finish)?;

        self.reset();
        self.dist[si] = 0;
        for idx in 0..self.dist.len() {
            self.open.push(NodeRef {
                idx,
                dist: self.dist[idx],
            });
        }

        let mut visited = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let termination = loop {
            let Some(current) = self.open.pop() else {
                break Termination::FrontierExhausted;
            };
            let ci = current.idx;

            // Skip stale entries left behind by relaxation.
            if self.popped[ci] || current.dist != self.dist[ci] {
                continue;
            }
            self.popped[ci] = true;

            let cp = self.point(ci);
            if pather.is_blocked(cp) {
                log::trace!("discarding blocked {cp}");
                continue;
            }
            if current.dist == UNREACHABLE {
                break Termination::Unreachable;
            }

            self.settled[ci] = true;
            visited.push(PathNode {
                pos: cp,
                cost: current.dist,
            });
            log::trace!("settled {cp} at distance {}", current.dist);
            if ci == fi {
                break Termination::FinishSettled;
            }

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.settled[ni] {
                    continue;
                }
                let candidate = current.dist + pather.cost(cp, np);
                if candidate < self.dist[ni] {
                    self.dist[ni] = candidate;
                    self.parent[ni] = ci;
                    self.open.push(NodeRef {
                        idx: ni,
                        dist: candidate,
                    });
                }
            }
        };

        self.nbuf = nbuf;
        self.open.clear();

        log::debug!(
            "search {start} -> {finish}: {} settled, {termination}",
            visited.len()
        );

        Ok(SearchResult {
            range: self.rng,
            start,
            finish,
            visited,
            dist: self.dist.clone(),
            parent: self.parent.clone(),
            settled: self.settled.clone(),
            termination,
        })
    }

    /// Search `grid` between its own start and finish.
    pub fn search_grid(&mut self, grid: &Grid) -> Result<SearchResult, SearchError> {
        self.search(grid, grid.start(), grid.finish())
    }

    fn endpoint_idx(&self, endpoint: Role, pos: Point) -> Result<usize, SearchError> {
        self.idx(pos).ok_or(SearchError::EndpointOutOfRange {
            endpoint,
            pos,
            range: self.rng,
        })
    }
}

/// Search `grid` between its start and finish with a fresh engine.
pub fn search(grid: &Grid) -> Result<SearchResult, SearchError> {
    PathEngine::new(grid.bounds()).search_grid(grid)
}

/// Parse an ASCII layout and search it.
pub fn search_layout(layout: &str) -> Result<SearchResult, SearchError> {
    search(&Grid::parse(layout)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use crate::result::PathOutcome;
    use gridpath_core::{Range, WallPolicy};
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};
    use std::collections::VecDeque;

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&p| Point::from(p)).collect()
    }

    fn grid_3x3() -> Grid {
        Grid::build(3, 3, Point::new(0, 0), Point::new(2, 2)).unwrap()
    }

    fn assert_valid_path(grid: &Grid, path: &[Point]) {
        assert_eq!(path.first(), Some(&grid.start()));
        assert_eq!(path.last(), Some(&grid.finish()));
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} and {} are not adjacent", w[0], w[1]);
        }
        assert!(path.iter().all(|&p| !grid.is_wall(p)));
    }

    /// Plain BFS distance from start, for cross-checking.
    fn bfs_distance(grid: &Grid, from: Point, to: Point) -> Option<i32> {
        let rng = grid.bounds();
        let mut dist = vec![UNREACHABLE; rng.len()];
        let mut queue = VecDeque::new();
        dist[rng.index(from)?] = 0;
        queue.push_back(from);
        while let Some(p) = queue.pop_front() {
            let d = dist[rng.index(p)?];
            for q in p.neighbors_4() {
                let Some(qi) = rng.index(q) else { continue };
                if grid.is_wall(q) || dist[qi] != UNREACHABLE {
                    continue;
                }
                dist[qi] = d + 1;
                queue.push_back(q);
            }
        }
        let d = dist[rng.index(to)?];
        (d != UNREACHABLE).then_some(d)
    }

    #[test]
    fn open_3x3_visits_in_distance_then_scan_order() {
        let result = search(&grid_3x3()).unwrap();
        assert_eq!(
            result.visited_points(),
            pts(&[
                (0, 0),
                (0, 1),
                (1, 0),
                (0, 2),
                (1, 1),
                (2, 0),
                (1, 2),
                (2, 1),
                (2, 2)
            ])
        );
        let costs: Vec<_> = result.visited().iter().map(|n| n.cost).collect();
        assert_eq!(costs, vec![0, 1, 1, 2, 2, 2, 3, 3, 4]);
        assert_eq!(result.termination(), Termination::FinishSettled);
    }

    #[test]
    fn open_3x3_path_follows_first_relaxation() {
        let result = search(&grid_3x3()).unwrap();
        assert_eq!(
            result.path(),
            PathOutcome::Found(pts(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]))
        );
        assert_eq!(result.distance_at(Point::new(2, 2)), Some(4));
    }

    #[test]
    fn separating_wall_row_reports_no_path() {
        let grid = Grid::parse(
            "\
S..
###
..F",
        )
        .unwrap();
        let result = search(&grid).unwrap();
        assert_eq!(result.termination(), Termination::Unreachable);
        assert_eq!(result.visited_points(), pts(&[(0, 0), (0, 1), (0, 2)]));
        assert_eq!(result.path(), PathOutcome::NoPath);
        assert!(!result.is_settled(grid.finish()));
    }

    #[test]
    fn walls_are_never_visited() {
        let grid = Grid::parse(
            "\
S.#.
.##.
...F",
        )
        .unwrap();
        let result = search(&grid).unwrap();
        assert!(result.visited().iter().all(|n| !grid.is_wall(n.pos)));
        let path = result.path().into_points().unwrap();
        assert_valid_path(&grid, &path);
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn open_grid_path_length_is_manhattan_plus_one() {
        let grid = Grid::build(7, 9, Point::new(1, 2), Point::new(5, 7)).unwrap();
        let result = search(&grid).unwrap();
        let path = result.path().into_points().unwrap();
        assert_eq!(path.len() as i32, manhattan(grid.start(), grid.finish()) + 1);
        assert_valid_path(&grid, &path);

        // Everything closer than the finish is settled, plus the cells at
        // the same distance that come before it in scan order.
        let d = manhattan(grid.start(), grid.finish());
        let expected = grid
            .bounds()
            .iter()
            .filter(|&p| {
                let m = manhattan(grid.start(), p);
                m < d || (m == d && p <= grid.finish())
            })
            .count();
        assert_eq!(result.visited().len(), expected);
        assert!(
            result
                .visited()
                .iter()
                .all(|n| n.cost == manhattan(grid.start(), n.pos) && n.cost <= d)
        );
    }

    #[test]
    fn unreachable_finish_on_open_grid_settles_every_reachable_cell() {
        // The finish is boxed in; everything else is reachable.
        let grid = Grid::parse(
            "\
S....
...#.
..#F#
...##",
        )
        .unwrap();
        let result = search(&grid).unwrap();
        assert_eq!(result.path(), PathOutcome::NoPath);
        assert_eq!(result.termination(), Termination::Unreachable);
        let open = grid.len() - grid.wall_count() - 1;
        assert_eq!(result.visited().len(), open);
    }

    #[test]
    fn visited_distances_never_decrease() {
        let grid = Grid::parse(
            "\
S.....
.####.
.#..#.
.#F.#.
.##.#.
......",
        )
        .unwrap();
        let result = search(&grid).unwrap();
        for w in result.visited().windows(2) {
            assert!(w[0].cost <= w[1].cost);
            if w[0].cost == w[1].cost {
                assert!(w[0].pos < w[1].pos);
            }
        }
        let path = result.path().into_points().unwrap();
        assert_valid_path(&grid, &path);
        assert_eq!(
            path.len() as i32 - 1,
            bfs_distance(&grid, grid.start(), grid.finish()).unwrap()
        );
    }

    #[test]
    fn independent_snapshots_give_identical_results() {
        let grid = Grid::parse(
            "\
S..#...
.#.#.#.
.#...#F",
        )
        .unwrap();
        let a = search(&grid.clone()).unwrap();
        let b = search(&grid.clone()).unwrap();
        assert_eq!(a.visited(), b.visited());
        assert_eq!(a.path(), b.path());
    }

    #[test]
    fn reused_engine_matches_fresh_engine() {
        let g1 = Grid::parse("S.#\n..F").unwrap();
        let g2 = Grid::parse("S...\n.##.\n...F").unwrap();
        let mut engine = PathEngine::new(g1.bounds());
        let first = engine.search_grid(&g1).unwrap();
        let second = engine.search_grid(&g2).unwrap();
        let again = engine.search_grid(&g1).unwrap();
        assert_eq!(engine.range(), g1.bounds());
        assert_eq!(first.visited(), again.visited());
        assert_eq!(first.path(), again.path());
        assert_eq!(second.visited(), search(&g2).unwrap().visited());
    }

    #[test]
    fn result_is_independent_of_later_runs() {
        let g1 = Grid::parse("S.\n.F").unwrap();
        let g2 = Grid::parse("S#\n#F").unwrap();
        let mut engine = PathEngine::new(g1.bounds());
        let first = engine.search_grid(&g1).unwrap();
        let second = engine.search_grid(&g2).unwrap();
        assert!(first.path().is_found());
        assert_eq!(second.path(), PathOutcome::NoPath);
        assert!(first.path().is_found());
    }

    #[test]
    fn walled_finish_is_discarded() {
        let grid = Grid::build(1, 3, Point::new(0, 0), Point::new(0, 2))
            .unwrap()
            .with_policy(WallPolicy::Allow)
            .toggle_wall(Point::new(0, 2))
            .unwrap();
        let result = search(&grid).unwrap();
        assert_eq!(result.visited_points(), pts(&[(0, 0), (0, 1)]));
        assert_eq!(result.termination(), Termination::FrontierExhausted);
        assert_eq!(result.path(), PathOutcome::NoPath);
    }

    #[test]
    fn walled_start_settles_nothing() {
        let grid = Grid::build(2, 2, Point::new(0, 0), Point::new(1, 1))
            .unwrap()
            .with_policy(WallPolicy::Allow)
            .toggle_wall(Point::new(0, 0))
            .unwrap();
        let result = search(&grid).unwrap();
        assert!(result.visited().is_empty());
        assert_eq!(result.termination(), Termination::Unreachable);
        assert_eq!(result.path(), PathOutcome::NoPath);
    }

    #[test]
    fn same_start_and_finish_is_a_one_cell_path() {
        let grid = grid_3x3();
        let result = PathEngine::new(grid.bounds())
            .search(&grid, Point::new(1, 1), Point::new(1, 1))
            .unwrap();
        assert_eq!(result.visited_points(), pts(&[(1, 1)]));
        assert_eq!(result.path(), PathOutcome::Found(pts(&[(1, 1)])));
    }

    #[test]
    fn endpoints_outside_the_grid_fail_fast() {
        let grid = grid_3x3();
        let err = PathEngine::new(grid.bounds())
            .search(&grid, Point::new(0, 0), Point::new(3, 3))
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::EndpointOutOfRange {
                endpoint: Role::Finish,
                pos: Point::new(3, 3),
                range: Range::with_size(3, 3),
            }
        );
    }

    #[test]
    fn malformed_layout_fails_before_searching() {
        assert!(matches!(
            search_layout("S..\n.."),
            Err(SearchError::Grid(_))
        ));
    }

    /// Orthogonal moves where stepping down from (0,1) into (1,1) is
    /// expensive, so (1,1) is first reached by a worse route.
    struct Toll<'a>(&'a Grid);

    impl Pather for Toll<'_> {
        fn bounds(&self) -> Range {
            self.0.bounds()
        }
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            self.0.neighbors(p, buf);
        }
        fn is_blocked(&self, p: Point) -> bool {
            self.0.is_wall(p)
        }
        fn cost(&self, from: Point, to: Point) -> i32 {
            if from == Point::new(0, 1) && to == Point::new(1, 1) { 5 } else { 1 }
        }
    }

    #[test]
    fn strictly_smaller_relaxation_replaces_predecessor() {
        let grid = Grid::build(2, 3, Point::new(0, 0), Point::new(1, 1)).unwrap();
        let result = PathEngine::new(grid.bounds())
            .search(&Toll(&grid), grid.start(), grid.finish())
            .unwrap();
        assert_eq!(result.path(), PathOutcome::Found(pts(&[(0, 0), (1, 0), (1, 1)])));
        assert_eq!(result.predecessor(grid.finish()), Some(Point::new(1, 0)));
        assert_eq!(result.distance_at(grid.finish()), Some(2));
    }

    #[test]
    fn random_grids_agree_with_bfs() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let rows = rng.random_range(2..10);
            let cols = rng.random_range(2..10);
            let start = Point::new(rng.random_range(0..rows), rng.random_range(0..cols));
            let mut finish = start;
            while finish == start {
                finish = Point::new(rng.random_range(0..rows), rng.random_range(0..cols));
            }
            let mut grid = Grid::build(rows, cols, start, finish).unwrap();
            for p in grid.bounds().iter() {
                if grid.role(p) == Role::Plain && rng.random_range(0..100) < 30 {
                    grid = grid.toggle_wall(p).unwrap();
                }
            }

            let result = search(&grid).unwrap();
            match (result.path(), bfs_distance(&grid, start, finish)) {
                (PathOutcome::Found(path), Some(d)) => {
                    assert_eq!(path.len() as i32, d + 1);
                    assert_valid_path(&grid, &path);
                    assert_eq!(result.termination(), Termination::FinishSettled);
                }
                (PathOutcome::NoPath, None) => {
                    assert_ne!(result.termination(), Termination::FinishSettled);
                }
                (outcome, d) => panic!("search gave {outcome:?}, bfs gave {d:?}\n{}", grid.to_ascii()),
            }
            for n in result.visited() {
                assert_eq!(bfs_distance(&grid, start, n.pos), Some(n.cost));
            }
        }
    }
}
