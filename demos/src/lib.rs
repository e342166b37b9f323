//! Terminal front end shared by the `gridpath` binary.
//!
//! Everything here is presentation: how a grid and a search result look,
//! how the run is paced when replayed, and how random walls are scattered.
//! The search itself lives in `gridpath-search`.

pub mod term;
pub mod timeline;

use gridpath_core::{Grid, GridError, Point, Role};
use gridpath_search::{PathNode, PathOutcome, SearchResult, Termination};
use rand::{Rng, RngExt};
use serde::Serialize;

pub use timeline::{Pacing, Timeline, TimelineEvent};

/// How a single cell is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Paint {
    Open,
    Wall,
    Start,
    Finish,
    Visited,
    Path,
}

impl Paint {
    /// ASCII glyph for the cell.
    pub const fn glyph(self) -> char {
        match self {
            Self::Open => '.',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::Finish => 'F',
            Self::Visited => 'o',
            Self::Path => '*',
        }
    }
}

/// Final paint of `p`: endpoints first, then walls, path, visited, open.
pub fn paint_at(grid: &Grid, on_path: bool, result: Option<&SearchResult>, p: Point) -> Paint {
    match grid.role(p) {
        Role::Start => return Paint::Start,
        Role::Finish => return Paint::Finish,
        Role::Plain => {}
    }
    if grid.is_wall(p) {
        Paint::Wall
    } else if on_path {
        Paint::Path
    } else if result.is_some_and(|r| r.is_settled(p)) {
        Paint::Visited
    } else {
        Paint::Open
    }
}

/// Draw the grid, and the outcome of `result` if given, as ASCII.
pub fn render(grid: &Grid, result: Option<&SearchResult>) -> String {
    let mut path_mask = vec![false; grid.len()];
    if let Some(PathOutcome::Found(path)) = result.map(SearchResult::path) {
        for p in path {
            if let Some(i) = grid.bounds().index(p) {
                path_mask[i] = true;
            }
        }
    }
    let mut out = String::with_capacity(grid.len() + grid.rows() as usize);
    for (cell, &on_path) in grid.iter().zip(&path_mask) {
        out.push(paint_at(grid, on_path, result, cell.pos).glyph());
        if cell.pos.col == grid.cols() - 1 {
            out.push('\n');
        }
    }
    out
}

/// Turn roughly `percent` % of the plain cells into walls.
///
/// Start and finish are never touched.
pub fn scatter_walls<R: Rng>(grid: &Grid, rng: &mut R, percent: u32) -> Result<Grid, GridError> {
    let walls: Vec<Point> = grid
        .iter()
        .filter(|c| grid.role(c.pos) == Role::Plain && !c.wall)
        .filter(|_| rng.random_range(0..100) < percent)
        .map(|c| c.pos)
        .collect();
    log::info!("scattering {} walls ({percent}%)", walls.len());
    grid.set_walls(&walls, true)
}

/// Machine-readable summary of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub grid: Grid,
    pub termination: Termination,
    pub visited: Vec<PathNode>,
    pub path: PathOutcome,
}

impl Report {
    pub fn new(grid: &Grid, result: &SearchResult) -> Self {
        Self {
            grid: grid.clone(),
            termination: result.termination(),
            visited: result.visited().to_vec(),
            path: result.path(),
        }
    }
}
