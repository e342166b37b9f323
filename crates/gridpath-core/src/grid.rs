//! The [`Grid`] type — an immutable rows × cols snapshot of [`Cell`]s.
//!
//! Cells live behind an `Arc`, so cloning a `Grid` is cheap and every wall
//! operation is copy-on-write: it returns a new grid and leaves the receiver
//! untouched. Two clones can be searched independently, even on different
//! threads.

use std::fmt;
use std::sync::Arc;

use crate::cell::{Cell, Role, WallPolicy};
use crate::config::GridConfig;
use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Precondition violations raised while building, parsing or editing a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Zero (or negative) rows or columns.
    EmptyGrid { rows: i32, cols: i32 },
    /// A coordinate outside `[0, rows) × [0, cols)`.
    OutOfBounds { pos: Point, rows: i32, cols: i32 },
    /// Start and finish designate the same cell.
    StartIsFinish(Point),
    /// A wall operation targeted the start or finish under [`WallPolicy::Forbid`].
    ProtectedCell { pos: Point, role: Role },
    /// Layout lines have different widths.
    InconsistentSize {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A layout character outside `.#SF`.
    InvalidChar { ch: char, pos: Point },
    MissingStart,
    MissingFinish,
    DuplicateStart(Point),
    DuplicateFinish(Point),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { rows, cols } => {
                write!(f, "grid must have at least one row and column, got {rows}x{cols}")
            }
            Self::OutOfBounds { pos, rows, cols } => {
                write!(f, "position {pos} is outside the {rows}x{cols} grid")
            }
            Self::StartIsFinish(p) => write!(f, "start and finish are both at {p}"),
            Self::ProtectedCell { pos, role } => {
                write!(f, "cannot place a wall on the {role} cell at {pos}")
            }
            Self::InconsistentSize {
                line,
                expected,
                found,
            } => write!(
                f,
                "layout line {line} has {found} cells, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "layout contains invalid character {ch:?} at {pos}")
            }
            Self::MissingStart => f.write_str("layout has no start cell (S)"),
            Self::MissingFinish => f.write_str("layout has no finish cell (F)"),
            Self::DuplicateStart(p) => write!(f, "layout has a second start cell at {p}"),
            Self::DuplicateFinish(p) => write!(f, "layout has a second finish cell at {p}"),
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular grid with exactly one start and one finish cell.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Arc<Vec<Cell>>,
    bounds: Range,
    start: Point,
    finish: Point,
    policy: WallPolicy,
}

impl Grid {
    /// Build a `rows` × `cols` grid of open cells with the given endpoints.
    pub fn build(rows: i32, cols: i32, start: Point, finish: Point) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }
        let bounds = Range::with_size(rows, cols);
        for p in [start, finish] {
            if !bounds.contains(p) {
                return Err(GridError::OutOfBounds { pos: p, rows, cols });
            }
        }
        if start == finish {
            return Err(GridError::StartIsFinish(start));
        }
        let cells: Vec<Cell> = bounds.iter().map(Cell::open).collect();
        log::debug!("built {rows}x{cols} grid, start {start}, finish {finish}");
        Ok(Self {
            cells: Arc::new(cells),
            bounds,
            start,
            finish,
            policy: WallPolicy::default(),
        })
    }

    /// Build a grid from a [`GridConfig`].
    pub fn from_config(cfg: &GridConfig) -> Result<Self, GridError> {
        Ok(Self::build(cfg.rows, cfg.cols, cfg.start, cfg.finish)?.with_policy(cfg.wall_policy))
    }

    /// Replace the wall policy for the start and finish cells (builder).
    pub fn with_policy(mut self, policy: WallPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The wall policy for the start and finish cells.
    #[inline]
    pub fn policy(&self) -> WallPolicy {
        self.policy
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    /// The range `[0, rows) × [0, cols)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn finish(&self) -> Point {
        self.finish
    }

    /// The designation of `p`.
    pub fn role(&self, p: Point) -> Role {
        if p == self.start {
            Role::Start
        } else if p == self.finish {
            Role::Finish
        } else {
            Role::Plain
        }
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The cell at `p`, or `None` if `p` is out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.bounds.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is a wall. Out-of-bounds points are not walls.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.at(p).is_some_and(|c| c.wall)
    }

    /// Row-major iterator over the cells.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Positions of all walls, row-major.
    pub fn walls(&self) -> Vec<Point> {
        self.iter().filter(|c| c.wall).map(|c| c.pos).collect()
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.wall).count()
    }

    /// A new grid with the wall flag at `p` inverted.
    pub fn toggle_wall(&self, p: Point) -> Result<Self, GridError> {
        let i = self.checked_index(p)?;
        self.set_wall(p, !self.cells[i].wall)
    }

    /// A new grid with the wall flag at `p` set to `wall`.
    ///
    /// Start and finish can only become walls under [`WallPolicy::Allow`];
    /// clearing a wall is always accepted.
    pub fn set_wall(&self, p: Point, wall: bool) -> Result<Self, GridError> {
        self.set_walls(&[p], wall)
    }

    /// A new grid with the wall flag of every point in `points` set to
    /// `wall`.
    ///
    /// All points are checked before anything changes, and the cells are
    /// copied at most once, so the cost is linear in the grid size however
    /// many points are given. On error the receiver is left as it was.
    pub fn set_walls(&self, points: &[Point], wall: bool) -> Result<Self, GridError> {
        let mut changed = Vec::with_capacity(points.len());
        for &p in points {
            let i = self.checked_index(p)?;
            let role = self.role(p);
            if wall && role != Role::Plain && self.policy == WallPolicy::Forbid {
                log::warn!("refusing to wall the {role} cell at {p}");
                return Err(GridError::ProtectedCell { pos: p, role });
            }
            if self.cells[i].wall != wall {
                changed.push(i);
            }
        }
        let mut next = self.clone();
        if !changed.is_empty() {
            let cells = Arc::make_mut(&mut next.cells);
            for i in changed {
                cells[i].wall = wall;
            }
        }
        Ok(next)
    }

    /// Whether both grids have the same dimensions, endpoints and walls.
    pub fn same_walls(&self, other: &Grid) -> bool {
        self.bounds == other.bounds
            && self.start == other.start
            && self.finish == other.finish
            && self.cells.iter().zip(other.cells.iter()).all(|(a, b)| a.wall == b.wall)
    }

    /// Whether both grids view the same cell storage.
    #[inline]
    pub fn shares_cells(&self, other: &Grid) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }

    fn checked_index(&self, p: Point) -> Result<usize, GridError> {
        self.bounds.index(p).ok_or(GridError::OutOfBounds {
            pos: p,
            rows: self.rows(),
            cols: self.cols(),
        })
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.policy == other.policy && self.same_walls(other)
    }
}

impl Eq for Grid {}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    rows: i32,
    cols: i32,
    start: Point,
    finish: Point,
    #[serde(default)]
    wall_policy: WallPolicy,
    #[serde(default)]
    walls: Vec<Point>,
}

#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GridRepr {
            rows: self.rows(),
            cols: self.cols(),
            start: self.start,
            finish: self.finish,
            wall_policy: self.policy,
            walls: self.walls(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let repr = GridRepr::deserialize(deserializer)?;
        Grid::build(repr.rows, repr.cols, repr.start, repr.finish)
            .and_then(|g| g.with_policy(repr.wall_policy).set_walls(&repr.walls, true))
            .map_err(D::Error::custom)
    }
}
