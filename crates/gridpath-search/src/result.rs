//! The explicit output of a search run.

use std::fmt;

use gridpath_core::{GridError, Point, Range, Role};

use crate::engine::{NO_PARENT, PathNode};

/// Why a search run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The finish cell was settled.
    FinishSettled,
    /// Every cell left the frontier without the finish being settled.
    FrontierExhausted,
    /// The closest frontier cell was at infinite distance: what remains
    /// cannot be reached from the settled region.
    Unreachable,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FinishSettled => f.write_str("finish settled"),
            Self::FrontierExhausted => f.write_str("frontier exhausted"),
            Self::Unreachable => f.write_str("remaining cells unreachable"),
        }
    }
}

/// A reconstructed path, or the explicit absence of one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathOutcome {
    /// Start to target inclusive, every step orthogonally adjacent.
    Found(Vec<Point>),
    /// The target was never settled.
    NoPath,
}

impl PathOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The path cells, if any.
    pub fn points(&self) -> Option<&[Point]> {
        match self {
            Self::Found(p) => Some(p),
            Self::NoPath => None,
        }
    }

    pub fn into_points(self) -> Option<Vec<Point>> {
        match self {
            Self::Found(p) => Some(p),
            Self::NoPath => None,
        }
    }
}

/// Everything a search run produced.
///
/// The result owns its own copy of the run's distance and predecessor
/// tables, so path reconstruction does not depend on any later state of the
/// engine or the grid.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub(crate) range: Range,
    pub(crate) start: Point,
    pub(crate) finish: Point,
    pub(crate) visited: Vec<PathNode>,
    pub(crate) dist: Vec<i32>,
    pub(crate) parent: Vec<usize>,
    pub(crate) settled: Vec<bool>,
    pub(crate) termination: Termination,
}

impl SearchResult {
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn finish(&self) -> Point {
        self.finish
    }

    #[inline]
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Settled cells in the order they were settled, with their distances.
    #[inline]
    pub fn visited(&self) -> &[PathNode] {
        &self.visited
    }

    /// Positions of [`visited`](SearchResult::visited).
    pub fn visited_points(&self) -> Vec<Point> {
        self.visited.iter().map(|n| n.pos).collect()
    }

    /// Whether `p` was settled during the run.
    pub fn is_settled(&self, p: Point) -> bool {
        self.range.index(p).is_some_and(|i| self.settled[i])
    }

    /// Final distance of a settled cell.
    pub fn distance_at(&self, p: Point) -> Option<i32> {
        let i = self.range.index(p)?;
        self.settled[i].then_some(self.dist[i])
    }

    /// Predecessor of a settled cell on its shortest path. The start has
    /// none.
    pub fn predecessor(&self, p: Point) -> Option<Point> {
        let i = self.range.index(p)?;
        if !self.settled[i] || self.parent[i] == NO_PARENT {
            return None;
        }
        Some(self.range.point(self.parent[i]))
    }

    /// Trace the predecessor chain back from `target` to the start.
    pub fn reconstruct_path(&self, target: Point) -> PathOutcome {
        let Some(mut i) = self.range.index(target) else {
            return PathOutcome::NoPath;
        };
        if !self.settled[i] {
            return PathOutcome::NoPath;
        }
        let mut path = Vec::with_capacity(self.dist[i] as usize + 1);
        loop {
            path.push(self.range.point(i));
            if self.parent[i] == NO_PARENT {
                break;
            }
            i = self.parent[i];
        }
        path.reverse();
        PathOutcome::Found(path)
    }

    /// The shortest path from start to finish.
    pub fn path(&self) -> PathOutcome {
        self.reconstruct_path(self.finish)
    }
}

// ---------------------------------------------------------------------------
// SearchError
// ---------------------------------------------------------------------------

/// Preconditions a search refused to start with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The grid itself could not be built or parsed.
    Grid(GridError),
    /// The start or finish lies outside the searched rectangle.
    EndpointOutOfRange {
        endpoint: Role,
        pos: Point,
        range: Range,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "invalid grid: {e}"),
            Self::EndpointOutOfRange {
                endpoint,
                pos,
                range,
            } => write!(f, "{endpoint} {pos} is outside the search range {range}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::EndpointOutOfRange { .. } => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
