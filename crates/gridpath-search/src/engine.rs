use gridpath_core::{Point, Range};

/// A settled position and its final distance from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

/// Sentinel distance meaning "not reached" (the infinite distance).
pub const UNREACHABLE: i32 = i32::MAX;

/// Marker for "no predecessor" in the flat parent table.
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Frontier entry
// ---------------------------------------------------------------------------

/// Reference into the flat tables, ordered for use in a `BinaryHeap`.
///
/// The heap pops the smallest `(dist, idx)` first. Indices are row-major, so
/// ties between equal distances resolve in grid scan order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) dist: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .dist
            .cmp(&self.dist)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PathEngine
// ---------------------------------------------------------------------------

/// Owner of the per-run working state for searches over one grid rectangle.
///
/// Distances, visited flags, predecessors and the frontier live here rather
/// than on the grid's cells, so the grid stays a read-only snapshot. The
/// tables are reused across runs; a grid with a different rectangle makes
/// the engine resize them first.
#[derive(Debug)]
pub struct PathEngine {
    pub(crate) rng: Range,
    pub(crate) dist: Vec<i32>,
    pub(crate) parent: Vec<usize>,
    pub(crate) settled: Vec<bool>,
    /// Removed from the frontier (settled or discarded as a wall).
    pub(crate) popped: Vec<bool>,
    pub(crate) open: std::collections::BinaryHeap<NodeRef>,
    // scratch buffer for neighbour queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathEngine {
    /// Create an engine for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            dist: vec![UNREACHABLE; len],
            parent: vec![NO_PARENT; len],
            settled: vec![false; len],
            popped: vec![false; len],
            open: std::collections::BinaryHeap::with_capacity(len),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range, resizing the tables.
    ///
    /// Existing allocations are kept when the new range is not larger.
    pub fn set_range(&mut self, rng: Range) {
        let len = rng.len();
        log::debug!("path engine range {} -> {}", self.rng, rng);
        self.rng = rng;
        self.dist.resize(len, UNREACHABLE);
        self.parent.resize(len, NO_PARENT);
        self.settled.resize(len, false);
        self.popped.resize(len, false);
        self.open.clear();
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Put every table back into its initial state for a new run.
    pub(crate) fn reset(&mut self) {
        self.dist.fill(UNREACHABLE);
        self.parent.fill(NO_PARENT);
        self.settled.fill(false);
        self.popped.fill(false);
        self.open.clear();
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.rng.index(p)
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        self.rng.point(idx)
    }
}
