//! Shortest-path search for gridpath grids.
//!
//! The engine settles cells in order of their distance from the start,
//! with unit cost per orthogonal step, and stops as soon as the finish is
//! settled. It returns an explicit [`SearchResult`]:
//!
//! - the settled cells in visitation order ([`SearchResult::visited`]),
//! - why the run stopped ([`Termination`]),
//! - the shortest path, or an explicit [`PathOutcome::NoPath`]
//!   ([`SearchResult::path`], [`SearchResult::reconstruct_path`]).
//!
//! The grid is only read. All per-run state lives in a [`PathEngine`],
//! which reuses its tables across runs, and is copied into the result.
//!
//! ```
//! use gridpath_core::{Grid, Point};
//! use gridpath_search::{PathOutcome, search};
//!
//! let grid = Grid::parse("S.#\n..F").unwrap();
//! let result = search(&grid).unwrap();
//! assert_eq!(
//!     result.path(),
//!     PathOutcome::Found(vec![
//!         Point::new(0, 0),
//!         Point::new(0, 1),
//!         Point::new(1, 1),
//!         Point::new(1, 2),
//!     ])
//! );
//! ```

mod dijkstra;
mod distance;
mod engine;
mod result;
mod traits;

pub use dijkstra::{search, search_layout};
pub use distance::manhattan;
pub use engine::{PathEngine, PathNode, UNREACHABLE};
pub use result::{PathOutcome, SearchError, SearchResult, Termination};
pub use traits::Pather;
