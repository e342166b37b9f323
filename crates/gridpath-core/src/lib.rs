//! **gridpath-core** — grid model for the pathfinding visualizer.
//!
//! This crate provides the topology the search runs over: geometry
//! primitives, wall-flagged cells, an immutable copy-on-write [`Grid`] with
//! one start and one finish cell, ASCII layouts, and construction
//! parameters. It knows nothing about searching.

pub mod cell;
pub mod config;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::{Cell, Role, WallPolicy};
pub use config::GridConfig;
pub use geom::{Point, Range};
pub use grid::{Grid, GridError};
