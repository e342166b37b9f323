//! The [`Cell`] type — one grid position and its wall flag.

use std::fmt;

use crate::geom::Point;

/// One grid position.
///
/// Only topology lives here: search distances, visited flags and
/// predecessors belong to a search run, not to the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub wall: bool,
}

impl Cell {
    /// An open cell at `pos`.
    #[inline]
    pub const fn open(pos: Point) -> Self {
        Self { pos, wall: false }
    }

    /// Set the wall flag (builder).
    #[inline]
    pub const fn with_wall(mut self, wall: bool) -> Self {
        self.wall = wall;
        self
    }

    /// The same cell with its wall flag inverted.
    #[inline]
    pub const fn toggled(self) -> Self {
        self.with_wall(!self.wall)
    }
}

/// The designation a grid gives to a position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Start,
    Finish,
    Plain,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Finish => f.write_str("finish"),
            Self::Plain => f.write_str("plain"),
        }
    }
}

/// What a wall toggle on the start or finish cell does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WallPolicy {
    /// Reject the toggle with [`GridError::ProtectedCell`](crate::GridError::ProtectedCell).
    #[default]
    Forbid,
    /// Let the endpoint become a wall; the search treats it as impassable.
    Allow,
}
