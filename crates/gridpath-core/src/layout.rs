//! ASCII layouts for grids.
//!
//! One line per row, one character per cell:
//!
//! | Char | Meaning |
//! |---|---|
//! | `.` | open cell |
//! | `#` | wall |
//! | `S` | start |
//! | `F` | finish |
//!
//! Leading and trailing blank lines are ignored, as is trailing whitespace
//! on each line.

use crate::cell::{Role, WallPolicy};
use crate::geom::Point;
use crate::grid::{Grid, GridError};

pub const OPEN: char = '.';
pub const WALL: char = '#';
pub const START: char = 'S';
pub const FINISH: char = 'F';

impl Grid {
    /// Parse an ASCII layout.
    ///
    /// A wall is never placed on the start or finish (they have their own
    /// characters), so the result always uses [`WallPolicy::Forbid`].
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim_end)
            .skip_while(|l| l.is_empty())
            .collect();
        let lines = match lines.iter().rposition(|l| !l.is_empty()) {
            Some(last) => &lines[..=last],
            None => &[][..],
        };

        let expected = lines.first().map_or(0, |l| l.chars().count());
        let mut start = None;
        let mut finish = None;
        let mut walls = Vec::new();

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(GridError::InconsistentSize {
                    line: row + 1,
                    expected,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Point::new(row as i32, col as i32);
                match ch {
                    OPEN => {}
                    WALL => walls.push(pos),
                    START => {
                        if start.replace(pos).is_some() {
                            return Err(GridError::DuplicateStart(pos));
                        }
                    }
                    FINISH => {
                        if finish.replace(pos).is_some() {
                            return Err(GridError::DuplicateFinish(pos));
                        }
                    }
                    _ => return Err(GridError::InvalidChar { ch, pos }),
                }
            }
        }

        let start = start.ok_or(GridError::MissingStart)?;
        let finish = finish.ok_or(GridError::MissingFinish)?;
        let grid = Grid::build(lines.len() as i32, expected as i32, start, finish)?
            .with_policy(WallPolicy::Forbid)
            .set_walls(&walls, true)?;
        log::debug!(
            "parsed {}x{} layout with {} walls",
            grid.rows(),
            grid.cols(),
            walls.len()
        );
        Ok(grid)
    }

    /// Render the grid back into the layout format.
    ///
    /// A walled endpoint (possible under [`WallPolicy::Allow`]) is written as
    /// its endpoint character, so the wall is lost in the round trip.
    pub fn to_ascii(&self) -> String {
        let cols = self.cols() as usize;
        let mut out = String::with_capacity(self.len() + self.rows() as usize);
        for cell in self.iter() {
            out.push(match self.role(cell.pos) {
                Role::Start => START,
                Role::Finish => FINISH,
                Role::Plain if cell.wall => WALL,
                Role::Plain => OPEN,
            });
            if cell.pos.col as usize == cols - 1 {
                out.push('\n');
            }
        }
        out
    }
}
