//! The replay schedule for a search run.
//!
//! Visited cells are revealed one per `visited_step`; once the last one is
//! shown, the path is revealed one cell per `path_step`.

use std::time::Duration;

use gridpath_core::Point;
use gridpath_search::SearchResult;

use crate::Paint;

/// Delays between revealed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub visited_step: Duration,
    pub path_step: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            visited_step: Duration::from_millis(10),
            path_step: Duration::from_millis(50),
        }
    }
}

impl Pacing {
    /// Scale both steps by `factor` (e.g. `0.0` for an instant replay).
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            visited_step: self.visited_step.mul_f64(factor),
            path_step: self.path_step.mul_f64(factor),
        }
    }
}

/// One cell to repaint at a given offset from the start of the replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEvent {
    pub at: Duration,
    pub pos: Point,
    pub paint: Paint,
}

/// Ordered repaint events for a run.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn new(result: &SearchResult, pacing: Pacing) -> Self {
        let visited = result.visited();
        let mut events: Vec<TimelineEvent> = visited
            .iter()
            .enumerate()
            .map(|(i, n)| TimelineEvent {
                at: pacing.visited_step * i as u32,
                pos: n.pos,
                paint: Paint::Visited,
            })
            .collect();

        let path_start = pacing.visited_step * visited.len() as u32;
        if let Some(path) = result.path().into_points() {
            events.extend(path.into_iter().enumerate().map(|(j, pos)| TimelineEvent {
                at: path_start + pacing.path_step * j as u32,
                pos,
                paint: Paint::Path,
            }));
        }
        Self { events }
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Offset of the last event.
    pub fn duration(&self) -> Duration {
        self.events.last().map_or(Duration::ZERO, |e| e.at)
    }
}
