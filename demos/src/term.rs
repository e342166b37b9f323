//! Replaying a [`Timeline`] on a terminal with crossterm.

use std::io::{self, Write};
use std::time::Instant;

use crossterm::{
    cursor, execute, queue,
    style::{self, Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridpath_core::{Grid, Point};

use crate::{Paint, Timeline, paint_at};

/// Foreground and background colour per paint.
fn colors(paint: Paint) -> (Color, Color) {
    let rgb = |r, g, b| Color::Rgb { r, g, b };
    match paint {
        Paint::Open => (rgb(90, 90, 90), Color::Reset),
        Paint::Wall => (rgb(12, 53, 71), rgb(12, 53, 71)),
        Paint::Start => (rgb(255, 255, 255), rgb(0, 150, 0)),
        Paint::Finish => (rgb(255, 255, 255), rgb(200, 0, 0)),
        Paint::Visited => (rgb(0, 0, 0), rgb(0, 190, 218)),
        Paint::Path => (rgb(0, 0, 0), rgb(255, 254, 106)),
    }
}

/// Draw one cell. Endpoints keep their glyph but take the new colour.
fn draw_cell(out: &mut impl Write, grid: &Grid, p: Point, paint: Paint) -> io::Result<()> {
    let glyph = match paint_at(grid, false, None, p) {
        e @ (Paint::Start | Paint::Finish) => e.glyph(),
        _ => paint.glyph(),
    };
    let (fg, bg) = colors(paint);
    queue!(
        out,
        cursor::MoveTo(p.col as u16, p.row as u16),
        SetForegroundColor(fg),
        SetBackgroundColor(bg),
        Print(glyph),
        style::ResetColor
    )
}

/// A writer that keeps the cursor hidden until it is dropped, including
/// when a replay bails out early with an IO error.
struct HiddenCursor<W: Write>(W);

impl<W: Write> HiddenCursor<W> {
    fn new(mut out: W) -> io::Result<Self> {
        execute!(out, cursor::Hide)?;
        Ok(Self(out))
    }
}

impl<W: Write> Write for HiddenCursor<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<W: Write> Drop for HiddenCursor<W> {
    fn drop(&mut self) {
        let _ = execute!(self.0, cursor::Show);
    }
}

/// Clear the screen, draw `grid`, then repaint cells as `timeline` says,
/// sleeping between events. The cursor is left below the grid.
pub fn play(grid: &Grid, timeline: &Timeline) -> io::Result<()> {
    let mut out = HiddenCursor::new(io::stdout())?;
    execute!(out, terminal::Clear(ClearType::All))?;
    for cell in grid.iter() {
        draw_cell(&mut out, grid, cell.pos, paint_at(grid, false, None, cell.pos))?;
    }
    out.flush()?;

    let began = Instant::now();
    for ev in timeline.events() {
        let elapsed = began.elapsed();
        if ev.at > elapsed {
            std::thread::sleep(ev.at - elapsed);
        }
        draw_cell(&mut out, grid, ev.pos, ev.paint)?;
        out.flush()?;
    }

    execute!(out, cursor::MoveTo(0, grid.rows() as u16), Print("\n"))?;
    log::debug!(
        "replayed {} events in {:?}",
        timeline.events().len(),
        began.elapsed()
    );
    Ok(())
}
