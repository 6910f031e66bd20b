use crate::simulation::memory::{CellState, MemoryGrid, Position};
use crate::simulation::observer::NavigationObserver;
use crate::simulation::Navigator;
use rayon::prelude::*;

/// Markers drawn over the memory grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldOverlay {
    pub position: Position,
    pub start: Position,
    pub goal: Option<Position>,
}

impl FieldOverlay {
    #[must_use]
    pub fn of<O: NavigationObserver>(nav: &Navigator<O>) -> Self {
        Self {
            position: nav.position(),
            start: nav.start(),
            goal: nav.goal(),
        }
    }
}

#[must_use]
pub const fn glyph(state: CellState) -> char {
    match state {
        CellState::Unknown => ' ',
        CellState::Visited => '.',
        CellState::Wall => '#',
        CellState::DeadEnd => 'x',
    }
}

/// Renders a `rows` x `cols` window of memory whose top-left cell is `top_left`.
///
/// Cells past the grid edge render blank.
#[must_use]
pub fn compute_field_grid(
    memory: &MemoryGrid,
    overlay: FieldOverlay,
    top_left: Position,
    rows: usize,
    cols: usize,
) -> Vec<String> {
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    // Use rayon to compute rows in parallel
    (0..rows)
        .into_par_iter()
        .map(|r| {
            let mut line = String::with_capacity(cols);
            for c in 0..cols {
                let pos = Position::new(top_left.x + c, top_left.y + r);
                let ch = if pos == overlay.position {
                    '@'
                } else if Some(pos) == overlay.goal {
                    'G'
                } else if pos == overlay.start {
                    'S'
                } else {
                    memory.state(pos).map_or(' ', glyph)
                };
                line.push(ch);
            }
            line
        })
        .collect()
}

/// Top-left corner of a `rows` x `cols` window centred on `focus`, kept inside the grid.
#[must_use]
pub fn centered_viewport(memory: &MemoryGrid, focus: Position, rows: usize, cols: usize) -> Position {
    let (width, height) = memory.dimensions();
    let x = focus.x.saturating_sub(cols / 2).min(width.saturating_sub(cols));
    let y = focus.y.saturating_sub(rows / 2).min(height.saturating_sub(rows));
    Position::new(x, y)
}

/// Renders just the explored part of memory.
#[must_use]
pub fn known_field(memory: &MemoryGrid, overlay: FieldOverlay) -> Vec<String> {
    match memory.known_bounds() {
        Some((lo, hi)) => compute_field_grid(
            memory,
            overlay,
            lo,
            hi.y - lo.y + 1,
            hi.x - lo.x + 1,
        ),
        None => Vec::new(),
    }
}
