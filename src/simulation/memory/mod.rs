//! Private memory of the navigator.
//!
//! This module provides:
//! - The memory grid of cell states, indexed by coordinates relative to the start
//! - The move history stack that records the live path from the start

mod memory_grid;
mod move_history;

pub use memory_grid::{side_for_extent, MemoryGrid, MAX_CELLS, MIN_SIDE};
pub use move_history::MoveHistory;

use std::fmt;

use crate::simulation::direction::Direction;

/// What the navigator knows about a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Never explored
    #[default]
    Unknown,
    /// Stood on and still part of a possible path
    Visited,
    /// A move into this cell was blocked
    Wall,
    /// Visited, then abandoned while backtracking
    DeadEnd,
}

impl CellState {
    /// Returns true if the navigator may overwrite `self` with `next`.
    ///
    /// Walls are permanent, dead ends never revert, and a visited cell can
    /// only be retired as a dead end.
    #[must_use]
    pub const fn can_become(self, next: CellState) -> bool {
        matches!(
            (self, next),
            (Self::Unknown, _)
                | (Self::Visited, Self::Visited | Self::DeadEnd)
                | (Self::Wall, Self::Wall)
                | (Self::DeadEnd, Self::DeadEnd)
        )
    }
}

/// A cell coordinate in memory-grid space (not maze space).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The adjacent coordinate in `direction`, or `None` below zero.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
