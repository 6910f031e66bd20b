//! Bounded grid of cell states centred on the start position.
//!
//! The grid is allocated once, sized generously relative to the expected
//! maze extent. Every access is bounds checked; leaving the grid is an
//! error rather than a clamp.

use crate::simulation::direction::Direction;
use crate::simulation::error::{ConfigError, MemoryError};
use crate::simulation::memory::{CellState, Position};

/// Smallest side length that keeps the start cell off the grid boundary.
pub const MIN_SIDE: usize = 3;

/// Largest number of cells a grid may allocate.
pub const MAX_CELLS: usize = 1 << 28;

/// Memory side needed to explore a maze whose side is `maze_side` cells.
///
/// The start can sit anywhere in the maze, so the grid spans twice the
/// extent plus the start cell itself. Saturates instead of overflowing;
/// oversized results are rejected by [`MemoryGrid::cell_count`].
#[must_use]
pub const fn side_for_extent(maze_side: usize) -> usize {
    maze_side.saturating_mul(2).saturating_add(1)
}

/// The navigator's private map of explored space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryGrid {
    cells: Vec<CellState>,
    width: usize,
    height: usize,
}

impl MemoryGrid {
    /// Number of cells in a `width` x `height` grid, if that size is allowed.
    ///
    /// # Errors
    /// `MemoryTooSmall` when either side is below [`MIN_SIDE`], since the
    /// start would then touch the boundary, and `MemoryTooLarge` past
    /// [`MAX_CELLS`].
    pub fn cell_count(width: usize, height: usize) -> Result<usize, ConfigError> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(ConfigError::MemoryTooSmall {
                width,
                height,
                min: MIN_SIDE,
            });
        }
        width
            .checked_mul(height)
            .filter(|cells| *cells <= MAX_CELLS)
            .ok_or(ConfigError::MemoryTooLarge {
                width,
                height,
                max: MAX_CELLS,
            })
    }

    /// Creates an empty grid of the given size.
    ///
    /// # Errors
    /// Any [`MemoryGrid::cell_count`] error.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        let cells = Self::cell_count(width, height)?;
        Ok(Self {
            cells: vec![CellState::Unknown; cells],
            width,
            height,
        })
    }

    /// Start position: the centre of the grid.
    #[must_use]
    pub const fn origin(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Returns grid dimensions as `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.x < self.width && pos.y < self.height).then(|| pos.y * self.width + pos.x)
    }

    /// Returns true if `pos` lies inside the grid.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// State stored at `pos`, or `None` outside the grid.
    #[must_use]
    pub fn state(&self, pos: Position) -> Option<CellState> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// The coordinate next to `pos` in `direction`.
    ///
    /// # Errors
    /// `MemoryError::OutOfBounds` if the neighbor falls outside the grid.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Result<Position, MemoryError> {
        pos.step(direction)
            .filter(|next| self.contains(*next))
            .ok_or(MemoryError::OutOfBounds {
                position: pos,
                direction,
                width: self.width,
                height: self.height,
            })
    }

    /// Reads the neighbor of `pos` in `direction` without changing anything.
    ///
    /// # Errors
    /// `MemoryError::OutOfBounds` if the neighbor falls outside the grid.
    pub fn read(&self, pos: Position, direction: Direction) -> Result<CellState, MemoryError> {
        let next = self.neighbor(pos, direction)?;
        Ok(self.cells[next.y * self.width + next.x])
    }

    /// Writes `state` at `pos`, enforcing [`CellState::can_become`].
    ///
    /// # Errors
    /// `OutsideGrid` for a coordinate off the grid, `IllegalTransition` if the write
    /// would lose knowledge.
    pub fn mark(&mut self, pos: Position, state: CellState) -> Result<(), MemoryError> {
        let Some(i) = self.index(pos) else {
            return Err(MemoryError::OutsideGrid {
                position: pos,
                width: self.width,
                height: self.height,
            });
        };
        let from = self.cells[i];
        if !from.can_become(state) {
            return Err(MemoryError::IllegalTransition {
                position: pos,
                from,
                to: state,
            });
        }
        self.cells[i] = state;
        Ok(())
    }

    /// Number of cells currently in `state`.
    #[must_use]
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    /// Smallest rectangle `(min, max)` containing every known cell.
    #[must_use]
    pub fn known_bounds(&self) -> Option<(Position, Position)> {
        let mut bounds: Option<(Position, Position)> = None;
        for (i, cell) in self.cells.iter().enumerate() {
            if *cell == CellState::Unknown {
                continue;
            }
            let pos = Position::new(i % self.width, i / self.width);
            bounds = Some(match bounds {
                None => (pos, pos),
                Some((lo, hi)) => (
                    Position::new(lo.x.min(pos.x), lo.y.min(pos.y)),
                    Position::new(hi.x.max(pos.x), hi.y.max(pos.y)),
                ),
            });
        }
        bounds
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_unknown() {
        let grid = MemoryGrid::new(5, 7).unwrap();
        assert_eq!(grid.dimensions(), (5, 7));
        assert_eq!(grid.count(CellState::Unknown), 35);
        assert_eq!(grid.origin(), Position::new(2, 3));
        assert!(grid.known_bounds().is_none());
    }

    #[test]
    fn test_too_small_is_rejected() {
        assert_eq!(
            MemoryGrid::new(2, 9),
            Err(ConfigError::MemoryTooSmall {
                width: 2,
                height: 9,
                min: MIN_SIDE
            })
        );
        assert!(MemoryGrid::new(3, 3).is_ok());
    }

    #[test]
    fn test_extent_sizing_centres_start() {
        let side = side_for_extent(10);
        let grid = MemoryGrid::new(side, side).unwrap();
        assert_eq!(grid.dimensions(), (21, 21));
        assert_eq!(grid.origin(), Position::new(10, 10));
    }

    #[test]
    fn test_extent_sizing_saturates() {
        assert_eq!(side_for_extent(usize::MAX / 2 + 1), usize::MAX);
        assert_eq!(side_for_extent(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        assert_eq!(
            MemoryGrid::new(usize::MAX, 3),
            Err(ConfigError::MemoryTooLarge {
                width: usize::MAX,
                height: 3,
                max: MAX_CELLS
            })
        );
        // Fits in usize but not under the cell cap.
        assert!(matches!(
            MemoryGrid::new(1 << 20, 1 << 20),
            Err(ConfigError::MemoryTooLarge { .. })
        ));
        assert_eq!(MemoryGrid::cell_count(3, 5), Ok(15));
    }

    #[test]
    fn test_read_does_not_mutate() {
        let mut grid = MemoryGrid::new(5, 5).unwrap();
        let origin = grid.origin();
        grid.mark(Position::new(2, 1), CellState::Wall).unwrap();

        assert_eq!(grid.read(origin, Direction::Up), Ok(CellState::Wall));
        assert_eq!(grid.read(origin, Direction::Down), Ok(CellState::Unknown));
        assert_eq!(grid.count(CellState::Wall), 1);
    }

    #[test]
    fn test_read_past_edge_fails() {
        let grid = MemoryGrid::new(3, 3).unwrap();
        let corner = Position::new(0, 0);
        assert!(matches!(
            grid.read(corner, Direction::Left),
            Err(MemoryError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.read(Position::new(2, 2), Direction::Down),
            Err(MemoryError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_wall_is_permanent() {
        let mut grid = MemoryGrid::new(5, 5).unwrap();
        let pos = Position::new(1, 1);
        grid.mark(pos, CellState::Wall).unwrap();
        for state in [CellState::Unknown, CellState::Visited, CellState::DeadEnd] {
            assert!(matches!(
                grid.mark(pos, state),
                Err(MemoryError::IllegalTransition { .. })
            ));
        }
        assert_eq!(grid.state(pos), Some(CellState::Wall));
    }

    #[test]
    fn test_visited_can_retire_to_dead_end() {
        let mut grid = MemoryGrid::new(5, 5).unwrap();
        let pos = Position::new(3, 2);
        grid.mark(pos, CellState::Visited).unwrap();
        assert!(grid.mark(pos, CellState::Wall).is_err());
        grid.mark(pos, CellState::DeadEnd).unwrap();
        assert!(grid.mark(pos, CellState::Unknown).is_err());
        assert_eq!(grid.state(pos), Some(CellState::DeadEnd));
    }

    #[test]
    fn test_mark_out_of_bounds() {
        let mut grid = MemoryGrid::new(3, 3).unwrap();
        assert!(matches!(
            grid.mark(Position::new(3, 0), CellState::Visited),
            Err(MemoryError::OutsideGrid { .. })
        ));
    }

    #[test]
    fn test_known_bounds() {
        let mut grid = MemoryGrid::new(9, 9).unwrap();
        grid.mark(Position::new(2, 6), CellState::Wall).unwrap();
        grid.mark(Position::new(5, 3), CellState::Visited).unwrap();
        assert_eq!(
            grid.known_bounds(),
            Some((Position::new(2, 3), Position::new(5, 6)))
        );
    }

    #[test]
    fn test_rows_shape() {
        let grid = MemoryGrid::new(4, 3).unwrap();
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.len() == 4));
    }
}
