//! Tests for memory module components.

use maze_navigator::simulation::direction::{Direction, PRIORITY};
use maze_navigator::simulation::error::{ConfigError, MemoryError};
use maze_navigator::simulation::memory::{
    side_for_extent, CellState, MemoryGrid, MoveHistory, Position,
};

// ============== Memory Grid Tests ==============

#[test]
fn test_unwritten_cells_read_unknown() {
    let grid = MemoryGrid::new(side_for_extent(4), side_for_extent(4)).unwrap();
    let origin = grid.origin();
    for direction in PRIORITY {
        assert_eq!(grid.read(origin, direction), Ok(CellState::Unknown));
    }
}

#[test]
fn test_neighbor_follows_offsets() {
    let grid = MemoryGrid::new(7, 7).unwrap();
    let origin = grid.origin();
    assert_eq!(grid.neighbor(origin, Direction::Up), Ok(Position::new(3, 2)));
    assert_eq!(grid.neighbor(origin, Direction::Down), Ok(Position::new(3, 4)));
    assert_eq!(grid.neighbor(origin, Direction::Left), Ok(Position::new(2, 3)));
    assert_eq!(grid.neighbor(origin, Direction::Right), Ok(Position::new(4, 3)));
}

#[test]
fn test_minimum_grid_keeps_start_off_boundary() {
    let grid = MemoryGrid::new(3, 3).unwrap();
    let origin = grid.origin();
    for direction in PRIORITY {
        assert!(grid.read(origin, direction).is_ok());
    }
    assert!(matches!(
        MemoryGrid::new(3, 2),
        Err(ConfigError::MemoryTooSmall { .. })
    ));
}

#[test]
fn test_knowledge_is_monotonic() {
    let mut grid = MemoryGrid::new(5, 5).unwrap();
    let wall = Position::new(1, 2);
    let dead = Position::new(3, 2);

    grid.mark(wall, CellState::Wall).unwrap();
    grid.mark(dead, CellState::Visited).unwrap();
    grid.mark(dead, CellState::DeadEnd).unwrap();

    for state in [CellState::Unknown, CellState::Visited] {
        assert!(matches!(
            grid.mark(wall, state),
            Err(MemoryError::IllegalTransition { .. })
        ));
        assert!(matches!(
            grid.mark(dead, state),
            Err(MemoryError::IllegalTransition { .. })
        ));
    }
    assert_eq!(grid.state(wall), Some(CellState::Wall));
    assert_eq!(grid.state(dead), Some(CellState::DeadEnd));
}

#[test]
fn test_rewriting_same_state_is_allowed() {
    let mut grid = MemoryGrid::new(5, 5).unwrap();
    let pos = Position::new(0, 0);
    grid.mark(pos, CellState::Wall).unwrap();
    assert!(grid.mark(pos, CellState::Wall).is_ok());
}

#[test]
fn test_counts_by_state() {
    let mut grid = MemoryGrid::new(5, 5).unwrap();
    grid.mark(Position::new(0, 0), CellState::Wall).unwrap();
    grid.mark(Position::new(1, 0), CellState::Wall).unwrap();
    grid.mark(Position::new(2, 2), CellState::Visited).unwrap();

    assert_eq!(grid.count(CellState::Wall), 2);
    assert_eq!(grid.count(CellState::Visited), 1);
    assert_eq!(grid.count(CellState::Unknown), 22);
}

// ============== Move History Tests ==============

#[test]
fn test_history_lifo() {
    let mut history = MoveHistory::new();
    for direction in [Direction::Up, Direction::Up, Direction::Right] {
        history.push(direction);
    }
    assert_eq!(history.pop(), Some(Direction::Right));
    assert_eq!(history.peek(), Some(Direction::Up));
    assert_eq!(history.len(), 2);
}

#[test]
fn test_history_replay_lands_on_walked_position() {
    let mut history = MoveHistory::new();
    let start = Position::new(10, 10);
    let mut position = start;
    for direction in [
        Direction::Left,
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Down,
    ] {
        history.push(direction);
        position = position.step(direction).unwrap();
    }
    assert_eq!(history.replay(start), Some(position));

    // Retracting the newest move walks back one cell.
    let last = history.pop().unwrap();
    position = position.step(last.opposite()).unwrap();
    assert_eq!(history.replay(start), Some(position));
}

#[test]
fn test_history_round_trips_through_text() {
    let history: MoveHistory = "up up left down".parse().unwrap();
    assert_eq!(history.to_string(), "Up -> Up -> Left -> Down");
}
