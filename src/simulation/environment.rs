use std::fmt;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::simulation::direction::Direction;
use crate::simulation::error::MazeError;

/// Result of asking the environment to move one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    Succeeded,
    Blocked,
    GoalReached,
}

/// The world as seen by the navigator: a single-step move oracle.
///
/// Implementations must be deterministic, must move their own notion of
/// the agent by exactly one cell on `Succeeded`, and must let any
/// succeeded move be undone by its opposite.
pub trait Environment {
    fn attempt_move(&mut self, direction: Direction) -> MoveOutcome;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tile {
    Open,
    Wall,
    Goal,
}

/// Ground-truth rectangular maze read from a text map.
///
/// `#` is a wall, `.` or space is open floor, `S` marks the start and `G`
/// the goal. Short rows are padded with walls and everything outside the
/// map is a wall.
#[derive(Clone, Debug)]
pub struct GridMaze {
    tiles: Vec<Vec<Tile>>, // [row][col]
    width: usize,
    height: usize,
    agent: (usize, usize), // (row, col)
    start: (usize, usize),
    goal: (usize, usize),
    steps: u64,
}

/// Largest map, in tiles, that [`GridMaze::generate`] will carve.
pub const MAX_GENERATED_TILES: usize = 1 << 24;

/// Small hand-drawn maze the navigator was first exercised on.
const REFERENCE_MAP: &str = "\
##########
# #    # #
#   #  # #
## ##    #
#   ######
### #    #
#   #    #
#  ##    #
#    S   #
#####G####";

impl GridMaze {
    /// Parses a maze from its text map.
    ///
    /// # Errors
    /// Fails on unknown characters or if the map lacks exactly one `S` and one `G`.
    pub fn parse(map: &str) -> Result<Self, MazeError> {
        let mut start = None;
        let mut goal = None;
        let mut tiles = Vec::new();

        for (row, line) in map.lines().enumerate() {
            let mut tiles_row = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                let tile = match ch {
                    '#' => Tile::Wall,
                    '.' | ' ' => Tile::Open,
                    'S' => {
                        if start.replace((row, col)).is_some() {
                            return Err(MazeError::Duplicate('S'));
                        }
                        Tile::Open
                    }
                    'G' => {
                        if goal.replace((row, col)).is_some() {
                            return Err(MazeError::Duplicate('G'));
                        }
                        Tile::Goal
                    }
                    _ => return Err(MazeError::UnknownCell { ch, row, col }),
                };
                tiles_row.push(tile);
            }
            tiles.push(tiles_row);
        }

        let start = start.ok_or(MazeError::MissingStart)?;
        let goal = goal.ok_or(MazeError::MissingGoal)?;
        let width = tiles.iter().map(Vec::len).max().unwrap_or(0);
        for tiles_row in &mut tiles {
            tiles_row.resize(width, Tile::Wall);
        }
        let height = tiles.len();

        Ok(Self {
            tiles,
            width,
            height,
            agent: start,
            start,
            goal,
            steps: 0,
        })
    }

    /// Reads and parses a maze file.
    ///
    /// # Errors
    /// I/O failures and any [`GridMaze::parse`] error.
    pub fn load(path: &Path) -> Result<Self, MazeError> {
        let map = std::fs::read_to_string(path).map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&map)
    }

    /// The bundled 10x10 maze.
    #[must_use]
    pub fn reference() -> Self {
        match Self::parse(REFERENCE_MAP) {
            Ok(maze) => maze,
            Err(err) => unreachable!("bundled maze is well formed: {err}"),
        }
    }

    /// Carves a random perfect maze of `rooms_wide` x `rooms_high` rooms.
    ///
    /// Rooms sit on odd coordinates of a `(2w+1) x (2h+1)` map and are joined
    /// by iterative depth-first carving, so every room is reachable. The
    /// start is the top-left room and the goal the bottom-right one.
    ///
    /// # Errors
    /// `MazeError::EmptyGeneration` if either dimension is zero, or both are
    /// one (start and goal would coincide). `MazeError::TooLarge` if the map
    /// would exceed [`MAX_GENERATED_TILES`].
    pub fn generate<R: Rng + ?Sized>(
        rooms_wide: usize,
        rooms_high: usize,
        rng: &mut R,
    ) -> Result<Self, MazeError> {
        if rooms_wide == 0 || rooms_high == 0 || (rooms_wide, rooms_high) == (1, 1) {
            return Err(MazeError::EmptyGeneration);
        }
        let map_side = |rooms: usize| rooms.checked_mul(2)?.checked_add(1);
        let (width, height) = map_side(rooms_wide)
            .zip(map_side(rooms_high))
            .filter(|(w, h)| {
                w.checked_mul(*h)
                    .is_some_and(|tiles| tiles <= MAX_GENERATED_TILES)
            })
            .ok_or(MazeError::TooLarge {
                rooms_wide,
                rooms_high,
                max: MAX_GENERATED_TILES,
            })?;
        let mut tiles = vec![vec![Tile::Wall; width]; height];
        let mut seen = vec![vec![false; rooms_wide]; rooms_high];

        let mut stack = vec![(0usize, 0usize)];
        seen[0][0] = true;
        tiles[1][1] = Tile::Open;

        while let Some(&(rx, ry)) = stack.last() {
            let mut options = Direction::by_priority();
            options.shuffle(rng);
            let next = options.into_iter().find_map(|dir| {
                let (dx, dy) = dir.offset();
                let nx = rx.checked_add_signed(dx).filter(|x| *x < rooms_wide)?;
                let ny = ry.checked_add_signed(dy).filter(|y| *y < rooms_high)?;
                (!seen[ny][nx]).then_some((nx, ny))
            });
            match next {
                Some((nx, ny)) => {
                    seen[ny][nx] = true;
                    // Knock out the wall between the two rooms.
                    tiles[ry + ny + 1][rx + nx + 1] = Tile::Open;
                    tiles[2 * ny + 1][2 * nx + 1] = Tile::Open;
                    stack.push((nx, ny));
                }
                None => {
                    stack.pop();
                }
            }
        }

        let goal = (2 * rooms_high - 1, 2 * rooms_wide - 1);
        tiles[goal.0][goal.1] = Tile::Goal;

        Ok(Self {
            tiles,
            width,
            height,
            agent: (1, 1),
            start: (1, 1),
            goal,
            steps: 0,
        })
    }

    /// Map dimensions as `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The agent's true `(row, col)`.
    #[must_use]
    pub const fn agent(&self) -> (usize, usize) {
        self.agent
    }

    #[must_use]
    pub const fn start(&self) -> (usize, usize) {
        self.start
    }

    #[must_use]
    pub const fn goal(&self) -> (usize, usize) {
        self.goal
    }

    /// Move requests answered so far, blocked ones included.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Returns true if the agent currently stands on the goal.
    #[must_use]
    pub fn at_goal(&self) -> bool {
        self.agent == self.goal
    }

    /// Puts the agent back on the start cell and clears the step counter.
    pub fn reset(&mut self) {
        self.agent = self.start;
        self.steps = 0;
    }

    fn tile(&self, row: usize, col: usize) -> Tile {
        self.tiles
            .get(row)
            .and_then(|tiles_row| tiles_row.get(col))
            .copied()
            .unwrap_or(Tile::Wall)
    }

    /// Returns true if `(row, col)` can be stood on.
    #[must_use]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.tile(row, col) != Tile::Wall
    }
}

impl Environment for GridMaze {
    fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        self.steps += 1;
        let (row, col) = self.agent;
        let (dx, dy) = direction.offset();
        let target = row
            .checked_add_signed(dy)
            .zip(col.checked_add_signed(dx));

        let outcome = match target.map(|(r, c)| (r, c, self.tile(r, c))) {
            Some((r, c, Tile::Open)) => {
                self.agent = (r, c);
                MoveOutcome::Succeeded
            }
            Some((r, c, Tile::Goal)) => {
                self.agent = (r, c);
                MoveOutcome::GoalReached
            }
            Some((_, _, Tile::Wall)) | None => MoveOutcome::Blocked,
        };
        tracing::trace!(
            step = self.steps,
            row,
            col,
            %direction,
            ?outcome,
            "maze answered move"
        );
        outcome
    }
}

impl fmt::Display for GridMaze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, tiles_row) in self.tiles.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, tile) in tiles_row.iter().enumerate() {
                let ch = if (row, col) == self.agent {
                    '@'
                } else {
                    match tile {
                        Tile::Open => ' ',
                        Tile::Wall => '#',
                        Tile::Goal => 'G',
                    }
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_reference_maze_shape() {
        let maze = GridMaze::reference();
        assert_eq!(maze.dimensions(), (10, 10));
        assert_eq!(maze.start(), (8, 5));
        assert_eq!(maze.goal(), (9, 5));
    }

    #[test]
    fn test_parse_requires_start_and_goal() {
        assert!(matches!(GridMaze::parse("#G#"), Err(MazeError::MissingStart)));
        assert!(matches!(GridMaze::parse("#S#"), Err(MazeError::MissingGoal)));
        assert!(matches!(
            GridMaze::parse("SSG"),
            Err(MazeError::Duplicate('S'))
        ));
        assert!(matches!(
            GridMaze::parse("S?G"),
            Err(MazeError::UnknownCell { ch: '?', row: 0, col: 1 })
        ));
    }

    #[test]
    fn test_ragged_rows_padded_with_walls() {
        let maze = GridMaze::parse("S  G\n#").unwrap();
        assert_eq!(maze.dimensions(), (4, 2));
        assert!(!maze.is_open(1, 3));
    }

    #[test]
    fn test_outside_map_is_wall() {
        let mut maze = GridMaze::parse("SG").unwrap();
        assert_eq!(maze.attempt_move(Direction::Up), MoveOutcome::Blocked);
        assert_eq!(maze.attempt_move(Direction::Left), MoveOutcome::Blocked);
        assert_eq!(maze.attempt_move(Direction::Down), MoveOutcome::Blocked);
        assert_eq!(maze.agent(), (0, 0));
        assert_eq!(maze.steps(), 3);
    }

    #[test]
    fn test_goal_moves_agent() {
        let mut maze = GridMaze::parse("S G").unwrap();
        assert_eq!(maze.attempt_move(Direction::Right), MoveOutcome::Succeeded);
        assert_eq!(maze.attempt_move(Direction::Right), MoveOutcome::GoalReached);
        assert!(maze.at_goal());
    }

    #[test]
    fn test_generate_is_solvable_and_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let maze = GridMaze::generate(6, 4, &mut rng).unwrap();
        assert_eq!(maze.dimensions(), (13, 9));
        assert_eq!(maze.start(), (1, 1));
        assert_eq!(maze.goal(), (7, 11));

        // Border stays solid.
        for col in 0..13 {
            assert!(!maze.is_open(0, col));
            assert!(!maze.is_open(8, col));
        }
        // Every room is open.
        for ry in 0..4 {
            for rx in 0..6 {
                assert!(maze.is_open(2 * ry + 1, 2 * rx + 1));
            }
        }
    }

    #[test]
    fn test_generate_rejects_degenerate() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(GridMaze::generate(0, 3, &mut rng).is_err());
        assert!(GridMaze::generate(1, 1, &mut rng).is_err());
    }

    #[test]
    fn test_generate_rejects_oversized() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            GridMaze::generate(usize::MAX, 2, &mut rng),
            Err(MazeError::TooLarge {
                rooms_wide: usize::MAX,
                rooms_high: 2,
                ..
            })
        ));
        // Each side fits, the tile count does not.
        assert!(matches!(
            GridMaze::generate(4096, 4096, &mut rng),
            Err(MazeError::TooLarge { .. })
        ));
    }
}
