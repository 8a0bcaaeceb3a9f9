use std::fmt;

use super::{direction::Direction, steering::Steering};

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell in a direction
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Snake body, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Position>,
}

impl Snake {
    /// Build a straight snake with its tail trailing behind `head`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let behind = direction.opposite();
        let mut body = Vec::with_capacity(length.max(1));
        let mut cell = head;
        body.push(cell);

        for _ in 1..length {
            cell = cell.step(behind);
            body.push(cell);
        }

        Self { body }
    }

    /// Build a snake from explicit cells. Returns None for an empty body.
    pub fn from_cells(cells: Vec<Position>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Self { body: cells })
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn cells(&self) -> &[Position] {
        &self.body
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front, dropping the tail unless growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOver {
    /// Head left the grid
    Wall,
    /// Head ran into the body
    SelfCollision,
    /// No free cell remains for food
    BoardFull,
}

impl fmt::Display for GameOver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameOver::Wall => "hit the wall",
            GameOver::SelfCollision => "bit its own tail",
            GameOver::BoardFull => "filled the board",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Over(GameOver),
}

/// Complete state of one run plus the carried-over high score
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub steering: Steering,
    grid_size: usize,
    pub score: u32,
    pub high_score: u32,
    pub phase: Phase,
}

impl GameState {
    pub fn new(snake: Snake, food: Position, direction: Direction, grid_size: usize) -> Self {
        Self {
            snake,
            food,
            steering: Steering::new(direction),
            grid_size,
            score: 0,
            high_score: 0,
            phase: Phase::Running,
        }
    }

    /// Side length of the grid this run is played on
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    pub fn game_over(&self) -> Option<GameOver> {
        match self.phase {
            Phase::Running => None,
            Phase::Over(reason) => Some(reason),
        }
    }

    pub fn direction(&self) -> Direction {
        self.steering.committed()
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_step() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.step(Direction::Right), Position::new(6, 5));
        assert_eq!(pos.step(Direction::Left), Position::new(4, 5));
        assert_eq!(pos.step(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.step(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.manhattan(Position::new(7, 2)), 5);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(10, 10), Direction::Up, 3);
        assert_eq!(
            snake.cells(),
            &[
                Position::new(10, 10),
                Position::new(10, 11),
                Position::new(10, 12)
            ]
        );
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert!(!snake.contains(Position::new(3, 5)));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
    }

    #[test]
    fn test_from_cells_rejects_empty() {
        assert!(Snake::from_cells(Vec::new()).is_none());
        let snake = Snake::from_cells(vec![Position::new(0, 5), Position::new(0, 6)]).unwrap();
        assert_eq!(snake.head(), Position::new(0, 5));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(10, 10),
            Direction::Right,
            20,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
        assert!(!state.is_over());
    }
}
