/// Heading of the snake on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// The direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Action an input symbol can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Steer the snake
    Move(Direction),
    /// Toggle the pause flag
    Pause,
    /// Begin a new session from the menu
    Start,
    /// Leave the program
    Quit,
    /// Raise the speed of the next session, menu only
    SpeedUp,
    /// Lower the speed of the next session, menu only
    SpeedDown,
}

impl Action {
    /// Stable name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::Move(Direction::Up) => "moveUp",
            Action::Move(Direction::Down) => "moveDown",
            Action::Move(Direction::Left) => "moveLeft",
            Action::Move(Direction::Right) => "moveRight",
            Action::Pause => "pause",
            Action::Start => "start",
            Action::Quit => "quit",
            Action::SpeedUp => "speedUp",
            Action::SpeedDown => "speedDown",
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}
