use std::collections::VecDeque;

use super::action::Direction;

/// A position on the game grid
///
/// Signed so that a head which has walked off the board is still representable
/// until the next tick detects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Whether the position lies within `[0, width-1] x [0, height-1]`
    pub fn is_within(&self, width: usize, height: usize) -> bool {
        self.x >= 0
            && self.y >= 0
            && (self.x as i64) < width as i64
            && (self.y as i64) < height as i64
    }
}

/// Type of collision that ends a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// The player-controlled snake
///
/// Body segments are kept oldest first, so the front of the queue is the tail
/// and the back is the neck right behind the head.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    head: Position,
    body: VecDeque<Position>,
    direction: Direction,
    initial_length: usize,
    width: usize,
    height: usize,
    /// Blocks heading changes while set
    pub frozen: bool,
}

impl Snake {
    /// Create a snake bounded by the given grid and place it at its spawn
    pub fn new(width: usize, height: usize, initial_length: usize) -> Self {
        let mut snake = Self {
            head: Position::new(0, 0),
            body: VecDeque::new(),
            direction: Direction::Right,
            initial_length: initial_length.max(1),
            width,
            height,
            frozen: false,
        };
        snake.set_spawn();
        snake
    }

    /// Build a snake from explicit parts, body given tail first
    pub fn from_parts(
        head: Position,
        body: impl IntoIterator<Item = Position>,
        direction: Direction,
        width: usize,
        height: usize,
    ) -> Self {
        let body: VecDeque<Position> = body.into_iter().collect();
        Self {
            head,
            initial_length: body.len() + 1,
            body,
            direction,
            width,
            height,
            frozen: false,
        }
    }

    /// Put the head just left of the grid centre and lay the body out behind it
    pub fn set_spawn(&mut self) {
        self.head = Position::new((self.width / 2) as i32 - 1, (self.height / 2) as i32);

        let back = self.direction.opposite();
        let (dx, dy) = back.delta();
        self.body = (1..self.initial_length)
            .rev()
            .map(|i| self.head.moved_by(dx * i as i32, dy * i as i32))
            .collect();
    }

    /// Set the heading unconditionally, for placing a fresh snake
    pub fn face(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Change the grid the snake lives in. Call `set_spawn` before moving again.
    pub fn set_boundary(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Request a new heading, applied by the next movement
    ///
    /// Ignored while frozen or when it would reverse the snake into its neck.
    pub fn change_heading(&mut self, direction: Direction) {
        if self.frozen || self.direction.is_opposite(direction) {
            return;
        }
        self.direction = direction;
    }

    /// Where the head will be after the next movement
    pub fn peek_next_head(&self) -> Position {
        self.head.moved_in_direction(self.direction)
    }

    /// Move one cell forward keeping the length
    pub fn advance(&mut self) {
        self.body.pop_front();
        self.body.push_back(self.head);
        self.head = self.peek_next_head();
    }

    /// Move one cell forward growing by one segment
    pub fn grow(&mut self) {
        self.body.push_back(self.head);
        self.head = self.peek_next_head();
    }

    /// Head first, then every body segment from tail to neck
    pub fn occupied_cells(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    /// Whether the position is covered by the head or any segment
    pub fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Why the snake is dead, if it is
    ///
    /// Checks the current head. The orchestrator calls this before moving, so
    /// a head that stepped off the board last tick is caught here.
    pub fn collision(&self) -> Option<CollisionType> {
        if self.body.contains(&self.head) {
            return Some(CollisionType::SelfCollision);
        }
        if !self.head.is_within(self.width, self.height) {
            return Some(CollisionType::Wall);
        }
        None
    }

    pub fn is_terminal(&self) -> bool {
        self.collision().is_some()
    }

    pub fn head(&self) -> Position {
        self.head
    }

    /// Body segments, tail first, head excluded
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of cells covered, head included
    pub fn segment_count(&self) -> usize {
        self.body.len() + 1
    }
}
