use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{Position, Snake};

/// Random draws tried before falling back to enumerating free cells
pub const MAX_RANDOM_ATTEMPTS: usize = 64;

/// The single food item on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pos: Position,
    width: usize,
    height: usize,
}

impl Food {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pos: Position::new(0, 0),
            width,
            height,
        }
    }

    /// Move the food to a uniformly random cell the snake does not cover
    ///
    /// Returns `None`, leaving the food where it was, when the snake fills the
    /// whole grid.
    pub fn relocate<R: Rng>(&mut self, snake: &Snake, rng: &mut R) -> Option<Position> {
        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let x = rng.gen_range(0..self.width) as i32;
            let y = rng.gen_range(0..self.height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                self.pos = pos;
                return Some(pos);
            }
        }

        // Crowded board: pick among the cells that are actually free.
        let free: Vec<Position> = (0..self.height as i32)
            .flat_map(|y| (0..self.width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        let pos = *free.choose(rng)?;
        self.pos = pos;
        Some(pos)
    }

    /// Whether the food sits at the given position
    pub fn matches(&self, pos: Position) -> bool {
        self.pos == pos
    }

    pub fn set_position(&mut self, pos: Position) {
        self.pos = pos;
    }

    pub fn set_boundary(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    pub fn position(&self) -> Position {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_relocate_avoids_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::new(10, 10, 3);
        let mut food = Food::new(10, 10);

        for _ in 0..500 {
            let pos = food.relocate(&snake, &mut rng).unwrap();
            assert!(!snake.occupies(pos));
            assert!(pos.is_within(10, 10));
            assert!(food.matches(pos));
        }
    }

    #[test]
    fn test_relocate_finds_last_free_cell() {
        // 3x1 grid, snake covers (0,0) and (1,0): only (2,0) is free.
        let snake = Snake::from_parts(
            Position::new(1, 0),
            [Position::new(0, 0)],
            Direction::Right,
            3,
            1,
        );
        let mut rng = StdRng::seed_from_u64(1);
        let mut food = Food::new(3, 1);

        for _ in 0..20 {
            assert_eq!(food.relocate(&snake, &mut rng), Some(Position::new(2, 0)));
        }
    }

    #[test]
    fn test_relocate_on_full_board_is_total() {
        let snake = Snake::from_parts(
            Position::new(1, 0),
            [Position::new(0, 0)],
            Direction::Right,
            2,
            1,
        );
        let mut rng = StdRng::seed_from_u64(3);
        let mut food = Food::new(2, 1);
        food.set_position(Position::new(1, 0));

        assert_eq!(food.relocate(&snake, &mut rng), None);
        assert_eq!(food.position(), Position::new(1, 0));
    }

    #[test]
    fn test_relocate_reaches_every_free_cell() {
        let snake = Snake::new(4, 2, 1);
        let mut rng = StdRng::seed_from_u64(11);
        let mut food = Food::new(4, 2);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..400 {
            seen.insert(food.relocate(&snake, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 4 * 2 - 1);
    }
}
