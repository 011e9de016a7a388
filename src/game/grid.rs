//! Render-ready projection of the board
//!
//! The grid knows nothing about snakes or food. Each tick it is cleared back
//! to the empty style and the game objects are drawn on top. Styles are an
//! opaque payload `S` that is only routed from game object to cell.

use super::error::GameError;
use super::state::Position;

/// What currently covers a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    SnakeHead,
    SnakeBody,
    Food,
}

/// Styles handed to the grid for each kind of cell
#[derive(Debug, Clone, PartialEq)]
pub struct Palette<S> {
    pub empty: S,
    pub snake: S,
    pub food: S,
}

impl<S> Palette<S> {
    pub fn style_for(&self, occupant: Option<Occupant>) -> &S {
        match occupant {
            None => &self.empty,
            Some(Occupant::SnakeHead | Occupant::SnakeBody) => &self.snake,
            Some(Occupant::Food) => &self.food,
        }
    }
}

/// One cell of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<S> {
    pos: Position,
    occupant: Option<Occupant>,
    style: S,
}

impl<S: Clone> Tile<S> {
    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    pub fn style(&self) -> &S {
        &self.style
    }

    fn fill(&mut self, occupant: Occupant, style: &S) {
        self.occupant = Some(occupant);
        self.style = style.clone();
    }

    fn clear(&mut self, empty_style: &S) {
        self.occupant = None;
        self.style = empty_style.clone();
    }
}

/// Fixed-size board of tiles in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<S> {
    width: usize,
    height: usize,
    tiles: Vec<Tile<S>>,
    empty_style: S,
}

impl<S: Clone> Grid<S> {
    /// Build every tile of a `width x height` board in the empty style
    pub fn new(width: usize, height: usize, empty_style: S) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidGrid { width, height });
        }

        let tiles = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| Tile {
                pos: Position::new(x as i32, y as i32),
                occupant: None,
                style: empty_style.clone(),
            })
            .collect();

        Ok(Self {
            width,
            height,
            tiles,
            empty_style,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All tiles, row by row from the top left
    pub fn tiles(&self) -> &[Tile<S>] {
        &self.tiles
    }

    /// Tiles of row `y`
    pub fn row(&self, y: usize) -> &[Tile<S>] {
        let start = y * self.width;
        &self.tiles[start..start + self.width]
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile<S>> {
        self.index_of(pos).map(|i| &self.tiles[i])
    }

    /// Reset every tile to the empty style
    pub fn clear(&mut self) {
        let empty = &self.empty_style;
        self.tiles.iter_mut().for_each(|tile| tile.clear(empty));
    }

    /// Clear the board then draw the given objects
    ///
    /// A cell covered by several objects keeps the first one drawn. Positions
    /// outside the board are skipped.
    pub fn draw<'a, I>(&mut self, objects: I)
    where
        I: IntoIterator<Item = (Position, Occupant, &'a S)>,
        S: 'a,
    {
        self.clear();
        for (pos, occupant, style) in objects {
            if let Some(i) = self.index_of(pos) {
                if self.tiles[i].is_empty() {
                    self.tiles[i].fill(occupant, style);
                }
            }
        }
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        pos.is_within(self.width, self.height)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }
}
