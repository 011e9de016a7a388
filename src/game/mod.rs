//! Core game logic module for Snake
//!
//! This module contains the simulation without any I/O or rendering dependencies.
//! A [`Session`] is driven one step at a time by an external timer.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod lifecycle;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{EndReason, GameOver, Session, TickOutcome};
pub use error::GameError;
pub use food::Food;
pub use grid::{Grid, Occupant, Palette, Tile};
pub use lifecycle::{GameManager, GameStatus};
pub use state::{CollisionType, Position, Snake};
