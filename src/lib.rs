//! Tile Snake - a grid-based Snake game
//!
//! This library provides:
//! - Core simulation: snake, food, board projection and the tick orchestrator (game module)
//! - Key bindings (input module)
//! - Score and play-time tracking (metrics module)
//! - The leaderboard collaborator (leaderboard module)
//! - TUI rendering and the interactive mode (render and modes modules)

pub mod game;
pub mod input;
pub mod leaderboard;
pub mod metrics;
pub mod modes;
pub mod render;
