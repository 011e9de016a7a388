use thiserror::Error;

/// Errors raised while setting up a session
///
/// Play itself never fails: every in-game edge case (reversing into the
/// neck, unbound keys, a crowded board) is an explicit policy branch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    InvalidGrid { width: usize, height: usize },

    #[error("grid sides are capped at {max} cells, got {width}x{height}")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("speed must be within {min}..={max} steps per second, got {speed}")]
    InvalidSpeed { speed: u32, min: u32, max: u32 },

    #[error("player name must be 1..={max} characters, got {len}")]
    InvalidPlayerName { len: usize, max: usize },

    #[error("a snake of length {length} does not fit a {width}x{height} grid")]
    SnakeTooLong {
        length: usize,
        width: usize,
        height: usize,
    },
}
