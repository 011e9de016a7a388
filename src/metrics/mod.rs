pub mod score;

pub use score::{ScoreTracker, format_elapsed};
