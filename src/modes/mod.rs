pub mod human;
pub mod ticker;

pub use human::{HumanMode, Scores};
pub use ticker::TickTimer;
