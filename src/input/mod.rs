pub mod handler;

pub use handler::{Controller, is_ctrl_c, key_symbol};
