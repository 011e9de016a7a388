pub mod renderer;

pub use renderer::{MenuView, Renderer, TileStyle, terminal_palette};
