mod game;
mod mover;

pub use game::*;
pub use mover::*;
