/// Chess domain types and the move legality engine.
pub mod chess;
/// Game sessions and opponent move choosers.
pub mod play;
/// Assorted utilities.
pub mod util;
