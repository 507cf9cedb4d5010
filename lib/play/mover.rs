use crate::chess::Move;
use crate::play::Game;
use derive_more::Constructor;
use rand::prelude::*;

/// Trait for types that choose a [`Move`] for the side to move.
pub trait Mover {
    /// Picks one of the legal moves in this position, if any exists.
    fn pick(&mut self, game: &Game) -> Option<Move>;
}

/// A [`Mover`] that picks uniformly among all legal moves.
#[derive(Debug, Clone, Constructor)]
pub struct Random<R> {
    rng: R,
}

impl Random<StdRng> {
    /// Constructs [`Random`] from a seed, for reproducible games.
    #[inline(always)]
    pub fn seeded(seed: u64) -> Self {
        Random::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Mover for Random<R> {
    fn pick(&mut self, game: &Game) -> Option<Move> {
        let moves: Vec<_> = game.moves().collect();
        moves.choose(&mut self.rng).copied()
    }
}
