use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::chess::{Board, Move};
use tracing::instrument;

/// Prints the legality verdict for a move in a given position.
#[derive(Debug, Parser)]
pub struct Check {
    /// The position in FEN.
    fen: Board,

    /// The move in coordinate notation.
    r#move: Move,
}

impl Check {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let m = self.r#move;

        let piece = self.fen[m.whence()]
            .with_context(|| format!("square `{}` is vacant", m.whence()))?;

        match self.fen.legality(piece, m) {
            Ok(()) => println!("legal"),
            Err(e) => println!("illegal: {e}"),
        }

        Ok(())
    }
}
