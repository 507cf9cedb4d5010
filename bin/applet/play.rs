use crate::player::PlayerConfig;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Board, Color, File, Rank, Square};
use lib::play::Game;
use lib::util::Integer;
use tracing::{info, instrument, warn};

/// A game of chess between two configurable players.
#[derive(Debug, Parser)]
pub struct Play {
    /// The player with the white pieces.
    #[clap(long, default_value_t = PlayerConfig::Manual)]
    white: PlayerConfig,

    /// The player with the black pieces.
    #[clap(long, default_value_t = PlayerConfig::Random { seed: None })]
    black: PlayerConfig,

    /// The starting position in FEN.
    #[clap(long)]
    fen: Option<Game>,

    /// Stop after this many halfmoves.
    #[clap(short = 'n', long)]
    moves: Option<usize>,
}

impl Default for Play {
    fn default() -> Self {
        Play {
            white: PlayerConfig::Manual,
            black: PlayerConfig::Random { seed: None },
            fen: None,
            moves: None,
        }
    }
}

/// Renders the board with figurine glyphs and coordinate labels.
fn render(board: &Board) -> String {
    let mut out = String::new();

    for r in Rank::iter().rev() {
        out.push_str(&r.to_string());

        for f in File::iter() {
            out.push(' ');
            match board[Square::new(f, r)] {
                None => out.push('.'),
                Some(p) => out.push(p.glyph()),
            }
        }

        out.push('\n');
    }

    out.push(' ');
    for f in File::iter() {
        out.push(' ');
        out.push_str(&f.to_string());
    }

    out
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut game = self.fen.unwrap_or_default();
        let mut white = self.white.build();
        let mut black = self.black.build();

        let mut remaining = self.moves.unwrap_or(usize::MAX);
        while remaining > 0 {
            println!("{}", render(game.board()));
            println!("fen: {game}");

            if game.moves().next().is_none() {
                info!("no legal moves for `{}`", game.turn());
                break;
            }

            let player = match game.turn() {
                Color::White => &mut white,
                Color::Black => &mut black,
            };

            let Some(m) = player.pick(&game)? else {
                break;
            };

            match game.make(m) {
                Err(e) => warn!("{e}"),
                Ok(played) => {
                    info!("{played}");
                    remaining -= 1;
                }
            }
        }

        for played in game.history() {
            println!("{played}");
        }

        Ok(())
    }
}
