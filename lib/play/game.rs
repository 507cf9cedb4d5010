use crate::chess::{Board, Color, IllegalMove, Move, ParseFenError, Piece, Square};
use derive_more::{Debug, Display, Error, From};
use std::str::FromStr;
use tracing::instrument;

/// A move applied to a [`Game`], as recorded in its history.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display("{_0}:{}->{}", _1.whence(), _1.whither())]
pub struct Played(pub Piece, pub Move);

/// The reason why a [`Move`] was rejected by [`Game::make`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum PlayError {
    /// There is no piece on the move's source square.
    #[display("square `{_0}` is vacant")]
    #[from(ignore)]
    VacantSquare(#[error(not(source))] Square),

    /// The piece on the move's source square belongs to the idle side.
    #[display("it is not `{_0}`'s turn to move")]
    #[from(ignore)]
    OutOfTurn(#[error(not(source))] Color),

    /// The move is illegal for the piece on the move's source square.
    #[display("{_0}")]
    Illegal(IllegalMove),
}

/// Holds the state of a game session.
///
/// Replaces the engine-external board and turn bookkeeping: the board snapshot,
/// the side to move, and the history of applied moves, mutated only through
/// [`Game::make`].
#[derive(Debug, Display, Clone, Eq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug("Game({self})")]
#[display("{board} {turn}")]
pub struct Game {
    board: Board,
    turn: Color,
    #[cfg_attr(test, strategy(proptest::strategy::Just(Vec::new())))]
    history: Vec<Played>,
}

/// Games are compared by position, i.e. board and side to move.
impl PartialEq for Game {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board && self.turn == other.turn
    }
}

impl Default for Game {
    #[inline(always)]
    fn default() -> Self {
        Game {
            board: Board::default(),
            turn: Color::White,
            history: Vec::new(),
        }
    }
}

impl Game {
    /// The current [`Board`] snapshot.
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The moves applied so far, in order.
    #[inline(always)]
    pub fn history(&self) -> &[Played] {
        &self.history
    }

    /// An iterator over the legal [`Move`]s for the side to move.
    #[inline(always)]
    pub fn moves(&self) -> impl Iterator<Item = Move> {
        self.board.moves(self.turn)
    }

    /// Applies a [`Move`] for the side to move.
    ///
    /// The position is left untouched unless the move is accepted.
    #[instrument(level = "trace", skip(self), err)]
    pub fn make(&mut self, m: Move) -> Result<Played, PlayError> {
        let Some(piece) = self.board[m.whence()] else {
            return Err(PlayError::VacantSquare(m.whence()));
        };

        if piece.color() != self.turn {
            return Err(PlayError::OutOfTurn(piece.color()));
        }

        self.board.legality(piece, m)?;

        if let Some(captured) = self.board[m.whither()] {
            self.board.toggle(captured, m.whither());
        }

        self.board.toggle(piece, m.whence());
        self.board.toggle(piece, m.whither());
        self.turn = !self.turn;

        let played = Played(piece, m);
        self.history.push(played);
        Ok(played)
    }
}

/// Parses the position, i.e. the FEN piece placement field optionally followed
/// by the side to move.
///
/// Any further FEN fields are ignored; the side to move defaults to white.
impl FromStr for Game {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split(' ');

        let board = fields.next().unwrap_or_default().parse()?;
        let turn = match fields.next() {
            None => Color::White,
            Some(c) => c.parse().map_err(|_| ParseFenError::InvalidSideToMove)?,
        };

        Ok(Game {
            board,
            turn,
            history: Vec::new(),
        })
    }
}
