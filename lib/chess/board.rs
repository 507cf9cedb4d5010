use crate::chess::{Color, File, Move, Piece, Rank, Role, Square};
use crate::util::Integer;
use arrayvec::ArrayString;
use derive_more::{Debug, Display, Error};
use std::fmt;
use std::{ops::Index, str::FromStr};

/// The reason why a [`Move`] is illegal.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum IllegalMove {
    /// The destination square holds a piece of the moving side.
    #[display("the destination square holds a piece of the same color")]
    SelfCapture,
    /// The move does not fit the piece's movement pattern.
    #[display("the move does not fit the piece's movement pattern")]
    OutOfPattern,
    /// A piece stands strictly between the source and destination squares.
    #[display("a piece stands between the source and destination squares")]
    BlockedPath,
    /// A pawn may only advance onto vacant squares.
    #[display("a pawn may only advance onto a vacant square")]
    BlockedAdvance,
}

/// The chess board.
///
/// An 8x8 grid of squares, each holding at most one [`Piece`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug("Board({self})")]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        use Role::*;

        let mut squares = [None; 64];
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for (f, r) in File::iter().zip(back) {
            squares[Square::new(f, Rank::First).get() as usize] = Some(Piece::new(r, Color::White));
            squares[Square::new(f, Rank::Second).get() as usize] =
                Some(Piece::new(Pawn, Color::White));
            squares[Square::new(f, Rank::Seventh).get() as usize] =
                Some(Piece::new(Pawn, Color::Black));
            squares[Square::new(f, Rank::Eighth).get() as usize] =
                Some(Piece::new(r, Color::Black));
        }

        Board { squares }
    }
}

impl Board {
    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.get() as usize]
    }

    /// An iterator over all pieces on the board.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Square::iter().filter_map(|sq| Some((self.piece_on(sq)?, sq)))
    }

    /// Toggles a piece on a square.
    #[inline(always)]
    pub fn toggle(&mut self, p: Piece, sq: Square) {
        debug_assert!(!self[sq].is_some_and(|q| p != q));

        self.squares[sq.get() as usize] = match self[sq] {
            None => Some(p),
            Some(_) => None,
        };
    }

    /// Checks whether a [`Move`] is legal for a [`Piece`].
    ///
    /// The piece is assumed to be the true occupant of the move's source square;
    /// enforcing the turn order is the caller's responsibility.
    #[inline(always)]
    pub fn is_legal(&self, p: Piece, m: Move) -> bool {
        self.legality(p, m).is_ok()
    }

    /// Checks a [`Move`] against the movement rules, naming the reason if illegal.
    pub fn legality(&self, p: Piece, m: Move) -> Result<(), IllegalMove> {
        // Rejected upfront so that the path clearance walk never sees a zero delta.
        if m.whence() == m.whither() {
            return Err(IllegalMove::OutOfPattern);
        }

        let target = self[m.whither()];
        if target.is_some_and(|q| q.color() == p.color()) {
            return Err(IllegalMove::SelfCapture);
        }

        let dr = m.whither().rank() - m.whence().rank();
        let df = m.whither().file() - m.whence().file();

        match p.role() {
            Role::Pawn => {
                let forward = p.color().forward();

                if df == 0 && dr == forward {
                    match target {
                        None => Ok(()),
                        Some(_) => Err(IllegalMove::BlockedAdvance),
                    }
                } else if df == 0 && dr == 2 * forward {
                    if m.whence().rank() != p.color().home_rank() {
                        return Err(IllegalMove::OutOfPattern);
                    }

                    let step = Rank::new(m.whence().rank().get() + forward);
                    match self[Square::new(m.whence().file(), step)].or(target) {
                        None => Ok(()),
                        Some(_) => Err(IllegalMove::BlockedAdvance),
                    }
                } else if df.abs() == 1 && dr == forward {
                    match target {
                        Some(_) => Ok(()),
                        None => Err(IllegalMove::OutOfPattern),
                    }
                } else {
                    Err(IllegalMove::OutOfPattern)
                }
            }

            Role::Knight => match (dr.abs(), df.abs()) {
                (2, 1) | (1, 2) => Ok(()),
                _ => Err(IllegalMove::OutOfPattern),
            },

            Role::Bishop if dr.abs() != df.abs() => Err(IllegalMove::OutOfPattern),
            Role::Rook if dr != 0 && df != 0 => Err(IllegalMove::OutOfPattern),
            Role::Queen if dr.abs() != df.abs() && dr != 0 && df != 0 => {
                Err(IllegalMove::OutOfPattern)
            }

            Role::Bishop | Role::Rook | Role::Queen => {
                match self.is_path_clear(m.whence(), m.whither()) {
                    true => Ok(()),
                    false => Err(IllegalMove::BlockedPath),
                }
            }

            Role::King => match dr.abs().max(df.abs()) {
                1 => Ok(()),
                _ => Err(IllegalMove::OutOfPattern),
            },
        }
    }

    /// Whether all squares strictly between two endpoints are vacant.
    ///
    /// The endpoints must be distinct and lie on a common rank, file, or diagonal;
    /// the destination square itself is never evaluated.
    fn is_path_clear(&self, whence: Square, whither: Square) -> bool {
        let dr = (whither.rank() - whence.rank()).signum();
        let df = (whither.file() - whence.file()).signum();

        let mut r = whence.rank().get() + dr;
        let mut f = whence.file().get() + df;
        while (r, f) != (whither.rank().get(), whither.file().get()) {
            if self[Square::new(File::new(f), Rank::new(r))].is_some() {
                return false;
            }

            r += dr;
            f += df;
        }

        true
    }

    /// An iterator over the legal [`Move`]s for one side.
    pub fn moves(&self, side: Color) -> impl Iterator<Item = Move> {
        let board = *self;

        Square::iter()
            .filter_map(move |wc| Some((board.piece_on(wc)?, wc)))
            .filter(move |(p, _)| p.color() == side)
            .flat_map(move |(p, wc)| {
                Square::iter().filter_map(move |wt| {
                    let m = Move(wc, wt);
                    board.is_legal(p, m).then_some(m)
                })
            })
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.squares[sq.get() as usize]
    }
}

/// Prints the FEN piece placement field.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut skip = 0;
        for sq in Square::iter().map(|sq| sq.flip()) {
            let mut buffer = ArrayString::<2>::new();

            match self[sq] {
                None => skip += 1,
                Some(p) => buffer.push(p.fen()),
            }

            if sq.file() == File::H && sq.rank() != Rank::First {
                buffer.push('/');
            }

            if !buffer.is_empty() && skip > 0 {
                write!(f, "{}", skip)?;
                skip = 0;
            }

            f.write_str(&buffer)?;
        }

        if skip > 0 {
            write!(f, "{}", skip)?;
        }

        Ok(())
    }
}

/// The reason why parsing the FEN string failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseFenError {
    #[display("failed to parse piece placement")]
    InvalidPlacement,
    #[display("failed to parse side to move")]
    InvalidSideToMove,
}

/// Parses the FEN piece placement field.
///
/// Everything past the first space, if present, is ignored.
impl FromStr for Board {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let placement = s.split(' ').next().unwrap_or_default();

        let rows: Vec<_> = placement.split('/').rev().collect();
        let rows @ [_1, _2, _3, _4, _5, _6, _7, _8] = &rows[..] else {
            return Err(ParseFenError::InvalidPlacement);
        };

        let mut squares = [None; 64];
        for (rank, segment) in rows.iter().enumerate() {
            let mut file = 0;
            for c in segment.chars() {
                if file >= 8 {
                    return Err(ParseFenError::InvalidPlacement);
                } else if let Some(skip) = c.to_digit(10) {
                    file += skip;
                } else if let Some(p) = Piece::from_fen(c) {
                    let sq = Square::new(File::new(file as _), Rank::new(rank as _));
                    squares[sq.get() as usize] = Some(p);
                    file += 1;
                } else {
                    return Err(ParseFenError::InvalidPlacement);
                }
            }

            if file != 8 {
                return Err(ParseFenError::InvalidPlacement);
            }
        }

        Ok(Board { squares })
    }
}
