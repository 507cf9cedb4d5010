use crate::chess::{Color, ParseColorError, ParseRoleError, Role};
use crate::util::Integer;
use derive_more::{Display, Error, From};
use std::{fmt, str::FromStr};

/// A chess [piece][Role] of a certain [`Color`].
///
/// Prints and parses as the two-symbol code `wp`, `br`, etc.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Piece {
    WhitePawn,
    BlackPawn,
    WhiteKnight,
    BlackKnight,
    WhiteBishop,
    BlackBishop,
    WhiteRook,
    BlackRook,
    WhiteQueen,
    BlackQueen,
    WhiteKing,
    BlackKing,
}

impl Piece {
    /// Constructs [`Piece`] from a pair of [`Role`] and [`Color`].
    #[inline(always)]
    pub fn new(r: Role, c: Color) -> Self {
        Integer::new(r.get() * 2 + c.get())
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub fn role(&self) -> Role {
        Role::new(self.get() / 2)
    }

    /// This piece's [`Color`].
    #[inline(always)]
    pub fn color(&self) -> Color {
        Color::new(self.get() % 2)
    }

    /// Mirrors this piece's [`Color`].
    #[inline(always)]
    pub fn flip(&self) -> Self {
        Integer::new(self.get() ^ 1)
    }

    /// This piece's letter in the FEN placement field.
    #[inline(always)]
    pub fn fen(&self) -> char {
        let c = match self.role() {
            Role::Pawn => 'p',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Rook => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
        };

        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Constructs [`Piece`] from its letter in the FEN placement field.
    #[inline(always)]
    pub fn from_fen(c: char) -> Option<Self> {
        let mut buffer = [0; 4];
        let r = c
            .to_ascii_lowercase()
            .encode_utf8(&mut buffer)
            .parse()
            .ok()?;

        match c.is_ascii_uppercase() {
            true => Some(Piece::new(r, Color::White)),
            false => Some(Piece::new(r, Color::Black)),
        }
    }

    /// This piece's figurine symbol.
    pub fn glyph(&self) -> char {
        match self {
            Piece::WhitePawn => '♙',
            Piece::WhiteKnight => '♘',
            Piece::WhiteBishop => '♗',
            Piece::WhiteRook => '♖',
            Piece::WhiteQueen => '♕',
            Piece::WhiteKing => '♔',
            Piece::BlackPawn => '♟',
            Piece::BlackKnight => '♞',
            Piece::BlackBishop => '♝',
            Piece::BlackRook => '♜',
            Piece::BlackQueen => '♛',
            Piece::BlackKing => '♚',
        }
    }
}

unsafe impl Integer for Piece {
    type Repr = u8;
    const MIN: Self::Repr = Piece::WhitePawn as _;
    const MAX: Self::Repr = Piece::BlackKing as _;
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.color(), f)?;
        fmt::Display::fmt(&self.role(), f)?;
        Ok(())
    }
}

/// The reason why parsing [`Piece`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParsePieceError {
    #[display("failed to parse piece")]
    InvalidColor(ParseColorError),
    #[display("failed to parse piece")]
    InvalidRole(ParseRoleError),
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.char_indices().nth(1).map_or_else(|| s.len(), |(i, _)| i);
        Ok(Piece::new(s[i..].parse()?, s[..i].parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[proptest]
    fn piece_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Piece>>(), size_of::<Piece>());
    }

    #[proptest]
    fn piece_has_a_color(r: Role, c: Color) {
        assert_eq!(Piece::new(r, c).color(), c);
    }

    #[proptest]
    fn piece_has_a_role(r: Role, c: Color) {
        assert_eq!(Piece::new(r, c).role(), r);
    }

    #[proptest]
    fn piece_has_a_mirror_of_the_same_role_and_opposite_color(p: Piece) {
        assert_eq!(p.flip().role(), p.role());
        assert_eq!(p.flip().color(), !p.color());
    }

    #[proptest]
    fn piece_has_an_equivalent_fen_letter(p: Piece) {
        assert_eq!(Piece::from_fen(p.fen()), Some(p));
    }

    #[proptest]
    fn constructing_piece_fails_for_letters_outside_of_fen(
        #[filter(!"pnbrqkPNBRQK".contains(#c))] c: char,
    ) {
        assert_eq!(Piece::from_fen(c), None);
    }

    #[proptest]
    fn pieces_of_distinct_colors_have_distinct_glyphs(p: Piece) {
        assert_ne!(p.glyph(), p.flip().glyph());
    }

    #[proptest]
    fn parsing_printed_piece_is_an_identity(p: Piece) {
        assert_eq!(p.to_string().parse(), Ok(p));
    }

    #[proptest]
    fn parsing_piece_fails_if_color_invalid(
        #[filter(!['w', 'b'].contains(&#c))] c: char,
        r: Role,
    ) {
        assert_eq!(
            [c.to_string(), r.to_string()].concat().parse::<Piece>(),
            Err(ParsePieceError::InvalidColor(ParseColorError))
        );
    }

    #[proptest]
    fn parsing_piece_fails_if_role_invalid(
        c: Color,
        #[filter(!['p', 'n', 'b', 'r', 'q', 'k'].contains(&#r))] r: char,
    ) {
        assert_eq!(
            [c.to_string(), r.to_string()].concat().parse::<Piece>(),
            Err(ParsePieceError::InvalidRole(ParseRoleError))
        );
    }

    #[proptest]
    fn parsing_piece_fails_if_length_not_two(#[filter(#s.len() != 2)] s: String) {
        assert_eq!(s.parse::<Piece>().ok(), None);
    }
}
