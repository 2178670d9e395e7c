// This file is part of the xiangqi library.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Parse and write xiangqi Forsyth-Edwards-Notation.
//!
//! Xiangqi FEN lists the ten ranks from black's side, uses `w` for red to
//! move and keeps the castling and en passant fields of chess FEN, which
//! are always `-`.
//!
//! # Examples
//!
//! ```
//! use xiangqi::{fen::Fen, packed::PackedBoard, Side};
//!
//! let fen = Fen::from_packed(&PackedBoard::initial(), Side::Red);
//! assert_eq!(
//!     fen.to_string(),
//!     "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1"
//! );
//!
//! let parsed: Fen = fen.to_string().parse().expect("valid fen");
//! assert_eq!(parsed.to_packed(), Ok(PackedBoard::initial()));
//! ```

use std::{error::Error, fmt, num::NonZeroU32, str::FromStr};

use crate::{
    board::{Board, BoardError, Ids},
    packed::PackedBoard,
    piece::Piece,
    point::Point,
    role::Role,
    side::Side,
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
    /// Unexpected fields after the move counters.
    InvalidFen,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove part in fen",
            ParseFenError::InvalidFen => "invalid fen",
        })
    }
}

impl Error for ParseFenError {}

/// A parsed FEN.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Fen {
    pub board: Board,
    pub turn: Side,
    pub halfmoves: u32,
    pub fullmoves: NonZeroU32,
}

impl Default for Fen {
    fn default() -> Fen {
        Fen {
            board: Board::initial(),
            turn: Side::Red,
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
        }
    }
}

impl Fen {
    pub fn empty() -> Fen {
        Fen {
            board: Board::empty(),
            ..Fen::default()
        }
    }

    pub fn from_board(board: Board, turn: Side) -> Fen {
        Fen {
            board,
            turn,
            ..Fen::default()
        }
    }

    pub fn from_packed(packed: &PackedBoard, turn: Side) -> Fen {
        Fen::from_board(Board::from_packed(packed), turn)
    }

    pub fn to_packed(&self) -> Result<PackedBoard, BoardError> {
        self.board.to_packed()
    }

    /// Parses a FEN. Only the board part is required, the remaining fields
    /// default to red to move and move counters `0 1`.
    ///
    /// # Errors
    ///
    /// Errors if any present field is invalid.
    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let mut parts = fen.split(|ch| *ch == b' ').filter(|part| !part.is_empty());

        let board_part = parts.next().ok_or(ParseFenError::InvalidBoard)?;
        let board = board_from_fen(board_part)?;

        let turn = match parts.next() {
            Some([ch]) => Side::from_char(char::from(*ch)).ok_or(ParseFenError::InvalidTurn)?,
            Some(_) => return Err(ParseFenError::InvalidTurn),
            None => Side::Red,
        };

        match parts.next() {
            Some(b"-") | None => (),
            Some(_) => return Err(ParseFenError::InvalidCastling),
        }

        match parts.next() {
            Some(b"-") | None => (),
            Some(_) => return Err(ParseFenError::InvalidEpSquare),
        }

        let halfmoves = match parts.next() {
            Some(part) => btoi::btou(part).map_err(|_| ParseFenError::InvalidHalfmoveClock)?,
            None => 0,
        };

        let fullmoves = match parts.next() {
            Some(part) => btoi::btou(part)
                .ok()
                .and_then(NonZeroU32::new)
                .ok_or(ParseFenError::InvalidFullmoves)?,
            None => NonZeroU32::MIN,
        };

        if parts.next().is_some() {
            return Err(ParseFenError::InvalidFen);
        }

        Ok(Fen {
            board,
            turn,
            halfmoves,
            fullmoves,
        })
    }
}

fn board_from_fen(board_fen: &[u8]) -> Result<Board, ParseFenError> {
    let mut board = Board::empty();
    let mut ids = Ids::default();
    let mut ranks = 0;

    for (y, rank) in board_fen.split(|ch| *ch == b'/').enumerate() {
        if y >= usize::from(Point::RANKS) {
            return Err(ParseFenError::InvalidBoard);
        }
        ranks += 1;
        let y = y as u8;
        let mut x: u8 = 0;

        for &ch in rank {
            if let Some(empty) = char::from(ch).to_digit(10).filter(|n| (1..=9).contains(n)) {
                x += empty as u8;
            } else {
                let role = Role::from_char(char::from(ch)).ok_or(ParseFenError::InvalidBoard)?;
                let side = Side::from_red(ch.is_ascii_uppercase());
                let at = Point::from_coords(x, y).ok_or(ParseFenError::InvalidBoard)?;
                board
                    .push(Piece::of_role(ids.next(role, side), role, side, Some(at)))
                    .map_err(|_| ParseFenError::InvalidBoard)?;
                x += 1;
            }
            if x > Point::FILES {
                return Err(ParseFenError::InvalidBoard);
            }
        }

        if x != Point::FILES {
            return Err(ParseFenError::InvalidBoard);
        }
    }

    if ranks != Point::RANKS {
        return Err(ParseFenError::InvalidBoard);
    }

    Ok(board)
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - - {} {}",
            self.board.board_fen(),
            self.turn.char(),
            self.halfmoves,
            self.fullmoves
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_only() {
        let fen: Fen = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR"
            .parse()
            .unwrap();
        assert_eq!(fen.turn, Side::Red);
        assert_eq!(fen.board.len(), 32);
        assert_eq!(fen.to_packed(), Ok(PackedBoard::initial()));
        assert_eq!(fen.to_string(), Fen::default().to_string());
    }

    #[test]
    fn test_black_to_move() {
        let fen: Fen = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RNBAKABNR b - - 1 1"
            .parse()
            .unwrap();
        assert_eq!(fen.turn, Side::Black);
        assert_eq!(fen.halfmoves, 1);
        let cannon = fen.board.piece_at(Point::new(4, 7).unwrap()).unwrap();
        assert_eq!(cannon.role(), Some(Role::Cannon));
        assert_eq!(cannon.side(), Side::Red);
        assert_eq!(
            fen.to_string(),
            "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RNBAKABNR b - - 1 1"
        );
    }

    #[test]
    fn test_invalid() {
        let cases = [
            ("", ParseFenError::InvalidBoard),
            ("9/9/9/9/9/9/9/9/9", ParseFenError::InvalidBoard),
            ("9/9/9/9/9/9/9/9/9/8", ParseFenError::InvalidBoard),
            ("9/9/9/9/9/9/9/9/9/46", ParseFenError::InvalidBoard),
            ("9/9/9/9/9/9/9/9/9/9/9", ParseFenError::InvalidBoard),
            ("9/9/9/9/9/9/9/9/9/q8", ParseFenError::InvalidBoard),
            ("9/9/9/9/9/9/9/9/9/9 x", ParseFenError::InvalidTurn),
            ("9/9/9/9/9/9/9/9/9/9 w KQ", ParseFenError::InvalidCastling),
            ("9/9/9/9/9/9/9/9/9/9 w - e3", ParseFenError::InvalidEpSquare),
            ("9/9/9/9/9/9/9/9/9/9 w - - x", ParseFenError::InvalidHalfmoveClock),
            ("9/9/9/9/9/9/9/9/9/9 w - - 0 0", ParseFenError::InvalidFullmoves),
            ("9/9/9/9/9/9/9/9/9/9 w - - 0 1 x", ParseFenError::InvalidFen),
        ];
        for (fen, err) in cases {
            assert_eq!(fen.parse::<Fen>(), Err(err), "{fen}");
        }
    }

    #[test]
    fn test_empty_board() {
        let fen: Fen = "9/9/9/9/9/9/9/9/9/9 w - - 0 1".parse().unwrap();
        assert!(fen.board.is_empty());
        assert_eq!(fen, Fen::empty());
    }
}
