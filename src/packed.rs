//! The packed board code shared by the board UI and its backend.
//!
//! A board is 64 digits: two per piece, in the canonical order of
//! [`Role::ARMY`] twice. Each pair is the `xy` code of the piece's point,
//! `99` for a captured piece.
//!
//! The first half holds black's back rank and cannons followed by red's
//! pawns, the second half red's back rank and cannons followed by black's
//! pawns. The backend builds its starting position this way, so slots 11 to
//! 15 are the red pawns on row 6 and slots 27 to 31 the black pawns on row 3.
//!
//! # Examples
//!
//! ```
//! use xiangqi::{packed::PackedBoard, Move};
//!
//! let mut board = PackedBoard::initial();
//! board.apply("7747".parse::<Move>().expect("move code"))?;
//! assert!(board.to_string().contains("47"));
//! # Ok::<_, xiangqi::packed::ApplyMoveError>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{m::Move, point::Point, role::Role, side::Side};

/// Number of pieces in the code.
pub const PIECES: usize = 32;

const CAPTURED: &[u8; 2] = b"99";

/// Board as the fixed list of 32 piece positions.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PackedBoard([Option<Point>; PIECES]);

impl PackedBoard {
    /// Number of digits in the code.
    pub const DIGITS: usize = 2 * PIECES;

    /// A board with every piece captured.
    pub const fn empty() -> PackedBoard {
        PackedBoard([None; PIECES])
    }

    /// The starting position.
    pub fn initial() -> PackedBoard {
        let mut packed = PackedBoard::empty();
        for (index, slot) in packed.0.iter_mut().enumerate() {
            *slot = initial_point(index);
        }
        packed
    }

    /// Parses the 64 digit code.
    ///
    /// # Errors
    ///
    /// Errors if the code does not have exactly 64 digits, if a pair other
    /// than `99` is off the board, or if two pieces share a point.
    pub fn from_ascii(s: &[u8]) -> Result<PackedBoard, ParsePackedBoardError> {
        if s.len() != PackedBoard::DIGITS {
            return Err(ParsePackedBoardError::Length { len: s.len() });
        }
        let mut packed = PackedBoard::empty();
        for (index, pair) in s.chunks_exact(2).enumerate() {
            if pair == CAPTURED {
                continue;
            }
            let point = Point::from_ascii(pair).map_err(|_| ParsePackedBoardError::InvalidPoint { index })?;
            if packed.index_at(point).is_some() {
                return Err(ParsePackedBoardError::Overlap { index });
            }
            packed.0[index] = Some(point);
        }
        Ok(packed)
    }

    /// Side of the piece with the given index in the canonical order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 32`.
    pub fn side_of(index: usize) -> Side {
        assert!(index < PIECES);
        let second_half = index >= PIECES / 2;
        let pawn = Role::ARMY[index % (PIECES / 2)] == Role::Pawn;
        Side::from_red(second_half != pawn)
    }

    /// Role of the piece with the given index in the canonical order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 32`.
    pub fn role_of(index: usize) -> Role {
        assert!(index < PIECES);
        Role::ARMY[index % (PIECES / 2)]
    }

    /// Position of the piece with the given index, `None` if captured.
    pub fn get(&self, index: usize) -> Option<Point> {
        self.0.get(index).copied().flatten()
    }

    /// Sets the position of the piece with the given index, `None` to
    /// capture it.
    ///
    /// Unlike [`PackedBoard::from_ascii`], this does not check whether
    /// another piece already stands on the point.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 32`.
    pub fn set(&mut self, index: usize, point: Option<Point>) {
        self.0[index] = point;
    }

    /// Index of the piece standing on the point.
    pub fn index_at(&self, point: Point) -> Option<usize> {
        self.0.iter().position(|p| *p == Some(point))
    }

    /// Iterates over the pieces still on the board.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Point)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, p)| p.map(|p| (index, p)))
    }

    /// Plays a move. A piece standing on the destination is captured,
    /// whichever side it belongs to.
    ///
    /// # Errors
    ///
    /// Errors if there is no piece on the origin. The board is unchanged
    /// in that case.
    pub fn apply(&mut self, m: Move) -> Result<Option<usize>, ApplyMoveError> {
        let moving = self.index_at(m.from).ok_or(ApplyMoveError { m })?;
        if m.is_null() {
            return Ok(None);
        }
        let captured = self.index_at(m.to);
        if let Some(captured) = captured {
            self.0[captured] = None;
        }
        self.0[moving] = Some(m.to);
        Ok(captured)
    }

    /// Mirrors every piece at the central file.
    pub fn flip_horizontal(&self) -> PackedBoard {
        PackedBoard(self.0.map(|p| p.map(Point::flip_horizontal)))
    }
}

fn initial_point(index: usize) -> Option<Point> {
    let side = PackedBoard::side_of(index);
    let back_rank = side.back_rank();
    let toward_river = |steps: u8| match side {
        Side::Red => back_rank - steps,
        Side::Black => back_rank + steps,
    };
    let (x, y) = match index % (PIECES / 2) {
        file @ 0..=8 => (file as u8, back_rank),
        9 => (1, toward_river(2)),
        10 => (7, toward_river(2)),
        pawn => (2 * (pawn as u8 - 11), toward_river(3)),
    };
    Point::from_coords(x, y)
}

impl Default for PackedBoard {
    fn default() -> PackedBoard {
        PackedBoard::initial()
    }
}

impl fmt::Display for PackedBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.0 {
            match p {
                Some(p) => write!(f, "{p}")?,
                None => f.write_str("99")?,
            }
        }
        Ok(())
    }
}

impl FromStr for PackedBoard {
    type Err = ParsePackedBoardError;

    fn from_str(s: &str) -> Result<PackedBoard, ParsePackedBoardError> {
        PackedBoard::from_ascii(s.as_bytes())
    }
}

/// Error when parsing an invalid packed board code.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParsePackedBoardError {
    /// Code does not have 64 digits.
    Length { len: usize },
    /// Pair is neither a point nor `99`.
    InvalidPoint { index: usize },
    /// Piece shares its point with an earlier piece.
    Overlap { index: usize },
}

impl fmt::Display for ParsePackedBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsePackedBoardError::Length { len } => {
                write!(f, "expected {} digits, got {len}", PackedBoard::DIGITS)
            }
            ParsePackedBoardError::InvalidPoint { index } => write!(f, "invalid point for piece {index}"),
            ParsePackedBoardError::Overlap { index } => write!(f, "piece {index} shares its point"),
        }
    }
}

impl Error for ParsePackedBoardError {}

/// Error when applying a move without a piece on its origin.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApplyMoveError {
    pub m: Move,
}

impl fmt::Display for ApplyMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no piece on {} for move {}", self.m.from, self.m)
    }
}

impl Error for ApplyMoveError {}

#[cfg(feature = "serde")]
impl serde::Serialize for PackedBoard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PackedBoard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PackedBoardVisitor;

        impl serde::de::Visitor<'_> for PackedBoardVisitor {
            type Value = PackedBoard;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("64 digit board code")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(PackedBoardVisitor)
    }
}
