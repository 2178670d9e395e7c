use std::{error::Error, fmt, str::FromStr};

use crate::{piece::Piece, point::Point};

/// A move of a piece from one point to another.
///
/// # Display
///
/// `Move` implements [`fmt::Display`] using the four digit move code
/// `x1y1x2y2` spoken by the backend, for example `7747` for the red cannon
/// moving to the central file. For the notation of external engines see
/// [ICCS](crate::iccs).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub from: Point,
    pub to: Point,
}

impl Move {
    pub const fn new(from: Point, to: Point) -> Move {
        Move { from, to }
    }

    /// Parses a move code such as `b"7747"`.
    ///
    /// # Errors
    ///
    /// Errors if the input is not exactly four digits or names a point off
    /// the board.
    pub fn from_ascii(s: &[u8]) -> Result<Move, ParseMoveError> {
        if s.len() != 4 {
            return Err(ParseMoveError);
        }
        Ok(Move {
            from: Point::from_ascii(&s[0..2]).map_err(|_| ParseMoveError)?,
            to: Point::from_ascii(&s[2..4]).map_err(|_| ParseMoveError)?,
        })
    }

    /// Mirrors the move at the central file.
    pub const fn flip_horizontal(self) -> Move {
        Move {
            from: self.from.flip_horizontal(),
            to: self.to.flip_horizontal(),
        }
    }

    /// Checks if origin and destination coincide.
    pub fn is_null(self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Error when parsing an invalid move code.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseMoveError;

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid move code")
    }
}

impl Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Move, ParseMoveError> {
        Move::from_ascii(s.as_bytes())
    }
}

/// Event record of a committed move, emitted once per move.
///
/// `moved_piece` is the piece as it stood before the move. With the `serde`
/// feature this serializes as
/// `{"movedPiece": Piece, "toX": 4, "toY": 7, "capturedPiece": Piece | null}`.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawMovedPayload", into = "RawMovedPayload")
)]
pub struct MovedPayload {
    pub moved_piece: Piece,
    pub to: Point,
    pub captured_piece: Option<Piece>,
}

impl MovedPayload {
    /// The move in move code form, if the moved piece had a position.
    pub fn to_move(&self) -> Option<Move> {
        self.moved_piece.position().map(|from| Move::new(from, self.to))
    }

    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMovedPayload {
    moved_piece: Piece,
    to_x: i32,
    to_y: i32,
    captured_piece: Option<Piece>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMovedPayload> for MovedPayload {
    type Error = crate::point::ParsePointError;

    fn try_from(raw: RawMovedPayload) -> Result<MovedPayload, Self::Error> {
        Ok(MovedPayload {
            to: Point::new(raw.to_x, raw.to_y).ok_or(crate::point::ParsePointError)?,
            moved_piece: raw.moved_piece,
            captured_piece: raw.captured_piece,
        })
    }
}

#[cfg(feature = "serde")]
impl From<MovedPayload> for RawMovedPayload {
    fn from(payload: MovedPayload) -> RawMovedPayload {
        RawMovedPayload {
            moved_piece: payload.moved_piece,
            to_x: i32::from(payload.to.x()),
            to_y: i32::from(payload.to.y()),
            captured_piece: payload.captured_piece,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Role, Side};

    #[test]
    fn test_move_code() {
        let m: Move = "7747".parse().unwrap();
        assert_eq!(m.from, Point::new(7, 7).unwrap());
        assert_eq!(m.to, Point::new(4, 7).unwrap());
        assert_eq!(m.to_string(), "7747");
        assert_eq!(m.flip_horizontal().to_string(), "1747");

        assert_eq!("774".parse::<Move>(), Err(ParseMoveError));
        assert_eq!("9747".parse::<Move>(), Err(ParseMoveError));
        assert_eq!("77-47".parse::<Move>(), Err(ParseMoveError));
    }

    #[test]
    fn test_payload_move() {
        let cannon = Piece::of_role("red-cannon-2", Role::Cannon, Side::Red, Point::new(7, 7));
        let payload = MovedPayload {
            moved_piece: cannon,
            to: Point::new(4, 7).unwrap(),
            captured_piece: None,
        };
        assert_eq!(payload.to_move().map(|m| m.to_string()).as_deref(), Some("7747"));
        assert!(!payload.is_capture());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_payload_wire_shape() {
        let cannon = Piece::of_role("red-cannon-2", Role::Cannon, Side::Red, Point::new(7, 7));
        let payload = MovedPayload {
            moved_piece: cannon,
            to: Point::new(4, 7).unwrap(),
            captured_piece: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["toX"], 4);
        assert_eq!(json["toY"], 7);
        assert!(json["capturedPiece"].is_null());
        assert_eq!(json["movedPiece"]["id"], "red-cannon-2");
        assert_eq!(serde_json::from_value::<MovedPayload>(json).unwrap(), payload);
    }
}
