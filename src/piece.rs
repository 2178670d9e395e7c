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

use std::{borrow::Borrow, error::Error, fmt};

use crate::{point::Point, role::Role, side::Side};

/// Unique identifier of a piece instance, for example `"red-cannon-1"`.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PieceId(String);

impl PieceId {
    pub fn new<S: Into<String>>(id: S) -> PieceId {
        PieceId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PieceId {
    fn from(id: &str) -> PieceId {
        PieceId::new(id)
    }
}

impl From<String> for PieceId {
    fn from(id: String) -> PieceId {
        PieceId(id)
    }
}

impl Borrow<str> for PieceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One piece instance of a game.
///
/// A piece belongs to a [`Side`] for its whole life: the side is fixed at
/// construction and there is no way to change it. A piece may be off the
/// board, either because it was captured or because it is waiting to be
/// placed, in which case [`Piece::position()`] is `None`.
///
/// # Wire format
///
/// With the `serde` feature, a piece (de)serializes to the shape the board
/// UI uses:
///
/// ```text
/// {"id": "red-king-1", "text": "帥", "type": "red", "isActiveOnBoard": true,
///  "originalX": 4, "originalY": 9, "x": 4, "y": 9}
/// ```
///
/// Coordinate pairs are omitted when absent. `null` is accepted in their
/// place, a pair with only one half present is not.
///
/// # Examples
///
/// ```
/// use xiangqi::{Piece, Point, Side};
///
/// let mut cannon = Piece::new("red-cannon-1", "炮", Side::Red, Point::new(1, 7));
/// assert!(cannon.is_active_on_board());
///
/// cannon.capture();
/// assert!(!cannon.is_active_on_board());
/// assert_eq!(cannon.position(), None);
/// assert_eq!(cannon.side(), Side::Red);
///
/// cannon.reset();
/// assert_eq!(cannon.position(), Point::new(1, 7));
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawPiece", into = "RawPiece")
)]
pub struct Piece {
    id: PieceId,
    text: String,
    side: Side,
    active: bool,
    original: Option<Point>,
    position: Option<Point>,
}

impl Piece {
    /// Creates a piece. Its original coordinates are the given position, and
    /// it is active on the board iff it has a position.
    pub fn new<I, T>(id: I, text: T, side: Side, position: Option<Point>) -> Piece
    where
        I: Into<PieceId>,
        T: Into<String>,
    {
        Piece {
            id: id.into(),
            text: text.into(),
            side,
            active: position.is_some(),
            original: position,
            position,
        }
    }

    /// Creates a piece of the given role labelled with its traditional
    /// character.
    pub fn of_role<I: Into<PieceId>>(id: I, role: Role, side: Side, position: Option<Point>) -> Piece {
        Piece::new(id, role.label(side), side, position)
    }

    pub fn id(&self) -> &PieceId {
        &self.id
    }

    /// Display label.
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Role derived from the display label, if it is a known label.
    pub fn role(&self) -> Option<Role> {
        Role::from_label(&self.text)
    }

    #[inline]
    pub fn is_active_on_board(&self) -> bool {
        self.active
    }

    /// Original coordinates, used to reset the game.
    #[inline]
    pub fn original(&self) -> Option<Point> {
        self.original
    }

    /// Current coordinates, `None` while off the board.
    #[inline]
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Checks if the piece is live and has a position on the board.
    #[inline]
    pub fn is_on_board(&self) -> bool {
        self.active && self.position.is_some()
    }

    /// Puts the piece on the given point and marks it active.
    pub fn place(&mut self, to: Point) {
        self.position = Some(to);
        self.active = true;
    }

    /// Takes the piece off the board after it was captured.
    pub fn capture(&mut self) {
        self.active = false;
        self.position = None;
    }

    /// Returns the piece to its original coordinates. A piece without
    /// original coordinates stays off the board.
    pub fn reset(&mut self) {
        self.position = self.original;
        self.active = self.original.is_some();
    }
}

/// Error when a piece on the wire has invalid coordinates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InvalidPieceError {
    /// A coordinate pair lies off the board.
    OffBoard { field: &'static str },
    /// Only one half of a coordinate pair is present.
    HalfCoordinate { field: &'static str },
}

impl fmt::Display for InvalidPieceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPieceError::OffBoard { field } => write!(f, "{field} coordinates are off the board"),
            InvalidPieceError::HalfCoordinate { field } => {
                write!(f, "{field} coordinates must have both x and y")
            }
        }
    }
}

impl Error for InvalidPieceError {}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPiece {
    id: PieceId,
    text: String,
    #[serde(rename = "type")]
    side: Side,
    is_active_on_board: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<i32>,
}

#[cfg(feature = "serde")]
fn point_pair(
    field: &'static str,
    x: Option<i32>,
    y: Option<i32>,
) -> Result<Option<Point>, InvalidPieceError> {
    match (x, y) {
        (Some(x), Some(y)) => Point::new(x, y)
            .map(Some)
            .ok_or(InvalidPieceError::OffBoard { field }),
        (None, None) => Ok(None),
        _ => Err(InvalidPieceError::HalfCoordinate { field }),
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawPiece> for Piece {
    type Error = InvalidPieceError;

    fn try_from(raw: RawPiece) -> Result<Piece, InvalidPieceError> {
        Ok(Piece {
            original: point_pair("original", raw.original_x, raw.original_y)?,
            position: point_pair("current", raw.x, raw.y)?,
            id: raw.id,
            text: raw.text,
            side: raw.side,
            active: raw.is_active_on_board,
        })
    }
}

#[cfg(feature = "serde")]
impl From<Piece> for RawPiece {
    fn from(piece: Piece) -> RawPiece {
        let x = |p: Option<Point>| p.map(|p| i32::from(p.x()));
        let y = |p: Option<Point>| p.map(|p| i32::from(p.y()));
        RawPiece {
            id: piece.id,
            text: piece.text,
            side: piece.side,
            is_active_on_board: piece.active,
            original_x: x(piece.original),
            original_y: y(piece.original),
            x: x(piece.position),
            y: y(piece.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horse() -> Piece {
        Piece::of_role("black-knight-1", Role::Knight, Side::Black, Point::new(1, 0))
    }

    #[test]
    fn test_side_survives_lifecycle() {
        let mut piece = horse();
        piece.place(Point::new(2, 2).unwrap());
        assert_eq!(piece.side(), Side::Black);
        piece.capture();
        assert_eq!(piece.side(), Side::Black);
        piece.reset();
        assert_eq!(piece.side(), Side::Black);
        assert_eq!(piece.position(), Point::new(1, 0));
        assert!(piece.is_on_board());
    }

    #[test]
    fn test_pending_placement() {
        let mut piece = Piece::new("spare", "兵", Side::Red, None);
        assert!(!piece.is_active_on_board());
        assert_eq!(piece.original(), None);
        piece.place(Point::new(0, 6).unwrap());
        assert!(piece.is_on_board());
        piece.reset();
        assert!(!piece.is_on_board());
    }

    #[test]
    fn test_role_from_text() {
        assert_eq!(horse().role(), Some(Role::Knight));
        assert_eq!(Piece::new("x", "?", Side::Red, None).role(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(horse()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "black-knight-1",
                "text": "馬",
                "type": "black",
                "isActiveOnBoard": true,
                "originalX": 1,
                "originalY": 0,
                "x": 1,
                "y": 0,
            })
        );

        let mut captured = horse();
        captured.capture();
        let json = serde_json::to_value(&captured).unwrap();
        assert!(json.get("x").is_none());
        assert_eq!(json["isActiveOnBoard"], false);
        assert_eq!(serde_json::from_value::<Piece>(json).unwrap(), captured);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_wire_rejects_invalid() {
        let null_position = r#"{"id":"a","text":"兵","type":"red","isActiveOnBoard":false,"x":null,"y":null}"#;
        assert_eq!(serde_json::from_str::<Piece>(null_position).unwrap().position(), None);

        let half = r#"{"id":"a","text":"兵","type":"red","isActiveOnBoard":true,"x":1}"#;
        assert!(serde_json::from_str::<Piece>(half).is_err());

        let off_board = r#"{"id":"a","text":"兵","type":"red","isActiveOnBoard":true,"x":9,"y":0}"#;
        assert!(serde_json::from_str::<Piece>(off_board).is_err());

        let bad_side = r#"{"id":"a","text":"兵","type":"blue","isActiveOnBoard":true}"#;
        assert!(serde_json::from_str::<Piece>(bad_side).is_err());
    }
}
