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

use std::{error::Error, fmt, fmt::Write as _};

use arrayvec::ArrayVec;

use crate::{
    m::MovedPayload,
    packed::{PackedBoard, PIECES},
    piece::{Piece, PieceId},
    point::Point,
    role::Role,
    side::{BySide, Side},
};

/// The set of piece instances of a game, at most 32.
///
/// Pieces keep their identity for the whole game. Captured pieces stay in
/// the set, inactive and without a position.
///
/// # Examples
///
/// ```
/// use xiangqi::{Board, Point, Side};
///
/// let board = Board::initial();
/// let king = board.piece_at(Point::new(4, 9).unwrap()).expect("red king");
/// assert_eq!(king.side(), Side::Red);
/// assert_eq!(king.id().as_str(), "red-king-1");
/// ```
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Board {
    pieces: ArrayVec<Piece, PIECES>,
}

impl Board {
    pub fn empty() -> Board {
        Board::default()
    }

    /// The starting position with all 32 pieces.
    pub fn initial() -> Board {
        Board::from_packed(&PackedBoard::initial())
    }

    /// Creates the 32 pieces of a packed board. Original coordinates are
    /// those of the starting position, so that a reset starts a new game.
    pub fn from_packed(packed: &PackedBoard) -> Board {
        let initial = PackedBoard::initial();
        let mut ids = Ids::default();
        let mut board = Board::empty();
        for index in 0..PIECES {
            let side = PackedBoard::side_of(index);
            let role = PackedBoard::role_of(index);
            let mut piece = Piece::of_role(ids.next(role, side), role, side, initial.get(index));
            match packed.get(index) {
                Some(p) => piece.place(p),
                None => piece.capture(),
            }
            board.pieces.push(piece);
        }
        board
    }

    /// Adds a piece.
    ///
    /// # Errors
    ///
    /// Errors if the board already holds 32 pieces, if the id is taken, or
    /// if an active piece already stands on the point of the new piece.
    pub fn push(&mut self, piece: Piece) -> Result<(), BoardError> {
        if self.by_id(piece.id().as_str()).is_some() {
            return Err(BoardError::DuplicateId { id: piece.id().clone() });
        }
        if let Some(at) = piece.position().filter(|_| piece.is_active_on_board()) {
            if self.piece_at(at).is_some() {
                return Err(BoardError::Occupied { at });
            }
        }
        self.pieces.try_push(piece).map_err(|_| BoardError::Full)
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id().as_str() == id)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.pieces.iter().position(|p| p.id().as_str() == id)
    }

    /// Gets the active piece standing on the point.
    pub fn piece_at(&self, at: Point) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.is_active_on_board() && p.position() == Some(at))
    }

    /// Active pieces of one side.
    pub fn by_side(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.pieces
            .iter()
            .filter(move |p| p.side() == side && p.is_on_board())
    }

    /// Moves a piece without checking any rule, capturing whatever active
    /// piece stands on the destination. Returns `None` if there is no piece
    /// with that id.
    pub fn move_unchecked(&mut self, id: &str, to: Point) -> Option<MovedPayload> {
        let moving = self.index_of(id)?;
        let moved_piece = self.pieces[moving].clone();
        let captured = self
            .pieces
            .iter()
            .position(|p| p.id() != moved_piece.id() && p.is_active_on_board() && p.position() == Some(to));
        let captured_piece = captured.map(|i| {
            let before = self.pieces[i].clone();
            self.pieces[i].capture();
            before
        });
        self.pieces[moving].place(to);
        Some(MovedPayload {
            moved_piece,
            to,
            captured_piece,
        })
    }

    /// Puts every piece back on its original coordinates.
    pub fn reset(&mut self) {
        for piece in &mut self.pieces {
            piece.reset();
        }
    }

    /// Packs the board into the backend code.
    ///
    /// Pieces are assigned to the canonical slots of their side and role in
    /// the order they were added.
    ///
    /// # Errors
    ///
    /// Errors if a piece has an unknown label or a side has more pieces of
    /// a role than the starting position.
    pub fn to_packed(&self) -> Result<PackedBoard, BoardError> {
        let mut packed = PackedBoard::empty();
        let mut taken = [false; PIECES];
        for piece in &self.pieces {
            let role = piece
                .role()
                .ok_or_else(|| BoardError::UnknownRole { id: piece.id().clone() })?;
            let slot = (0..PIECES)
                .find(|&i| {
                    !taken[i] && PackedBoard::side_of(i) == piece.side() && PackedBoard::role_of(i) == role
                })
                .ok_or_else(|| BoardError::Unpackable { id: piece.id().clone() })?;
            taken[slot] = true;
            packed.set(slot, piece.position().filter(|_| piece.is_active_on_board()));
        }
        Ok(packed)
    }

    /// Renders the board part of a FEN, such as
    /// `rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR`.
    /// Pieces with an unknown label are left out.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for y in 0..Point::RANKS {
            let mut empty: u8 = 0;

            for x in 0..Point::FILES {
                let piece = Point::from_coords(x, y).and_then(|p| self.piece_at(p));
                match piece.and_then(|p| p.role().map(|role| role.char_of(p.side()))) {
                    Some(ch) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(ch);
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }

            if y + 1 < Point::RANKS {
                fen.push('/');
            }
        }

        fen
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..Point::RANKS {
            for x in 0..Point::FILES {
                let ch = Point::from_coords(x, y)
                    .and_then(|p| self.piece_at(p))
                    .map_or('.', |p| p.role().map_or('?', |role| role.char_of(p.side())));
                f.write_char(ch)?;
                f.write_char(if x + 1 < Point::FILES { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

/// Generates ids of the form `<side>-<role>-<n>`, counting from 1 per side
/// and role.
#[derive(Default)]
pub(crate) struct Ids {
    counts: BySide<[u8; 8]>,
}

impl Ids {
    pub(crate) fn next(&mut self, role: Role, side: Side) -> PieceId {
        let count = &mut self.counts.get_mut(side)[usize::from(role)];
        *count += 1;
        PieceId::new(format!("{}-{}-{}", side, role.name(), count))
    }
}

/// Error when adding pieces to a board or packing it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BoardError {
    /// Board already holds 32 pieces.
    Full,
    /// Another piece has the same id.
    DuplicateId { id: PieceId },
    /// Another active piece stands on the point.
    Occupied { at: Point },
    /// Label does not name a role.
    UnknownRole { id: PieceId },
    /// More pieces of a role than the packed code has slots for.
    Unpackable { id: PieceId },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Full => write!(f, "board already holds {PIECES} pieces"),
            BoardError::DuplicateId { id } => write!(f, "duplicate piece id {id}"),
            BoardError::Occupied { at } => write!(f, "point {at} is occupied"),
            BoardError::UnknownRole { id } => write!(f, "piece {id} has an unknown label"),
            BoardError::Unpackable { id } => write!(f, "no packed slot left for piece {id}"),
        }
    }
}

impl Error for BoardError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: i32, y: i32) -> Point {
        Point::new(x, y).unwrap()
    }

    #[test]
    fn test_initial() {
        let board = Board::initial();
        assert_eq!(board.len(), 32);
        assert_eq!(board.by_side(Side::Red).count(), 16);
        assert_eq!(
            board.board_fen(),
            "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR"
        );
        assert_eq!(board.by_id("black-pawn-5").and_then(Piece::position), Some(point(8, 3)));
        assert_eq!(board.by_id("red-cannon-2").and_then(Piece::position), Some(point(7, 7)));
    }

    #[test]
    fn test_from_backend_code() {
        let packed = "0010203040506070801272062646668609192939495969798917770323436383"
            .parse()
            .unwrap();
        let board = Board::from_packed(&packed);
        assert_eq!(board, Board::initial());
        assert_eq!(
            board.board_fen(),
            "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR"
        );
        assert_eq!(board.by_id("red-pawn-1").and_then(Piece::position), Some(point(0, 6)));
        assert_eq!(board.to_packed(), Ok(packed));
    }

    #[test]
    fn test_move_unchecked_captures() {
        let mut board = Board::initial();
        let payload = board.move_unchecked("red-cannon-2", point(7, 0)).unwrap();
        assert_eq!(payload.moved_piece.position(), Some(point(7, 7)));
        let captured = payload.captured_piece.expect("knight captured");
        assert_eq!(captured.id().as_str(), "black-knight-2");
        assert!(captured.is_active_on_board());

        let knight = board.by_id("black-knight-2").unwrap();
        assert!(!knight.is_active_on_board());
        assert_eq!(knight.position(), None);
        assert_eq!(board.piece_at(point(7, 0)).map(|p| p.id().as_str()), Some("red-cannon-2"));
        assert!(board.move_unchecked("nobody", point(0, 0)).is_none());
    }

    #[test]
    fn test_packed_round_trip() {
        let mut board = Board::initial();
        board.move_unchecked("red-cannon-2", point(7, 0));
        let packed = board.to_packed().unwrap();
        assert_eq!(packed.get(7), None);
        assert_eq!(packed.get(26), Some(point(7, 0)));
        assert_eq!(Board::from_packed(&packed), board);
    }

    #[test]
    fn test_reset() {
        let mut board = Board::initial();
        board.move_unchecked("red-cannon-2", point(7, 0));
        board.reset();
        assert_eq!(board, Board::initial());
    }

    #[test]
    fn test_push() {
        let mut board = Board::empty();
        board
            .push(Piece::of_role("k", Role::King, Side::Red, Some(point(4, 9))))
            .unwrap();
        assert_eq!(
            board.push(Piece::of_role("k", Role::King, Side::Black, Some(point(4, 0)))),
            Err(BoardError::DuplicateId { id: PieceId::new("k") })
        );
        assert_eq!(
            board.push(Piece::of_role("a", Role::Advisor, Side::Red, Some(point(4, 9)))),
            Err(BoardError::Occupied { at: point(4, 9) })
        );
        board
            .push(Piece::new("spare", "?", Side::Black, None))
            .unwrap();
        assert_eq!(
            board.to_packed(),
            Err(BoardError::UnknownRole { id: PieceId::new("spare") })
        );

        let mut full = Board::initial();
        assert_eq!(
            full.push(Piece::of_role("extra", Role::Pawn, Side::Red, None)),
            Err(BoardError::Full)
        );
    }

    #[test]
    fn test_unpackable() {
        let mut board = Board::empty();
        board.push(Piece::of_role("k1", Role::King, Side::Red, Some(point(4, 9)))).unwrap();
        board.push(Piece::of_role("k2", Role::King, Side::Red, Some(point(3, 9)))).unwrap();
        assert_eq!(
            board.to_packed(),
            Err(BoardError::Unpackable { id: PieceId::new("k2") })
        );
    }
}
