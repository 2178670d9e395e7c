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

//! The board component and the capabilities it exposes to its container.
//!
//! [`BoardView`] owns the board state and the current selection. Its host
//! only talks to it through [`ChessBoardExposed`] and the commit operation.
//! Move legality is decided by a [`Rules`] implementation and drawing is
//! delegated to a [`Redraw`] hook.
//!
//! # Examples
//!
//! ```
//! use xiangqi::{
//!     view::{BasicRules, BoardView, ChessBoardExposed, NoRedraw},
//!     Board, Point,
//! };
//!
//! let mut view = BoardView::new(Board::initial(), BasicRules, NoRedraw);
//! let cannon = view.board().by_id("red-cannon-2").expect("piece").clone();
//!
//! assert!(view.validate_move(&cannon, 4, 7));
//! assert!(!view.validate_move(&cannon, 4, 10));
//!
//! let payload = view.commit_move(cannon.id(), Point::new(4, 7).unwrap())?;
//! assert_eq!(payload.captured_piece, None);
//! # Ok::<_, xiangqi::view::IllegalMove>(())
//! ```

use std::{error::Error, fmt};

use bitflags::bitflags;

use crate::{
    board::{Board, BoardError},
    fen::Fen,
    m::MovedPayload,
    packed::PackedBoard,
    piece::{Piece, PieceId},
    point::Point,
    side::Side,
};

/// Capabilities a board component exposes to its container.
pub trait ChessBoardExposed {
    /// Clears any pending selection and redraws. Safe to call when nothing
    /// is selected.
    fn reset_selection_and_redraw(&mut self);

    /// Checks if moving the piece to the given coordinates would be legal
    /// on the current board, without committing the move. Coordinates off
    /// the board are never legal.
    fn validate_move(&self, piece_to_move: &Piece, to_x: i32, to_y: i32) -> bool;
}

bitflags! {
    /// Reasons for a move to be illegal.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct IllegalMoveKinds: u32 {
        /// Destination is off the board.
        const OUT_OF_BOUNDS = 1 << 0;
        /// The board has no piece with this id.
        const UNKNOWN_PIECE = 1 << 1;
        /// The piece was captured or waits for placement.
        const NOT_ON_BOARD = 1 << 2;
        /// Destination equals the origin.
        const NULL_MOVE = 1 << 3;
        /// Destination holds a piece of the same side.
        const OWN_PIECE = 1 << 4;
        /// Rejected by the movement rules of the piece.
        const MOVEMENT = 1 << 5;
        /// The piece does not belong to the side to move.
        const WRONG_TURN = 1 << 6;
    }
}

/// Error when committing an illegal move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IllegalMove {
    pub kinds: IllegalMoveKinds,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal move: ")?;
        let mut first = true;
        for (reason, kind) in [
            ("off the board", IllegalMoveKinds::OUT_OF_BOUNDS),
            ("unknown piece", IllegalMoveKinds::UNKNOWN_PIECE),
            ("piece not on the board", IllegalMoveKinds::NOT_ON_BOARD),
            ("null move", IllegalMoveKinds::NULL_MOVE),
            ("destination holds own piece", IllegalMoveKinds::OWN_PIECE),
            ("piece cannot move there", IllegalMoveKinds::MOVEMENT),
            ("not this side's turn", IllegalMoveKinds::WRONG_TURN),
        ] {
            if self.kinds.contains(kind) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(reason)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl Error for IllegalMove {}

/// Move legality.
///
/// Implementations may rely on `to` being on the board and on `piece`
/// being a live piece of `board`; everything they return is added to the
/// checks of [`BasicRules`].
pub trait Rules {
    fn check(&self, board: &Board, piece: &Piece, to: Point) -> IllegalMoveKinds;
}

/// Checks that need no knowledge of how pieces move: the destination is on
/// the board, the piece is live on this board, the move goes somewhere, and
/// it does not land on a piece of the same side.
#[derive(Copy, Clone, Debug, Default)]
pub struct BasicRules;

impl Rules for BasicRules {
    fn check(&self, _board: &Board, _piece: &Piece, _to: Point) -> IllegalMoveKinds {
        IllegalMoveKinds::empty()
    }
}

impl<F> Rules for F
where
    F: Fn(&Board, &Piece, Point) -> bool,
{
    fn check(&self, board: &Board, piece: &Piece, to: Point) -> IllegalMoveKinds {
        if self(board, piece, to) {
            IllegalMoveKinds::empty()
        } else {
            IllegalMoveKinds::MOVEMENT
        }
    }
}

/// Redraw hook of a board component.
pub trait Redraw {
    /// Draws the board with the given selection.
    fn redraw(&mut self, board: &Board, selected: Option<&PieceId>);
}

/// Redraw hook that draws nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoRedraw;

impl Redraw for NoRedraw {
    fn redraw(&mut self, _board: &Board, _selected: Option<&PieceId>) {}
}

/// Board state owner: board, selection, turn and history of committed
/// moves.
#[derive(Debug)]
pub struct BoardView<R, D> {
    board: Board,
    selected: Option<PieceId>,
    turn: Option<Side>,
    history: Vec<MovedPayload>,
    rules: R,
    redraw: D,
}

impl<R: Rules, D: Redraw> BoardView<R, D> {
    /// Creates a view on the board. Turns are not enforced until
    /// [`BoardView::enforce_turns()`] is called.
    pub fn new(board: Board, rules: R, redraw: D) -> BoardView<R, D> {
        BoardView {
            board,
            selected: None,
            turn: None,
            history: Vec::new(),
            rules,
            redraw,
        }
    }

    /// Only lets the given side move next, then alternates.
    pub fn enforce_turns(&mut self, first: Side) {
        self.turn = Some(first);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selected(&self) -> Option<&PieceId> {
        self.selected.as_ref()
    }

    /// Side to move, if turns are enforced.
    pub fn turn(&self) -> Option<Side> {
        self.turn
    }

    /// Committed moves, oldest first.
    pub fn history(&self) -> &[MovedPayload] {
        &self.history
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn redraw_hook(&self) -> &D {
        &self.redraw
    }

    /// Selects a live piece and redraws. Returns `false` and keeps the
    /// previous selection if there is no such piece on the board.
    pub fn select(&mut self, id: &PieceId) -> bool {
        match self.board.by_id(id.as_str()) {
            Some(piece) if piece.is_on_board() => {
                self.selected = Some(id.clone());
                self.redraw();
                true
            }
            _ => false,
        }
    }

    /// Collects every reason for the move to be illegal. Empty iff legal.
    pub fn check_move(&self, piece_to_move: &Piece, to_x: i32, to_y: i32) -> IllegalMoveKinds {
        let Some(to) = Point::new(to_x, to_y) else {
            return IllegalMoveKinds::OUT_OF_BOUNDS;
        };

        // Trust the board's copy of the piece, not the caller's.
        let Some(piece) = self.board.by_id(piece_to_move.id().as_str()) else {
            return IllegalMoveKinds::UNKNOWN_PIECE;
        };
        let Some(from) = piece.position().filter(|_| piece.is_active_on_board()) else {
            return IllegalMoveKinds::NOT_ON_BOARD;
        };

        let mut kinds = IllegalMoveKinds::empty();
        if from == to {
            kinds |= IllegalMoveKinds::NULL_MOVE;
        }
        if self.board.piece_at(to).is_some_and(|target| target.side() == piece.side()) {
            kinds |= IllegalMoveKinds::OWN_PIECE;
        }
        if self.turn.is_some_and(|turn| turn != piece.side()) {
            kinds |= IllegalMoveKinds::WRONG_TURN;
        }
        kinds | self.rules.check(&self.board, piece, to)
    }

    /// Commits a move: captures the piece on the destination, moves the
    /// piece, clears the selection, redraws and records the move.
    ///
    /// # Errors
    ///
    /// Errors if the move is illegal. Nothing changes in that case.
    pub fn commit_move(&mut self, id: &PieceId, to: Point) -> Result<MovedPayload, IllegalMove> {
        let piece = self
            .board
            .by_id(id.as_str())
            .ok_or(IllegalMove {
                kinds: IllegalMoveKinds::UNKNOWN_PIECE,
            })?
            .clone();

        let kinds = self.check_move(&piece, i32::from(to.x()), i32::from(to.y()));
        if !kinds.is_empty() {
            return Err(IllegalMove { kinds });
        }

        let payload = self
            .board
            .move_unchecked(id.as_str(), to)
            .ok_or(IllegalMove {
                kinds: IllegalMoveKinds::UNKNOWN_PIECE,
            })?;

        if let Some(turn) = self.turn {
            self.turn = Some(!turn);
        }
        self.history.push(payload.clone());
        self.selected = None;
        self.redraw();
        Ok(payload)
    }

    /// Puts every piece back on its original coordinates and forgets the
    /// history. An enforced turn goes back to the side that moved first.
    pub fn reset(&mut self) {
        self.board.reset();
        if self.history.len() % 2 == 1 {
            self.turn = self.turn.map(|turn| !turn);
        }
        self.history.clear();
        self.selected = None;
        self.redraw();
    }

    /// Snapshot in the backend code.
    ///
    /// # Errors
    ///
    /// Errors if the board holds pieces the code cannot represent.
    pub fn packed(&self) -> Result<PackedBoard, BoardError> {
        self.board.to_packed()
    }

    /// Snapshot as FEN with the given side to move.
    pub fn fen(&self, turn: Side) -> Fen {
        Fen::from_board(self.board.clone(), turn)
    }

    fn redraw(&mut self) {
        self.redraw.redraw(&self.board, self.selected.as_ref());
    }
}

impl<R: Rules, D: Redraw> ChessBoardExposed for BoardView<R, D> {
    fn reset_selection_and_redraw(&mut self) {
        self.selected = None;
        self.redraw();
    }

    fn validate_move(&self, piece_to_move: &Piece, to_x: i32, to_y: i32) -> bool {
        self.check_move(piece_to_move, to_x, to_y).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts redraws and remembers the last selection drawn.
    #[derive(Debug, Default)]
    struct Recorder {
        redraws: usize,
        last_selected: Option<PieceId>,
    }

    impl Redraw for Recorder {
        fn redraw(&mut self, _board: &Board, selected: Option<&PieceId>) {
            self.redraws += 1;
            self.last_selected = selected.cloned();
        }
    }

    fn view() -> BoardView<BasicRules, Recorder> {
        BoardView::new(Board::initial(), BasicRules, Recorder::default())
    }

    fn piece(view: &BoardView<impl Rules, impl Redraw>, id: &str) -> Piece {
        view.board().by_id(id).expect("piece").clone()
    }

    fn point(x: i32, y: i32) -> Point {
        Point::new(x, y).unwrap()
    }

    #[test]
    fn test_reset_selection_is_idempotent() {
        let mut view = view();
        assert!(view.select(&PieceId::new("red-king-1")));
        view.reset_selection_and_redraw();
        let board = view.board().clone();
        let history = view.history().len();
        view.reset_selection_and_redraw();
        assert_eq!(view.selected(), None);
        assert_eq!(view.board(), &board);
        assert_eq!(view.history().len(), history);
        assert_eq!(view.redraw_hook().last_selected, None);
    }

    #[test]
    fn test_reset_selection_without_selection() {
        let mut view = view();
        view.reset_selection_and_redraw();
        assert_eq!(view.selected(), None);
        assert_eq!(view.redraw_hook().redraws, 1);
    }

    #[test]
    fn test_validate_bounds() {
        let view = view();
        let cannon = piece(&view, "red-cannon-1");
        assert!(view.validate_move(&cannon, 4, 7));
        assert!(!view.validate_move(&cannon, -1, 7));
        assert!(!view.validate_move(&cannon, 9, 7));
        assert!(!view.validate_move(&cannon, 1, 10));
        assert_eq!(
            view.check_move(&cannon, 1, 10),
            IllegalMoveKinds::OUT_OF_BOUNDS
        );
    }

    #[test]
    fn test_validate_own_piece_and_null_move() {
        let view = view();
        let rook = piece(&view, "red-rook-1");
        assert_eq!(view.check_move(&rook, 1, 9), IllegalMoveKinds::OWN_PIECE);
        assert_eq!(view.check_move(&rook, 0, 9), IllegalMoveKinds::NULL_MOVE);
        assert!(view.validate_move(&rook, 0, 0));
    }

    #[test]
    fn test_validate_has_no_side_effect() {
        let view = view();
        let board = view.board().clone();
        let rook = piece(&view, "red-rook-1");
        view.validate_move(&rook, 0, 0);
        assert_eq!(view.board(), &board);
        assert!(view.history().is_empty());
    }

    #[test]
    fn test_validate_unknown_and_captured() {
        let mut view = view();
        let stranger = Piece::new("stranger", "兵", Side::Red, Some(point(4, 5)));
        assert_eq!(view.check_move(&stranger, 4, 4), IllegalMoveKinds::UNKNOWN_PIECE);

        view.commit_move(&PieceId::new("red-cannon-2"), point(7, 0)).unwrap();
        let knight = piece(&view, "black-knight-2");
        assert_eq!(view.check_move(&knight, 6, 2), IllegalMoveKinds::NOT_ON_BOARD);
    }

    #[test]
    fn test_commit_capture() {
        let mut view = view();
        let id = PieceId::new("red-cannon-2");
        assert!(view.select(&id));
        assert_eq!(view.redraw_hook().last_selected.as_ref(), Some(&id));

        let payload = view.commit_move(&id, point(7, 0)).unwrap();
        assert_eq!(payload.to, point(7, 0));
        assert_eq!(
            payload.captured_piece.as_ref().map(|p| p.id().as_str()),
            Some("black-knight-2")
        );
        assert_eq!(view.selected(), None);
        assert_eq!(view.history(), &[payload]);
        assert_eq!(view.redraw_hook().redraws, 2);
    }

    #[test]
    fn test_commit_illegal_changes_nothing() {
        let mut view = view();
        let board = view.board().clone();
        let err = view
            .commit_move(&PieceId::new("red-rook-1"), point(1, 9))
            .unwrap_err();
        assert_eq!(err.kinds, IllegalMoveKinds::OWN_PIECE);
        assert_eq!(err.to_string(), "illegal move: destination holds own piece");
        assert_eq!(view.board(), &board);
        assert!(view.history().is_empty());
        assert_eq!(view.redraw_hook().redraws, 0);
    }

    #[test]
    fn test_turns() {
        let mut view = view();
        view.enforce_turns(Side::Red);
        let black_pawn = piece(&view, "black-pawn-1");
        assert_eq!(view.check_move(&black_pawn, 0, 4), IllegalMoveKinds::WRONG_TURN);
        view.commit_move(&PieceId::new("red-pawn-1"), point(0, 5)).unwrap();
        assert_eq!(view.turn(), Some(Side::Black));
        assert!(view.validate_move(&black_pawn, 0, 4));
        view.reset();
        assert_eq!(view.turn(), Some(Side::Red));
        assert_eq!(view.board(), &Board::initial());
        assert!(view.history().is_empty());
    }

    #[test]
    fn test_closure_rules() {
        let one_step = |_: &Board, piece: &Piece, to: Point| {
            piece.position().is_some_and(|from| {
                from.x().abs_diff(to.x()) + from.y().abs_diff(to.y()) == 1
            })
        };
        let view = BoardView::new(Board::initial(), one_step, NoRedraw);
        let pawn = piece(&view, "red-pawn-3");
        assert!(view.validate_move(&pawn, 4, 5));
        assert_eq!(view.check_move(&pawn, 4, 4), IllegalMoveKinds::MOVEMENT);
    }

    #[test]
    fn test_side_is_stable_across_commits() {
        let mut view = view();
        view.commit_move(&PieceId::new("red-cannon-2"), point(7, 0)).unwrap();
        view.commit_move(&PieceId::new("black-rook-2"), point(7, 0)).unwrap();
        for piece in view.board().pieces() {
            let expected = if piece.id().as_str().starts_with("red") {
                Side::Red
            } else {
                Side::Black
            };
            assert_eq!(piece.side(), expected);
        }
    }
}
