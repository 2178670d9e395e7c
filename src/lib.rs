//! Xiangqi board vocabulary and the data contracts of a web board UI.
//!
//! # Examples
//!
//! Set up the starting position and commit a move through the board
//! component:
//!
//! ```
//! use xiangqi::{
//!     view::{BasicRules, BoardView, ChessBoardExposed, NoRedraw},
//!     Board, PieceId, Point,
//! };
//!
//! let mut view = BoardView::new(Board::initial(), BasicRules, NoRedraw);
//!
//! // 炮二平五
//! let payload = view.commit_move(&PieceId::new("red-cannon-2"), Point::new(4, 7).unwrap())?;
//! assert_eq!(payload.to_move().map(|m| m.to_string()).as_deref(), Some("7747"));
//!
//! view.reset_selection_and_redraw();
//! assert_eq!(view.selected(), None);
//! # Ok::<_, xiangqi::view::IllegalMove>(())
//! ```
//!
//! Interpret the answer of the suggestion backend:
//!
//! ```
//! # #[cfg(feature = "serde")] {
//! use xiangqi::suggestion::{Suggestion, SuggestionResponse};
//!
//! let response: SuggestionResponse =
//!     serde_json::from_str(r#"{"code": 200, "data": null}"#).expect("valid json");
//! assert_eq!(response.interpret(), Suggestion::NoMove);
//! # }
//! ```
//!
//! Also supports the [packed board code](packed), [FEN](fen) and
//! [ICCS](iccs) formats of the backend and of external engines.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   the types exchanged with the board UI and the backend, in their wire
//!   shapes. Enabled by default.

#![doc(html_root_url = "https://docs.rs/xiangqi/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod m;
mod piece;
mod point;
mod role;
mod side;

pub mod board;
pub mod fen;
pub mod iccs;
pub mod packed;
pub mod suggestion;
pub mod view;

pub use board::{Board, BoardError};
pub use m::{Move, MovedPayload, ParseMoveError};
pub use piece::{InvalidPieceError, Piece, PieceId};
pub use point::{ParsePointError, Point};
pub use role::Role;
pub use side::{BySide, ParseSideError, Side};
pub use view::ChessBoardExposed;
