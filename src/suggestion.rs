//! The AI suggestion response of the backend.
//!
//! On the wire a response is
//! `{"code": number, "data": string | null, "message"?: string}`. Some
//! failures of the backend name the message `error` instead. Code
//! `200` means success. Any other code is a failure, whatever `data`
//! holds. A successful response without `data` means that no move is
//! available, which is not an error.
//!
//! # Examples
//!
//! ```
//! use xiangqi::suggestion::{Suggestion, SuggestionResponse};
//!
//! assert_eq!(
//!     SuggestionResponse::ok("e2e4").interpret(),
//!     Suggestion::Move("e2e4".to_owned())
//! );
//! assert_eq!(SuggestionResponse::no_move().interpret(), Suggestion::NoMove);
//! assert_eq!(
//!     SuggestionResponse::error(500, "engine timeout").interpret(),
//!     Suggestion::Failed {
//!         code: 500,
//!         message: Some("engine timeout".to_owned()),
//!     }
//! );
//! ```

use std::{error::Error, fmt};

use crate::m::{Move, ParseMoveError};

/// Status code of a successful response.
pub const CODE_OK: i64 = 200;

/// Response body of a suggestion request.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuggestionResponse {
    pub code: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, alias = "error", skip_serializing_if = "Option::is_none")
    )]
    pub message: Option<String>,
}

impl SuggestionResponse {
    /// A successful response carrying a move.
    pub fn ok<S: Into<String>>(data: S) -> SuggestionResponse {
        SuggestionResponse {
            code: CODE_OK,
            data: Some(data.into()),
            message: None,
        }
    }

    /// A successful response without a move.
    pub fn no_move() -> SuggestionResponse {
        SuggestionResponse {
            code: CODE_OK,
            data: None,
            message: None,
        }
    }

    /// A failed response.
    pub fn error<S: Into<String>>(code: i64, message: S) -> SuggestionResponse {
        SuggestionResponse {
            code,
            data: None,
            message: Some(message.into()),
        }
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }

    /// Interprets the response.
    pub fn interpret(self) -> Suggestion {
        match self.into_suggestion() {
            Ok(Some(data)) => Suggestion::Move(data),
            Ok(None) => Suggestion::NoMove,
            Err(SuggestionError { code, message }) => Suggestion::Failed { code, message },
        }
    }

    /// Gets the suggested move string, `None` if no move is available.
    ///
    /// # Errors
    ///
    /// Errors if the code is not `200`, even if the response carries data.
    pub fn into_suggestion(self) -> Result<Option<String>, SuggestionError> {
        if self.is_ok() {
            Ok(self.data)
        } else {
            Err(SuggestionError {
                code: self.code,
                message: self.message,
            })
        }
    }

    /// Gets the suggested move as a move code, `None` if no move is
    /// available.
    ///
    /// # Errors
    ///
    /// Errors if the response is a failure or carries something other than
    /// a move code.
    pub fn into_move(self) -> Result<Option<Move>, SuggestionMoveError> {
        match self.into_suggestion()? {
            Some(data) => Ok(Some(data.parse()?)),
            None => Ok(None),
        }
    }
}

/// Interpretation of a [`SuggestionResponse`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Suggestion {
    /// The backend suggests this move.
    Move(String),
    /// The backend has no move to suggest.
    NoMove,
    /// The backend reported a failure.
    Failed { code: i64, message: Option<String> },
}

impl Suggestion {
    /// The suggested move string, if any.
    pub fn as_move(&self) -> Option<&str> {
        match self {
            Suggestion::Move(m) => Some(m),
            _ => None,
        }
    }
}

/// Failure reported by the backend.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SuggestionError {
    pub code: i64,
    pub message: Option<String>,
}

impl fmt::Display for SuggestionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message {
            Some(ref message) => write!(f, "suggestion failed with code {}: {}", self.code, message),
            None => write!(f, "suggestion failed with code {}", self.code),
        }
    }
}

impl Error for SuggestionError {}

/// Error when a suggestion cannot be turned into a move.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SuggestionMoveError {
    Failed(SuggestionError),
    InvalidMove(ParseMoveError),
}

impl fmt::Display for SuggestionMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionMoveError::Failed(err) => err.fmt(f),
            SuggestionMoveError::InvalidMove(err) => write!(f, "suggested {err}"),
        }
    }
}

impl Error for SuggestionMoveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SuggestionMoveError::Failed(err) => Some(err),
            SuggestionMoveError::InvalidMove(err) => Some(err),
        }
    }
}

impl From<SuggestionError> for SuggestionMoveError {
    fn from(err: SuggestionError) -> SuggestionMoveError {
        SuggestionMoveError::Failed(err)
    }
}

impl From<ParseMoveError> for SuggestionMoveError {
    fn from(err: ParseMoveError) -> SuggestionMoveError {
        SuggestionMoveError::InvalidMove(err)
    }
}
