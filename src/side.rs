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

use std::{error::Error, fmt, mem, ops, str::FromStr};

/// `Red` or `Black`.
///
/// Serialized as `"red"` and `"black"`, the values of the `type` field of a
/// piece on the wire.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Red = 0,
    Black = 1,
}

impl Side {
    /// Gets the side from its FEN turn character. Xiangqi FEN keeps the
    /// chess convention and uses `w` for red.
    pub const fn from_char(ch: char) -> Option<Side> {
        match ch {
            'w' | 'r' => Some(Side::Red),
            'b' => Some(Side::Black),
            _ => None,
        }
    }

    #[inline]
    pub const fn from_red(red: bool) -> Side {
        if red {
            Side::Red
        } else {
            Side::Black
        }
    }

    #[inline]
    pub fn fold<T>(self, red: T, black: T) -> T {
        match self {
            Side::Red => red,
            Side::Black => black,
        }
    }

    #[inline]
    pub const fn is_red(self) -> bool {
        matches!(self, Side::Red)
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Side::Black)
    }

    /// The row of the side's back rank. Black sits at the top of the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use xiangqi::Side;
    ///
    /// assert_eq!(Side::Black.back_rank(), 0);
    /// assert_eq!(Side::Red.back_rank(), 9);
    /// ```
    #[inline]
    pub fn back_rank(self) -> u8 {
        self.fold(9, 0)
    }

    /// FEN turn character.
    pub fn char(self) -> char {
        self.fold('w', 'b')
    }

    /// `Red` and `Black`, in this order. Red moves first.
    pub const ALL: [Side; 2] = [Side::Red, Side::Black];
}

impl ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.fold(Side::Black, Side::Red)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fold("red", "black"))
    }
}

/// Error when parsing an invalid side name.
#[derive(Clone, Debug)]
pub struct ParseSideError;

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid side, expected red or black")
    }
}

impl Error for ParseSideError {}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Side, ParseSideError> {
        Ok(match s {
            "red" => Side::Red,
            "black" => Side::Black,
            _ => return Err(ParseSideError),
        })
    }
}

/// Container with values for each [`Side`].
#[derive(Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct BySide<T> {
    pub red: T,
    pub black: T,
}

impl<T> BySide<T> {
    #[inline]
    pub fn new_with<F>(mut init: F) -> BySide<T>
    where
        F: FnMut(Side) -> T,
    {
        BySide {
            red: init(Side::Red),
            black: init(Side::Black),
        }
    }

    #[inline]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Red => &self.red,
            Side::Black => &self.black,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Red => &mut self.red,
            Side::Black => &mut self.black,
        }
    }

    pub fn flip(&mut self) {
        mem::swap(&mut self.red, &mut self.black);
    }

    #[inline]
    pub fn map<U, F>(self, mut f: F) -> BySide<U>
    where
        F: FnMut(T) -> U,
    {
        BySide {
            red: f(self.red),
            black: f(self.black),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_round_trip_names() {
        for side in Side::ALL {
            assert_eq!(side.to_string().parse::<Side>().unwrap(), side);
        }
        assert!("white".parse::<Side>().is_err());
        assert!("Red".parse::<Side>().is_err());
    }

    #[test]
    fn test_not() {
        assert_eq!(!Side::Red, Side::Black);
        assert_eq!(!!Side::Black, Side::Black);
    }

    #[test]
    fn test_fen_char() {
        assert_eq!(Side::from_char(Side::Red.char()), Some(Side::Red));
        assert_eq!(Side::from_char(Side::Black.char()), Some(Side::Black));
        assert_eq!(Side::from_char('x'), None);
    }

    #[test]
    fn test_by_side() {
        let mut counts = BySide::new_with(|side| side.back_rank());
        assert_eq!(*counts.get(Side::Red), 9);
        *counts.get_mut(Side::Black) += 1;
        counts.flip();
        assert_eq!(counts, BySide { red: 1, black: 9 });
        assert_eq!(counts.map(u32::from).red, 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Red).unwrap(), "\"red\"");
        assert_eq!(
            serde_json::from_str::<Side>("\"black\"").unwrap(),
            Side::Black
        );
        assert!(serde_json::from_str::<Side>("\"green\"").is_err());
    }
}
