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

//! Parse and write moves in ICCS coordinate notation.
//!
//! ICCS names files `a` to `i` from red's left and ranks `0` to `9` from
//! red's back rank. Opening books and engines answer in this notation, while
//! the board UI and its backend speak four digit [`Move`] codes.
//!
//! # Examples
//!
//! Parsing ICCS:
//!
//! ```
//! # use std::error::Error;
//! #
//! # fn try_main() -> Result<(), Box<dyn Error>> {
//! use xiangqi::{iccs::Iccs, Move, Point};
//!
//! let iccs: Iccs = "h2e2".parse()?;
//! assert_eq!(iccs.orig(), Point::new(7, 7).unwrap());
//! assert_eq!(iccs.dest(), Point::new(4, 7).unwrap());
//! #
//! #     Ok(())
//! # }
//! #
//! # fn main() {
//! #     try_main().unwrap();
//! # }
//! ```
//!
//! Converting to the move code of the backend:
//!
//! ```
//! use xiangqi::{iccs::Iccs, Move};
//!
//! let iccs: Iccs = "H2-E2".parse().expect("valid iccs");
//! let m = Move::from(iccs);
//! assert_eq!(m.to_string(), "7747");
//! assert_eq!(Iccs::from(m).to_string(), "h2e2");
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{m::Move, point::Point};

/// Error when parsing an invalid ICCS move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseIccsError;

impl fmt::Display for ParseIccsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid iccs")
    }
}

impl Error for ParseIccsError {}

/// A move in ICCS notation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Iccs(Move);

fn point_from_iccs(file: u8, rank: u8) -> Option<Point> {
    let x = file.to_ascii_lowercase().checked_sub(b'a')?;
    let r = rank.checked_sub(b'0')?;
    Point::from_coords(x, (Point::RANKS - 1).checked_sub(r)?)
}

fn write_point(f: &mut fmt::Formatter<'_>, p: Point) -> fmt::Result {
    write!(
        f,
        "{}{}",
        char::from(b'a' + p.x()),
        Point::RANKS - 1 - p.y()
    )
}

impl Iccs {
    /// Parses ICCS such as `b"h2e2"`. Upper case letters and the dash of
    /// the long form `H2-E2` are accepted.
    ///
    /// # Errors
    ///
    /// Errors if the input is not a move between two points on the board.
    pub fn from_ascii(s: &[u8]) -> Result<Iccs, ParseIccsError> {
        let (from, to) = match *s {
            [ff, fr, tf, tr] | [ff, fr, b'-', tf, tr] => ((ff, fr), (tf, tr)),
            _ => return Err(ParseIccsError),
        };
        Ok(Iccs(Move {
            from: point_from_iccs(from.0, from.1).ok_or(ParseIccsError)?,
            to: point_from_iccs(to.0, to.1).ok_or(ParseIccsError)?,
        }))
    }

    pub fn orig(self) -> Point {
        self.0.from
    }

    pub fn dest(self) -> Point {
        self.0.to
    }
}

impl FromStr for Iccs {
    type Err = ParseIccsError;

    fn from_str(s: &str) -> Result<Iccs, ParseIccsError> {
        Iccs::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Iccs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_point(f, self.0.from)?;
        write_point(f, self.0.to)
    }
}

impl From<Move> for Iccs {
    fn from(m: Move) -> Iccs {
        Iccs(m)
    }
}

impl From<Iccs> for Move {
    fn from(iccs: Iccs) -> Move {
        iccs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        let iccs: Iccs = "a0i9".parse().unwrap();
        assert_eq!(iccs.orig(), Point::new(0, 9).unwrap());
        assert_eq!(iccs.dest(), Point::new(8, 0).unwrap());
        assert_eq!(Move::from(iccs).to_string(), "0980");
    }

    #[test]
    fn test_invalid() {
        for s in ["", "h2e", "j2e2", "h2e2e", "h-2e2", "h2ex", "h2_e2"] {
            assert_eq!(s.parse::<Iccs>(), Err(ParseIccsError), "{s}");
        }
    }

    #[test]
    fn test_display_is_canonical() {
        let iccs: Iccs = "B0-C2".parse().unwrap();
        assert_eq!(iccs.to_string(), "b0c2");
    }
}
