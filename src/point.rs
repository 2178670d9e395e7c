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

use std::{error::Error, fmt, str::FromStr};

/// A point on the 9x10 board.
///
/// `x` is the column, `0..=8` from left to right. `y` is the row, `0..=9`
/// from top to bottom, with black's back rank on row 0 and red's back rank
/// on row 9. Every value of this type lies on the board.
///
/// # Examples
///
/// ```
/// use xiangqi::Point;
///
/// let p = Point::new(4, 9).expect("on board");
/// assert_eq!(p.to_string(), "49");
/// assert_eq!(Point::new(9, 0), None);
/// assert_eq!(Point::new(-1, 3), None);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawPoint", into = "RawPoint")
)]
pub struct Point {
    x: u8,
    y: u8,
}

impl Point {
    /// Number of columns.
    pub const FILES: u8 = 9;
    /// Number of rows.
    pub const RANKS: u8 = 10;

    /// Creates a point, or `None` if the coordinates are off the board.
    pub fn new(x: i32, y: i32) -> Option<Point> {
        let x = u8::try_from(x).ok()?;
        let y = u8::try_from(y).ok()?;
        Point::from_coords(x, y)
    }

    /// Creates a point from unsigned coordinates, or `None` if they are off
    /// the board.
    #[inline]
    pub const fn from_coords(x: u8, y: u8) -> Option<Point> {
        if x < Point::FILES && y < Point::RANKS {
            Some(Point { x, y })
        } else {
            None
        }
    }

    /// Creates a point from its index `y * 9 + x`.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Point> {
        if index < Point::FILES as usize * Point::RANKS as usize {
            Some(Point {
                x: (index % Point::FILES as usize) as u8,
                y: (index / Point::FILES as usize) as u8,
            })
        } else {
            None
        }
    }

    /// Parses the two digit code `xy`, for example `b"47"`.
    pub fn from_ascii(s: &[u8]) -> Result<Point, ParsePointError> {
        match *s {
            [x @ b'0'..=b'9', y @ b'0'..=b'9'] => {
                Point::from_coords(x - b'0', y - b'0').ok_or(ParsePointError)
            }
            _ => Err(ParsePointError),
        }
    }

    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.y as usize * Point::FILES as usize + self.x as usize
    }

    /// Mirrors the point at the central file.
    #[inline]
    pub const fn flip_horizontal(self) -> Point {
        Point {
            x: Point::FILES - 1 - self.x,
            y: self.y,
        }
    }

    /// Mirrors the point at the river.
    #[inline]
    pub const fn flip_vertical(self) -> Point {
        Point {
            x: self.x,
            y: Point::RANKS - 1 - self.y,
        }
    }

    /// Iterates over all 90 points, row by row from the top.
    pub fn all() -> impl Iterator<Item = Point> {
        (0..usize::from(Point::FILES) * usize::from(Point::RANKS)).filter_map(Point::from_index)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.x, self.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

/// Error when parsing an invalid point.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsePointError;

impl fmt::Display for ParsePointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid point")
    }
}

impl Error for ParsePointError {}

impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Point, ParsePointError> {
        Point::from_ascii(s.as_bytes())
    }
}

/// Unchecked wire form `{"x": _, "y": _}`.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawPoint {
    x: i32,
    y: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPoint> for Point {
    type Error = ParsePointError;

    fn try_from(raw: RawPoint) -> Result<Point, ParsePointError> {
        Point::new(raw.x, raw.y).ok_or(ParsePointError)
    }
}

#[cfg(feature = "serde")]
impl From<Point> for RawPoint {
    fn from(p: Point) -> RawPoint {
        RawPoint {
            x: i32::from(p.x),
            y: i32::from(p.y),
        }
    }
}
