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

use crate::side::Side;

/// Piece kinds: `Rook`, `Knight`, `Bishop`, `Advisor`, `King`, `Cannon`,
/// `Pawn`.
///
/// `Bishop` is the elephant and `King` is the general. The English letters
/// are the ones used by xiangqi FEN.
///
/// # Examples
///
/// ```
/// use xiangqi::Role;
///
/// assert_eq!(Role::from_char('C'), Some(Role::Cannon));
/// assert_eq!(Role::Advisor.char(), 'a');
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Role {
    Rook = 1,
    Knight = 2,
    Bishop = 3,
    Advisor = 4,
    King = 5,
    Cannon = 6,
    Pawn = 7,
}

impl Role {
    /// Gets the piece type from its FEN letter, ignoring case.
    ///
    /// `h` and `e` are accepted as aliases for the knight (horse) and the
    /// bishop (elephant).
    pub const fn from_char(ch: char) -> Option<Role> {
        match ch {
            'R' | 'r' => Some(Role::Rook),
            'N' | 'n' | 'H' | 'h' => Some(Role::Knight),
            'B' | 'b' | 'E' | 'e' => Some(Role::Bishop),
            'A' | 'a' => Some(Role::Advisor),
            'K' | 'k' => Some(Role::King),
            'C' | 'c' => Some(Role::Cannon),
            'P' | 'p' => Some(Role::Pawn),
            _ => None,
        }
    }

    /// Gets the lowercase FEN letter.
    pub const fn char(self) -> char {
        match self {
            Role::Rook => 'r',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Advisor => 'a',
            Role::King => 'k',
            Role::Cannon => 'c',
            Role::Pawn => 'p',
        }
    }

    /// Gets the uppercase FEN letter.
    pub const fn upper_char(self) -> char {
        self.char().to_ascii_uppercase()
    }

    /// Gets the lowercase English name, as used in piece ids.
    pub const fn name(self) -> &'static str {
        match self {
            Role::Rook => "rook",
            Role::Knight => "knight",
            Role::Bishop => "bishop",
            Role::Advisor => "advisor",
            Role::King => "king",
            Role::Cannon => "cannon",
            Role::Pawn => "pawn",
        }
    }

    /// Gets the FEN letter of the piece of the given side: uppercase for
    /// red, lowercase for black.
    pub fn char_of(self, side: Side) -> char {
        side.fold(self.upper_char(), self.char())
    }

    /// Gets the traditional label of the piece as printed on the disc.
    /// Both sides use different characters for the same role.
    ///
    /// # Examples
    ///
    /// ```
    /// use xiangqi::{Role, Side};
    ///
    /// assert_eq!(Role::King.label(Side::Red), "帥");
    /// assert_eq!(Role::King.label(Side::Black), "將");
    /// ```
    pub fn label(self, side: Side) -> &'static str {
        match self {
            Role::Rook => side.fold("俥", "車"),
            Role::Knight => side.fold("傌", "馬"),
            Role::Bishop => side.fold("相", "象"),
            Role::Advisor => side.fold("仕", "士"),
            Role::King => side.fold("帥", "將"),
            Role::Cannon => side.fold("炮", "砲"),
            Role::Pawn => side.fold("兵", "卒"),
        }
    }

    /// Gets the role from a disc label of either side, in traditional or
    /// simplified characters, or from a single FEN letter.
    pub fn from_label(label: &str) -> Option<Role> {
        let mut chars = label.chars();
        let ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Some(match ch {
            '俥' | '車' | '车' => Role::Rook,
            '傌' | '馬' | '马' => Role::Knight,
            '相' | '象' => Role::Bishop,
            '仕' | '士' => Role::Advisor,
            '帥' | '將' | '帅' | '将' => Role::King,
            '炮' | '砲' => Role::Cannon,
            '兵' | '卒' => Role::Pawn,
            _ => return Role::from_char(ch),
        })
    }

    /// All roles, in declaration order.
    pub const ALL: [Role; 7] = [
        Role::Rook,
        Role::Knight,
        Role::Bishop,
        Role::Advisor,
        Role::King,
        Role::Cannon,
        Role::Pawn,
    ];

    /// Roles of one half of the packed board code: back rank from left to
    /// right, the two cannons, then the five pawns of the other side.
    pub const ARMY: [Role; 16] = [
        Role::Rook,
        Role::Knight,
        Role::Bishop,
        Role::Advisor,
        Role::King,
        Role::Advisor,
        Role::Bishop,
        Role::Knight,
        Role::Rook,
        Role::Cannon,
        Role::Cannon,
        Role::Pawn,
        Role::Pawn,
        Role::Pawn,
        Role::Pawn,
        Role::Pawn,
    ];
}

macro_rules! int_from_role_impl {
    ($($t:ty)+) => {
        $(impl From<Role> for $t {
            #[inline]
            fn from(role: Role) -> $t {
                role as $t
            }
        })+
    }
}

int_from_role_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }
