use crate::board::Board;
use crate::error::{Error, Result};
use std::fmt::Formatter;
use std::str::{Chars, FromStr};

/// A point on the 9x10 grid. `x` is the file (0-8, left to right as red sees it) and
/// `y` is the rank (0 is black's back rank, 9 is red's back rank).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Location {
    x: i8,
    y: i8,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub from: Location,
    pub to: Location,
}

impl Location {
    pub fn new() -> Self {
        Self { x: 0, y: 0 }
    }

    pub fn from_xy(x: i8, y: i8) -> Option<Self> {
        Self::new().shift_xy(x, y)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= (Board::WIDTH * Board::HEIGHT) as usize {
            return None;
        }
        let x = index as i8 % Board::WIDTH;
        let y = index as i8 / Board::WIDTH;
        Self::from_xy(x, y)
    }

    pub fn from_chars(chars: &mut Chars<'_>) -> Option<Self> {
        let x = chars.next()?.to_ascii_lowercase();
        let y = chars.next()?;
        if !x.is_ascii_lowercase() || !y.is_ascii_digit() {
            return None;
        }
        Self::from_xy((x as u8 - b'a') as i8, (y as u8 - b'0') as i8)
    }

    pub fn iter_all() -> impl Iterator<Item = Self> {
        (0..(Board::WIDTH * Board::HEIGHT) as usize).filter_map(Self::from_index)
    }

    pub fn shift_x(&self, x: i8) -> Option<Self> {
        let new_x = self.x + x;
        if 0 > new_x || new_x >= Board::WIDTH {
            return None;
        }
        Some(Self { x: new_x, y: self.y })
    }

    pub fn shift_y(&self, y: i8) -> Option<Self> {
        let new_y = self.y + y;
        if 0 > new_y || new_y >= Board::HEIGHT {
            return None;
        }
        Some(Self { x: self.x, y: new_y })
    }

    pub fn shift_xy(&self, x: i8, y: i8) -> Option<Self> {
        self.shift_x(x)?.shift_y(y)
    }

    pub fn index(&self) -> usize {
        (self.x + self.y * Board::WIDTH) as usize
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    /// Signed displacement `(dx, dy)` from `self` to `to`.
    pub fn delta(&self, to: Location) -> (i8, i8) {
        (to.x - self.x, to.y - self.y)
    }

    /// Whether both locations lie on one file or one rank (and differ).
    pub fn is_straight(&self, to: Location) -> bool {
        *self != to && (self.x == to.x || self.y == to.y)
    }

    /// Squares strictly between `self` and `to` along a shared file or rank.
    /// Yields nothing when the two are not on a straight line.
    pub fn between(&self, to: Location) -> impl Iterator<Item = Location> + use<> {
        let (dx, dy) = self.delta(to);
        let straight = self.is_straight(to);
        let steps = if straight { dx.abs().max(dy.abs()) - 1 } else { 0 };
        let from = *self;

        (1..=steps).filter_map(move |step| from.shift_xy(dx.signum() * step, dy.signum() * step))
    }

    /// Traditional name of the point, counted from the left of the board in Chinese numerals.
    pub fn chinese_name(&self) -> String {
        const NUMERALS: [char; 10] = ['一', '二', '三', '四', '五', '六', '七', '八', '九', '十'];
        format!("{}{}", NUMERALS[self.x as usize], NUMERALS[self.y as usize])
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.x as u8) as char, self.y)
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match Self::from_chars(&mut chars) {
            Some(location) if chars.next().is_none() => Ok(location),
            _ => Err(Error::InvalidLocation(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        if let Some(from) = Location::from_chars(&mut chars)
            && let Some(to) = Location::from_chars(&mut chars)
            && chars.next().is_none()
        {
            Ok(Move { from, to })
        } else {
            Err(Error::InvalidMove(s.to_owned()))
        }
    }
}
