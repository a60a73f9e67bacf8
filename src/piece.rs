use crate::display_format::DisplayFormat;
use crate::location::Location;
use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opponent(&self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    pub fn is_red(&self) -> bool {
        *self == Self::Red
    }

    /// Rank delta of one step toward the opposing side.
    pub fn forward(&self) -> i8 {
        match self {
            Self::Red => -1,
            Self::Black => 1,
        }
    }

    /// Whether `location` is on this side of the river (red owns ranks 5-9, black 0-4).
    pub fn on_own_half(&self, location: Location) -> bool {
        match self {
            Self::Red => location.y() >= 5,
            Self::Black => location.y() <= 4,
        }
    }

    /// Whether `location` is inside this side's 3x3 palace.
    pub fn in_palace(&self, location: Location) -> bool {
        let ranks = match self {
            Self::Red => 7..=9,
            Self::Black => 0..=2,
        };
        (3..=5).contains(&location.x()) && ranks.contains(&location.y())
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display + use<> {
        let name = match (format.chinese, self) {
            (true, Self::Red) => "红方",
            (true, Self::Black) => "黑方",
            (false, Self::Red) => "red",
            (false, Self::Black) => "black",
        };
        if format.effects && self.is_red() {
            format!("\x1B[31m{name}\x1B[0m")
        } else {
            name.to_owned()
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::string().with_chinese(false)))
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        Self::General,
        Self::Advisor,
        Self::Elephant,
        Self::Horse,
        Self::Chariot,
        Self::Cannon,
        Self::Soldier,
    ];

    pub fn english_name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Advisor => "advisor",
            Self::Elephant => "elephant",
            Self::Horse => "horse",
            Self::Chariot => "chariot",
            Self::Cannon => "cannon",
            Self::Soldier => "soldier",
        }
    }
}

/// A live piece. The location always matches the board cell holding it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    pub location: Location,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side, location: Location) -> Self {
        Self { kind, side, location }
    }

    pub fn from_fen_char(value: char, location: Location) -> Option<Self> {
        let kind = match value.to_ascii_lowercase() {
            'k' => PieceKind::General,
            'a' => PieceKind::Advisor,
            'e' => PieceKind::Elephant,
            'h' => PieceKind::Horse,
            'r' => PieceKind::Chariot,
            'c' => PieceKind::Cannon,
            'p' => PieceKind::Soldier,
            _ => return None,
        };

        let side = if value.is_ascii_uppercase() { Side::Red } else { Side::Black };
        Some(Self::new(kind, side, location))
    }

    pub fn is_red(&self) -> bool {
        self.side.is_red()
    }

    pub fn fen_char(&self) -> char {
        let result = match self.kind {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'e',
            PieceKind::Horse => 'h',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        };
        if self.is_red() { result.to_ascii_uppercase() } else { result }
    }

    pub fn chinese_char(&self) -> char {
        match (self.side, self.kind) {
            (Side::Red, PieceKind::General) => '帥',
            (Side::Red, PieceKind::Advisor) => '仕',
            (Side::Red, PieceKind::Elephant) => '相',
            (Side::Red, PieceKind::Horse) => '傌',
            (Side::Red, PieceKind::Chariot) => '俥',
            (Side::Red, PieceKind::Cannon) => '炮',
            (Side::Red, PieceKind::Soldier) => '兵',
            (Side::Black, PieceKind::General) => '將',
            (Side::Black, PieceKind::Advisor) => '士',
            (Side::Black, PieceKind::Elephant) => '象',
            (Side::Black, PieceKind::Horse) => '馬',
            (Side::Black, PieceKind::Chariot) => '車',
            (Side::Black, PieceKind::Cannon) => '砲',
            (Side::Black, PieceKind::Soldier) => '卒',
        }
    }

    /// Name used in sentences, e.g. "red horse" or "傌".
    pub fn name(&self, format: DisplayFormat) -> String {
        if format.chinese {
            self.chinese_char().to_string()
        } else {
            format!("{} {}", self.side.display(format.with_effects(false)), self.kind.english_name())
        }
    }

    /// Board cell label. Concise labels are always two columns wide.
    pub fn display(&self, format: DisplayFormat) -> impl Display + use<> {
        let s = match (format.chinese, format.concise) {
            (true, _) => self.chinese_char().to_string(),
            (false, true) => {
                let c = self.fen_char();
                format!("{c}{c}")
            }
            (false, false) => self.name(format),
        };
        if format.effects && self.is_red() {
            format!("\x1B[31m{}\x1B[0m", s)
        } else {
            s
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palace_and_river_bounds() {
        let at = |x, y| Location::from_xy(x, y).unwrap();

        assert!(Side::Red.in_palace(at(3, 7)));
        assert!(Side::Red.in_palace(at(5, 9)));
        assert!(!Side::Red.in_palace(at(4, 6)));
        assert!(!Side::Red.in_palace(at(2, 8)));
        assert!(Side::Black.in_palace(at(4, 0)));
        assert!(!Side::Black.in_palace(at(4, 3)));

        assert!(Side::Red.on_own_half(at(0, 5)));
        assert!(!Side::Red.on_own_half(at(0, 4)));
        assert!(Side::Black.on_own_half(at(0, 4)));
        assert!(!Side::Black.on_own_half(at(0, 5)));
    }

    #[test]
    fn fen_letters_carry_side() {
        let location = Location::new();
        let piece = Piece::from_fen_char('H', location).unwrap();
        assert_eq!((piece.kind, piece.side), (PieceKind::Horse, Side::Red));
        assert_eq!(piece.fen_char(), 'H');
        assert_eq!(piece.chinese_char(), '傌');

        let piece = Piece::from_fen_char('c', location).unwrap();
        assert_eq!((piece.kind, piece.side), (PieceKind::Cannon, Side::Black));
        assert_eq!(piece.chinese_char(), '砲');

        assert!(Piece::from_fen_char('x', location).is_none());
    }

    #[test]
    fn english_names() {
        let piece = Piece::new(PieceKind::Chariot, Side::Black, Location::new());
        let format = DisplayFormat::string().with_chinese(false);
        assert_eq!(piece.name(format), "black chariot");
        assert_eq!(piece.display(format.with_concise(true)).to_string(), "rr");
        assert_eq!(Side::Red.to_string(), "red");
    }
}
