use crate::error::{Error, Result};
use crate::location::{Location, Move};
use crate::piece::{Piece, PieceKind, Side};
use std::fmt::Formatter;
use std::ops::Index;

/// The set of live pieces, stored as a 9x10 grid so that no two pieces can share a point.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    pieces: Vec<Option<Piece>>,
}

impl Board {
    pub const WIDTH: i8 = 9;
    pub const HEIGHT: i8 = 10;

    const OPENING: &'static str = "rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR";

    pub fn new() -> Self {
        Self {
            pieces: vec![None; (Self::WIDTH * Self::HEIGHT) as usize],
        }
    }

    /// Reads a board placement string. Rows run from rank 0 (black's back rank) to rank 9,
    /// uppercase letters are red.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidFen(format!("{reason} in '{fen}'"));

        let mut board = Self::new();
        let mut y = 0;
        let mut x = 0;

        for current in fen.chars() {
            match current {
                ' ' => break,
                '/' => {
                    if x != Self::WIDTH {
                        return Err(invalid("short rank"));
                    }
                    x = 0;
                    y += 1;
                }
                '1'..='9' => x += current.to_digit(10).unwrap_or(0) as i8,
                _ => {
                    let location = Location::from_xy(x, y).ok_or_else(|| invalid("point off the board"))?;
                    let piece = Piece::from_fen_char(current, location).ok_or_else(|| invalid("unknown piece"))?;
                    board.place(piece);
                    x += 1;
                }
            }

            if x > Self::WIDTH {
                return Err(invalid("long rank"));
            }
        }

        if x != Self::WIDTH || y != Self::HEIGHT - 1 {
            return Err(invalid("wrong number of ranks"));
        }

        Ok(board)
    }

    /// The canonical starting layout with 16 pieces per side.
    pub fn opening() -> Self {
        Self::from_fen(Self::OPENING).expect("opening layout is well formed")
    }

    pub fn fen(&self) -> String {
        let mut fen = String::new();
        for y in 0..Self::HEIGHT {
            if y > 0 {
                fen.push('/');
            }

            let mut empty = 0;
            for x in 0..Self::WIDTH {
                match self[Location::from_xy(x, y).unwrap()] {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
        }
        fen
    }

    pub fn occupant(&self, location: Location) -> Option<&Piece> {
        self.pieces[location.index()].as_ref()
    }

    /// Whether every point strictly between `from` and `to` on a shared line is empty.
    pub fn is_path_clear(&self, from: Location, to: Location) -> bool {
        self.count_between(from, to) == 0
    }

    /// Number of pieces strictly between `from` and `to` on a shared line.
    pub fn count_between(&self, from: Location, to: Location) -> usize {
        from.between(to).filter(|&location| self[location].is_some()).count()
    }

    /// Puts `piece` at its own location, returning whatever stood there before.
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        self.pieces[piece.location.index()].replace(piece)
    }

    pub fn remove(&mut self, location: Location) -> Option<Piece> {
        self.pieces[location.index()].take()
    }

    /// Relocates the piece at `mv.from` onto `mv.to` and returns the moved piece and any capture.
    /// Panics if there is no piece at `mv.from`.
    pub fn play(&mut self, mv: Move) -> (Piece, Option<Piece>) {
        let mut piece = self.remove(mv.from).expect("no piece to move");
        piece.location = mv.to;
        let capture = self.place(piece);
        (piece, capture)
    }

    /// Reverts a [`Board::play`].
    pub fn undo(&mut self, mv: Move, capture: Option<Piece>) {
        let mut piece = self.remove(mv.to).expect("no piece to undo");
        piece.location = mv.from;
        self.place(piece);

        if let Some(capture) = capture {
            self.place(capture);
        }
    }

    pub fn iter_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().flatten()
    }

    pub fn iter_side(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.iter_pieces().filter(move |piece| piece.side == side)
    }

    pub fn find_general(&self, side: Side) -> Option<&Piece> {
        self.iter_side(side).find(|piece| piece.kind == PieceKind::General)
    }

    pub fn piece_count(&self) -> usize {
        self.iter_pieces().count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Location> for Board {
    type Output = Option<Piece>;
    fn index(&self, index: Location) -> &Self::Output {
        &self.pieces[index.index()]
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for y in 0..Self::HEIGHT {
            write!(f, "{y} ")?;
            for x in 0..Self::WIDTH {
                if let Some(piece) = self[Location::from_xy(x, y).unwrap()] {
                    write!(f, "{} ", piece.fen_char())?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, " ")?;
        for char in 'a'..='i' {
            write!(f, " {char}")?;
        }
        writeln!(f)
    }
}
