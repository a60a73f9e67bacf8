use crate::board::Board;
use crate::check;
use crate::display_format::DisplayFormat;
use crate::error::Result;
use crate::event::Event;
use crate::location::{Location, Move};
use crate::piece::{Piece, PieceKind, Side};
use crate::rules;
use log::{debug, info, trace};
use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    RedWon,
    BlackWon,
}

impl Outcome {
    pub fn winner(&self) -> Side {
        match self {
            Self::RedWon => Side::Red,
            Self::BlackWon => Side::Black,
        }
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display + use<> {
        let winner = self.winner();
        let general = Piece::new(PieceKind::General, winner.opponent(), Location::new());
        let format = format.with_concise(false);
        if format.chinese {
            format!("{}胜利, 吃掉{}", winner.display(format), general.display(format))
        } else {
            format!("{} won by capturing the {}", winner.display(format), general.display(format))
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::string().with_chinese(false)))
    }
}

/// Where the turn state machine currently stands.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum State {
    Idle,
    Selected(Location),
    Terminal(Outcome),
}

/// One game from the opening to the capture of a general.
///
/// Restarting is done by constructing a fresh value with [`Game::opening`].
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Side,
    selected: Option<Location>,
    outcome: Option<Outcome>,
    check: Option<Side>,
    history: Vec<(Move, Option<Piece>)>,
}

impl Game {
    pub fn new(board: Board, turn: Side) -> Self {
        Self {
            board,
            turn,
            selected: None,
            outcome: None,
            check: None,
            history: Vec::new(),
        }
    }

    pub fn opening() -> Self {
        Self::new(Board::opening(), Side::Red)
    }

    pub fn from_fen(fen: &str, turn: Side) -> Result<Self> {
        Ok(Self::new(Board::from_fen(fen)?, turn))
    }

    pub fn state(&self) -> State {
        match (self.outcome, self.selected) {
            (Some(outcome), _) => State::Terminal(outcome),
            (None, Some(location)) => State::Selected(location),
            (None, None) => State::Idle,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn selected(&self) -> Option<&Piece> {
        self.selected.and_then(|location| self.board.occupant(location))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Committed moves in order, with whatever each one captured.
    pub fn history(&self) -> &[(Move, Option<Piece>)] {
        &self.history
    }

    /// Feeds one board click for the side to move.
    ///
    /// Clicking one of the mover's own pieces (re)selects it. Any other click with a piece
    /// selected attempts a move there; an illegal attempt changes nothing and the piece stays
    /// selected. Clicks with nothing selected, off the board, or after the game ended are ignored.
    pub fn handle_click(&mut self, at: Option<Location>) -> Vec<Event> {
        if self.is_terminal() {
            return Vec::new();
        }
        let Some(at) = at else {
            return Vec::new();
        };

        if let Some(piece) = self.board.occupant(at)
            && piece.side == self.turn
        {
            trace!("selected {} at {at}", piece);
            self.selected = Some(at);
            return Vec::new();
        }

        match self.selected {
            Some(from) => self.play(Move { from, to: at }),
            None => Vec::new(),
        }
    }

    /// Commits `mv` if it moves one of the side to move's pieces legally. Returns no events
    /// when the move was refused.
    pub fn play(&mut self, mv: Move) -> Vec<Event> {
        if self.is_terminal() {
            return Vec::new();
        }

        let Some(&piece) = self.board.occupant(mv.from) else {
            return Vec::new();
        };

        if piece.side != self.turn || !rules::is_legal(&piece, mv.to, &self.board) {
            trace!("refused {} move {mv}", self.turn);
            return Vec::new();
        }

        self.commit(piece, mv)
    }

    fn commit(&mut self, piece: Piece, mv: Move) -> Vec<Event> {
        let mut events = Vec::new();

        let captured = self.board.remove(mv.to);
        let check = check::would_check(&mut self.board, &piece, mv.to);
        let (moved, _) = self.board.play(mv);

        self.selected = None;
        self.history.push((mv, captured));
        self.turn = self.turn.opponent();
        self.check = check.then_some(moved.side.opponent());

        debug!(
            "{} played {mv}{}{}",
            moved,
            captured.map(|piece| format!(" capturing {piece}")).unwrap_or_default(),
            if check { " with check" } else { "" }
        );

        events.push(Event::PieceMoved {
            piece: moved,
            from: mv.from,
            to: mv.to,
            captured,
        });

        if let Some(captured) = captured {
            events.push(Event::PieceCaptured { piece: captured, by: moved });
        }

        if let Some(side) = self.check {
            events.push(Event::CheckDeclared { side });
        }

        self.outcome = match (self.board.find_general(Side::Red), self.board.find_general(Side::Black)) {
            (None, _) => Some(Outcome::BlackWon),
            (_, None) => Some(Outcome::RedWon),
            _ => None,
        };

        if let Some(outcome) = self.outcome {
            info!(
                "game over after {} moves with {} pieces left: {outcome}",
                self.history.len(),
                self.board.piece_count()
            );
            events.push(Event::GameOver {
                winner: outcome.winner(),
            });
        }

        events
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display + use<'_> {
        struct Impl<'a>(&'a Game, DisplayFormat);
        return Impl(self, format);

        impl Impl<'_> {
            fn format_row(&self, f: &mut Formatter<'_>, y: i8) -> std::fmt::Result {
                let &Self(game, format) = self;
                let last = game.history.last().map(|&(mv, _)| mv);
                write!(f, "{y}")?;

                for x in 0..Board::WIDTH {
                    let location = Location::from_xy(x, y).unwrap();
                    let Some(piece) = game.board[location] else {
                        if last.is_some_and(|mv| mv.from == location) {
                            write!(f, " ╶╴")?;
                        } else {
                            write!(f, " · ")?;
                        }
                        continue;
                    };

                    let label = piece.display(format.with_concise(true));
                    let selected = game.selected == Some(location);
                    match (format.effects, selected) {
                        (true, true) => write!(f, " \x1B[7m{label}\x1B[0m")?,
                        (false, true) => write!(f, ">{label}")?,
                        (true, false) if last.is_some_and(|mv| mv.to == location) => {
                            write!(f, " \x1B[3m{label}\x1B[0m")?
                        }
                        _ => write!(f, " {label}")?,
                    }
                }

                Ok(())
            }

            fn format_captured(&self, f: &mut Formatter<'_>, row: usize) -> std::fmt::Result {
                let &Self(game, format) = self;
                if game.history.iter().all(|(_, capture)| capture.is_none()) {
                    return Ok(());
                }

                // each side's losses fill columns top to bottom, red columns first
                const ROWS: usize = Board::HEIGHT as usize + 1;
                write!(f, " │   ")?;

                for side in [Side::Red, Side::Black] {
                    let lost: Vec<Piece> = game
                        .history
                        .iter()
                        .filter_map(|&(_, capture)| capture)
                        .filter(|piece| piece.side == side)
                        .collect();

                    for column in 0..lost.len().div_ceil(ROWS) {
                        match lost.get(column * ROWS + row) {
                            Some(piece) => write!(f, "{} ", piece.display(format.with_concise(true)))?,
                            None => write!(f, "   ")?,
                        }
                    }
                }

                Ok(())
            }
        }

        impl Display for Impl<'_> {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                let &Self(game, format) = self;
                write!(f, "{}", game.board.fen())?;

                if format.concise {
                    return write!(f, " {}", game.turn.display(format.with_chinese(false).with_effects(false)));
                }

                writeln!(f)?;

                for y in 0..Board::HEIGHT {
                    self.format_row(f, y)?;
                    self.format_captured(f, y as usize)?;
                    writeln!(f)?;
                }

                write!(f, " ")?;
                for char in 'a'..='i' {
                    write!(f, " {char} ")?;
                }
                self.format_captured(f, Board::HEIGHT as usize)?;
                writeln!(f)?;

                if let Some(&(mv, _)) = game.history.last() {
                    let piece = game.board[mv.to].unwrap().display(format.with_concise(true));
                    write!(f, "({}) {} {piece} - ", game.history.len(), mv)?;
                }

                if let Some(outcome) = game.outcome {
                    write!(f, "{}", outcome.display(format))?;
                } else {
                    let general = Piece::new(PieceKind::General, game.turn, Location::new());
                    let check = game.check == Some(game.turn);
                    write!(
                        f,
                        "{} {}",
                        general.display(format),
                        if check { "in check" } else { "to play" }
                    )?;

                    if let Some(piece) = game.selected() {
                        write!(f, " - selected {} at {}", piece.display(format.with_concise(true)), piece.location)?;
                    }
                }

                writeln!(f)
            }
        }
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::string()))
    }
}
