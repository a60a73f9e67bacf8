use crate::board::Board;
use crate::location::{Location, Move};
use crate::piece::Piece;
use crate::rules;
use std::ops::Deref;

/// A move applied to a board for the lifetime of the value and reverted when it drops.
struct Simulation<'a> {
    board: &'a mut Board,
    mv: Move,
    capture: Option<Piece>,
}

impl<'a> Simulation<'a> {
    fn new(board: &'a mut Board, mv: Move) -> Self {
        let (_, capture) = board.play(mv);
        Self { board, mv, capture }
    }
}

impl Deref for Simulation<'_> {
    type Target = Board;
    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        self.board.undo(self.mv, self.capture.take());
    }
}

/// Whether `piece`, once moved onto `dest`, could itself capture the opposing general next.
///
/// The attacking side is always `piece.side` and the target is the general of
/// `piece.side.opponent()`. Only the moved piece is considered as the attacker; discovered
/// attacks from other pieces and the safety of the mover's own general are not. The board is
/// left exactly as found.
pub fn would_check(board: &mut Board, piece: &Piece, dest: Location) -> bool {
    if board.occupant(piece.location) != Some(piece) {
        return false;
    }

    let mv = Move { from: piece.location, to: dest };
    let simulation = Simulation::new(board, mv);

    let Some(general) = simulation.find_general(piece.side.opponent()) else {
        return false;
    };
    let Some(moved) = simulation.occupant(dest) else {
        return false;
    };
    rules::is_legal(moved, general.location, &simulation)
}
