use crate::board::Board;
use crate::location::{Location, Move};
use crate::piece::{Piece, Side};
use crate::rules;
use log::trace;
use rand::Rng;
use rand::seq::IndexedRandom;

/// How the automated side picks its move. Neither strategy evaluates positions.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Strategy {
    /// Draw a random own piece and a random point, keep the first legal pair.
    /// Gives up after `attempts` draws.
    Sample { attempts: u32 },
    /// Enumerate every legal move and pick one uniformly.
    Enumerate,
}

impl Strategy {
    pub const DEFAULT_ATTEMPTS: u32 = 100;

    pub fn select<R: Rng + ?Sized>(&self, board: &Board, side: Side, rng: &mut R) -> Option<Move> {
        match *self {
            Self::Sample { attempts } => sample_move(board, side, attempts, rng),
            Self::Enumerate => legal_moves(board, side).collect::<Vec<_>>().choose(rng).copied(),
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Sample {
            attempts: Self::DEFAULT_ATTEMPTS,
        }
    }
}

/// Bounded random sampling. Returns `None` when no draw was legal, even if legal moves exist.
pub fn sample_move<R: Rng + ?Sized>(board: &Board, side: Side, attempts: u32, rng: &mut R) -> Option<Move> {
    let pieces: Vec<&Piece> = board.iter_side(side).collect();
    if pieces.is_empty() {
        return None;
    }

    for attempt in 0..attempts {
        let piece = pieces[rng.random_range(0..pieces.len())];
        let dest = Location::from_xy(
            rng.random_range(0..Board::WIDTH),
            rng.random_range(0..Board::HEIGHT),
        )?;

        if rules::is_legal(piece, dest, board) {
            trace!("sampled {} to {dest} after {} attempts", piece, attempt + 1);
            return Some(Move { from: piece.location, to: dest });
        }
    }

    trace!("no legal {side} move found in {attempts} attempts");
    None
}

/// Every move the rule engine accepts for `side`, piece by piece in board order.
pub fn legal_moves(board: &Board, side: Side) -> impl Iterator<Item = Move> + '_ {
    board.iter_side(side).flat_map(move |piece| {
        rules::legal_destinations(piece, board).map(move |to| Move { from: piece.location, to })
    })
}
