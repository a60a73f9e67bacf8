//! Per-kind movement legality.
//!
//! A move is judged in isolation: the rules below do not look at whether the mover's own
//! general is left exposed. Every check is a plain boolean so callers never learn *why* a
//! destination was refused.

use crate::board::Board;
use crate::location::Location;
use crate::piece::{Piece, PieceKind, Side};

/// Whether `piece` may move onto `dest` on `board`.
pub fn is_legal(piece: &Piece, dest: Location, board: &Board) -> bool {
    if let Some(target) = board.occupant(dest)
        && target.side == piece.side
    {
        return false;
    }

    let from = piece.location;
    match piece.kind {
        PieceKind::Chariot => chariot(from, dest, board),
        PieceKind::Horse => horse(from, dest, board),
        PieceKind::Elephant => elephant(piece.side, from, dest, board),
        PieceKind::Advisor => advisor(piece.side, from, dest),
        PieceKind::General => general(piece.side, from, dest),
        PieceKind::Cannon => cannon(from, dest, board),
        PieceKind::Soldier => soldier(piece.side, from, dest),
    }
}

/// Every destination the rule engine accepts for `piece`.
pub fn legal_destinations<'a>(piece: &'a Piece, board: &'a Board) -> impl Iterator<Item = Location> + 'a {
    Location::iter_all().filter(move |&dest| is_legal(piece, dest, board))
}

fn chariot(from: Location, dest: Location, board: &Board) -> bool {
    from.is_straight(dest) && board.is_path_clear(from, dest)
}

fn horse(from: Location, dest: Location, board: &Board) -> bool {
    let (dx, dy) = from.delta(dest);
    let leg = match (dx.abs(), dy.abs()) {
        (2, 1) => from.shift_x(dx.signum()),
        (1, 2) => from.shift_y(dy.signum()),
        _ => return false,
    };
    leg.is_some_and(|leg| board[leg].is_none())
}

fn elephant(side: Side, from: Location, dest: Location, board: &Board) -> bool {
    let (dx, dy) = from.delta(dest);
    if dx.abs() != 2 || dy.abs() != 2 || !side.on_own_half(dest) {
        return false;
    }
    let eye = from.shift_xy(dx / 2, dy / 2);
    eye.is_some_and(|eye| board[eye].is_none())
}

fn advisor(side: Side, from: Location, dest: Location) -> bool {
    let (dx, dy) = from.delta(dest);
    dx.abs() == 1 && dy.abs() == 1 && side.in_palace(dest)
}

fn general(side: Side, from: Location, dest: Location) -> bool {
    let (dx, dy) = from.delta(dest);
    dx.abs() + dy.abs() == 1 && side.in_palace(dest)
}

fn cannon(from: Location, dest: Location, board: &Board) -> bool {
    if !from.is_straight(dest) {
        return false;
    }

    // capturing needs exactly one screen, a quiet move needs none
    let screens = board.count_between(from, dest);
    if board[dest].is_some() { screens == 1 } else { screens == 0 }
}

fn soldier(side: Side, from: Location, dest: Location) -> bool {
    let (dx, dy) = from.delta(dest);
    let advance = dx == 0 && dy == side.forward();
    let crossed = !side.on_own_half(from);
    advance || (crossed && dx.abs() == 1 && dy == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: i8, y: i8) -> Location {
        Location::from_xy(x, y).unwrap()
    }

    fn legal(board: &Board, from: Location, to: Location) -> bool {
        is_legal(board.occupant(from).unwrap(), to, board)
    }

    #[test]
    fn never_captures_own_side() {
        let board = Board::opening();
        for piece in board.iter_pieces() {
            for dest in Location::iter_all() {
                if board.occupant(dest).is_some_and(|target| target.side == piece.side) {
                    assert!(!is_legal(piece, dest, &board), "{piece:?} -> {dest}");
                }
            }
        }
    }

    #[test]
    fn chariot_needs_clear_line() {
        let board = Board::from_fen("4k4/9/9/9/9/9/R3p4/9/9/4K4").unwrap();
        assert!(legal(&board, at(0, 6), at(0, 0)));
        assert!(legal(&board, at(0, 6), at(3, 6)));
        assert!(legal(&board, at(0, 6), at(4, 6)));
        assert!(!legal(&board, at(0, 6), at(5, 6)));
        assert!(!legal(&board, at(0, 6), at(1, 5)));
    }

    #[test]
    fn horse_leg_blocks_jump() {
        let board = Board::opening();
        assert!(legal(&board, at(1, 9), at(2, 7)));
        assert!(legal(&board, at(1, 9), at(0, 7)));
        // leg at c9 holds the elephant
        assert!(!legal(&board, at(1, 9), at(3, 8)));
        assert!(!legal(&board, at(1, 9), at(1, 7)));

        let board = Board::from_fen("4k4/9/9/9/9/9/9/2P6/2H6/4K4").unwrap();
        assert!(!legal(&board, at(2, 8), at(1, 6)));
        assert!(!legal(&board, at(2, 8), at(3, 6)));
        assert!(legal(&board, at(2, 8), at(0, 7)));
        assert!(legal(&board, at(2, 8), at(4, 7)));
    }

    #[test]
    fn elephant_stays_home_and_respects_eye() {
        let board = Board::from_fen("4k4/9/9/9/9/2E6/9/9/9/4K4").unwrap();
        assert!(!legal(&board, at(2, 5), at(0, 3)));
        assert!(!legal(&board, at(2, 5), at(4, 3)));
        assert!(legal(&board, at(2, 5), at(0, 7)));
        assert!(legal(&board, at(2, 5), at(4, 7)));
        assert!(!legal(&board, at(2, 5), at(3, 6)));

        let board = Board::from_fen("4k4/9/9/9/9/2E6/3p5/9/9/4K4").unwrap();
        assert!(!legal(&board, at(2, 5), at(4, 7)));

        let board = Board::from_fen("4k4/9/9/9/6e2/9/9/9/9/4K4").unwrap();
        assert!(!legal(&board, at(6, 4), at(4, 6)));
        assert!(legal(&board, at(6, 4), at(4, 2)));
    }

    #[test]
    fn advisor_and_general_stay_in_palace() {
        let board = Board::from_fen("3k5/9/9/9/9/9/9/3A5/9/4K4").unwrap();
        assert!(legal(&board, at(3, 7), at(4, 8)));
        assert!(!legal(&board, at(3, 7), at(2, 6)));
        assert!(!legal(&board, at(3, 7), at(2, 8)));
        assert!(!legal(&board, at(3, 7), at(3, 8)));

        assert!(legal(&board, at(4, 9), at(4, 8)));
        assert!(legal(&board, at(4, 9), at(5, 9)));
        assert!(!legal(&board, at(4, 9), at(5, 8)));
        assert!(!legal(&board, at(4, 9), at(4, 7)));

        assert!(legal(&board, at(3, 0), at(3, 1)));
        assert!(!legal(&board, at(3, 0), at(2, 0)));
    }

    #[test]
    fn cannon_needs_exactly_one_screen_to_capture() {
        let board = Board::from_fen("4k4/1r7/9/9/9/9/9/1C7/9/4K4").unwrap();
        assert!(!legal(&board, at(1, 7), at(1, 1)));
        assert!(legal(&board, at(1, 7), at(1, 2)));

        let board = Board::from_fen("4k4/1r7/9/1p7/9/9/9/1C7/9/4K4").unwrap();
        assert!(legal(&board, at(1, 7), at(1, 1)));
        assert!(!legal(&board, at(1, 7), at(1, 3)));
        assert!(!legal(&board, at(1, 7), at(1, 2)));

        let board = Board::from_fen("4k4/1r7/9/1p7/9/1P7/9/1C7/9/4K4").unwrap();
        assert!(!legal(&board, at(1, 7), at(1, 1)));
    }

    #[test]
    fn soldier_turns_sideways_only_after_river() {
        let board = Board::from_fen("4k4/9/9/4P4/9/9/2P6/9/9/4K4").unwrap();
        assert!(legal(&board, at(2, 6), at(2, 5)));
        assert!(!legal(&board, at(2, 6), at(1, 6)));
        assert!(!legal(&board, at(2, 6), at(2, 7)));

        assert!(legal(&board, at(4, 3), at(4, 2)));
        assert!(legal(&board, at(4, 3), at(3, 3)));
        assert!(legal(&board, at(4, 3), at(5, 3)));
        assert!(!legal(&board, at(4, 3), at(4, 4)));
        assert!(!legal(&board, at(4, 3), at(4, 1)));

        let board = Board::from_fen("4k4/9/9/4p4/9/9/9/9/9/4K4").unwrap();
        assert!(legal(&board, at(4, 3), at(4, 4)));
        assert!(!legal(&board, at(4, 3), at(4, 2)));
        assert!(!legal(&board, at(4, 3), at(3, 3)));
    }

    #[test]
    fn chariot_destinations_in_the_opening() {
        let board = Board::opening();
        assert_eq!(legal_destinations(board.occupant(at(0, 9)).unwrap(), &board).count(), 2);
    }
}
