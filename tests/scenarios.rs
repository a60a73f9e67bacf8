use std::time::Instant;
use xiangqi::board::Board;
use xiangqi::event::Event;
use xiangqi::game::{Game, Outcome, State};
use xiangqi::location::{Location, Move};
use xiangqi::piece::{PieceKind, Side};
use xiangqi::rules::is_legal;
use xiangqi::session::{Session, SessionConfig};

fn at(x: i8, y: i8) -> Location {
    Location::from_xy(x, y).unwrap()
}

#[test]
fn chariot_runs_up_a_clear_file() {
    // in the opening the red soldier on a6 stands in the way
    let board = Board::opening();
    let chariot = *board.occupant(at(0, 9)).unwrap();
    assert_eq!(chariot.kind, PieceKind::Chariot);
    assert!(!is_legal(&chariot, at(0, 3), &board));

    let mut board = board;
    board.remove(at(0, 6));
    assert!(is_legal(&chariot, at(0, 3), &board));
    assert!(!is_legal(&chariot, at(0, 2), &board));
}

#[test]
fn cannon_capture_needs_one_screen() {
    // opening: b7 cannon, b2 black cannon as screen, b0 black horse as target
    let board = Board::opening();
    let cannon = *board.occupant(at(1, 7)).unwrap();
    assert_eq!(cannon.kind, PieceKind::Cannon);
    assert!(is_legal(&cannon, at(1, 0), &board));

    let mut no_screen = board.clone();
    no_screen.remove(at(1, 2));
    assert!(!is_legal(&cannon, at(1, 0), &no_screen));

    let mut two_screens = board.clone();
    let soldier = *board.occupant(at(0, 6)).unwrap();
    two_screens.remove(at(0, 6));
    two_screens.place(xiangqi::piece::Piece { location: at(1, 5), ..soldier });
    assert!(!is_legal(&cannon, at(1, 0), &two_screens));
}

#[test]
fn capturing_black_general_ends_game_for_red() {
    let mut game = Game::from_fen("4k4/9/9/9/9/9/9/9/9/3KR4", Side::Red).unwrap();

    assert!(game.handle_click(Some(at(4, 9))).is_empty());
    let events = game.handle_click(Some(at(4, 0)));

    assert!(events.contains(&Event::GameOver { winner: Side::Red }));
    assert_eq!(game.state(), State::Terminal(Outcome::RedWon));
    assert!(game.board().find_general(Side::Black).is_none());
}

#[test]
fn restart_after_win_restores_opening() {
    let start = Instant::now();
    let game = Game::from_fen("4k4/9/9/9/9/9/9/9/9/3KR4", Side::Red).unwrap();
    let mut session = Session::with_game(SessionConfig::default(), game, start);

    session.click(Some(at(4, 9)), start);
    session.click(Some(at(4, 0)), start);
    assert!(session.game().is_terminal());

    assert_eq!(session.restart(start), vec![Event::Restarted]);
    let game = session.game();
    assert_eq!(game.board(), &Board::opening());
    assert_eq!(game.board().piece_count(), 32);
    assert_eq!(game.turn(), Side::Red);
    assert_eq!(game.state(), State::Idle);
    assert!(game.history().is_empty());
}

#[test]
fn capturing_red_general_ends_game_for_black() {
    let mut game = Game::from_fen("3rk4/9/9/9/9/9/9/9/9/3K5", Side::Black).unwrap();

    assert!(game.handle_click(Some(at(3, 0))).is_empty());
    let events = game.handle_click(Some(at(3, 9)));

    assert!(events.contains(&Event::GameOver { winner: Side::Black }));
    assert_eq!(game.state(), State::Terminal(Outcome::BlackWon));
    assert!(game.board().find_general(Side::Red).is_none());
}

#[test]
fn black_moves_on_its_own_turn() {
    let mut game = Game::from_fen("4k4/9/9/9/9/9/9/9/9/4K4", Side::Black).unwrap();
    // facing generals are not restricted
    let events = game.play(Move { from: at(4, 0), to: at(4, 1) });
    assert!(matches!(events[0], Event::PieceMoved { .. }));
    assert_eq!(game.turn(), Side::Red);
    assert_eq!(game.outcome(), None);
}

#[test]
fn a_full_exchange_of_moves() {
    let mut game = Game::opening();
    let clicks = [
        (at(7, 7), at(4, 7)), // red cannon to the centre
        (at(7, 0), at(6, 2)), // black horse out
        (at(4, 7), at(4, 3)), // cannon takes the centre soldier
    ];

    for (from, to) in clicks {
        game.handle_click(Some(from));
        assert_eq!(game.state(), State::Selected(from));
        let events = game.handle_click(Some(to));
        assert!(!events.is_empty(), "{from} -> {to}");
    }

    let (mv, capture) = game.history()[2];
    assert_eq!(mv, Move { from: at(4, 7), to: at(4, 3) });
    assert_eq!(capture.map(|piece| piece.kind), Some(PieceKind::Soldier));
    assert_eq!(game.board().piece_count(), 31);
    assert_eq!(game.turn(), Side::Black);
}
