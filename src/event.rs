use crate::location::Location;
use crate::piece::{Piece, Side};

/// Notifications for the renderer and narration. They carry no return channel.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Event {
    /// `piece` is the moved piece at its new location.
    PieceMoved {
        piece: Piece,
        from: Location,
        to: Location,
        captured: Option<Piece>,
    },
    PieceCaptured {
        piece: Piece,
        by: Piece,
    },
    /// `side` is the side whose general is threatened.
    CheckDeclared {
        side: Side,
    },
    GameOver {
        winner: Side,
    },
    Restarted,
}
