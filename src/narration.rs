//! Short spoken-style announcements built from game events.

use crate::display_format::DisplayFormat;
use crate::event::Event;
use crate::piece::{Piece, PieceKind, Side};

const CENTRE_FILE: i8 = 4;

/// Describes one batch of events, as returned by a single committed move or restart.
/// Returns `None` when there is nothing worth saying.
pub fn announce(events: &[Event], format: DisplayFormat) -> Option<String> {
    let format = format.with_effects(false);
    let mut moved = None;
    let mut check = false;
    let mut winner = None;

    for event in events {
        match *event {
            Event::PieceMoved { piece, captured, .. } => moved = Some((piece, captured)),
            Event::CheckDeclared { .. } => check = true,
            Event::GameOver { winner: side } => winner = Some(side),
            Event::PieceCaptured { .. } => {}
            Event::Restarted => return Some(restarted(format)),
        }
    }

    let mut text = moved.map(|(piece, captured)| describe_move(piece, captured, check, format));

    if let Some(winner) = winner {
        let victory = victory(winner, format);
        text = Some(match text {
            Some(text) => format!("{text}{}{victory}", if format.chinese { "，" } else { ". " }),
            None => victory,
        });
    }

    text
}

fn describe_move(piece: Piece, captured: Option<Piece>, check: bool, format: DisplayFormat) -> String {
    let name = piece.name(format);
    let target = captured.map(|captured| captured.name(format));
    let chinese = format.chinese;

    if check {
        return match (target, chinese) {
            (Some(target), true) => format!("{name}吃{target}，将军"),
            (Some(target), false) => format!("{name} captures {target}, check"),
            (None, true) => format!("{name}，将军"),
            (None, false) => format!("{name}, check"),
        };
    }

    let position = if chinese {
        piece.location.chinese_name()
    } else {
        piece.location.to_string()
    };

    match (piece.kind, target, chinese) {
        (PieceKind::Cannon, _, true) if piece.location.x() == CENTRE_FILE => "当门炮".to_owned(),
        (PieceKind::Cannon, _, false) if piece.location.x() == CENTRE_FILE => "central cannon".to_owned(),
        (PieceKind::Cannon, Some(target), true) => format!("{name}打{target}"),
        (PieceKind::Cannon, Some(target), false) => format!("{name} strikes {target}"),
        (PieceKind::Horse, Some(target), true) => format!("{name}踏{target}"),
        (PieceKind::Horse, Some(target), false) => format!("{name} tramples {target}"),
        (_, Some(target), true) => format!("{name}吃{target}"),
        (_, Some(target), false) => format!("{name} captures {target}"),
        (_, None, true) => format!("{name}走{position}"),
        (_, None, false) => format!("{name} to {position}"),
    }
}

fn victory(winner: Side, format: DisplayFormat) -> String {
    if format.chinese {
        format!("{}胜利", winner.display(format))
    } else {
        format!("{} wins", winner.display(format))
    }
}

fn restarted(format: DisplayFormat) -> String {
    if format.chinese { "新局开始".to_owned() } else { "new game".to_owned() }
}
