use crate::event::Event;
use crate::game::Game;
use crate::location::Location;
use crate::piece::Side;
use crate::selector::Strategy;
use log::debug;
use rand::Rng;
use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug)]
pub struct SessionConfig {
    /// The side taking board clicks. The other side is played by the selector.
    pub human: Side,
    pub strategy: Strategy,
    /// Pause before the automated side moves.
    pub move_delay: Duration,
    /// Pause between a game ending and the next one starting.
    pub reset_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            human: Side::Red,
            strategy: Strategy::default(),
            move_delay: Duration::from_secs(1),
            reset_delay: Duration::from_secs(3),
        }
    }
}

/// A human against the automated side, one game after another.
///
/// Timers are plain timestamps checked by [`Session::tick`]; nothing is scheduled. Replacing the
/// game on restart drops any pending timer along with it.
pub struct Session {
    config: SessionConfig,
    game: Game,
    last_move: Instant,
    game_over_at: Option<Instant>,
}

impl Session {
    pub fn new(config: SessionConfig, now: Instant) -> Self {
        Self::with_game(config, Game::opening(), now)
    }

    /// Starts from an arbitrary position. Restarts still go back to the opening.
    pub fn with_game(config: SessionConfig, game: Game, now: Instant) -> Self {
        Self {
            config,
            game,
            last_move: now,
            game_over_at: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_human_turn(&self) -> bool {
        !self.game.is_terminal() && self.game.turn() == self.config.human
    }

    /// Passes a board click to the game, but only while the human is to move.
    pub fn click(&mut self, at: Option<Location>, now: Instant) -> Vec<Event> {
        if !self.is_human_turn() {
            return Vec::new();
        }

        let events = self.game.handle_click(at);
        self.record(&events, now);
        events
    }

    /// Advances the timers: restarts a finished game after `reset_delay`, otherwise lets the
    /// automated side move once `move_delay` has passed since the last move. A failed move
    /// search leaves the turn in place for a later tick.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> Vec<Event> {
        if let Some(game_over_at) = self.game_over_at {
            if now.saturating_duration_since(game_over_at) >= self.config.reset_delay {
                return self.restart(now);
            }
            return Vec::new();
        }

        if self.game.turn() == self.config.human
            || now.saturating_duration_since(self.last_move) < self.config.move_delay
        {
            return Vec::new();
        }

        let side = self.game.turn();
        self.last_move = now;

        let Some(mv) = self.config.strategy.select(self.game.board(), side, rng) else {
            debug!("{side} found no move this tick");
            return Vec::new();
        };

        let events = self.game.play(mv);
        self.record(&events, now);
        events
    }

    /// Throws the current game away and starts a fresh one.
    pub fn restart(&mut self, now: Instant) -> Vec<Event> {
        debug!("restarting after {} moves", self.game.history().len());
        self.game = Game::opening();
        self.last_move = now;
        self.game_over_at = None;
        vec![Event::Restarted]
    }

    fn record(&mut self, events: &[Event], now: Instant) {
        if events.is_empty() {
            return;
        }

        self.last_move = now;
        if events.iter().any(|event| matches!(event, Event::GameOver { .. })) {
            self.game_over_at = Some(now);
        }
    }
}
