use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::GameError;
use crate::models::{
    config::Config,
    game::{Game, GameStatus},
    vote::Consequence,
};

/// Shared handle for integration code running several tasks against one game.
///
/// The engine itself does no locking; every call goes through this mutex so a
/// vote, a timer-driven timeout and a `stop` can never interleave.
#[derive(Clone)]
pub struct AppState {
    pub game: Arc<Mutex<Game>>,
    pub config: Arc<Config>,
}

/// The position a phase timer waits on.
///
/// `game` changes on every `start`, so a stop and restart between two timer
/// ticks still reads as a new phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseKey {
    pub game: u64,
    pub status: GameStatus,
    pub round: u32,
}

impl PhaseKey {
    pub fn of(game: &Game) -> Self {
        PhaseKey {
            game: game.games_started(),
            status: game.status(),
            round: game.round(),
        }
    }
}

/// A phase that ended on its timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedOut {
    pub ended: GameStatus,
    pub kill: Option<Consequence>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let game = Game::with_rule(config.rule.clone());
        AppState {
            game: Arc::new(Mutex::new(game)),
            config: Arc::new(config),
        }
    }

    /// Runs `f` with exclusive access to the game.
    pub async fn with_game<T>(&self, f: impl FnOnce(&mut Game) -> T) -> T {
        let mut game = self.game.lock().await;
        f(&mut *game)
    }

    pub async fn phase(&self) -> PhaseKey {
        let game = self.game.lock().await;
        PhaseKey::of(&game)
    }

    /// Times out the current phase unless the game moved on since `seen` was
    /// taken, then hands the result to `report` under the same lock.
    ///
    /// Returns `Ok(None)` when nothing happened, so a timeout that fires right
    /// after a vote closed the phase does not skip the next one.
    pub async fn timeout_if_unchanged<T>(
        &self,
        seen: PhaseKey,
        report: impl FnOnce(&mut Game, TimedOut) -> T,
    ) -> Result<Option<T>, GameError> {
        let mut game = self.game.lock().await;
        if !game.is_running() || PhaseKey::of(&game) != seen {
            return Ok(None);
        }
        let ended = game.status();
        let kill = game.timeout()?;
        Ok(Some(report(&mut *game, TimedOut { ended, kill })))
    }
}
