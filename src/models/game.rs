use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    player::{Player, PlayerId},
    role::Role,
    rule::{RoleCounts, Rule},
};
use crate::error::GameError;
use crate::services::role_assignment;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    NotRunning,
    NightTalk,
    NightVote,
    DayTalk,
    DayVote,
}

impl GameStatus {
    /// The phase `cycle` moves to. `DayVote` wraps around to a new night.
    pub fn next(self) -> GameStatus {
        match self {
            GameStatus::NotRunning => GameStatus::NightTalk,
            GameStatus::NightTalk => GameStatus::NightVote,
            GameStatus::NightVote => GameStatus::DayTalk,
            GameStatus::DayTalk => GameStatus::DayVote,
            GameStatus::DayVote => GameStatus::NightTalk,
        }
    }

    pub fn is_voting(self) -> bool {
        matches!(self, GameStatus::NightVote | GameStatus::DayVote)
    }

    pub fn is_night(self) -> bool {
        matches!(self, GameStatus::NightTalk | GameStatus::NightVote)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::NotRunning => write!(f, "not running"),
            GameStatus::NightTalk => write!(f, "night (talk)"),
            GameStatus::NightVote => write!(f, "night (vote)"),
            GameStatus::DayTalk => write!(f, "day (talk)"),
            GameStatus::DayVote => write!(f, "day (vote)"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Villagers,
    Mafia,
}

/// One game instance. Every call must be serialized by the owner, see
/// [`crate::state::AppState`] for a shared handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub(crate) status: GameStatus,
    pub(crate) players: Vec<Player>,
    pub(crate) rule: Rule,
    pub(crate) mafia_vote_finished: bool,
    pub(crate) cop_vote_finished: bool,
    pub(crate) day_vote_finished: bool,
    pub(crate) counts: RoleCounts,
    pub(crate) round: u32,
    pub(crate) games_started: u64,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_rule(Rule::default())
    }

    pub fn with_rule(rule: Rule) -> Self {
        Game {
            status: GameStatus::NotRunning,
            players: Vec::new(),
            rule,
            mafia_vote_finished: false,
            cop_vote_finished: false,
            day_vote_finished: false,
            counts: RoleCounts::default(),
            round: 0,
            games_started: 0,
        }
    }

    pub fn join(&mut self, id: PlayerId, name: impl Into<String>) -> Result<Player, GameError> {
        if self.player(id).is_some() {
            return Err(GameError::AlreadyJoined(id));
        }
        if self.status != GameStatus::NotRunning {
            return Err(GameError::GameAlreadyRunning);
        }

        let player = Player::new(id, name);
        tracing::debug!(player = %player, "player joined");
        self.players.push(player.clone());
        Ok(player)
    }

    /// Assigns roles and enters the first night. The minimum roster size is the
    /// caller's business.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.start_with_rng(&mut rand::thread_rng())
    }

    pub fn start_with_rng<R: Rng>(&mut self, rng: &mut R) -> Result<(), GameError> {
        if self.status != GameStatus::NotRunning {
            return Err(GameError::GameAlreadyRunning);
        }

        self.mafia_vote_finished = false;
        self.cop_vote_finished = false;
        self.day_vote_finished = false;
        self.round = 0;
        self.games_started += 1;
        self.counts = role_assignment::assign_roles(&mut self.players, &self.rule, rng);
        for p in self.players.iter_mut() {
            p.mark_alive();
        }
        self.cycle();

        tracing::info!(
            players = self.players.len(),
            mafia = self.counts.mafia,
            cop = self.counts.cop,
            villager = self.counts.villager,
            "game started"
        );
        Ok(())
    }

    /// Ends the game and truncates the roster.
    pub fn stop(&mut self) -> Result<(), GameError> {
        if self.status == GameStatus::NotRunning {
            return Err(GameError::NotRunning);
        }
        self.reset();
        tracing::info!("game stopped");
        Ok(())
    }

    /// Advances to the next phase without looking at any ballot.
    ///
    /// Ballots that did not resolve before the call are discarded, including a
    /// finished Mafia ballot still waiting on the Cop.
    /// Phase timers go through `timeout` instead.
    pub fn cycle(&mut self) {
        let from = self.status;
        self.status = from.next();
        if from == GameStatus::DayVote {
            self.round += 1;
        }

        self.mafia_vote_finished = false;
        self.cop_vote_finished = false;
        self.day_vote_finished = false;
        for p in self.players.iter_mut() {
            p.clear_vote();
        }

        tracing::info!(%from, to = %self.status, round = self.round, "phase changed");
    }

    fn reset(&mut self) {
        self.status = GameStatus::NotRunning;
        self.players.clear();
        self.mafia_vote_finished = false;
        self.cop_vote_finished = false;
        self.day_vote_finished = false;
        self.counts = RoleCounts::default();
        self.round = 0;
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status != GameStatus::NotRunning
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    /// Head-counts fixed at the last `start`.
    pub fn role_counts(&self) -> RoleCounts {
        self.counts
    }

    pub fn mafia_total(&self) -> usize {
        self.counts.mafia
    }

    pub fn cop_total(&self) -> usize {
        self.counts.cop
    }

    pub fn villager_total(&self) -> usize {
        self.counts.villager
    }

    /// Completed night and day loops.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// How many times `start` succeeded on this instance. Survives `stop`.
    pub fn games_started(&self) -> u64 {
        self.games_started
    }

    pub fn mafia_vote_finished(&self) -> bool {
        self.mafia_vote_finished
    }

    pub fn cop_vote_finished(&self) -> bool {
        self.cop_vote_finished
    }

    pub fn day_vote_finished(&self) -> bool {
        self.day_vote_finished
    }

    /// The winning side, if the game is decided. The engine never stops
    /// itself; the caller reacts to this with `stop`.
    pub fn winner(&self) -> Option<Faction> {
        if !self.is_running() {
            return None;
        }
        let (mafia, others): (Vec<&Player>, Vec<&Player>) =
            self.alive_players().partition(|p| p.role() == Role::Mafia);
        if mafia.is_empty() {
            Some(Faction::Villagers)
        } else if others.is_empty() {
            Some(Faction::Mafia)
        } else {
            None
        }
    }

    pub(crate) fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }
}
