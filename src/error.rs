use thiserror::Error;

use crate::models::{player::PlayerId, vote::VoteCategory};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("player {0} already joined")]
    AlreadyJoined(PlayerId),
    #[error("the game is already running")]
    GameAlreadyRunning,
    #[error("the game is not running")]
    NotRunning,
    #[error("player {0} has not joined the game")]
    UnknownPlayer(PlayerId),
    #[error("{0} is not a valid vote target")]
    InvalidVoteTarget(PlayerId),
    #[error("player {0} already voted this round")]
    AlreadyVoted(PlayerId),
    #[error("this is not a voting phase")]
    NotAVotingPhase,
    #[error("player {0} cannot vote right now")]
    CannotVoteNow(PlayerId),
    #[error("the {0} has no unique winner")]
    NoUniqueWinner(VoteCategory),
    #[error("vote winner {0} is already dead")]
    WinnerAlreadyDead(PlayerId),
}

impl GameError {
    /// Mistakes of the caller. Report them to the acting user and move on.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            GameError::AlreadyJoined(_)
                | GameError::GameAlreadyRunning
                | GameError::NotRunning
                | GameError::UnknownPlayer(_)
                | GameError::InvalidVoteTarget(_)
                | GameError::AlreadyVoted(_)
                | GameError::NotAVotingPhase
                | GameError::CannotVoteNow(_)
        )
    }

    /// Broken engine bookkeeping; the game instance should be discarded.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::WinnerAlreadyDead(_))
    }
}
