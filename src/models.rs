pub mod config;
pub mod game;
pub mod player;
pub mod role;
pub mod rule;
pub mod vote;

pub use config::Config;
pub use game::{Faction, Game, GameStatus};
pub use player::{DeathCause, Player, PlayerId, PlayerStatus};
pub use role::Role;
pub use rule::{RoleCounts, Rule};
pub use vote::{
    Consequence, ConsequenceKind, ParallelResolution, VoteCategory, VoteOutcome, VoteResolution,
};
