use serde::{Deserialize, Serialize};
use std::fmt;

use super::role::Role;

/// Stable identity assigned by the caller, e.g. a chat platform account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        PlayerId(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Joined,
    Alive,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    VillagerKill,
    MafiaKill,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    role: Role,
    status: PlayerStatus,
    last_vote: Option<PlayerId>,
    death_cause: Option<DeathCause>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: Role::Unassigned,
            status: PlayerStatus::Joined,
            last_vote: None,
            death_cause: None,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn last_vote(&self) -> Option<PlayerId> {
        self.last_vote
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death_cause
    }

    pub fn is_alive(&self) -> bool {
        self.status == PlayerStatus::Alive
    }

    pub fn is_dead(&self) -> bool {
        self.status == PlayerStatus::Dead
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
        tracing::debug!(player = %self.id, %role, "role changed");
    }

    pub(crate) fn mark_alive(&mut self) {
        self.status = PlayerStatus::Alive;
        self.death_cause = None;
        self.last_vote = None;
    }

    pub(crate) fn cast_vote(&mut self, target: PlayerId) {
        self.last_vote = Some(target);
    }

    pub(crate) fn clear_vote(&mut self) {
        self.last_vote = None;
    }

    pub(crate) fn kill(&mut self, cause: DeathCause) {
        self.status = PlayerStatus::Dead;
        self.death_cause = Some(cause);
        tracing::debug!(player = %self.id, ?cause, "player killed");
    }
}

// Two records describe the same player whenever their ids match.
impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
