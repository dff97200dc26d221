use serde::{Deserialize, Serialize};
use std::fmt;

use super::{player::PlayerId, role::Role};

/// Which group's ballot a vote belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteCategory {
    DayVote,
    MafiaVote,
    CopVote,
}

impl fmt::Display for VoteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteCategory::DayVote => write!(f, "day vote"),
            VoteCategory::MafiaVote => write!(f, "mafia vote"),
            VoteCategory::CopVote => write!(f, "cop vote"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteOutcome {
    /// The ballot was recorded; the round is still open.
    Underway,
    /// One sub-phase resolved, the phase has not advanced.
    RoundFinished,
    /// Every sub-phase of the phase resolved and the game cycled.
    AllSubphasesFinished,
    /// Tie at the top of the tally. The group's ballots were cleared for a revote.
    FailedNoUniqueWinner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsequenceKind {
    VillagerKill,
    MafiaKill,
    /// The cops learned the target's role.
    Lookup { role: Role },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consequence {
    pub kind: ConsequenceKind,
    pub target: PlayerId,
}

/// Second resolution produced by the same call, only when the Cop ballot
/// closes the night while a finished Mafia ballot was waiting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelResolution {
    pub category: VoteCategory,
    pub outcome: VoteOutcome,
    pub consequence: Option<Consequence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResolution {
    pub voter: PlayerId,
    pub target: PlayerId,
    pub category: VoteCategory,
    pub outcome: VoteOutcome,
    pub consequence: Option<Consequence>,
    pub parallel: Option<ParallelResolution>,
}

impl VoteResolution {
    pub(crate) fn underway(voter: PlayerId, target: PlayerId, category: VoteCategory) -> Self {
        Self {
            voter,
            target,
            category,
            outcome: VoteOutcome::Underway,
            consequence: None,
            parallel: None,
        }
    }

    /// Every consequence carried by this resolution, primary first.
    pub fn consequences(&self) -> impl Iterator<Item = &Consequence> {
        self.consequence
            .iter()
            .chain(self.parallel.iter().flat_map(|p| p.consequence.iter()))
    }
}
