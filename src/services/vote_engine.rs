//! Ballot intake, quorum checks and round resolution.

use tracing::{debug, info};

use crate::error::GameError;
use crate::models::{
    game::{Game, GameStatus},
    player::{DeathCause, Player, PlayerId},
    role::Role,
    vote::{
        Consequence, ConsequenceKind, ParallelResolution, VoteCategory, VoteOutcome,
        VoteResolution,
    },
};

impl Game {
    /// Records `actor`'s ballot against `target` and resolves the round once
    /// its quorum is met.
    ///
    /// A tie is not an error here: it comes back as
    /// [`VoteOutcome::FailedNoUniqueWinner`] with the group's ballots cleared.
    pub fn vote(
        &mut self,
        actor: PlayerId,
        target: PlayerId,
    ) -> Result<VoteResolution, GameError> {
        let target_i = self
            .index_of(target)
            .ok_or(GameError::InvalidVoteTarget(target))?;
        if self.players[target_i].is_dead() {
            return Err(GameError::InvalidVoteTarget(target));
        }
        let actor_i = self.index_of(actor).ok_or(GameError::UnknownPlayer(actor))?;
        let voter = &self.players[actor_i];
        if voter.last_vote().is_some() {
            return Err(GameError::AlreadyVoted(actor));
        }

        let category = match self.status {
            GameStatus::DayVote if voter.is_alive() => VoteCategory::DayVote,
            GameStatus::DayVote => return Err(GameError::CannotVoteNow(actor)),
            GameStatus::NightVote => match voter.role() {
                Role::Mafia if voter.is_alive() && !self.mafia_vote_finished => {
                    VoteCategory::MafiaVote
                }
                Role::Cop if voter.is_alive() && !self.cop_vote_finished => VoteCategory::CopVote,
                _ => return Err(GameError::CannotVoteNow(actor)),
            },
            _ => return Err(GameError::NotAVotingPhase),
        };

        self.players[actor_i].cast_vote(target);
        debug!(%actor, %target, %category, "vote recorded");

        let mut resolution = VoteResolution::underway(actor, target, category);
        match category {
            VoteCategory::DayVote => self.close_day(&mut resolution)?,
            VoteCategory::MafiaVote => self.close_mafia(&mut resolution)?,
            VoteCategory::CopVote => self.close_cop(&mut resolution)?,
        }
        Ok(resolution)
    }

    /// Whether every living member of the group has voted. A group that
    /// already finished this round counts as complete.
    pub fn check_votes(&self, category: VoteCategory) -> bool {
        let finished = match category {
            VoteCategory::DayVote => self.day_vote_finished,
            VoteCategory::MafiaVote => self.mafia_vote_finished,
            VoteCategory::CopVote => self.cop_vote_finished,
        };
        if finished {
            return true;
        }

        let complete = self
            .players
            .iter()
            .filter(|p| p.is_alive() && in_group(p, category))
            .all(|p| p.last_vote().is_some());
        if complete {
            debug!(%category, "votes complete");
        }
        complete
    }

    fn close_day(&mut self, resolution: &mut VoteResolution) -> Result<(), GameError> {
        if !self.check_votes(VoteCategory::DayVote) {
            return Ok(());
        }

        match settle(self.execute_votes(VoteCategory::DayVote))? {
            Some(consequence) => {
                resolution.outcome = VoteOutcome::AllSubphasesFinished;
                resolution.consequence = Some(consequence);
                self.cycle();
            }
            None => resolution.outcome = VoteOutcome::FailedNoUniqueWinner,
        }
        Ok(())
    }

    // The kill is held back until the cops are done, unless no cop is left
    // alive to wait for.
    fn close_mafia(&mut self, resolution: &mut VoteResolution) -> Result<(), GameError> {
        if !self.check_votes(VoteCategory::MafiaVote) {
            return Ok(());
        }

        let cops_alive = self.alive_players().any(|p| p.role() == Role::Cop);
        if !self.cop_vote_finished && cops_alive {
            self.mafia_vote_finished = true;
            debug!("mafia vote finished, waiting for cops");
            return Ok(());
        }

        match settle(self.execute_votes(VoteCategory::MafiaVote))? {
            Some(consequence) => {
                resolution.outcome = VoteOutcome::AllSubphasesFinished;
                resolution.consequence = Some(consequence);
                self.cycle();
            }
            None => resolution.outcome = VoteOutcome::FailedNoUniqueWinner,
        }
        Ok(())
    }

    fn close_cop(&mut self, resolution: &mut VoteResolution) -> Result<(), GameError> {
        if !self.check_votes(VoteCategory::CopVote) {
            return Ok(());
        }

        let Some(lookup) = settle(self.execute_votes(VoteCategory::CopVote))? else {
            resolution.outcome = VoteOutcome::FailedNoUniqueWinner;
            return Ok(());
        };
        resolution.outcome = VoteOutcome::RoundFinished;
        resolution.consequence = Some(lookup);

        if self.mafia_vote_finished {
            debug!("parallel vote initiated");
            let kill = settle(self.execute_votes(VoteCategory::MafiaVote))?;
            let outcome = if kill.is_some() {
                VoteOutcome::AllSubphasesFinished
            } else {
                VoteOutcome::FailedNoUniqueWinner
            };
            resolution.parallel = Some(ParallelResolution {
                category: VoteCategory::MafiaVote,
                outcome,
                consequence: kill,
            });
            if kill.is_some() {
                resolution.outcome = VoteOutcome::AllSubphasesFinished;
                self.cycle();
            }
        }
        Ok(())
    }

    /// Ends the current phase because its time ran out.
    ///
    /// Unlike a bare `cycle`, a Mafia ballot that reached quorum and was only
    /// waiting on the cops is carried out first. If that ballot ties it is
    /// dropped along with every other pending ballot.
    pub fn timeout(&mut self) -> Result<Option<Consequence>, GameError> {
        if !self.is_running() {
            return Err(GameError::NotRunning);
        }

        let mut kill = None;
        if self.status == GameStatus::NightVote && self.mafia_vote_finished {
            debug!("night timed out with a finished mafia vote");
            kill = settle(self.execute_votes(VoteCategory::MafiaVote))?;
        }
        self.cycle();
        Ok(kill)
    }

    /// Tallies the group's ballots and applies the result.
    ///
    /// Ballots of every group member are cleared whatever the outcome, and the
    /// group's finished flag ends up true only on a unique winner.
    pub(crate) fn execute_votes(
        &mut self,
        category: VoteCategory,
    ) -> Result<Consequence, GameError> {
        let ballots: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.is_alive() && in_group(p, category))
            .filter_map(|p| p.last_vote())
            .collect();
        let winner = self.most_common_vote(&ballots);

        for p in self.players.iter_mut().filter(|p| in_group(p, category)) {
            p.clear_vote();
        }
        self.set_vote_finished(category, false);

        let Some(winner_i) = winner else {
            info!(%category, ballots = ballots.len(), "no unique winner, revote");
            return Err(GameError::NoUniqueWinner(category));
        };

        let target = self.players[winner_i].id();
        let kind = match category {
            VoteCategory::DayVote => ConsequenceKind::VillagerKill,
            VoteCategory::MafiaVote => ConsequenceKind::MafiaKill,
            VoteCategory::CopVote => ConsequenceKind::Lookup {
                role: self.players[winner_i].role(),
            },
        };
        let cause = match kind {
            ConsequenceKind::VillagerKill => Some(DeathCause::VillagerKill),
            ConsequenceKind::MafiaKill => Some(DeathCause::MafiaKill),
            ConsequenceKind::Lookup { .. } => None,
        };
        if let Some(cause) = cause {
            if self.players[winner_i].is_dead() {
                return Err(GameError::WinnerAlreadyDead(target));
            }
            self.players[winner_i].kill(cause);
        }

        self.set_vote_finished(category, true);
        info!(%category, %target, ?kind, "vote executed");
        Ok(Consequence { kind, target })
    }

    /// Roster index of the single most voted target, `None` on a tie or when
    /// nobody voted.
    pub(crate) fn most_common_vote(&self, ballots: &[PlayerId]) -> Option<usize> {
        let mut tally = vec![0usize; self.players.len()];
        for target in ballots {
            if let Some(i) = self.index_of(*target) {
                tally[i] += 1;
            }
        }

        let max = tally.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return None;
        }
        let mut leaders = tally
            .iter()
            .enumerate()
            .filter(|(_, count)| **count == max)
            .map(|(i, _)| i);
        match (leaders.next(), leaders.next()) {
            (Some(i), None) => Some(i),
            _ => None,
        }
    }

    fn set_vote_finished(&mut self, category: VoteCategory, finished: bool) {
        match category {
            VoteCategory::DayVote => self.day_vote_finished = finished,
            VoteCategory::MafiaVote => self.mafia_vote_finished = finished,
            VoteCategory::CopVote => self.cop_vote_finished = finished,
        }
    }
}

fn in_group(player: &Player, category: VoteCategory) -> bool {
    match category {
        VoteCategory::DayVote => true,
        VoteCategory::MafiaVote => player.role() == Role::Mafia,
        VoteCategory::CopVote => player.role() == Role::Cop,
    }
}

// Turns a tie into `None`, everything else passes through.
fn settle(result: Result<Consequence, GameError>) -> Result<Option<Consequence>, GameError> {
    match result {
        Ok(consequence) => Ok(Some(consequence)),
        Err(GameError::NoUniqueWinner(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
