use serde::{Deserialize, Serialize};

pub const MAFIA_RATIO: f64 = 0.6;
pub const COP_RATIO: f64 = 0.6;
pub const MAFIA_AMOUNTS: [usize; 10] = [0, 1, 1, 1, 2, 2, 2, 3, 3, 3];
pub const COP_AMOUNTS: [usize; 10] = [0, 1, 1, 1, 1, 1, 1, 1, 1, 1];
pub const MIN_PLAYERS: usize = 2;

/// Balance rules for a game.
///
/// Small rosters look their head-counts up in the hand-tuned tables; rosters at
/// or beyond the table length fall back to `ratio * n`, truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub mafia_ratio: f64,
    pub cop_ratio: f64,
    pub mafia_amounts: Vec<usize>,
    pub cop_amounts: Vec<usize>,
    /// Enforced by whoever calls `Game::start`, never by the engine.
    pub min_players: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleCounts {
    pub mafia: usize,
    pub cop: usize,
    pub villager: usize,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            mafia_ratio: MAFIA_RATIO,
            cop_ratio: COP_RATIO,
            mafia_amounts: MAFIA_AMOUNTS.to_vec(),
            cop_amounts: COP_AMOUNTS.to_vec(),
            min_players: MIN_PLAYERS,
        }
    }
}

impl Rule {
    /// Head-counts for a roster of `player_total`.
    ///
    /// Mafia is capped at the roster size and cops at what the mafia leaves,
    /// so the villager count can reach zero but never go below it.
    pub fn role_counts(&self, player_total: usize) -> RoleCounts {
        let wanted_mafia = Self::lookup(&self.mafia_amounts, self.mafia_ratio, player_total);
        let wanted_cop = Self::lookup(&self.cop_amounts, self.cop_ratio, player_total);

        let mafia = wanted_mafia.min(player_total);
        let cop = wanted_cop.min(player_total - mafia);
        if mafia != wanted_mafia || cop != wanted_cop {
            tracing::warn!(
                player_total,
                wanted_mafia,
                wanted_cop,
                mafia,
                cop,
                "role counts exceed the roster, clamping"
            );
        }

        RoleCounts {
            mafia,
            cop,
            villager: player_total - mafia - cop,
        }
    }

    fn lookup(table: &[usize], ratio: f64, player_total: usize) -> usize {
        match table.get(player_total) {
            Some(amount) => *amount,
            None => (ratio * player_total as f64) as usize,
        }
    }
}
