use rand::Rng;

use crate::models::{
    player::Player,
    role::Role,
    rule::{RoleCounts, Rule},
};

/// Deals hidden roles over the roster.
///
/// Mafia seats are drawn first by rejection sampling over uniformly random
/// indices, then cop seats the same way; nobody already dealt a role is
/// overwritten. Whoever is left becomes a villager. `Rule::role_counts` caps
/// mafia plus cops at the roster size, which keeps both loops finite.
pub fn assign_roles<R: Rng>(
    players: &mut [Player],
    rule: &Rule,
    rng: &mut R,
) -> RoleCounts {
    for p in players.iter_mut() {
        p.set_role(Role::Unassigned);
    }

    let planned = rule.role_counts(players.len());
    deal(players, Role::Mafia, planned.mafia, rng);
    deal(players, Role::Cop, planned.cop, rng);

    let mut villager = 0;
    for p in players.iter_mut().filter(|p| p.role() == Role::Unassigned) {
        p.set_role(Role::Villager);
        villager += 1;
    }

    tracing::debug!(mafia = planned.mafia, cop = planned.cop, villager, "roles assigned");
    RoleCounts {
        mafia: planned.mafia,
        cop: planned.cop,
        villager,
    }
}

fn deal<R: Rng>(players: &mut [Player], role: Role, amount: usize, rng: &mut R) {
    let mut dealt = 0;
    while dealt < amount {
        let i = rng.gen_range(0..players.len());
        if players[i].role() == Role::Unassigned {
            players[i].set_role(role);
            dealt += 1;
        }
    }
}
