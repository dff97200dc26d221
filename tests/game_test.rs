use mafia_engine::{
    models::{
        game::{Faction, Game, GameStatus},
        player::{DeathCause, PlayerId, PlayerStatus},
        role::Role,
        vote::ConsequenceKind,
    },
    utils::test_setup::{advance_to, ids_with_role, setup_test_env, started_game},
    GameError,
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_join_appends_in_order() {
    setup_test_env();
    let mut game = Game::new();

    let alice = game.join(PlayerId(10), "alice").unwrap();
    assert_eq!(alice.status(), PlayerStatus::Joined);
    assert_eq!(alice.role(), Role::Unassigned);
    game.join(PlayerId(3), "bob").unwrap();

    let ids: Vec<_> = game.players().iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![PlayerId(10), PlayerId(3)]);
}

#[test]
fn test_join_twice_fails() {
    setup_test_env();
    let mut game = Game::new();
    game.join(PlayerId(1), "alice").unwrap();

    let err = game.join(PlayerId(1), "alice again").unwrap_err();
    assert_eq!(err, GameError::AlreadyJoined(PlayerId(1)));
    assert!(err.is_usage_error());
    assert_eq!(game.players().len(), 1);
}

#[test]
fn test_join_while_running_fails() {
    setup_test_env();
    let mut game = started_game(4, 1);

    assert_eq!(
        game.join(PlayerId(99), "late"),
        Err(GameError::GameAlreadyRunning)
    );
    // the duplicate check comes first
    assert_eq!(
        game.join(PlayerId(1), "again"),
        Err(GameError::AlreadyJoined(PlayerId(1)))
    );
}

#[test]
fn test_start_promotes_everyone_and_enters_night() {
    setup_test_env();
    let game = started_game(5, 3);

    assert_eq!(game.status(), GameStatus::NightTalk);
    assert_eq!(game.round(), 0);
    assert!(game.players().iter().all(|p| p.is_alive()));
    assert!(game.players().iter().all(|p| p.role() != Role::Unassigned));
    assert!(!game.mafia_vote_finished());
    assert!(!game.cop_vote_finished());
    assert!(!game.day_vote_finished());
}

#[test]
fn test_start_twice_fails() {
    setup_test_env();
    let mut game = started_game(4, 1);
    assert_eq!(game.start(), Err(GameError::GameAlreadyRunning));
}

#[test]
fn test_role_counts_for_five_players() {
    setup_test_env();
    let game = started_game(5, 11);

    assert_eq!(game.mafia_total(), 2);
    assert_eq!(game.cop_total(), 1);
    assert_eq!(game.villager_total(), 2);
    assert_eq!(ids_with_role(&game, Role::Mafia).len(), 2);
    assert_eq!(ids_with_role(&game, Role::Cop).len(), 1);
    assert_eq!(ids_with_role(&game, Role::Villager).len(), 2);
}

#[test]
fn test_role_counts_past_the_tables_never_go_negative() {
    setup_test_env();
    let game = started_game(12, 5);

    assert_eq!(game.mafia_total(), 7);
    assert_eq!(game.cop_total(), 5);
    assert_eq!(game.villager_total(), 0);
    assert_eq!(
        game.mafia_total() + game.cop_total() + game.villager_total(),
        game.players().len()
    );
}

#[test]
fn test_stop_resets_roster() {
    setup_test_env();
    let mut game = started_game(4, 1);

    game.stop().unwrap();
    assert_eq!(game.status(), GameStatus::NotRunning);
    assert!(game.players().is_empty());
    assert_eq!(game.role_counts().mafia, 0);

    // a fresh roster can join again
    game.join(PlayerId(1), "alice").unwrap();
}

#[test]
fn test_stop_when_not_running_fails() {
    setup_test_env();
    let mut game = Game::new();
    assert_eq!(game.stop(), Err(GameError::NotRunning));
}

#[test]
fn test_cycle_repeats_every_four_phases() {
    setup_test_env();
    let mut game = started_game(4, 2);

    let mut seen = vec![game.status()];
    for _ in 0..8 {
        game.cycle();
        seen.push(game.status());
    }
    assert_eq!(
        &seen[..5],
        &[
            GameStatus::NightTalk,
            GameStatus::NightVote,
            GameStatus::DayTalk,
            GameStatus::DayVote,
            GameStatus::NightTalk
        ]
    );
    assert_eq!(&seen[..4], &seen[4..8]);
    assert_eq!(game.round(), 2);
}

#[test]
fn test_forced_cycle_discards_pending_mafia_vote() {
    setup_test_env();
    let mut game = started_game(5, 8);
    advance_to(&mut game, GameStatus::NightVote);
    let mafia = ids_with_role(&game, Role::Mafia);
    let villager = ids_with_role(&game, Role::Villager)[0];

    for m in &mafia {
        game.vote(*m, villager).unwrap();
    }
    assert!(game.mafia_vote_finished());

    game.cycle();
    assert_eq!(game.status(), GameStatus::DayTalk);
    assert!(!game.mafia_vote_finished());
    assert!(game.player(villager).unwrap().is_alive());
    assert!(game.players().iter().all(|p| p.last_vote().is_none()));
}

#[test]
fn test_timeout_carries_out_pending_mafia_vote() {
    setup_test_env();
    let mut game = started_game(5, 8);
    advance_to(&mut game, GameStatus::NightVote);
    let mafia = ids_with_role(&game, Role::Mafia);
    let villager = ids_with_role(&game, Role::Villager)[0];

    for m in &mafia {
        game.vote(*m, villager).unwrap();
    }
    assert!(game.mafia_vote_finished());

    let kill = game.timeout().unwrap().unwrap();
    assert_eq!(kill.kind, ConsequenceKind::MafiaKill);
    assert_eq!(kill.target, villager);
    assert_eq!(game.status(), GameStatus::DayTalk);
    assert!(game.player(villager).unwrap().is_dead());
    assert_eq!(
        game.player(villager).unwrap().death_cause(),
        Some(DeathCause::MafiaKill)
    );
}

#[test]
fn test_timeout_without_finished_vote_just_cycles() {
    setup_test_env();
    let mut game = started_game(5, 8);
    advance_to(&mut game, GameStatus::NightVote);
    let mafia = ids_with_role(&game, Role::Mafia);
    let villager = ids_with_role(&game, Role::Villager)[0];

    // one mafia short of quorum
    game.vote(mafia[0], villager).unwrap();
    assert_eq!(game.timeout().unwrap(), None);
    assert_eq!(game.status(), GameStatus::DayTalk);
    assert_eq!(game.alive_players().count(), 5);

    game.stop().unwrap();
    assert!(matches!(game.timeout(), Err(GameError::NotRunning)));
}

#[test]
fn test_games_started_survives_stop() {
    setup_test_env();
    let mut game = started_game(3, 1);
    assert_eq!(game.games_started(), 1);
    game.stop().unwrap();
    for id in 1..=3 {
        game.join(PlayerId(id), format!("Player{}", id)).unwrap();
    }
    game.start_with_rng(&mut StdRng::seed_from_u64(2)).unwrap();
    assert_eq!(game.games_started(), 2);
    assert_eq!(game.round(), 0);
}

#[test]
fn test_winner_villagers_when_mafia_is_dead() {
    setup_test_env();
    // three players: one mafia, one cop, one villager
    let mut game = started_game(3, 4);
    let mafia = ids_with_role(&game, Role::Mafia)[0];
    let cop = ids_with_role(&game, Role::Cop)[0];
    let villager = ids_with_role(&game, Role::Villager)[0];
    advance_to(&mut game, GameStatus::DayVote);
    assert_eq!(game.winner(), None);

    game.vote(cop, mafia).unwrap();
    game.vote(villager, mafia).unwrap();
    game.vote(mafia, cop).unwrap();

    assert_eq!(game.winner(), Some(Faction::Villagers));
    // deciding the game does not stop it
    assert!(game.is_running());
}

#[test]
fn test_winner_mafia_when_nobody_else_is_left() {
    setup_test_env();
    // two players: one mafia, one cop
    let mut game = started_game(2, 9);
    let mafia = ids_with_role(&game, Role::Mafia)[0];
    let cop = ids_with_role(&game, Role::Cop)[0];
    advance_to(&mut game, GameStatus::NightVote);

    game.vote(mafia, cop).unwrap();
    game.vote(cop, mafia).unwrap();

    assert!(game.player(cop).unwrap().is_dead());
    assert_eq!(game.winner(), Some(Faction::Mafia));
}

#[test]
fn test_snapshot_serializes_to_json() {
    setup_test_env();
    let game = started_game(4, 6);
    let json = serde_json::to_value(&game).unwrap();
    assert_eq!(json["status"], "NightTalk");
    assert_eq!(json["players"].as_array().unwrap().len(), 4);
}
