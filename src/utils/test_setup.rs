use dotenvy::dotenv;
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Once;

use crate::models::{
    game::{Game, GameStatus},
    player::PlayerId,
    role::Role,
};

static INIT: Once = Once::new();

pub fn setup_test_env() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();
    });
}

/// A game with players `1..=n` that has been started with a fixed seed.
pub fn started_game(n: u64, seed: u64) -> Game {
    let mut game = Game::new();
    for id in 1..=n {
        game.join(PlayerId(id), format!("Player{}", id))
            .expect("fresh ids always join");
    }
    let mut rng = StdRng::seed_from_u64(seed);
    game.start_with_rng(&mut rng).expect("new game starts");
    game
}

/// Cycles until `status` is reached. Panics if the game is not running.
pub fn advance_to(game: &mut Game, status: GameStatus) {
    assert!(game.is_running(), "game must be running");
    while game.status() != status {
        game.cycle();
    }
}

pub fn ids_with_role(game: &Game, role: Role) -> Vec<PlayerId> {
    game.players()
        .iter()
        .filter(|p| p.role() == role)
        .map(|p| p.id())
        .collect()
}
