use serial_test::serial;
use std::env;
use std::time::Duration;

use mafia_engine::models::{config::Config, game::GameStatus, rule::Rule};

const VARS: [&str; 9] = [
    "DEBUG_VERBOSE_LOGGING",
    "SHOW_PLAYER_ROLES",
    "AUTO_ADVANCE_PHASES",
    "WAIT_DAY_SEC",
    "WAIT_NIGHT_SEC",
    "WARNING_TIMER_SEC",
    "MAFIA_RATIO",
    "COP_RATIO",
    "MIN_PLAYERS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_env() {
    clear_env();
    let config = Config::from_env();

    assert!(!config.show_player_roles);
    assert!(!config.auto_advance_phases);
    assert_eq!(config.day_phase_seconds, 300);
    assert_eq!(config.night_phase_seconds, 120);
    assert_eq!(config.warning_seconds, 30);
    assert_eq!(config.rule, Rule::default());
}

#[test]
#[serial]
fn test_reads_env_overrides() {
    clear_env();
    env::set_var("SHOW_PLAYER_ROLES", "true");
    env::set_var("AUTO_ADVANCE_PHASES", "true");
    env::set_var("WAIT_DAY_SEC", "90");
    env::set_var("WAIT_NIGHT_SEC", "30");
    env::set_var("MAFIA_RATIO", "0.25");
    env::set_var("COP_RATIO", "0.1");
    env::set_var("MIN_PLAYERS", "4");

    let config = Config::from_env();
    clear_env();

    assert!(config.show_player_roles);
    assert!(config.auto_advance_phases);
    assert_eq!(config.phase_duration(GameStatus::DayTalk), Duration::from_secs(90));
    assert_eq!(config.phase_duration(GameStatus::NightVote), Duration::from_secs(30));
    assert_eq!(config.rule.mafia_ratio, 0.25);
    assert_eq!(config.rule.cop_ratio, 0.1);
    assert_eq!(config.rule.min_players, 4);
    // tables are not configurable from the environment
    assert_eq!(config.rule.mafia_amounts, Rule::default().mafia_amounts);
}

#[test]
#[serial]
fn test_unparsable_values_fall_back() {
    clear_env();
    env::set_var("WAIT_DAY_SEC", "five minutes");
    env::set_var("MAFIA_RATIO", "lots");

    let config = Config::from_env();
    clear_env();

    assert_eq!(config.day_phase_seconds, 300);
    assert_eq!(config.rule.mafia_ratio, 0.6);
}

#[test]
#[serial]
fn test_warning_lead_fits_inside_the_phase() {
    clear_env();
    env::set_var("WAIT_DAY_SEC", "90");
    env::set_var("WAIT_NIGHT_SEC", "20");
    env::set_var("WARNING_TIMER_SEC", "30");

    let config = Config::from_env();
    clear_env();

    assert_eq!(
        config.warning_lead(GameStatus::DayVote),
        Some(Duration::from_secs(30))
    );
    // a night shorter than the warning gets none
    assert_eq!(config.warning_lead(GameStatus::NightTalk), None);

    let silent = Config {
        warning_seconds: 0,
        ..config
    };
    assert_eq!(silent.warning_lead(GameStatus::DayVote), None);
}
