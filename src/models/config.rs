use std::env;
use std::time::Duration;

use super::game::GameStatus;
use super::rule::{Rule, COP_RATIO, MAFIA_RATIO, MIN_PLAYERS};

#[derive(Debug, Clone)]
pub struct Config {
    pub verbose_logging: bool,
    // console only: print every role in `players`
    pub show_player_roles: bool,
    pub auto_advance_phases: bool,
    pub day_phase_seconds: u64,
    pub night_phase_seconds: u64,
    // 0 disables the warning
    pub warning_seconds: u64,
    pub rule: Rule,
}

impl Default for Config {
    fn default() -> Self {
        let debug_mode = cfg!(debug_assertions);

        Self {
            verbose_logging: debug_mode,
            show_player_roles: false,
            auto_advance_phases: false,
            day_phase_seconds: 300,
            night_phase_seconds: 120,
            warning_seconds: 30,
            rule: Rule::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let verbose_logging = env::var("DEBUG_VERBOSE_LOGGING")
            .map(|v| v == "true")
            .unwrap_or(defaults.verbose_logging);
        let show_player_roles = env::var("SHOW_PLAYER_ROLES")
            .map(|v| v == "true")
            .unwrap_or(false);
        let auto_advance_phases = env::var("AUTO_ADVANCE_PHASES")
            .map(|v| v == "true")
            .unwrap_or(false);
        let day_phase_seconds = env::var("WAIT_DAY_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.day_phase_seconds);
        let night_phase_seconds = env::var("WAIT_NIGHT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.night_phase_seconds);
        let warning_seconds = env::var("WARNING_TIMER_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.warning_seconds);
        let mafia_ratio = env::var("MAFIA_RATIO")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(MAFIA_RATIO);
        let cop_ratio = env::var("COP_RATIO")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(COP_RATIO);
        let min_players = env::var("MIN_PLAYERS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(MIN_PLAYERS);

        Self {
            verbose_logging,
            show_player_roles,
            auto_advance_phases,
            day_phase_seconds,
            night_phase_seconds,
            warning_seconds,
            rule: Rule {
                mafia_ratio,
                cop_ratio,
                min_players,
                ..Rule::default()
            },
        }
    }

    /// How long the given phase may last before a forced `cycle`.
    pub fn phase_duration(&self, status: GameStatus) -> Duration {
        let secs = if status.is_night() {
            self.night_phase_seconds
        } else {
            self.day_phase_seconds
        };
        Duration::from_secs(secs)
    }

    /// How long before the timeout the "seconds left" warning is due, if the
    /// phase is long enough to have one.
    pub fn warning_lead(&self, status: GameStatus) -> Option<Duration> {
        let lead = Duration::from_secs(self.warning_seconds);
        if lead.is_zero() || lead >= self.phase_duration(status) {
            return None;
        }
        Some(lead)
    }
}
