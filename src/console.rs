//! Line-oriented driver used by the binary: parses commands, runs them against
//! a [`Game`] and renders the outcome as plain text.

use rand::Rng;
use thiserror::Error;

use crate::error::GameError;
use crate::models::{
    config::Config,
    game::{Faction, Game},
    player::PlayerId,
    vote::{Consequence, ConsequenceKind, VoteOutcome, VoteResolution},
};
use crate::state::TimedOut;

pub const HELP: &str = concat!(
    "commands: join <id> <name> | start | stop | vote <actor> <target> | next | ",
    "status | players | rules | help | quit"
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join { id: PlayerId, name: String },
    Start,
    Stop,
    Vote { actor: PlayerId, target: PlayerId },
    Next,
    Status,
    Players,
    Rules,
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid player id: {0}")]
    InvalidId(String),
    #[error("at least {0} players are needed to start")]
    NotEnoughPlayers(usize),
    #[error(transparent)]
    Game(#[from] GameError),
}

pub fn parse_command(line: &str) -> Result<Command, ConsoleError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(ConsoleError::Usage(HELP));
    };

    let command = match head {
        "join" => {
            let id = parse_id(words.next(), "join <id> <name>")?;
            let name = words.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                return Err(ConsoleError::Usage("join <id> <name>"));
            }
            Command::Join { id, name }
        }
        "vote" => {
            let actor = parse_id(words.next(), "vote <actor> <target>")?;
            let target = parse_id(words.next(), "vote <actor> <target>")?;
            Command::Vote { actor, target }
        }
        "start" => Command::Start,
        "stop" => Command::Stop,
        "next" => Command::Next,
        "status" => Command::Status,
        "players" => Command::Players,
        "rules" => Command::Rules,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ConsoleError::UnknownCommand(other.to_string())),
    };
    Ok(command)
}

fn parse_id(word: Option<&str>, usage: &'static str) -> Result<PlayerId, ConsoleError> {
    let word = word.ok_or(ConsoleError::Usage(usage))?;
    word.parse::<u64>()
        .map(PlayerId)
        .map_err(|_| ConsoleError::InvalidId(word.to_string()))
}

/// Runs one command and returns the lines to print.
///
/// Afterwards the game is checked for a winner and stopped if one exists.
pub fn execute<R: Rng>(
    game: &mut Game,
    config: &Config,
    rng: &mut R,
    command: Command,
) -> Result<Vec<String>, ConsoleError> {
    let mut lines = Vec::new();
    match command {
        Command::Join { id, name } => {
            let player = game.join(id, name)?;
            lines.push(format!("{} joined ({} players).", player, game.players().len()));
        }
        Command::Start => {
            let min_players = config.rule.min_players;
            if !game.is_running() && game.players().len() < min_players {
                return Err(ConsoleError::NotEnoughPlayers(min_players));
            }
            game.start_with_rng(rng)?;
            let counts = game.role_counts();
            lines.push(format!(
                "Game started: {} mafia, {} cop(s), {} villager(s).",
                counts.mafia, counts.cop, counts.villager
            ));
            lines.push(format!("Now: {}.", game.status()));
        }
        Command::Stop => {
            game.stop()?;
            lines.push("Game stopped.".to_string());
        }
        Command::Vote { actor, target } => {
            let resolution = game.vote(actor, target)?;
            lines.extend(render_resolution(game, &resolution));
        }
        Command::Next => {
            if !game.is_running() {
                return Err(GameError::NotRunning.into());
            }
            game.cycle();
            lines.push(format!("Now: {}.", game.status()));
        }
        Command::Status => {
            lines.push(format!(
                "Phase: {}, round {}, {} alive.",
                game.status(),
                game.round(),
                game.alive_players().count()
            ));
        }
        Command::Players => {
            for p in game.players() {
                let mut line = format!("{} - {:?}", p, p.status());
                if config.show_player_roles {
                    line.push_str(&format!(" - {}", p.role()));
                }
                lines.push(line);
            }
        }
        Command::Rules => lines.extend(rules(config)),
        Command::Help => lines.push(HELP.to_string()),
        Command::Quit => {}
    }

    announce_winner(game, &mut lines)?;
    Ok(lines)
}

/// Reports a phase that ran out of time, including a held-back mafia kill.
pub fn render_timeout(game: &mut Game, timeout: TimedOut) -> Result<Vec<String>, ConsoleError> {
    let mut lines = vec![format!("Time ran out for the {}!", timeout.ended)];
    if let Some(kill) = &timeout.kill {
        lines.push(render_consequence(game, kill));
    }
    lines.push(format!("Now: {}.", game.status()));
    announce_winner(game, &mut lines)?;
    Ok(lines)
}

pub fn rules(config: &Config) -> Vec<String> {
    vec![
        "There are villagers, mafia and cops.".to_string(),
        "Vote with `vote <you> <target>`. A vote cannot be taken back.".to_string(),
        "A vote goes through once everybody in the group has voted and one target leads."
            .to_string(),
        format!(
            "Days last at most {} and nights {}.",
            spoken(config.day_phase_seconds),
            spoken(config.night_phase_seconds)
        ),
        "When time runs out an unfinished vote goes to waste. A finished mafia kill still happens."
            .to_string(),
    ]
}

fn spoken(seconds: u64) -> String {
    match seconds {
        60 => "1 minute".to_string(),
        s if s % 60 == 0 => format!("{} minutes", s / 60),
        s => format!("{} seconds", s),
    }
}

fn announce_winner(game: &mut Game, lines: &mut Vec<String>) -> Result<(), GameError> {
    if let Some(faction) = game.winner() {
        lines.push(match faction {
            Faction::Villagers => "The villagers won!".to_string(),
            Faction::Mafia => "The mafia won!".to_string(),
        });
        game.stop()?;
    }
    Ok(())
}

pub fn render_resolution(game: &Game, resolution: &VoteResolution) -> Vec<String> {
    let mut lines = vec![format!(
        "{} voted for {}.",
        name_of(game, resolution.voter),
        name_of(game, resolution.target)
    )];

    for consequence in resolution.consequences() {
        lines.push(render_consequence(game, consequence));
    }
    if resolution.outcome == VoteOutcome::FailedNoUniqueWinner {
        lines.push(format!(
            "The {} has no clear result, vote again.",
            resolution.category
        ));
    }
    if let Some(parallel) = &resolution.parallel {
        if parallel.outcome == VoteOutcome::FailedNoUniqueWinner {
            lines.push(format!(
                "The {} has no clear result, vote again.",
                parallel.category
            ));
        }
    }
    if resolution.outcome == VoteOutcome::AllSubphasesFinished {
        lines.push(format!("Now: {}.", game.status()));
    }
    lines
}

fn render_consequence(game: &Game, consequence: &Consequence) -> String {
    let name = name_of(game, consequence.target);
    match consequence.kind {
        ConsequenceKind::VillagerKill => format!("The village killed {}.", name),
        ConsequenceKind::MafiaKill => format!("The mafia killed {}.", name),
        ConsequenceKind::Lookup { role } => format!("The cops looked up {}: {}.", name, role),
    }
}

fn name_of(game: &Game, id: PlayerId) -> String {
    game.player(id)
        .map(|p| p.name().to_string())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse_command("join 12 Jane Doe").unwrap(),
            Command::Join {
                id: PlayerId(12),
                name: "Jane Doe".to_string()
            }
        );
        assert_eq!(
            parse_command("  vote 1 2 ").unwrap(),
            Command::Vote {
                actor: PlayerId(1),
                target: PlayerId(2)
            }
        );
        assert_eq!(parse_command("next").unwrap(), Command::Next);
        assert_eq!(parse_command("rules").unwrap(), Command::Rules);
    }

    #[test]
    fn rules_mention_phase_lengths() {
        let config = Config {
            day_phase_seconds: 300,
            night_phase_seconds: 90,
            ..Config::default()
        };
        let text = rules(&config).join(" ");
        assert!(text.contains("Days last at most 5 minutes and nights 90 seconds."));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse_command(""), Err(ConsoleError::Usage(_))));
        assert!(matches!(parse_command("join 3"), Err(ConsoleError::Usage(_))));
        assert!(matches!(
            parse_command("vote x 2"),
            Err(ConsoleError::InvalidId(id)) if id == "x"
        ));
        assert!(matches!(
            parse_command("dance"),
            Err(ConsoleError::UnknownCommand(_))
        ));
    }
}
