//! Game options and command line

use clap::Parser;
use thiserror::Error;

use crate::search::PlayerKind;

/// Largest accepted frontier radius; the disk opened per move grows with
/// its square.
pub const MAX_BORDER: u32 = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("strike length must be at least 2, got {0}")]
    StrikeLength(u32),
    #[error("border must be between 1 and {MAX_BORDER}, got {0}")]
    Border(u32),
    #[error("exactly 2 players are required, got {0}")]
    PlayerCount(usize),
    #[error("unknown player kind '{0}' (expected local, ai, random or obstructive)")]
    UnknownPlayer(String),
}

/// Rules of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    /// Radius of the playable disk opened around every mark
    pub border: u32,
    /// Marks in a row needed to win
    pub strike_length: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            border: 7,
            strike_length: 6,
        }
    }
}

impl GameOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strike_length < 2 {
            return Err(ConfigError::StrikeLength(self.strike_length));
        }
        if !(1..=MAX_BORDER).contains(&self.border) {
            return Err(ConfigError::Border(self.border));
        }
        Ok(())
    }
}

/// Command line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "connectn")]
#[command(about = "Connect-N on an unbounded board")]
pub struct Cli {
    /// Radius of the playable area around every mark
    #[arg(short, long, default_value_t = 7)]
    pub border: u32,

    /// Marks in a row needed to win
    #[arg(short, long, default_value_t = 6)]
    pub strike: u32,

    /// Player kinds in seat order: local, ai, random or obstructive
    #[arg(short, long, value_delimiter = ',', default_value = "local,ai")]
    pub players: Vec<String>,

    /// AI search depth in plies
    #[arg(short, long, default_value_t = 3)]
    pub depth: u8,

    /// AI worker threads (defaults to the available cores, up to 8)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Camera follow margin, in percent of the view size
    #[arg(long, default_value_t = 20)]
    pub track_depth: u32,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Validated game options
    pub fn game_options(&self) -> Result<GameOptions, ConfigError> {
        let options = GameOptions {
            border: self.border,
            strike_length: self.strike,
        };
        options.validate()?;
        Ok(options)
    }

    /// Player kinds for both seats
    pub fn player_kinds(&self) -> Result<[PlayerKind; 2], ConfigError> {
        let kinds = self
            .players
            .iter()
            .map(|name| name.parse::<PlayerKind>())
            .collect::<Result<Vec<_>, _>>()?;

        match kinds[..] {
            [first, second] => Ok([first, second]),
            _ => Err(ConfigError::PlayerCount(kinds.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("connectn").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.game_options(), Ok(GameOptions::default()));
        assert_eq!(cli.player_kinds(), Ok([PlayerKind::Local, PlayerKind::Ai]));
        assert_eq!(cli.track_depth, 20);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_custom_options() {
        let cli = parse(&["--border", "3", "--strike", "4", "--players", "random,obstructive"]);
        assert_eq!(
            cli.game_options(),
            Ok(GameOptions {
                border: 3,
                strike_length: 4
            })
        );
        assert_eq!(cli.player_kinds(), Ok([PlayerKind::Random, PlayerKind::Obstructive]));
    }

    #[test]
    fn test_rejects_bad_options() {
        assert_eq!(parse(&["--strike", "1"]).game_options(), Err(ConfigError::StrikeLength(1)));
        assert_eq!(parse(&["--border", "0"]).game_options(), Err(ConfigError::Border(0)));
        assert_eq!(parse(&["--border", "100"]).game_options(), Err(ConfigError::Border(100)));
    }

    #[test]
    fn test_rejects_bad_players() {
        assert_eq!(parse(&["--players", "ai"]).player_kinds(), Err(ConfigError::PlayerCount(1)));
        assert_eq!(
            parse(&["--players", "ai,ai,ai"]).player_kinds(),
            Err(ConfigError::PlayerCount(3))
        );
        assert_eq!(
            parse(&["--players", "ai,robot"]).player_kinds(),
            Err(ConfigError::UnknownPlayer("robot".to_string()))
        );
    }
}
