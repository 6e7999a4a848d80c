//! Non-human players

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::Offset;
use crate::config::ConfigError;
use crate::engine::{AIEngine, MoveResult};
use crate::game::Game;

/// Something that picks moves on its own.
pub trait PlayerAgent: Send {
    fn name(&self) -> &str;

    /// Cell to mark for the current player, or `None` if there is nothing
    /// sensible to play.
    fn make_move(&mut self, game: &Game) -> Option<Offset>;

    /// Search statistics for the last move, for agents that search
    fn last_result(&self) -> Option<&MoveResult> {
        None
    }
}

/// Minimax AI
#[derive(Debug, Clone, Default)]
pub struct AiPlayer {
    engine: AIEngine,
    last: Option<MoveResult>,
}

impl AiPlayer {
    pub fn new(engine: AIEngine) -> Self {
        Self { engine, last: None }
    }

    pub fn engine(&self) -> &AIEngine {
        &self.engine
    }
}

impl PlayerAgent for AiPlayer {
    fn name(&self) -> &str {
        "AI"
    }

    fn make_move(&mut self, game: &Game) -> Option<Offset> {
        let result = self.engine.get_move_with_stats(game);
        let pos = result.best_move;
        self.last = Some(result);
        pos
    }

    fn last_result(&self) -> Option<&MoveResult> {
        self.last.as_ref()
    }
}

fn sorted_unoccupied(game: &Game) -> Vec<Offset> {
    let mut cells: Vec<_> = game.board().unoccupied_cells().collect();
    cells.sort();
    cells
}

/// Marks a uniformly random unoccupied cell
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAgent for RandomPlayer {
    fn name(&self) -> &str {
        "Random"
    }

    fn make_move(&mut self, game: &Game) -> Option<Offset> {
        sorted_unoccupied(game).choose(&mut self.rng).copied()
    }
}

/// Marks a free cell right next to an opponent mark, trying the axes in a
/// random order each turn.
#[derive(Debug, Clone)]
pub struct ObstructivePlayer {
    rng: StdRng,
}

impl ObstructivePlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ObstructivePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAgent for ObstructivePlayer {
    fn name(&self) -> &str {
        "Obstructive"
    }

    fn make_move(&mut self, game: &Game) -> Option<Offset> {
        let board = game.board();
        let mut axes = *board.strikes().axes().as_array();
        axes.shuffle(&mut self.rng);

        let mut theirs: Vec<_> = board.player_cells(game.current_player().other()).collect();
        theirs.sort();

        for cell in theirs {
            for axis in &axes {
                for next in [cell + axis.step, cell - axis.step] {
                    if board.is_unoccupied(next) {
                        return Some(next);
                    }
                }
            }
        }

        // Every opponent mark is surrounded
        sorted_unoccupied(game).choose(&mut self.rng).copied()
    }
}

/// Who sits in a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    /// A human using the board view
    Local,
    Ai,
    Random,
    Obstructive,
}

impl PlayerKind {
    /// Agent for a computer-controlled seat; `None` for a local human.
    pub fn agent(self, engine: &AIEngine) -> Option<Box<dyn PlayerAgent>> {
        match self {
            PlayerKind::Local => None,
            PlayerKind::Ai => Some(Box::new(AiPlayer::new(engine.clone()))),
            PlayerKind::Random => Some(Box::new(RandomPlayer::new())),
            PlayerKind::Obstructive => Some(Box::new(ObstructivePlayer::new())),
        }
    }

    #[inline]
    pub fn is_local(self) -> bool {
        self == PlayerKind::Local
    }
}

impl FromStr for PlayerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "human" => Ok(PlayerKind::Local),
            "ai" => Ok(PlayerKind::Ai),
            "random" => Ok(PlayerKind::Random),
            "obstructive" => Ok(PlayerKind::Obstructive),
            _ => Err(ConfigError::UnknownPlayer(s.to_string())),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerKind::Local => "Local",
            PlayerKind::Ai => "AI",
            PlayerKind::Random => "Random",
            PlayerKind::Obstructive => "Obstructive",
        };
        f.write_str(name)
    }
}
