//! A game in progress: board, turn order and victory state

use thiserror::Error;
use tracing::{debug, info};

use crate::board::{Board, BoardError, Cell, Offset, Player, PlayerMove};
use crate::config::GameOptions;
use crate::rules::VictoryChecker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the game is already over")]
    GameOver,
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Connect-N game. P1 moves first and the players alternate.
#[derive(Debug, Clone)]
pub struct Game {
    options: GameOptions,
    board: Board,
    checker: VictoryChecker,
}

impl Game {
    pub fn new(options: GameOptions) -> Self {
        info!(border = options.border, strike_length = options.strike_length, "new game");
        Self {
            options,
            board: Board::new(options.border),
            checker: VictoryChecker::new(options.strike_length),
        }
    }

    #[inline]
    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn cell(&self, pos: Offset) -> Cell {
        self.board.cell(pos)
    }

    /// Number of the move about to be made, starting at 1
    #[inline]
    pub fn move_number(&self) -> usize {
        self.board.move_count() + 1
    }

    /// Player whose turn it is
    pub fn current_player(&self) -> Player {
        if self.board.move_count() % 2 == 0 {
            Player::P1
        } else {
            Player::P2
        }
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.checker.victorious_player()
    }

    /// Cells of the strike that won the game
    pub fn winning_strike(&self) -> Option<&[Offset]> {
        self.checker.victorious_strike()
    }

    /// The board is unbounded, so only a win ends the game.
    #[inline]
    pub fn over(&self) -> bool {
        self.checker.reached()
    }

    #[inline]
    pub fn latest_move(&self) -> Option<PlayerMove> {
        self.board.latest_move()
    }

    #[inline]
    pub fn move_history(&self) -> &[PlayerMove] {
        self.board.move_history()
    }

    /// Mark `pos` for the current player, returning the winner if this move
    /// ended the game.
    pub fn mark_cell(&mut self, pos: Offset) -> Result<Option<Player>, GameError> {
        if self.over() {
            return Err(GameError::GameOver);
        }

        let player = self.current_player();
        self.board.mark_cell(pos, player)?;
        debug!(%player, %pos, move_number = self.board.move_count(), "mark");

        if self.checker.check_at(self.board.strikes(), pos) {
            info!(%player, moves = self.board.move_count(), "game won");
            return Ok(Some(player));
        }
        Ok(None)
    }

    /// Take back the last move. Clears any win.
    pub fn undo_last_move(&mut self) -> Result<PlayerMove, GameError> {
        let undone = self.board.undo_last_move()?;
        self.checker.reset();
        debug!(player = %undone.player, pos = %undone.cell, "undo");
        Ok(undone)
    }

    /// Undo moves until only the first `n` remain.
    ///
    /// Asking for more moves than were played leaves the game unchanged.
    pub fn replay_to(&mut self, n: usize) -> Result<(), GameError> {
        while self.board.move_count() > n {
            self.undo_last_move()?;
        }
        Ok(())
    }

    /// Play a sequence of cells from the current position.
    pub fn replay_moves(&mut self, cells: impl IntoIterator<Item = Offset>) -> Result<(), GameError> {
        for pos in cells {
            self.mark_cell(pos)?;
        }
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameOptions::default())
    }
}
