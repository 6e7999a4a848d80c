//! Game state management for the Connect-N GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::board::{Offset, Player};
use crate::config::GameOptions;
use crate::game::GameError;
use crate::search::{PlayerAgent, PlayerKind};
use crate::{AIEngine, Game, MoveResult};

/// What an agent thread sends back: the agent itself and its move.
pub struct AgentReply {
    seat: Player,
    agent: Box<dyn PlayerAgent>,
    pos: Option<Offset>,
}

/// Agent computation state
pub enum AgentState {
    Idle,
    Thinking {
        seat: Player,
        receiver: Receiver<AgentReply>,
        start_time: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Read-only walk through a finished or paused game.
pub struct Replay {
    game: Game,
    moves: Vec<Offset>,
    position: usize,
}

impl Replay {
    fn new(live: &Game) -> Self {
        Self {
            game: live.clone(),
            moves: live.move_history().iter().map(|m| m.cell).collect(),
            position: live.move_history().len(),
        }
    }

    #[inline]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn step_back(&mut self) -> bool {
        if self.position == 0 || self.game.undo_last_move().is_err() {
            return false;
        }
        self.position -= 1;
        true
    }

    pub fn step_forward(&mut self) -> bool {
        let Some(&pos) = self.moves.get(self.position) else {
            return false;
        };
        if self.game.mark_cell(pos).is_err() {
            return false;
        }
        self.position += 1;
        true
    }

    pub fn rewind(&mut self) {
        while self.step_back() {}
    }

    pub fn fast_forward(&mut self) {
        while self.step_forward() {}
    }
}

/// Main game state
pub struct GameState {
    pub game: Game,
    pub kinds: [PlayerKind; 2],
    pub last_ai_result: Option<MoveResult>,
    pub agent_state: AgentState,
    pub move_timer: MoveTimer,
    pub message: Option<String>,
    pub replay: Option<Replay>,

    agents: [Option<Box<dyn PlayerAgent>>; 2],
    engine: AIEngine,
}

impl GameState {
    pub fn new(options: GameOptions, kinds: [PlayerKind; 2], engine: AIEngine) -> Self {
        Self {
            game: Game::new(options),
            kinds,
            last_ai_result: None,
            agent_state: AgentState::Idle,
            move_timer: MoveTimer::default(),
            message: None,
            replay: None,
            agents: kinds.map(|kind| kind.agent(&engine)),
            engine,
        }
    }

    /// Start over with the same options, optionally seating new players.
    ///
    /// A move still being computed is dropped along with its channel.
    pub fn reset(&mut self, kinds: Option<[PlayerKind; 2]>) {
        if let Some(kinds) = kinds {
            self.kinds = kinds;
        }
        info!(p1 = %self.kinds[0], p2 = %self.kinds[1], "new game");

        self.game = Game::new(*self.game.options());
        self.agents = self.kinds.map(|kind| kind.agent(&self.engine));
        self.last_ai_result = None;
        self.agent_state = AgentState::Idle;
        self.move_timer = MoveTimer::default();
        self.message = None;
        self.replay = None;
    }

    /// The game the board view should draw
    pub fn displayed_game(&self) -> &Game {
        self.replay.as_ref().map_or(&self.game, Replay::game)
    }

    #[inline]
    pub fn kind_of(&self, player: Player) -> PlayerKind {
        self.kinds[player.index()]
    }

    /// Check if a local human has to move
    pub fn is_local_turn(&self) -> bool {
        self.kind_of(self.game.current_player()).is_local()
    }

    /// Check if an agent is currently computing a move
    pub fn is_agent_thinking(&self) -> bool {
        matches!(self.agent_state, AgentState::Thinking { .. })
    }

    #[inline]
    pub fn is_replaying(&self) -> bool {
        self.replay.is_some()
    }

    /// Whether the frame loop should hand the turn to an agent now
    pub fn wants_agent_move(&self) -> bool {
        !self.is_local_turn() && !self.is_agent_thinking() && !self.is_replaying() && !self.game.over()
    }

    /// Attempt a local move at the given position
    pub fn try_mark(&mut self, pos: Offset) -> Result<(), String> {
        if self.is_replaying() {
            return Err("Leave the replay to play".to_string());
        }
        if self.is_agent_thinking() {
            return Err("Agent is thinking".to_string());
        }
        if !self.is_local_turn() {
            return Err("Not your turn".to_string());
        }

        self.execute_move(pos).map_err(|e| e.to_string())
    }

    /// Execute a move (for both local players and agents)
    fn execute_move(&mut self, pos: Offset) -> Result<(), GameError> {
        let player = self.game.current_player();
        let winner = self.game.mark_cell(pos)?;
        let took = self.move_timer.stop();
        debug!(%player, %pos, took_ms = took.as_millis() as u64, "move played");

        self.message = None;
        if winner.is_none() {
            self.move_timer.start();
        }
        Ok(())
    }

    /// Hand the current turn to its agent on a worker thread.
    pub fn start_agent_move(&mut self) {
        if !self.wants_agent_move() {
            return;
        }

        let seat = self.game.current_player();
        let agent = self.agents[seat.index()]
            .take()
            .or_else(|| self.kind_of(seat).agent(&self.engine));
        let Some(mut agent) = agent else {
            return;
        };

        debug!(%seat, agent = agent.name(), "agent thinking");
        let game = self.game.clone();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let pos = agent.make_move(&game);
            let _ = tx.send(AgentReply { seat, agent, pos });
        });

        self.agent_state = AgentState::Thinking {
            seat,
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if the agent has finished thinking
    pub fn check_agent_result(&mut self) {
        let (reply, elapsed) = match &self.agent_state {
            AgentState::Thinking {
                seat,
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(reply) => (reply, start_time.elapsed()),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    // The agent went down with its thread
                    let seat = *seat;
                    warn!(%seat, "agent thread died");
                    self.agents[seat.index()] = self.kind_of(seat).agent(&self.engine);
                    self.agent_state = AgentState::Idle;
                    self.message = Some("Agent error".to_string());
                    return;
                }
            },
            AgentState::Idle => return,
        };

        self.agent_state = AgentState::Idle;
        self.move_timer.set_ai_time(elapsed);
        if let Some(result) = reply.agent.last_result() {
            self.last_ai_result = Some(result.clone());
        }
        let name = reply.agent.name().to_string();
        self.agents[reply.seat.index()] = Some(reply.agent);

        match reply.pos {
            Some(pos) => {
                if let Err(e) = self.execute_move(pos) {
                    warn!(agent = %name, %pos, error = %e, "agent move rejected");
                    self.message = Some(format!("{name} played an illegal move: {e}"));
                }
            }
            None => self.message = Some(format!("{name} could not find a move")),
        }
    }

    /// Get agent thinking elapsed time
    pub fn agent_thinking_elapsed(&self) -> Option<Duration> {
        match &self.agent_state {
            AgentState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AgentState::Idle => None,
        }
    }

    /// Undo the last move, and the agent's reply before it so a local
    /// player gets the turn back.
    pub fn undo(&mut self) {
        if self.is_agent_thinking() || self.is_replaying() {
            return;
        }

        let has_local = self.kinds.iter().any(|k| k.is_local());
        let mut undone = 0;
        while undone < 2 && self.game.undo_last_move().is_ok() {
            undone += 1;
            if !has_local || self.is_local_turn() {
                break;
            }
        }

        if undone > 0 {
            debug!(undone, moves = self.game.move_history().len(), "undo");
            self.message = None;
            self.move_timer.start();
        }
    }

    /// Enter replay mode at the current position
    pub fn start_replay(&mut self) {
        if self.is_agent_thinking() || self.game.move_history().is_empty() {
            return;
        }
        debug!(moves = self.game.move_history().len(), "replay");
        self.replay = Some(Replay::new(&self.game));
    }

    pub fn exit_replay(&mut self) {
        self.replay = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: i32, y: i32) -> Offset {
        Offset::new(x, y)
    }

    fn state(kinds: [PlayerKind; 2]) -> GameState {
        let options = GameOptions {
            border: 3,
            strike_length: 4,
        };
        GameState::new(options, kinds, AIEngine::with_config(1, 1))
    }

    fn wait_for_agent(state: &mut GameState) {
        let deadline = Instant::now() + Duration::from_secs(30);
        while state.is_agent_thinking() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
            state.check_agent_result();
        }
    }

    #[test]
    fn test_local_moves_alternate() {
        let mut state = state([PlayerKind::Local, PlayerKind::Local]);
        assert!(state.is_local_turn());
        state.try_mark(at(0, 0)).unwrap();
        assert_eq!(state.game.current_player(), Player::P2);
        assert!(state.try_mark(at(0, 0)).is_err());
        assert!(!state.wants_agent_move());
    }

    #[test]
    fn test_local_cannot_play_agent_seat() {
        let mut state = state([PlayerKind::Random, PlayerKind::Local]);
        assert!(state.wants_agent_move());
        assert_eq!(state.try_mark(at(0, 0)), Err("Not your turn".to_string()));
    }

    #[test]
    fn test_agent_move_comes_back() {
        let mut state = state([PlayerKind::Local, PlayerKind::Ai]);
        state.try_mark(at(0, 0)).unwrap();

        state.start_agent_move();
        assert!(state.is_agent_thinking());
        wait_for_agent(&mut state);

        assert!(!state.is_agent_thinking());
        assert_eq!(state.game.move_history().len(), 2);
        assert!(state.last_ai_result.is_some());
        assert!(state.is_local_turn());
    }

    #[test]
    fn test_undo_against_agent_takes_back_both() {
        let mut state = state([PlayerKind::Local, PlayerKind::Random]);
        state.try_mark(at(0, 0)).unwrap();
        state.start_agent_move();
        wait_for_agent(&mut state);
        assert_eq!(state.game.move_history().len(), 2);

        state.undo();
        assert!(state.game.board().is_empty());
        assert!(state.is_local_turn());
    }

    #[test]
    fn test_undo_hotseat_takes_back_one() {
        let mut state = state([PlayerKind::Local, PlayerKind::Local]);
        state.try_mark(at(0, 0)).unwrap();
        state.try_mark(at(1, 0)).unwrap();
        state.undo();
        assert_eq!(state.game.move_history().len(), 1);
    }

    #[test]
    fn test_replay_steps_through_history() {
        let mut state = state([PlayerKind::Local, PlayerKind::Local]);
        for pos in [at(0, 0), at(0, 1), at(1, 0)] {
            state.try_mark(pos).unwrap();
        }

        state.start_replay();
        assert!(state.try_mark(at(2, 0)).is_err());

        let replay = state.replay.as_mut().unwrap();
        assert_eq!((replay.position(), replay.len()), (3, 3));
        assert!(!replay.step_forward());
        assert!(replay.step_back());
        assert_eq!(replay.game().move_history().len(), 2);

        replay.rewind();
        assert_eq!(replay.position(), 0);
        assert!(replay.game().board().is_empty());
        replay.fast_forward();
        assert_eq!(replay.game().board(), state.game.board());

        state.exit_replay();
        assert_eq!(state.displayed_game().move_history().len(), 3);
    }

    #[test]
    fn test_reset_clears_game() {
        let mut state = state([PlayerKind::Local, PlayerKind::Local]);
        state.try_mark(at(0, 0)).unwrap();
        state.reset(Some([PlayerKind::Ai, PlayerKind::Local]));
        assert!(state.game.board().is_empty());
        assert_eq!(state.kind_of(Player::P1), PlayerKind::Ai);
        assert!(state.wants_agent_move());
    }
}
