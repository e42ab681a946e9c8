//! One game between a human and an engine.
//!
//! [`GameSession`] is the only writer of the game it holds. Readers take
//! [`GameSession::snapshot`]s, which are consistent copies; moves go through
//! [`GameSession::play_human`] and [`GameSession::play_engine`], each of
//! which replaces the whole state in one step or not at all.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use parking_lot::RwLock;

use crate::board::{Color, GameState, Piece, RulesError, Square, TerminalStatus};
use crate::engine::{EngineError, MoveProvider};
use crate::sync::StopFlag;

/// Error type for session operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The move was rejected by the rules
    Rules(RulesError),
    /// The engine failed to produce a move
    Engine(EngineError),
    /// An engine request is still in flight
    Busy,
    /// It is the engine's turn, not the human's
    NotHumanTurn,
    /// It is the human's turn, not the engine's
    NotEngineTurn,
    /// The game has already ended
    GameOver(TerminalStatus),
    /// The game was reset while the engine was thinking; its answer was dropped
    Superseded,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Rules(e) => write!(f, "{e}"),
            SessionError::Engine(e) => write!(f, "{e}"),
            SessionError::Busy => write!(f, "Engine is still thinking"),
            SessionError::NotHumanTurn => write!(f, "Not your turn"),
            SessionError::NotEngineTurn => write!(f, "Not the engine's turn"),
            SessionError::GameOver(status) => write!(f, "Game is over ({status})"),
            SessionError::Superseded => write!(f, "Game changed while the engine was thinking"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Rules(e) => Some(e),
            SessionError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RulesError> for SessionError {
    fn from(e: RulesError) -> Self {
        SessionError::Rules(e)
    }
}

impl From<EngineError> for SessionError {
    fn from(e: EngineError) -> Self {
        SessionError::Engine(e)
    }
}

/// Clears the in-flight flag when an engine request ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The authoritative game, shared between a human and an engine.
pub struct GameSession {
    state: RwLock<GameState>,
    initial: GameState,
    human: Color,
    engine_in_flight: AtomicBool,
}

impl GameSession {
    /// A new game from the initial position with the human playing `human`
    #[must_use]
    pub fn new(human: Color) -> Self {
        Self::from_state(GameState::new(), human)
    }

    /// A game starting from `initial`; [`reset`](Self::reset) returns here
    #[must_use]
    pub fn from_state(initial: GameState, human: Color) -> Self {
        GameSession {
            state: RwLock::new(initial.clone()),
            initial,
            human,
            engine_in_flight: AtomicBool::new(false),
        }
    }

    #[inline]
    #[must_use]
    pub fn human(&self) -> Color {
        self.human
    }

    #[inline]
    #[must_use]
    pub fn engine_color(&self) -> Color {
        self.human.opponent()
    }

    /// A consistent copy of the current game
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.read().clone()
    }

    #[must_use]
    pub fn is_engine_turn(&self) -> bool {
        let state = self.state.read();
        !state.is_game_over() && state.side_to_move() == self.engine_color()
    }

    /// Whether an engine request is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.engine_in_flight.load(Ordering::Acquire)
    }

    /// Play the human's move and return the new state.
    pub fn play_human(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<GameState, SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }

        let mut state = self.state.write();
        if state.is_game_over() {
            return Err(SessionError::GameOver(state.status()));
        }
        if state.side_to_move() != self.human {
            return Err(SessionError::NotHumanTurn);
        }

        let next = state.apply_move(from, to, promotion)?;
        *state = next.clone();
        Ok(next)
    }

    /// Ask `provider` for the engine's move and play it.
    ///
    /// No lock is held while the provider thinks, so snapshots stay
    /// available. If the request fails, is cancelled, or the game is reset
    /// meanwhile, the game is left as it was.
    pub fn play_engine<P: MoveProvider>(
        &self,
        provider: &mut P,
        stop: &StopFlag,
    ) -> Result<GameState, SessionError> {
        let asked = self.snapshot();
        if asked.is_game_over() {
            return Err(SessionError::GameOver(asked.status()));
        }
        if asked.side_to_move() != self.engine_color() {
            return Err(SessionError::NotEngineTurn);
        }

        if self
            .engine_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SessionError::Busy);
        }
        let _in_flight = InFlight(&self.engine_in_flight);

        let fen = asked.encode_for_engine();
        debug!("Asking engine about {fen}");
        let mv = provider.best_move(&fen, stop)?;
        if stop.is_stopped() {
            return Err(EngineError::Cancelled.into());
        }

        let mut state = self.state.write();
        if *state != asked {
            debug!("Dropping engine move {mv}: game changed");
            return Err(SessionError::Superseded);
        }
        let next = state.apply_move(mv.from, mv.to, mv.promotion).map_err(|e| {
            warn!("Engine move {mv} rejected: {e}");
            e
        })?;
        *state = next.clone();
        Ok(next)
    }

    /// Start over from the initial position.
    ///
    /// An engine answer still in flight is dropped when it arrives.
    pub fn reset(&self) {
        *self.state.write() = self.initial.clone();
    }
}
