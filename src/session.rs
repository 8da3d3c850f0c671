//! Click-driven game session against the heuristic bot.
//!
//! [`GameSession`] is the whole interaction layer: it holds the current
//! [`GamePosition`] handle, the user's selection and last error, the move
//! history and the one pending bot reply. The position is only ever
//! replaced, never mutated, so the session keeps previous handles on a
//! stack to serve undo.
//!
//! The session does not own a clock. Callers pass `now` into
//! [`GameSession::handle_square_click`] and drive the deferred bot reply
//! with [`GameSession::poll`], typically from their event loop:
//!
//! ```rust,ignore
//! let outcome = session.handle_square_click(square, Instant::now());
//! if let Some(due) = session.next_deadline() {
//!     sleep_until(due);
//!     session.poll(Instant::now());
//! }
//! ```

use std::time::Instant;

use rand::{SeedableRng, rngs::StdRng};
use shakmaty::{Color, Square};
use tracing::{debug, info, warn};

use crate::{
    config::{SessionConfig, UndoPolicy},
    error::GameError,
    heuristics::{choose_bot_move, suggest_move},
    history::MoveHistory,
    material::{MaterialScore, score_material},
    position::GamePosition,
    status::GameStatus,
    types::{Difficulty, DisplayMode, MoveInfo},
};

/// What a single square click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(Square),
    Deselected,
    Moved(MoveInfo),
    /// The click produced an error; see [`GameSession::error`].
    Rejected,
    /// A bot reply is pending, clicks are not accepted until it lands.
    Ignored,
}

/// Deferred bot reply. Only fires if its generation is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledReply {
    pub due: Instant,
    generation: u64,
}

pub struct GameSession {
    config: SessionConfig,
    initial: GamePosition,
    position: GamePosition,
    previous: Vec<GamePosition>,
    selection: Option<Square>,
    error: Option<GameError>,
    difficulty: Difficulty,
    display_mode: DisplayMode,
    history: MoveHistory,
    pending: Option<ScheduledReply>,
    generation: u64,
    rng: StdRng,
}

impl GameSession {
    /// Start a session. If the bot has the first move, its reply is
    /// scheduled from the current time.
    pub fn new(config: SessionConfig) -> Result<Self, GameError> {
        let initial = match &config.start_fen {
            Some(fen) => GamePosition::from_fen(fen)?,
            None => GamePosition::new(),
        };
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        info!(
            difficulty = %config.difficulty,
            fen = %initial.fen(),
            "starting game session"
        );
        let mut session = Self {
            difficulty: config.difficulty,
            position: initial.clone(),
            initial,
            config,
            previous: Vec::new(),
            selection: None,
            error: None,
            display_mode: DisplayMode::default(),
            history: MoveHistory::new(),
            pending: None,
            generation: 0,
            rng,
        };
        session.schedule_reply(Instant::now());
        Ok(session)
    }

    pub fn position(&self) -> &GamePosition {
        &self.position
    }

    pub fn selected(&self) -> Option<Square> {
        self.selection
    }

    /// Last interaction error, cleared by the next successful move or
    /// selection.
    pub fn error(&self) -> Option<&GameError> {
        self.error.as_ref()
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn human_color(&self) -> Color {
        self.config.human_color.into()
    }

    pub fn bot_color(&self) -> Color {
        self.human_color().other()
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::of(&self.position)
    }

    pub fn material(&self) -> MaterialScore {
        score_material(&self.position.snapshot())
    }

    /// Hint for the side to move.
    pub fn suggested_move(&self) -> Option<MoveInfo> {
        suggest_move(self.position.legal_moves()).cloned()
    }

    pub fn pending_reply(&self) -> Option<ScheduledReply> {
        self.pending
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|reply| reply.due)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!(from = %self.difficulty, to = %difficulty, "difficulty changed");
        self.difficulty = difficulty;
    }

    pub fn toggle_display_mode(&mut self) -> DisplayMode {
        self.display_mode = self.display_mode.toggled();
        self.display_mode
    }

    pub fn handle_square_click(&mut self, square: Square, now: Instant) -> ClickOutcome {
        if self.pending.is_some() {
            debug!(%square, "click ignored while the bot reply is pending");
            return ClickOutcome::Ignored;
        }

        if let Some(from) = self.selection.take() {
            if from == square {
                debug!(%square, "selection cleared");
                return ClickOutcome::Deselected;
            }
            return match self.try_human_move(from, square, now) {
                Ok(mv) => ClickOutcome::Moved(mv),
                Err(err) => {
                    debug!(%from, to = %square, "move rejected");
                    self.error = Some(err);
                    ClickOutcome::Rejected
                }
            };
        }

        let human = self.human_color();
        match self.position.piece_at(square) {
            Some(piece) if piece.color == human && self.position.turn() == human => {
                debug!(%square, "square selected");
                self.selection = Some(square);
                self.error = None;
                ClickOutcome::Selected(square)
            }
            _ => {
                self.error = Some(GameError::NoValidSelection(square));
                ClickOutcome::Rejected
            }
        }
    }

    fn try_human_move(
        &mut self,
        from: Square,
        to: Square,
        now: Instant,
    ) -> Result<MoveInfo, GameError> {
        let (mv, next) = self.position.play_squares(from, to, None)?;
        self.commit(mv.clone(), next);
        self.error = None;
        info!(san = %mv.san, "move played");
        self.schedule_reply(now);
        Ok(mv)
    }

    fn commit(&mut self, mv: MoveInfo, next: GamePosition) {
        self.history.push(
            self.position.turn(),
            self.position.fullmove_number(),
            mv.san,
        );
        let previous = std::mem::replace(&mut self.position, next);
        self.previous.push(previous);
    }

    /// Schedule a reply whenever the bot is to move in an unfinished game.
    fn schedule_reply(&mut self, now: Instant) {
        if self.position.turn() != self.bot_color() || self.position.is_game_over() {
            return;
        }
        self.generation += 1;
        let due = now + self.config.bot_delay();
        debug!(generation = self.generation, "bot reply scheduled");
        self.pending = Some(ScheduledReply {
            due,
            generation: self.generation,
        });
    }

    /// Drop the pending bot reply, if any.
    pub fn cancel_pending(&mut self) {
        if let Some(reply) = self.pending.take() {
            debug!(generation = reply.generation, "bot reply cancelled");
        }
        self.generation += 1;
    }

    /// Play the pending bot reply if it is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<MoveInfo> {
        let reply = self.pending?;
        if now < reply.due {
            return None;
        }
        self.pending = None;
        if reply.generation != self.generation {
            warn!(generation = reply.generation, "stale bot reply dropped");
            return None;
        }
        self.play_bot_move()
    }

    /// Let the bot move right away. Does nothing when the side to move has
    /// no legal moves.
    pub fn play_bot_move(&mut self) -> Option<MoveInfo> {
        let moves = self.position.legal_moves();
        let Some(mv) = choose_bot_move(moves, self.difficulty, &mut self.rng).cloned() else {
            debug!("bot has no legal moves");
            return None;
        };
        match self.position.apply(&mv) {
            Ok(next) => {
                info!(san = %mv.san, difficulty = %self.difficulty, "bot move played");
                self.commit(mv.clone(), next);
                Some(mv)
            }
            Err(err) => {
                warn!(san = %mv.san, %err, "rules engine refused the bot move");
                None
            }
        }
    }

    /// Take back moves according to the configured [`UndoPolicy`].
    /// Returns the number of plies removed. If that leaves the bot to move,
    /// its reply is scheduled from `now`.
    pub fn undo(&mut self, now: Instant) -> usize {
        self.cancel_pending();
        self.selection = None;
        self.error = None;
        let undone = match self.config.undo_policy {
            UndoPolicy::TwoPlies => (0..2).take_while(|_| self.undo_ply()).count(),
            UndoPolicy::ToHumanTurn => {
                let mut undone = 0;
                while self.undo_ply() {
                    undone += 1;
                    if self.position.turn() == self.human_color() {
                        break;
                    }
                }
                undone
            }
        };
        info!(plies = undone, "undo");
        self.schedule_reply(now);
        undone
    }

    fn undo_ply(&mut self) -> bool {
        let Some(previous) = self.previous.pop() else {
            return false;
        };
        self.position = previous;
        self.history.pop_ply();
        true
    }

    /// Back to the starting position. Difficulty and display mode stay.
    pub fn reset(&mut self, now: Instant) {
        self.cancel_pending();
        self.position = self.initial.clone();
        self.previous.clear();
        self.history.clear();
        self.selection = None;
        self.error = None;
        info!("game reset");
        self.schedule_reply(now);
    }
}
