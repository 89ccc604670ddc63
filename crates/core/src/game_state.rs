//! Game state module - manages the complete game state
//!
//! This module ties together the board, pieces, RNG and scoring. It handles
//! piece movement, rotation, hold, lock-in, the delayed line clear and the
//! game lifecycle.
//!
//! # Lifecycle
//!
//! ```text
//! idle --start_game--> running <--pause/resume--> paused
//! running --lock-in with full rows--> clearing --due time--> running
//! running --blocked spawn--> over (terminal until start_game)
//! ```
//!
//! The engine never reads a clock. Operations that can start a line clear
//! take the caller's `now_ms`, and [`GameState::poll_line_clear`] resolves the
//! clear once the caller's clock reaches the due time.

use crate::board::{Board, RowList};
use crate::piece::Piece;
use crate::rng::PieceRandomizer;
use crate::scoring::{calculate_level, calculate_line_score, get_drop_interval_ms};
use crate::snapshot::GameSnapshot;
use crate::types::{BASE_DROP_MS, LINE_CLEAR_DELAY_MS};

/// Coarse view of the engine flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Clearing,
    Over,
}

/// Full rows detected at lock-in, waiting for their removal time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingClear {
    /// Row indices at detection time, bottom to top
    pub rows: RowList,
    /// Clock time at which the rows are removed
    pub due_at_ms: u64,
}

/// Outcome of a resolved line clear
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    pub rows: RowList,
    pub lines: u32,
    /// Points awarded (table value times the level before the clear)
    pub points: u32,
    /// Level after the clear
    pub level: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Piece>,
    next: Option<Piece>,
    held: Option<Piece>,
    can_hold: bool,
    randomizer: PieceRandomizer,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    running: bool,
    paused: bool,
    game_over: bool,
    pending_clear: Option<PendingClear>,
}

impl GameState {
    /// Create an idle game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            held: None,
            can_hold: true,
            randomizer: PieceRandomizer::new(seed),
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: BASE_DROP_MS,
            running: false,
            paused: false,
            game_over: false,
            pending_clear: None,
        }
    }

    /// Reset everything and start a fresh game
    ///
    /// The RNG keeps going, so consecutive games get different pieces.
    pub fn start_game(&mut self) {
        self.board.clear();
        self.active = Some(self.generate_piece());
        self.next = Some(self.generate_piece());
        self.held = None;
        self.can_hold = true;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = BASE_DROP_MS;
        self.running = true;
        self.paused = false;
        self.game_over = false;
        self.pending_clear = None;
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_clearing(&self) -> bool {
        self.pending_clear.is_some()
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::Over
        } else if !self.running {
            Phase::Idle
        } else if self.paused {
            Phase::Paused
        } else if self.is_clearing() {
            Phase::Clearing
        } else {
            Phase::Running
        }
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn held(&self) -> Option<Piece> {
        self.held
    }

    pub fn seed(&self) -> u32 {
        self.randomizer.seed()
    }

    pub fn pending_clear(&self) -> Option<&PendingClear> {
        self.pending_clear.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access, for setting up positions by hand
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active;
        out.next = self.next;
        out.held = self.held;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.running = self.running;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.clearing_rows.clear();
        if let Some(pending) = &self.pending_clear {
            out.clearing_rows.extend(pending.rows.iter().copied());
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn generate_piece(&mut self) -> Piece {
        Piece::new(self.randomizer.draw())
    }

    /// Movement, rotation, hold and lock-in are only accepted while a game is
    /// running and no clear is pending
    fn accepts_input(&self) -> bool {
        self.running && self.pending_clear.is_none()
    }

    /// Try to move the active piece
    pub fn move_current_piece(&mut self, dx: i8, dy: i8) -> bool {
        if !self.accepts_input() {
            return false;
        }
        match self.active.as_mut() {
            Some(piece) => piece.try_move(dx, dy, &self.board),
            None => false,
        }
    }

    /// Try to rotate the active piece; a blocked rotation is simply ignored
    pub fn rotate_current_piece(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        match self.active.as_mut() {
            Some(piece) => piece.rotate(&self.board),
            None => false,
        }
    }

    /// Drop the active piece as far as it goes, then lock it
    ///
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self, now_ms: u64) -> u32 {
        if !self.accepts_input() || self.active.is_none() {
            return 0;
        }
        let mut distance = 0;
        while self.move_current_piece(0, 1) {
            distance += 1;
        }
        self.place_piece(now_ms);
        distance
    }

    /// Lock the active piece into the board
    ///
    /// Full rows start a delayed clear due at `now_ms + LINE_CLEAR_DELAY_MS`.
    /// The next piece is promoted right away. When a clear is pending, the
    /// blocked-spawn check waits until the clear resolves so it sees the
    /// post-clear board.
    pub fn place_piece(&mut self, now_ms: u64) {
        if !self.accepts_input() {
            return;
        }
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.lock_piece(&active);

        let full = self.board.full_rows();
        if !full.is_empty() {
            self.pending_clear = Some(PendingClear {
                rows: full,
                due_at_ms: now_ms + LINE_CLEAR_DELAY_MS as u64,
            });
        }

        let promoted = match self.next.take() {
            Some(piece) => piece,
            None => self.generate_piece(),
        };
        self.active = Some(promoted);
        self.next = Some(self.generate_piece());
        self.can_hold = true;

        if self.pending_clear.is_none() {
            self.check_spawn();
        }
    }

    /// Resolve the pending line clear if its due time has passed
    ///
    /// Runs regardless of pause; a clear started before a pause still
    /// completes on time.
    pub fn poll_line_clear(&mut self, now_ms: u64) -> Option<LineClear> {
        let due = self.pending_clear.as_ref()?.due_at_ms;
        if now_ms < due {
            return None;
        }
        let pending = self.pending_clear.take()?;

        let removed = self.board.remove_rows(&pending.rows);
        let points = calculate_line_score(removed, self.level);

        self.lines += removed as u32;
        self.score += points;
        self.level = calculate_level(self.lines);
        self.drop_interval_ms = get_drop_interval_ms(self.level);

        self.check_spawn();

        Some(LineClear {
            rows: pending.rows,
            lines: removed as u32,
            points,
            level: self.level,
        })
    }

    /// Swap the active piece with the hold slot, once per spawned piece
    pub fn hold_current_piece(&mut self) -> bool {
        if !self.can_hold || !self.accepts_input() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let mut outgoing = active;
        outgoing.reset_position();

        let mut incoming = match self.held.take() {
            Some(held) => held,
            None => {
                let promoted = match self.next.take() {
                    Some(piece) => piece,
                    None => self.generate_piece(),
                };
                self.next = Some(self.generate_piece());
                promoted
            }
        };
        incoming.reset_position();

        self.held = Some(outgoing);
        self.active = Some(incoming);
        self.can_hold = false;

        self.check_spawn();
        true
    }

    pub fn pause_game(&mut self) {
        self.paused = true;
    }

    pub fn resume_game(&mut self) {
        self.paused = false;
    }

    /// End the game if the active piece cannot sit where it spawned
    ///
    /// A game can end while paused (a clear resolving during the pause), so
    /// the pause flag is dropped too; `over` is only left via `start_game`.
    fn check_spawn(&mut self) {
        let blocked = self
            .active
            .as_ref()
            .is_some_and(|piece| !piece.is_valid(&self.board));
        if blocked {
            self.running = false;
            self.paused = false;
            self.game_over = true;
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
