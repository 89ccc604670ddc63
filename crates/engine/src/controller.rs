//! Game controller - commands, the timed loop and collaborator forwarding
//!
//! The controller owns a [`GameState`] and three collaborators: a
//! [`Renderer`], a [`ScoreStore`] and a [`Clock`]. It is single-threaded and
//! never blocks. The host drives it:
//!
//! - [`Controller::handle_command`] for every input command;
//! - [`Controller::frame`] whenever [`Controller::frame_requested`] is set and
//!   a frame interval has passed;
//! - [`Controller::fire_due_timers`] on every loop iteration, paused or not.
//!
//! Gravity runs inside `frame`; the delayed line clear resolves inside
//! `fire_due_timers`.

use blockfall_core::{GameSnapshot, GameState, LineClear};
use blockfall_types::Command;

use crate::clock::Clock;
use crate::high_scores::{HighScoreEntry, HighScores, ScoreStore};
use crate::render::Renderer;

pub const START_TITLE: &str = "TETRIS";
pub const START_MESSAGE: &str = "Press SPACE to start";
pub const PAUSE_TITLE: &str = "PAUSED";
pub const PAUSE_MESSAGE: &str = "Press P to resume";
pub const GAME_OVER_TITLE: &str = "GAME OVER";

pub fn game_over_message(score: u32) -> String {
    format!("Final Score: {}\nPress SPACE to restart", score)
}

pub struct Controller<R, S, C> {
    game: GameState,
    renderer: R,
    store: S,
    clock: C,
    high_scores: HighScores,
    snapshot: GameSnapshot,
    last_drop_ms: u64,
    frame_requested: bool,
    game_over_handled: bool,
}

impl<R, S, C> Controller<R, S, C>
where
    R: Renderer,
    S: ScoreStore,
    C: Clock,
{
    /// Wire up the collaborators and show the start screen
    ///
    /// The stored high-score list is loaded, normalized, written back and
    /// handed to the renderer. A store that fails to load starts empty.
    pub fn new(game: GameState, renderer: R, store: S, clock: C) -> Self {
        let mut controller = Self {
            game,
            renderer,
            store,
            clock,
            high_scores: HighScores::new(),
            snapshot: GameSnapshot::default(),
            last_drop_ms: 0,
            frame_requested: false,
            game_over_handled: false,
        };

        let stored = match controller.store.load() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("failed to load high scores: {}", e);
                Vec::new()
            }
        };
        controller.high_scores = HighScores::from_entries(stored);
        controller.persist_high_scores();
        controller
            .renderer
            .render_high_scores(controller.high_scores.entries());

        controller.renderer.show_overlay(START_TITLE, START_MESSAGE);
        controller.render();
        controller
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Whether the loop is armed and wants another [`Controller::frame`]
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Whether commands other than start/resume/pause act right now
    pub fn is_playing(&self) -> bool {
        self.game.running() && !self.game.paused()
    }

    /// Apply one input command
    ///
    /// Returns true if the command changed anything. While idle, over or
    /// paused only `StartOrResume` and `TogglePause` act. Commands that
    /// arrive during a line clear are dropped by the engine.
    pub fn handle_command(&mut self, command: Command) -> bool {
        log::trace!("command {}", command.as_str());

        match command {
            Command::StartOrResume => {
                if !self.game.running() {
                    self.start();
                    true
                } else if self.game.paused() {
                    self.resume();
                    true
                } else {
                    false
                }
            }
            Command::TogglePause => {
                if self.game.game_over() || !self.game.running() {
                    false
                } else if self.game.paused() {
                    self.resume();
                    true
                } else if self.game.running() {
                    self.pause();
                    true
                } else {
                    false
                }
            }
            _ if !self.is_playing() => false,
            _ => {
                let now = self.clock.now_ms();
                let changed = match command {
                    Command::MoveLeft => self.game.move_current_piece(-1, 0),
                    Command::MoveRight => self.game.move_current_piece(1, 0),
                    Command::SoftDrop => self.soft_drop(now),
                    Command::Rotate => self.game.rotate_current_piece(),
                    Command::HardDrop => {
                        let was_clearing = self.game.is_clearing();
                        self.game.hard_drop(now);
                        !was_clearing
                    }
                    Command::Hold => self.game.hold_current_piece(),
                    Command::StartOrResume | Command::TogglePause => false,
                };
                self.render();
                self.check_game_over();
                changed
            }
        }
    }

    /// One tick of the timed loop
    ///
    /// Applies gravity if the drop interval has strictly elapsed, renders,
    /// and re-arms unless the game is paused or over. Returns whether another
    /// frame is requested.
    pub fn frame(&mut self) -> bool {
        self.frame_requested = false;

        if self.is_playing() {
            let now = self.clock.now_ms();
            if now.saturating_sub(self.last_drop_ms) > self.game.drop_interval_ms() as u64 {
                if !self.game.move_current_piece(0, 1) {
                    self.game.place_piece(now);
                }
                self.last_drop_ms = now;
            }
        }

        self.render();
        self.check_game_over();

        self.frame_requested = self.is_playing();
        self.frame_requested
    }

    /// Resolve the pending line clear once its due time has passed
    pub fn fire_due_timers(&mut self) -> Option<LineClear> {
        let now = self.clock.now_ms();
        let clear = self.game.poll_line_clear(now)?;
        log::debug!(
            "cleared {} line(s) for {} points, level {}",
            clear.lines,
            clear.points,
            clear.level
        );
        self.render();
        self.check_game_over();
        Some(clear)
    }

    fn start(&mut self) {
        self.game.start_game();
        self.game_over_handled = false;
        self.renderer.hide_overlay();
        self.last_drop_ms = self.clock.now_ms();
        self.frame_requested = true;
        log::info!("game started (seed {})", self.game.seed());
        self.render();
    }

    fn pause(&mut self) {
        self.game.pause_game();
        self.frame_requested = false;
        self.renderer.show_overlay(PAUSE_TITLE, PAUSE_MESSAGE);
        log::debug!("paused");
        self.render();
    }

    fn resume(&mut self) {
        self.game.resume_game();
        self.renderer.hide_overlay();
        self.last_drop_ms = self.clock.now_ms();
        self.frame_requested = true;
        log::debug!("resumed");
        self.render();
    }

    fn soft_drop(&mut self, now: u64) -> bool {
        if self.game.move_current_piece(0, 1) {
            return true;
        }
        if self.game.is_clearing() {
            return false;
        }
        self.game.place_piece(now);
        true
    }

    fn render(&mut self) {
        self.game.snapshot_into(&mut self.snapshot);
        self.renderer.render(&self.snapshot);
    }

    /// Record the result and show the final overlay, once per game
    fn check_game_over(&mut self) {
        if !self.game.game_over() || self.game_over_handled {
            return;
        }
        self.game_over_handled = true;
        self.frame_requested = false;

        let score = self.game.score();
        log::info!(
            "game over: score {}, lines {}, level {}",
            score,
            self.game.lines(),
            self.game.level()
        );

        self.high_scores
            .record(HighScoreEntry::new(score, self.clock.today()));
        self.persist_high_scores();
        self.renderer.render_high_scores(self.high_scores.entries());
        self.renderer
            .show_overlay(GAME_OVER_TITLE, &game_over_message(score));
    }

    fn persist_high_scores(&mut self) {
        if let Err(e) = self.store.save(self.high_scores.entries()) {
            log::warn!("failed to save high scores: {}", e);
        }
    }
}
