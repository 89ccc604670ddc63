//! Screen: the terminal side of the render collaborator contract.
//!
//! The controller pushes snapshots, overlays and high scores into a
//! [`Screen`]; the main loop draws it with [`crate::GameView`] whenever it is
//! dirty.

use crate::core::GameSnapshot;
use crate::engine::{HighScoreEntry, Renderer};

/// Modal message drawn over the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: String,
    /// May span several lines separated by `\n`.
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct Screen {
    snapshot: GameSnapshot,
    overlay: Option<Overlay>,
    high_scores: Vec<HighScoreEntry>,
    dirty: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn high_scores(&self) -> &[HighScoreEntry] {
        &self.high_scores
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning whether it was set.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Force a redraw, e.g. after a terminal resize.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Renderer for Screen {
    fn render(&mut self, snapshot: &GameSnapshot) {
        if self.snapshot != *snapshot {
            self.snapshot.clone_from(snapshot);
            self.dirty = true;
        }
    }

    fn show_overlay(&mut self, title: &str, message: &str) {
        self.overlay = Some(Overlay {
            title: title.to_string(),
            message: message.to_string(),
        });
        self.dirty = true;
    }

    fn hide_overlay(&mut self) {
        if self.overlay.take().is_some() {
            self.dirty = true;
        }
    }

    fn render_high_scores(&mut self, entries: &[HighScoreEntry]) {
        self.high_scores = entries.to_vec();
        self.dirty = true;
    }
}
