//! Render collaborator contract
//!
//! The controller pushes state out through this trait and never touches a
//! presentation handle itself.

use blockfall_core::GameSnapshot;

use crate::high_scores::HighScoreEntry;

pub trait Renderer {
    /// Draw the current game state
    fn render(&mut self, snapshot: &GameSnapshot);

    /// Show a modal message over the board (start, pause, game over)
    fn show_overlay(&mut self, title: &str, message: &str);

    fn hide_overlay(&mut self);

    /// Show the stored high-score list
    fn render_high_scores(&mut self, _entries: &[HighScoreEntry]) {}
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, snapshot: &GameSnapshot) {
        (**self).render(snapshot)
    }

    fn show_overlay(&mut self, title: &str, message: &str) {
        (**self).show_overlay(title, message)
    }

    fn hide_overlay(&mut self) {
        (**self).hide_overlay()
    }

    fn render_high_scores(&mut self, entries: &[HighScoreEntry]) {
        (**self).render_high_scores(entries)
    }
}
