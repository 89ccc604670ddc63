use crate::board::RowList;
use crate::piece::Piece;
use crate::types::{Cell, BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH};

/// Row-major copy of the board
pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<Piece>,
    pub next: Option<Piece>,
    pub held: Option<Piece>,
    pub can_hold: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
    /// Full rows waiting to be removed (glowing), bottom to top
    pub clearing_rows: RowList,
}

impl GameSnapshot {
    /// Reset to the idle, empty-board state
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.next = None;
        self.held = None;
        self.can_hold = true;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = BASE_DROP_MS;
        self.running = false;
        self.paused = false;
        self.game_over = false;
        self.clearing_rows.clear();
    }

    pub fn playable(&self) -> bool {
        self.running && !self.paused && self.clearing_rows.is_empty()
    }

    pub fn is_clearing(&self) -> bool {
        !self.clearing_rows.is_empty()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            held: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: BASE_DROP_MS,
            running: false,
            paused: false,
            game_over: false,
            clearing_rows: RowList::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GameState;

    #[test]
    fn clear_matches_default() {
        let mut game = GameState::new(9);
        game.start_game();
        let mut snap = game.snapshot();
        assert!(snap.playable());

        snap.clear();
        assert_eq!(snap, GameSnapshot::default());
        assert!(!snap.playable());
    }

    #[test]
    fn paused_snapshot_is_not_playable() {
        let mut game = GameState::new(9);
        game.start_game();
        game.pause_game();
        assert!(!game.snapshot().playable());
    }
}
