//! GameView: maps a [`Screen`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{color, get_shape, GameSnapshot, Piece};
use crate::engine::HighScoreEntry;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::sink::{Overlay, Screen};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const GLOW_FG: Rgb = Rgb::new(255, 255, 255);
const GLOW_BG: Rgb = Rgb::new(90, 90, 110);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board frame sits inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Terminal view of the board, side panel and overlay.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    /// Largest cell size accepted by [`GameView::new`]; keeps the layout
    /// arithmetic within `u16` for any viewport.
    pub const MAX_CELL: u16 = 8;

    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, Self::MAX_CELL),
            cell_h: cell_h.clamp(1, Self::MAX_CELL),
        }
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, screen: &Screen, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let snap = screen.snapshot();
        let board_px_w = (BOARD_WIDTH as u16).saturating_mul(self.cell_w);
        let board_px_h = (BOARD_HEIGHT as u16).saturating_mul(self.cell_h);
        let frame = Frame {
            x: viewport.width.saturating_sub(board_px_w + 2) / 2,
            y: viewport.height.saturating_sub(board_px_h + 2) / 2,
            w: board_px_w + 2,
            h: board_px_h + 2,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, frame, CellStyle::default());

        // Locked cells, full rows glowing while a clear is pending.
        for y in 0..BOARD_HEIGHT as u16 {
            let glowing = snap.clearing_rows.contains(&(y as usize));
            for x in 0..BOARD_WIDTH as u16 {
                match snap.board[y as usize][x as usize] {
                    Some(_) if glowing => {
                        let style = CellStyle::new(GLOW_FG, GLOW_BG).bold();
                        self.fill_cell_rect(fb, frame, x, y, '█', style);
                    }
                    Some(kind) => self.draw_board_cell(fb, frame, x, y, kind),
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        if let Some(active) = snap.active {
            if snap.running || snap.game_over {
                self.draw_active(fb, frame, &active);
            }
        }

        self.draw_side_panel(fb, snap, screen.high_scores(), viewport, frame);

        if let Some(overlay) = screen.overlay() {
            self.draw_overlay(fb, frame, overlay);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, screen: &Screen, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(screen, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(color(kind), PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    /// Active piece cells inside the board; rows above the top are skipped.
    fn draw_active(&self, fb: &mut FrameBuffer, frame: Frame, piece: &Piece) {
        for (x, y) in piece.cells() {
            if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                self.draw_board_cell(fb, frame, x as u16, y as u16, piece.kind);
            }
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        high_scores: &[HighScoreEntry],
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = frame.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y, next.kind, false);
        }
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        match snap.held {
            Some(held) => self.draw_preview(fb, panel_x, y, held.kind, !snap.can_hold),
            None => fb.put_str(panel_x, y, "-", value),
        }
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "HIGH SCORES", label);
        y = y.saturating_add(1);
        if high_scores.is_empty() {
            fb.put_str(panel_x, y, "-", dim);
        }
        for (i, entry) in high_scores.iter().enumerate() {
            if y >= viewport.height {
                break;
            }
            fb.put_u32(panel_x, y, (i as u32) + 1, value);
            fb.put_char(panel_x + 1, y, '.', value);
            let w = fb.put_u32(panel_x + 3, y, entry.score, value);
            if panel_w >= 24 {
                fb.put_str(panel_x + 4 + w, y, &entry.date, dim);
            }
            y = y.saturating_add(1);
        }
    }

    /// Small piece picture in spawn rotation; dimmed when unavailable.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, dimmed: bool) {
        let mut style = CellStyle::new(color(kind), PANEL_BG);
        if dimmed {
            style = style.dim();
        }
        for (dx, dy) in get_shape(kind, 0).cells() {
            let px = x + (dx as u16) * 2;
            let py = y + dy as u16;
            fb.put_char(px, py, '█', style);
            fb.put_char(px + 1, py, '█', style);
        }
    }

    /// Centered box over the board with the title and message lines.
    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, overlay: &Overlay) {
        let lines = overlay.message.lines().count() as u16;
        let widest = overlay
            .message
            .lines()
            .chain(std::iter::once(overlay.title.as_str()))
            .map(|l| l.chars().count() as u16)
            .max()
            .unwrap_or(0);
        let box_h = lines + 3;
        let box_w = frame.w.saturating_sub(2).max(widest + 2);
        let box_y = frame.y + frame.h.saturating_sub(box_h) / 2;
        let box_x = (frame.x + frame.w / 2).saturating_sub(box_w / 2);

        let panel = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));
        fb.fill_rect(box_x, box_y, box_w, box_h, ' ', panel);

        let title = panel.bold();
        put_centered(fb, box_x, box_w, box_y + 1, &overlay.title, title);
        for (i, line) in overlay.message.lines().enumerate() {
            put_centered(fb, box_x, box_w, box_y + 2 + i as u16, line, panel);
        }
    }
}

fn put_centered(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    fb.put_str(x + w.saturating_sub(text_w) / 2, y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::engine::Renderer;

    fn screen_for(game: &GameState) -> Screen {
        let mut screen = Screen::new();
        screen.render(&game.snapshot());
        screen
    }

    fn contains(fb: &FrameBuffer, text: &str) -> bool {
        (0..fb.height()).any(|y| fb.row_text(y).contains(text))
    }

    #[test]
    fn oversized_cells_are_clamped() {
        let mut game = GameState::new(1);
        game.start_game();
        let screen = screen_for(&game);

        let view = GameView::new(u16::MAX, u16::MAX);
        assert_eq!(view.cell_w, GameView::MAX_CELL);
        assert_eq!(view.cell_h, GameView::MAX_CELL);
        let fb = view.render(&screen, Viewport::new(200, 200));
        // 82x162 frame centered in 200x200.
        assert_eq!(fb.get(59, 19).unwrap().ch, '┌');

        let fb = GameView::new(u16::MAX, 1).render(&screen, Viewport::new(u16::MAX, 4));
        assert_eq!(fb.width(), u16::MAX);
    }

    #[test]
    fn locked_cells_use_piece_colors() {
        let mut game = GameState::new(1);
        game.board_mut().set(0, 19, Some(PieceKind::L));
        let fb = GameView::default().render(&screen_for(&game), Viewport::new(22, 22));

        let cell = fb.get(1, 20).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, color(PieceKind::L));
        assert_eq!(fb.get(2, 20).unwrap().ch, '█');
        assert_eq!(fb.get(3, 20).unwrap().ch, '·');
    }

    #[test]
    fn active_piece_drawn_only_once_started() {
        let mut game = GameState::new(1);
        game.start_game();
        let active = game.active().unwrap();
        let fb = GameView::default().render(&screen_for(&game), Viewport::new(22, 22));

        for (x, y) in active.cells() {
            let cell = fb.get(1 + 2 * x as u16, 1 + y as u16).unwrap();
            assert_eq!(cell.style.fg, color(active.kind));
        }
    }

    #[test]
    fn overlay_lines_are_drawn() {
        let game = GameState::new(1);
        let mut screen = screen_for(&game);
        screen.show_overlay("GAME OVER", "Final Score: 300\nPress SPACE to restart");
        let fb = GameView::default().render(&screen, Viewport::new(40, 24));

        assert!(contains(&fb, "GAME OVER"));
        assert!(contains(&fb, "Final Score: 300"));
        assert!(contains(&fb, "Press SPACE to"));
    }

    #[test]
    fn small_viewport_does_not_panic() {
        let mut game = GameState::new(1);
        game.start_game();
        let mut screen = screen_for(&game);
        screen.show_overlay("TETRIS", "Press SPACE to start");
        let fb = GameView::default().render(&screen, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
