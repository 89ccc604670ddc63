//! Piece module - one tetromino instance and its collision rules
//!
//! A piece is a (kind, rotation, position) triple over the static table in
//! [`crate::pieces`]. All collision checks go through [`is_valid_position`].

use crate::board::Board;
use crate::pieces::{get_shape, rotation_count, Shape};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

/// Whether `shape` placed with its origin at (x, y) fits on `board`.
///
/// Every occupied cell must be inside the side walls and above the floor.
/// Cells on rows >= 0 must also land on empty board cells; cells above the
/// top edge never collide, so pieces can spawn and rotate partly off-screen.
pub fn is_valid_position(shape: &Shape, x: i8, y: i8, board: &Board) -> bool {
    shape.cells().all(|(dx, dy)| {
        let (Some(px), Some(py)) = (x.checked_add(dx), y.checked_add(dy)) else {
            return false;
        };
        if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
            return false;
        }
        py < 0 || !board.is_occupied(px, py)
    })
}

/// A piece instance sitting in one slot (active, next or held)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Index into the kind's rotation states
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a new piece at the spawn position, rotation 0
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Create a piece at an explicit pose
    pub fn at(kind: PieceKind, rotation: usize, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: rotation % rotation_count(kind),
            x,
            y,
        }
    }

    /// Shape for the current rotation
    pub fn shape(&self) -> Shape {
        get_shape(self.kind, self.rotation)
    }

    /// Board cells covered by this piece, including any above the top edge
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        let shape = self.shape();
        let cells: arrayvec::ArrayVec<(i8, i8), 4> =
            shape
                .cells()
                .map(|(dx, dy)| (x.saturating_add(dx), y.saturating_add(dy)))
                .collect();
        cells.into_iter()
    }

    /// Check whether the piece fits where it currently is
    pub fn is_valid(&self, board: &Board) -> bool {
        is_valid_position(&self.shape(), self.x, self.y, board)
    }

    /// Shift by (dx, dy) if the target position is valid
    ///
    /// Returns false and leaves the piece untouched otherwise.
    pub fn try_move(&mut self, dx: i8, dy: i8, board: &Board) -> bool {
        let (Some(nx), Some(ny)) = (self.x.checked_add(dx), self.y.checked_add(dy)) else {
            return false;
        };
        if is_valid_position(&self.shape(), nx, ny, board) {
            self.x = nx;
            self.y = ny;
            return true;
        }
        false
    }

    /// Advance to the next rotation state in place
    ///
    /// There are no wall kicks: if the rotated shape collides at the current
    /// position the rotation is rejected.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let next = (self.rotation + 1) % rotation_count(self.kind);
        if is_valid_position(&get_shape(self.kind, next), self.x, self.y, board) {
            self.rotation = next;
            return true;
        }
        false
    }

    /// Back to the spawn pose: top-center column, row 0, rotation 0
    pub fn reset_position(&mut self) {
        self.x = SPAWN_X;
        self.y = SPAWN_Y;
        self.rotation = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_piece_at_spawn() {
        let piece = Piece::new(PieceKind::T);
        assert_eq!(piece.kind, PieceKind::T);
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.x, 4);
        assert_eq!(piece.y, 0);
    }

    #[test]
    fn test_cells_are_offset_by_position() {
        let piece = Piece::at(PieceKind::O, 0, 2, 5);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(2, 5), (3, 5), (2, 6), (3, 6)]);
    }

    #[test]
    fn test_walls_and_floor() {
        let board = Board::new();
        let i = get_shape(PieceKind::I, 0);
        assert!(is_valid_position(&i, 0, 19, &board));
        assert!(is_valid_position(&i, 6, 0, &board));
        assert!(!is_valid_position(&i, -1, 0, &board));
        assert!(!is_valid_position(&i, 7, 0, &board));
        assert!(!is_valid_position(&i, 0, 20, &board));
    }

    #[test]
    fn test_cells_above_top_never_collide() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, 0, Some(PieceKind::Z));
        }
        let vertical_i = get_shape(PieceKind::I, 1);
        // Rows -4..-1: entirely above the board.
        assert!(is_valid_position(&vertical_i, 3, -4, &board));
        // Rows -3..0: last cell hits the filled top row.
        assert!(!is_valid_position(&vertical_i, 3, -3, &board));
    }

    #[test]
    fn test_try_move_rejects_collision() {
        let mut board = Board::new();
        board.set(4, 2, Some(PieceKind::I));
        let mut piece = Piece::new(PieceKind::O);
        assert!(!piece.try_move(0, 1, &board));
        assert_eq!((piece.x, piece.y), (4, 0));
        assert!(piece.try_move(-1, 0, &board));
        assert_eq!((piece.x, piece.y), (3, 0));
    }

    #[test]
    fn test_extreme_offsets_are_rejected() {
        let board = Board::new();
        let o = get_shape(PieceKind::O, 0);
        assert!(!is_valid_position(&o, i8::MAX, 0, &board));
        assert!(!is_valid_position(&o, 0, i8::MAX, &board));
        assert!(!is_valid_position(&o, i8::MIN, i8::MIN, &board));

        let mut piece = Piece::new(PieceKind::I);
        assert!(!piece.try_move(i8::MAX, 0, &board));
        assert!(!piece.try_move(i8::MIN, 0, &board));
        assert!(!piece.try_move(0, i8::MAX, &board));
        assert_eq!(piece, Piece::new(PieceKind::I));
    }

    #[test]
    fn test_rotate_without_kick() {
        let board = Board::new();
        // Vertical I against the right wall: rotating to horizontal would stick out.
        let mut piece = Piece::at(PieceKind::I, 1, 9, 5);
        assert!(!piece.rotate(&board));
        assert_eq!(piece.rotation, 1);

        let mut piece = Piece::at(PieceKind::I, 1, 4, 5);
        assert!(piece.rotate(&board));
        assert_eq!(piece.rotation, 0);
    }

    #[test]
    fn test_reset_position() {
        let mut piece = Piece::at(PieceKind::L, 3, 0, 12);
        piece.reset_position();
        assert_eq!(piece, Piece::new(PieceKind::L));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Piece::new(PieceKind::S);
        let mut copy = original.clone();
        copy.x = 0;
        copy.rotation = 1;
        assert_eq!(original, Piece::new(PieceKind::S));
    }
}
