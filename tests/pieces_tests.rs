//! Piece and shape table tests

use blockfall::core::{get_shape, is_valid_position, rotation_count, Board, Piece};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_every_kind_has_four_cells_in_every_rotation() {
    for kind in PieceKind::ALL {
        for rot in 0..rotation_count(kind) {
            assert_eq!(get_shape(kind, rot).cells().count(), 4);
        }
    }
}

#[test]
fn test_rotation_cycle_returns_to_start() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let mut piece = Piece::at(kind, 0, 3, 8);
        let start_shape = piece.shape();
        for _ in 0..rotation_count(kind) {
            assert!(piece.rotate(&board));
        }
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.shape(), start_shape);
    }
}

#[test]
fn test_o_rotation_is_identity() {
    let board = Board::new();
    let mut piece = Piece::new(PieceKind::O);
    assert!(piece.rotate(&board));
    assert_eq!(piece, Piece::new(PieceKind::O));
}

#[test]
fn test_overlap_rejected_at_visible_rows() {
    let mut board = Board::new();
    board.set(5, 1, Some(PieceKind::J));
    let t = get_shape(PieceKind::T, 0);
    // T at (4, 0) covers (5,0), (4,1), (5,1), (6,1).
    assert!(!is_valid_position(&t, 4, 0, &board));
    assert!(is_valid_position(&t, 0, 0, &board));
}

#[test]
fn test_any_covered_filled_cell_rejects_placement() {
    let (x, y) = (3, 5);
    for kind in PieceKind::ALL {
        for rot in 0..rotation_count(kind) {
            let shape = get_shape(kind, rot);
            assert!(is_valid_position(&shape, x, y, &Board::new()));
            for (dx, dy) in shape.cells() {
                let mut board = Board::new();
                board.set(x + dx, y + dy, Some(PieceKind::Z));
                assert!(
                    !is_valid_position(&shape, x, y, &board),
                    "{:?} rotation {} over ({}, {})",
                    kind,
                    rot,
                    x + dx,
                    y + dy
                );
            }
        }
    }
}

#[test]
fn test_fully_hidden_placement_always_valid() {
    let mut board = Board::new();
    for x in 0..BOARD_WIDTH as i8 {
        for y in 0..BOARD_HEIGHT as i8 {
            board.set(x, y, Some(PieceKind::L));
        }
    }
    for kind in PieceKind::ALL {
        for rot in 0..rotation_count(kind) {
            let shape = get_shape(kind, rot);
            assert!(
                is_valid_position(&shape, 3, -(shape.height() as i8), &board),
                "{:?} rotation {}",
                kind,
                rot
            );
        }
    }
}

#[test]
fn test_blocked_rotation_keeps_state() {
    let mut board = Board::new();
    // Vertical S at (0, 5) occupies (0,5), (0,6), (1,6), (1,7).
    // Horizontal S would need (1,5) and (2,5).
    board.set(2, 5, Some(PieceKind::Z));
    let mut piece = Piece::at(PieceKind::S, 1, 0, 5);
    assert!(!piece.rotate(&board));
    assert_eq!(piece.rotation, 1);
    assert_eq!((piece.x, piece.y), (0, 5));
}

#[test]
fn test_reset_position_uses_spawn_pose() {
    let mut piece = Piece::at(PieceKind::J, 2, 7, 15);
    piece.reset_position();
    assert_eq!((piece.x, piece.y, piece.rotation), (4, 0, 0));
}
