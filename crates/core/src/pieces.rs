//! Pieces module - static tetromino table
//!
//! Each kind owns an ordered list of rotation states and a display color.
//! A rotation state is a small occupancy matrix (rows top to bottom); the
//! piece position names the matrix's top-left corner on the board.
//!
//! Kinds do not share a rotation count: O has one state, I/S/Z have two,
//! T/J/L have four. Rotation always advances to the next state, cyclically.

use crate::types::{PieceKind, Rgb};

/// Offset of a single occupied cell relative to the shape origin (col, row)
pub type CellOffset = (i8, i8);

/// One rotation state: an occupancy matrix with fixed width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    rows: &'static [&'static [u8]],
}

impl Shape {
    /// Matrix width in cells
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    /// Matrix height in cells
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix cell at (col, row) is occupied
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .is_some_and(|v| *v != 0)
    }

    /// Occupied cells as (col, row) offsets, row-major
    pub fn cells(&self) -> impl Iterator<Item = CellOffset> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|(_, v)| **v != 0)
                .map(move |(col, _)| (col as i8, row as i8))
        })
    }
}

/// Immutable data for one piece kind
#[derive(Debug)]
pub struct PieceDef {
    pub shapes: &'static [Shape],
    pub color: Rgb,
}

static I_DEF: PieceDef = PieceDef {
    shapes: &[
        Shape { rows: &[&[1, 1, 1, 1]] },
        Shape { rows: &[&[1], &[1], &[1], &[1]] },
    ],
    color: Rgb::new(0x00, 0xf0, 0xf0),
};

static O_DEF: PieceDef = PieceDef {
    shapes: &[Shape { rows: &[&[1, 1], &[1, 1]] }],
    color: Rgb::new(0xf0, 0xf0, 0x00),
};

static T_DEF: PieceDef = PieceDef {
    shapes: &[
        Shape { rows: &[&[0, 1, 0], &[1, 1, 1]] },
        Shape { rows: &[&[1, 0], &[1, 1], &[1, 0]] },
        Shape { rows: &[&[1, 1, 1], &[0, 1, 0]] },
        Shape { rows: &[&[0, 1], &[1, 1], &[0, 1]] },
    ],
    color: Rgb::new(0xa0, 0x00, 0xf0),
};

static S_DEF: PieceDef = PieceDef {
    shapes: &[
        Shape { rows: &[&[0, 1, 1], &[1, 1, 0]] },
        Shape { rows: &[&[1, 0], &[1, 1], &[0, 1]] },
    ],
    color: Rgb::new(0x00, 0xf0, 0x00),
};

static Z_DEF: PieceDef = PieceDef {
    shapes: &[
        Shape { rows: &[&[1, 1, 0], &[0, 1, 1]] },
        Shape { rows: &[&[0, 1], &[1, 1], &[1, 0]] },
    ],
    color: Rgb::new(0xf0, 0x00, 0x00),
};

static J_DEF: PieceDef = PieceDef {
    shapes: &[
        Shape { rows: &[&[1, 0, 0], &[1, 1, 1]] },
        Shape { rows: &[&[1, 1], &[1, 0], &[1, 0]] },
        Shape { rows: &[&[1, 1, 1], &[0, 0, 1]] },
        Shape { rows: &[&[0, 1], &[0, 1], &[1, 1]] },
    ],
    color: Rgb::new(0x00, 0x00, 0xf0),
};

static L_DEF: PieceDef = PieceDef {
    shapes: &[
        Shape { rows: &[&[0, 0, 1], &[1, 1, 1]] },
        Shape { rows: &[&[1, 0], &[1, 0], &[1, 1]] },
        Shape { rows: &[&[1, 1, 1], &[1, 0, 0]] },
        Shape { rows: &[&[1, 1], &[0, 1], &[0, 1]] },
    ],
    color: Rgb::new(0xf0, 0xa0, 0x00),
};

/// Static definition for a kind
pub fn definition(kind: PieceKind) -> &'static PieceDef {
    match kind {
        PieceKind::I => &I_DEF,
        PieceKind::O => &O_DEF,
        PieceKind::T => &T_DEF,
        PieceKind::S => &S_DEF,
        PieceKind::Z => &Z_DEF,
        PieceKind::J => &J_DEF,
        PieceKind::L => &L_DEF,
    }
}

/// Number of distinct rotation states for a kind
pub fn rotation_count(kind: PieceKind) -> usize {
    definition(kind).shapes.len()
}

/// Get the shape for a kind and rotation index (taken modulo the rotation count)
pub fn get_shape(kind: PieceKind, rotation: usize) -> Shape {
    let shapes = definition(kind).shapes;
    shapes[rotation % shapes.len()]
}

/// Display color of a kind
pub fn color(kind: PieceKind) -> Rgb {
    definition(kind).color
}
