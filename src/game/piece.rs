use std::fmt;

use super::board::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    I,
    T,
    O,
    S,
    Z,
    L,
    J,
}

impl Kind {
    pub const ALL: [Kind; 7] = [Kind::I, Kind::T, Kind::O, Kind::S, Kind::Z, Kind::L, Kind::J];

    fn rows(self) -> &'static [&'static [u8]] {
        match self {
            Kind::I => &[&[1, 1, 1, 1]],
            Kind::T => &[&[1, 1, 1], &[0, 1, 0]],
            Kind::O => &[&[1, 1], &[1, 1]],
            Kind::S => &[&[1, 1, 0], &[0, 1, 1]],
            Kind::Z => &[&[0, 1, 1], &[1, 1, 0]],
            Kind::L => &[&[1, 1, 1], &[1, 0, 0]],
            Kind::J => &[&[1, 1, 1], &[0, 0, 1]],
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

pub const PALETTE: [Rgb; 7] = [
    Rgb::RED,
    Rgb::BLUE,
    Rgb::GREEN,
    Rgb::CYAN,
    Rgb::MAGENTA,
    Rgb::YELLOW,
    Rgb::ORANGE,
];

/// Occupancy matrix of a piece, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    pub kind: Kind,
    pub rows: usize,
    pub cols: usize,
    filled: Vec<bool>,
}

impl Shape {
    pub fn new(kind: Kind) -> Self {
        let rows = kind.rows();
        let cols = rows[0].len();
        Self {
            kind,
            rows: rows.len(),
            cols,
            filled: rows.iter().flat_map(|r| r.iter().map(|&v| v != 0)).collect(),
        }
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.filled[row * self.cols + col]
    }

    /// Offsets `(dx, dy)` of the occupied sub-cells relative to the anchor.
    pub fn offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.is_filled(r, c))
                .map(move |c| (c as i32, r as i32))
        })
    }

    /// Quarter turn clockwise: reverse the rows, then transpose.
    pub fn rotated(&self) -> Self {
        let (rows, cols) = (self.cols, self.rows);
        let mut filled = Vec::with_capacity(self.filled.len());
        for r in 0..rows {
            for c in 0..cols {
                filled.push(self.is_filled(self.rows - 1 - c, r));
            }
        }
        Self {
            kind: self.kind,
            rows,
            cols,
            filled,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
    pub color: Rgb,
}

impl Piece {
    pub fn new(shape: Shape, color: Rgb) -> Self {
        Self {
            shape,
            x: 0,
            y: 0,
            color,
        }
    }

    /// Board coordinates of every occupied sub-cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.offsets().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..self.clone()
        }
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        let mut next = self.clone();
        next.x += dx;
        next.y += dy;
        next
    }
}
