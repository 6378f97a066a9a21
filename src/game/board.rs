/// Semantic block color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const CYAN: Rgb = Rgb(0, 255, 255);
    pub const MAGENTA: Rgb = Rgb(255, 0, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);

    const BEVEL: u8 = 50;

    /// Highlight shade for the lit edge of a block.
    pub fn lighter(self) -> Rgb {
        Rgb(
            self.0.saturating_add(Self::BEVEL),
            self.1.saturating_add(Self::BEVEL),
            self.2.saturating_add(Self::BEVEL),
        )
    }

    /// Body shade of a block.
    pub fn darker(self) -> Rgb {
        Rgb(
            self.0.saturating_sub(Self::BEVEL),
            self.1.saturating_sub(Self::BEVEL),
            self.2.saturating_sub(Self::BEVEL),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Filled(Rgb),
}

impl Cell {
    pub fn is_filled(self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.idx(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: Cell) {
        let idx = self.idx(x, y);
        self.cells[idx] = value;
    }

    /// Signed lookup; `None` for anything off the board.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        let (xu, yu) = (x as usize, y as usize);
        if xu >= self.width || yu >= self.height {
            return None;
        }
        Some(self.get(xu, yu))
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = self.idx(0, y);
        &self.cells[start..start + self.width]
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).iter().all(|c| c.is_filled())
    }

    /// Removes every full row and drops the rows above it.
    ///
    /// The full set is gathered before anything moves; returned indices are in
    /// pre-clear coordinates, top to bottom.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let full_rows: Vec<usize> = (0..self.height).filter(|&y| self.is_row_full(y)).collect();
        if full_rows.is_empty() {
            return full_rows;
        }
        let mut new_cells = vec![Cell::Empty; full_rows.len() * self.width];
        new_cells.reserve(self.cells.len());
        for y in (0..self.height).filter(|y| !full_rows.contains(y)) {
            new_cells.extend_from_slice(self.row(y));
        }
        self.cells = new_cells;
        full_rows
    }
}
