use log::{debug, info};

use crate::game::{Board, Cell, Piece, PieceSource, Shape};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Falling,
    GameOver,
}

/// Player requests, honored only while a piece is falling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

/// What one gravity step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    Fell,
    /// The piece merged; `cleared` lists removed rows in pre-clear coordinates.
    Landed { cleared: Vec<usize> },
    /// The piece merged but its successor could not be placed.
    GameOver { cleared: Vec<usize> },
    Idle,
}

/// True if any occupied cell of `piece` is left/right of the walls, at or
/// below the floor, or on a filled cell. Cells above the top are allowed.
pub fn collides(board: &Board, piece: &Piece) -> bool {
    piece.cells().any(|(x, y)| {
        if x < 0 || x >= board.width as i32 || y >= board.height as i32 {
            return true;
        }
        y >= 0 && board.get(x as usize, y as usize).is_filled()
    })
}

pub struct Game {
    pub board: Board,
    pub current: Piece,
    pub next: Piece,
    pub score: u64,
    pub pieces_placed: u64,
    phase: Phase,
    source: Box<dyn PieceSource>,
}

impl Game {
    pub fn new(source: impl PieceSource + 'static, width: usize, height: usize) -> Self {
        let mut source: Box<dyn PieceSource> = Box::new(source);
        let (shape, color) = source.next_piece();
        let current = Piece::new(shape, color);
        let (shape, color) = source.next_piece();
        let next = Piece::new(shape, color);
        let mut game = Self {
            board: Board::new(width, height),
            current,
            next,
            score: 0,
            pieces_placed: 0,
            phase: Phase::Falling,
            source,
        };
        game.place_at_spawn();
        game
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn can_place(&self, piece: &Piece) -> bool {
        !collides(&self.board, piece)
    }

    pub fn move_current(&mut self, dx: i32, dy: i32) -> bool {
        if self.is_over() {
            return false;
        }
        let next = self.current.shifted(dx, dy);
        if self.can_place(&next) {
            self.current = next;
            true
        } else {
            false
        }
    }

    pub fn rotate_current(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        let next = self.current.rotated();
        if self.can_place(&next) {
            self.current = next;
            true
        } else {
            false
        }
    }

    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_current(-1, 0),
            Command::MoveRight => self.move_current(1, 0),
            Command::SoftDrop => self.move_current(0, 1),
            Command::Rotate => self.rotate_current(),
        }
    }

    pub fn tick(&mut self) -> Tick {
        if self.is_over() {
            return Tick::Idle;
        }
        if self.move_current(0, 1) {
            return Tick::Fell;
        }
        self.lock_piece();
        let cleared = self.board.clear_full_rows();
        if !cleared.is_empty() {
            self.score += cleared.len() as u64;
            info!("cleared rows {:?}, score {}", cleared, self.score);
        }
        self.spawn_next();
        if self.is_over() {
            Tick::GameOver { cleared }
        } else {
            Tick::Landed { cleared }
        }
    }

    fn lock_piece(&mut self) {
        let color = self.current.color;
        let cells: Vec<(i32, i32)> = self.current.cells().collect();
        for (x, y) in cells {
            // cells still above the ceiling are lost
            if y >= 0 {
                self.board.set(x as usize, y as usize, Cell::Filled(color));
            }
        }
        self.pieces_placed += 1;
        debug!(
            "locked {} at ({}, {})",
            self.current.shape.kind, self.current.x, self.current.y
        );
    }

    fn spawn_next(&mut self) {
        let (shape, color) = self.source.next_piece();
        let upcoming = Piece::new(shape, color);
        self.current = std::mem::replace(&mut self.next, upcoming);
        self.place_at_spawn();
    }

    fn place_at_spawn(&mut self) {
        let (x, y) = spawn_anchor(self.board.width, &self.current.shape);
        self.current.x = x;
        self.current.y = y;
        if self.can_place(&self.current) {
            debug!("spawned {} at ({}, {})", self.current.shape.kind, x, y);
        } else {
            self.phase = Phase::GameOver;
            info!(
                "game over: {} blocked at spawn, score {}, pieces {}",
                self.current.shape.kind, self.score, self.pieces_placed
            );
        }
    }
}

/// Horizontally centered on the top row.
pub fn spawn_anchor(width: usize, shape: &Shape) -> (i32, i32) {
    (width.saturating_sub(shape.cols) as i32 / 2, 0)
}
