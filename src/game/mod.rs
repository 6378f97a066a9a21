pub mod board;
pub mod piece;
pub mod source;
pub mod state;

pub use board::{Board, Cell, Rgb};
pub use piece::{Kind, PALETTE, Piece, Shape};
pub use source::{PieceSource, RandomSource, SequenceSource};
pub use state::{Command, Game, Phase, Tick, collides, spawn_anchor};
