use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::{Rng, thread_rng};

use super::board::Rgb;
use super::piece::{Kind, PALETTE, Shape};

/// Supplies the shape/color pairs the game spawns.
pub trait PieceSource {
    fn next_piece(&mut self) -> (Shape, Rgb);
}

/// Uniform pick of shape and color, independently of each other.
pub struct RandomSource<R: Rng = ThreadRng> {
    rng: R,
}

impl RandomSource {
    pub fn new() -> Self {
        Self::with_rng(thread_rng())
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSource<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PieceSource for RandomSource<R> {
    fn next_piece(&mut self) -> (Shape, Rgb) {
        let kind = *Kind::ALL.choose(&mut self.rng).unwrap_or(&Kind::I);
        let color = *PALETTE.choose(&mut self.rng).unwrap_or(&Rgb::RED);
        (Shape::new(kind), color)
    }
}

/// Replays a fixed list of pieces, wrapping around at the end.
pub struct SequenceSource {
    pieces: Vec<(Kind, Rgb)>,
    pos: usize,
}

impl SequenceSource {
    pub fn new(pieces: Vec<(Kind, Rgb)>) -> Self {
        assert!(!pieces.is_empty(), "sequence needs at least one piece");
        Self { pieces, pos: 0 }
    }

    pub fn repeat(kind: Kind, color: Rgb) -> Self {
        Self::new(vec![(kind, color)])
    }
}

impl PieceSource for SequenceSource {
    fn next_piece(&mut self) -> (Shape, Rgb) {
        let (kind, color) = self.pieces[self.pos % self.pieces.len()];
        self.pos += 1;
        (Shape::new(kind), color)
    }
}

impl<F> PieceSource for F
where
    F: FnMut() -> (Shape, Rgb),
{
    fn next_piece(&mut self) -> (Shape, Rgb) {
        self()
    }
}
