use std::time::{Duration, Instant};

use crate::game::Board;
use crate::ui::RowFlash;
use crate::{FLASH_BLINKS, FLASH_HALF_PERIOD};

/// Blinking highlight over rows that were just cleared.
///
/// The game removes rows as soon as a piece lands; this keeps the stack as it
/// stood before the removal so the blink can be shown in place.
#[derive(Clone, Debug)]
pub struct ClearFlash {
    pub rows: Vec<usize>,
    pub board: Board,
    started: Instant,
}

impl ClearFlash {
    pub fn new(cleared: &Board, rows: Vec<usize>, started: Instant) -> Self {
        let board = stack_before_clear(cleared, &rows);
        Self {
            rows,
            board,
            started,
        }
    }

    pub fn duration() -> Duration {
        FLASH_HALF_PERIOD * 2 * FLASH_BLINKS
    }

    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= Self::duration()
    }

    /// Whether the rows are drawn lit (white) rather than dark at `now`.
    /// Each blink is a dark half followed by a lit half.
    pub fn lit(&self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_millis() / FLASH_HALF_PERIOD.as_millis()) % 2 == 1
    }

    pub fn frame(&self, now: Instant) -> RowFlash<'_> {
        RowFlash {
            board: &self.board,
            rows: &self.rows,
            lit: self.lit(now),
        }
    }
}

/// Rebuilds the pre-clear layout from a cleared board. The removed rows come
/// back empty since the flash paints over them.
fn stack_before_clear(cleared: &Board, rows: &[usize]) -> Board {
    let mut view = Board::new(cleared.width, cleared.height);
    // the first rows.len() rows of `cleared` are the inserted blanks
    let mut src = rows.len();
    for y in 0..cleared.height {
        if rows.contains(&y) {
            continue;
        }
        for x in 0..cleared.width {
            view.set(x, y, cleared.get(x, src));
        }
        src += 1;
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Rgb};

    #[test]
    fn flash_alternates_then_ends() {
        let t0 = Instant::now();
        let flash = ClearFlash::new(&Board::new(4, 4), vec![3], t0);
        assert!(!flash.lit(t0));
        assert!(flash.lit(t0 + Duration::from_millis(150)));
        assert!(!flash.lit(t0 + Duration::from_millis(250)));
        assert!(!flash.is_done(t0 + Duration::from_millis(999)));
        assert!(flash.is_done(t0 + Duration::from_millis(1000)));
    }

    #[test]
    fn restores_rows_between_cleared_ones() {
        // before: row 1 marker, row 2 full, row 3 marker, row 4 full
        let mut board = Board::new(3, 5);
        for y in [2, 4] {
            for x in 0..3 {
                board.set(x, y, Cell::Filled(Rgb::RED));
            }
        }
        board.set(0, 1, Cell::Filled(Rgb::BLUE));
        board.set(1, 3, Cell::Filled(Rgb::GREEN));
        let mut cleared = board.clone();
        let rows = cleared.clear_full_rows();

        let flash = ClearFlash::new(&cleared, rows, Instant::now());
        assert_eq!(flash.rows, vec![2, 4]);
        assert_eq!(flash.board.get(0, 1), Cell::Filled(Rgb::BLUE));
        assert_eq!(flash.board.get(1, 3), Cell::Filled(Rgb::GREEN));
        assert!(!flash.board.is_row_full(2));
        assert!(!flash.board.is_row_full(4));
    }
}
