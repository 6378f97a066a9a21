//! Terminal falling-block puzzle: playfield, pieces, line clears and score,
//! with a ratatui front end.

pub mod app;
pub mod config;
pub mod game;
pub mod logging;
pub mod ui;

pub use config::{
    BOARD_H, BOARD_W, CELL_W, Config, FLASH_BLINKS, FLASH_HALF_PERIOD, MIN_PANE_HEIGHT,
    MIN_PANE_WIDTH, PLAY_H, PLAY_W, SIDEBAR_W,
};
pub use game::{Command, Game, Phase, PieceSource, Tick};
