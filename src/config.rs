use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

// Shared game UI/constants.
pub const BOARD_W: usize = 10;
pub const BOARD_H: usize = 20;
pub const CELL_W: usize = 2; // render each block as two characters wide (bevel + body)
pub const PLAY_W: usize = BOARD_W * CELL_W + 2; // inner width plus side walls
pub const PLAY_H: usize = BOARD_H + 2; // inner height plus ceiling/floor
pub const SIDEBAR_W: u16 = 16;
// Well, sidebar and cabinet border.
pub const MIN_PANE_WIDTH: u16 = (PLAY_W as u16) + SIDEBAR_W + 2;
pub const MIN_PANE_HEIGHT: u16 = (PLAY_H as u16) + 2;
pub const FRAME_RATE: u32 = 60;
pub const DEFAULT_FALL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_GAME_OVER_DELAY_MS: u64 = 3000;
pub const FLASH_BLINKS: u32 = 5;
pub const FLASH_HALF_PERIOD: Duration = Duration::from_millis(100);

/// Terminal falling-block puzzle.
#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about)]
pub struct Args {
    /// Milliseconds between automatic one-row descents.
    #[arg(
        long,
        default_value_t = DEFAULT_FALL_INTERVAL_MS,
        value_name = "MS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub fall_interval_ms: u64,

    /// How long the game-over screen stays up before exiting.
    #[arg(long, default_value_t = DEFAULT_GAME_OVER_DELAY_MS, value_name = "MS")]
    pub game_over_delay_ms: u64,

    /// Clear full rows without the blinking animation.
    #[arg(long)]
    pub no_flash: bool,

    /// Write log records to this file (filtered by RUST_LOG, default info).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Runtime settings for the frame loop, derived from [`Args`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub fall_interval: Duration,
    pub game_over_delay: Duration,
    pub flash: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fall_interval: Duration::from_millis(DEFAULT_FALL_INTERVAL_MS),
            game_over_delay: Duration::from_millis(DEFAULT_GAME_OVER_DELAY_MS),
            flash: true,
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self {
            fall_interval: Duration::from_millis(args.fall_interval_ms),
            game_over_delay: Duration::from_millis(args.game_over_delay_ms),
            flash: !args.no_flash,
        }
    }
}

pub fn frame_budget() -> Duration {
    Duration::from_secs(1) / FRAME_RATE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_timing() {
        let args = Args::parse_from(["blockfall"]);
        let config = Config::from(&args);
        assert_eq!(config, Config::default());
        assert_eq!(config.fall_interval, Duration::from_millis(1000));
        assert!(args.log_file.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "blockfall",
            "--fall-interval-ms",
            "250",
            "--game-over-delay-ms",
            "0",
            "--no-flash",
        ]);
        let config = Config::from(&args);
        assert_eq!(config.fall_interval, Duration::from_millis(250));
        assert_eq!(config.game_over_delay, Duration::ZERO);
        assert!(!config.flash);
    }

    #[test]
    fn zero_fall_interval_is_rejected() {
        assert!(Args::try_parse_from(["blockfall", "--fall-interval-ms", "0"]).is_err());
    }

    #[test]
    fn frame_budget_is_sixty_hertz() {
        assert_eq!(frame_budget().as_micros(), 16_666);
    }
}
