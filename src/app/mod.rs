mod timer;

use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::info;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::{Config, frame_budget};
use crate::game::{Command, Game, RandomSource, Tick};
use crate::ui::{ClearFlash, draw_game};
use crate::{BOARD_H, BOARD_W};

pub use timer::FallTimer;

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run(config: &Config) -> Result<()> {
    let mut tui = TuiGuard::new().context("failed to set up the terminal")?;
    let game = Game::new(RandomSource::new(), BOARD_W, BOARD_H);
    run_loop(tui.terminal_mut(), game, config)
}

/// Per-frame session state around the game: timers and presentational pauses.
struct Session {
    game: Game,
    timer: FallTimer,
    flash: Option<ClearFlash>,
    over_since: Option<Instant>,
    flash_enabled: bool,
    game_over_delay: Duration,
}

impl Session {
    fn new(game: Game, config: &Config, now: Instant) -> Self {
        let over_since = game.is_over().then_some(now);
        Self {
            game,
            timer: FallTimer::new(config.fall_interval, now),
            flash: None,
            over_since,
            flash_enabled: config.flash,
            game_over_delay: config.game_over_delay,
        }
    }

    /// Input is taken only while a piece is falling and nothing is blinking.
    fn accepts_input(&self) -> bool {
        self.flash.is_none() && !self.game.is_over()
    }

    fn handle(&mut self, command: Command) {
        if self.accepts_input() {
            let _ = self.game.apply(command);
        }
    }

    /// Advances timers and gravity. Returns false once the game-over screen
    /// has been up long enough.
    fn update(&mut self, now: Instant) -> bool {
        if let Some(since) = self.over_since {
            return now.saturating_duration_since(since) < self.game_over_delay;
        }
        if let Some(flash) = &self.flash {
            if !flash.is_done(now) {
                return true;
            }
            self.flash = None;
            self.timer.reset(now);
        }
        if !self.timer.due(now) {
            return true;
        }
        match self.game.tick() {
            Tick::Landed { cleared } if self.flash_enabled && !cleared.is_empty() => {
                self.flash = Some(ClearFlash::new(&self.game.board, cleared, now));
            }
            Tick::GameOver { .. } => {
                self.over_since = Some(now);
            }
            _ => {}
        }
        true
    }
}

fn run_loop(terminal: &mut Term, game: Game, config: &Config) -> Result<()> {
    let budget = frame_budget();
    let mut session = Session::new(game, config, Instant::now());
    info!(
        "starting: fall interval {:?}, flash {}",
        config.fall_interval, config.flash
    );

    loop {
        let frame_start = Instant::now();

        // Drain pending key presses; quit is honored in every state.
        while event::poll(Duration::ZERO).context("failed to poll input")? {
            if let Event::Key(key) = event::read().context("failed to read input")? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if is_quit(&key) {
                    info!("quit requested, score {}", session.game.score);
                    return Ok(());
                }
                if let Some(command) = command_for_key(key.code) {
                    session.handle(command);
                }
            }
        }

        let now = Instant::now();
        if !session.update(now) {
            info!("game over, final score {}", session.game.score);
            return Ok(());
        }

        let flash = session.flash.as_ref().map(|f| f.frame(now));
        terminal
            .draw(|frame| draw_game(frame, &session.game, flash))
            .context("failed to draw frame")?;

        // Sleep out the rest of the frame, waking early for input.
        let elapsed = frame_start.elapsed();
        if elapsed < budget {
            event::poll(budget - elapsed).context("failed to poll input")?;
        }
    }
}

pub fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::SoftDrop),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Rotate),
        _ => None,
    }
}

pub fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Kind, Rgb, SequenceSource};

    fn config() -> Config {
        Config {
            fall_interval: Duration::from_millis(100),
            game_over_delay: Duration::from_millis(3000),
            flash: true,
        }
    }

    fn session_of(kind: Kind, t0: Instant) -> Session {
        let game = Game::new(SequenceSource::repeat(kind, Rgb::RED), BOARD_W, BOARD_H);
        Session::new(game, &config(), t0)
    }

    #[test]
    fn arrow_keys_map_to_commands() {
        assert_eq!(command_for_key(KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(command_for_key(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(command_for_key(KeyCode::Down), Some(Command::SoftDrop));
        assert_eq!(command_for_key(KeyCode::Up), Some(Command::Rotate));
        assert_eq!(command_for_key(KeyCode::Char(' ')), None);
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn gravity_waits_for_interval() {
        let t0 = Instant::now();
        let mut session = session_of(Kind::O, t0);
        assert!(session.update(t0 + Duration::from_millis(50)));
        assert_eq!(session.game.current.y, 0);
        assert!(session.update(t0 + Duration::from_millis(100)));
        assert_eq!(session.game.current.y, 1);
    }

    #[test]
    fn clear_pauses_input_and_gravity() {
        let t0 = Instant::now();
        let mut session = session_of(Kind::O, t0);
        // bottom two rows full except where the O will land
        for y in [BOARD_H - 2, BOARD_H - 1] {
            for x in (0..BOARD_W).filter(|x| !(4..=5).contains(x)) {
                session.game.board.set(x, y, Cell::Filled(Rgb::BLUE));
            }
        }
        while session.game.move_current(0, 1) {}
        let t1 = t0 + Duration::from_millis(100);
        assert!(session.update(t1));
        assert_eq!(session.game.score, 2);
        assert!(session.flash.is_some());
        assert!(!session.accepts_input());

        let y = session.game.current.y;
        session.handle(Command::SoftDrop);
        assert!(session.update(t1 + Duration::from_millis(500)));
        assert_eq!(session.game.current.y, y);

        let t2 = t1 + ClearFlash::duration();
        assert!(session.update(t2));
        assert!(session.flash.is_none());
        assert!(session.accepts_input());
        assert!(session.update(t2 + Duration::from_millis(100)));
        assert_eq!(session.game.current.y, y + 1);
    }

    #[test]
    fn game_over_screen_lingers_then_ends() {
        let t0 = Instant::now();
        let mut session = session_of(Kind::O, t0);
        session.game.board.set(4, 2, Cell::Filled(Rgb::BLUE));
        let t1 = t0 + Duration::from_millis(100);
        assert!(session.update(t1));
        assert!(session.game.is_over());
        assert!(!session.accepts_input());
        assert!(session.update(t1 + Duration::from_millis(2999)));
        assert!(!session.update(t1 + Duration::from_millis(3000)));
    }
}
