use ratatui::prelude::*;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::game::{Board, Cell, Game, Rgb, Shape};
use crate::{CELL_W, MIN_PANE_HEIGHT, MIN_PANE_WIDTH, PLAY_H, PLAY_W, SIDEBAR_W};

type Glyph = (char, Style);

/// A line-clear blink in progress: the stack to show instead of the live
/// board, the rows to paint over, and whether this frame is in the lit half.
#[derive(Clone, Copy, Debug)]
pub struct RowFlash<'a> {
    pub board: &'a Board,
    pub rows: &'a [usize],
    pub lit: bool,
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.0, c.1, c.2)
    }
}

/// Two-column block: lit top/left edge over a darker body.
fn block_glyphs(color: Rgb) -> [Glyph; 2] {
    let style = Style::default()
        .fg(Color::from(color.lighter()))
        .bg(Color::from(color.darker()));
    [('▛', style), ('▀', style)]
}

pub fn draw_game(frame: &mut Frame, game: &Game, flash: Option<RowFlash>) {
    let area = frame.size();

    if area.width < MIN_PANE_WIDTH || area.height < MIN_PANE_HEIGHT {
        let msg = Paragraph::new(format!(
            "RESIZE TERMINAL (min {}x{})",
            MIN_PANE_WIDTH, MIN_PANE_HEIGHT
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("BLOCKFALL"));
        frame.render_widget(msg, area);
        return;
    }

    // Outer "cabinet" frame.
    let cabinet = Block::default()
        .title("BLOCKFALL")
        .border_type(BorderType::Thick)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Left);
    let cabinet_inner = cabinet.inner(area);
    frame.render_widget(cabinet, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(PLAY_W as u16),
            Constraint::Length(SIDEBAR_W),
            Constraint::Min(0),
        ])
        .split(cabinet_inner);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(PLAY_H as u16),
            Constraint::Min(0),
        ])
        .split(cabinet_inner);

    let well_rect = Rect {
        x: cols[1].x,
        y: rows[1].y,
        width: cols[1].width,
        height: rows[1].height,
    };
    let side_rect = Rect {
        x: cols[2].x,
        y: rows[1].y,
        width: cols[2].width,
        height: rows[1].height,
    };

    draw_playfield(frame, game, flash, well_rect);
    draw_sidebar(frame, game, side_rect);
}

fn draw_playfield(frame: &mut Frame, game: &Game, flash: Option<RowFlash>, play_rect: Rect) {
    let wall = Style::default().fg(Color::Gray);
    let mut grid: Vec<Vec<Glyph>> = vec![vec![(' ', Style::default()); PLAY_W]; PLAY_H];

    // Border: top/ceiling, sides, heavy floor.
    grid[0][0] = ('┌', wall);
    grid[0][PLAY_W - 1] = ('┐', wall);
    for x in 1..PLAY_W - 1 {
        grid[0][x] = ('─', wall);
    }
    for row in grid.iter_mut().take(PLAY_H - 1).skip(1) {
        row[0] = ('│', wall);
        row[PLAY_W - 1] = ('│', wall);
    }
    grid[PLAY_H - 1][0] = ('└', wall);
    grid[PLAY_H - 1][PLAY_W - 1] = ('┘', wall);
    for x in 1..PLAY_W - 1 {
        grid[PLAY_H - 1][x] = ('═', wall);
    }

    let plot = |grid: &mut [Vec<Glyph>], bx: usize, by: usize, glyphs: [Glyph; 2]| {
        let gx = 1 + bx * CELL_W;
        let gy = 1 + by;
        if gy < PLAY_H - 1 && gx + 1 < PLAY_W - 1 {
            grid[gy][gx] = glyphs[0];
            grid[gy][gx + 1] = glyphs[1];
        }
    };

    let board = flash.map_or(&game.board, |f| f.board);
    for y in 0..board.height {
        for x in 0..board.width {
            if let Cell::Filled(color) = board.get(x, y) {
                plot(&mut grid, x, y, block_glyphs(color));
            }
        }
    }

    // Falling piece, held back while a clear is blinking; cells above the
    // ceiling are not shown.
    if flash.is_none() {
        for (x, y) in game.current.cells() {
            if x >= 0 && y >= 0 {
                plot(&mut grid, x as usize, y as usize, block_glyphs(game.current.color));
            }
        }
    }

    // Line clear flash overrides everything in the row.
    if let Some(flash) = flash {
        let glyph = if flash.lit {
            ('█', Style::default().fg(Color::White))
        } else {
            (' ', Style::default().bg(Color::Black))
        };
        for &row in flash.rows {
            for x in 0..board.width {
                plot(&mut grid, x, row, [glyph, glyph]);
            }
        }
    }

    let lines: Vec<Line> = grid.iter().map(|row| glyph_line(row)).collect();
    frame.render_widget(Paragraph::new(lines), play_rect);

    if game.is_over() {
        let overlay_w = (PLAY_W as u16).saturating_sub(4).max(12);
        let overlay_h = 4u16;
        let popup = Rect {
            x: play_rect.x + (play_rect.width.saturating_sub(overlay_w)) / 2,
            y: play_rect.y + (play_rect.height.saturating_sub(overlay_h)) / 2,
            width: overlay_w.min(play_rect.width),
            height: overlay_h.min(play_rect.height),
        };
        let overlay = Paragraph::new(vec![
            Line::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Line::raw(format!("score {}", game.score)),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(Clear, popup);
        frame.render_widget(overlay, popup);
    }
}

fn glyph_line(row: &[Glyph]) -> Line<'static> {
    Line::from(
        row.iter()
            .map(|&(ch, style)| Span::styled(ch.to_string(), style))
            .collect::<Vec<_>>(),
    )
}

fn preview_lines(shape: &Shape, color: Rgb) -> Vec<Line<'static>> {
    let blank = (' ', Style::default());
    (0..shape.rows)
        .map(|r| {
            let row: Vec<Glyph> = (0..shape.cols)
                .flat_map(|c| {
                    if shape.is_filled(r, c) {
                        block_glyphs(color)
                    } else {
                        [blank, blank]
                    }
                })
                .collect();
            glyph_line(&row)
        })
        .collect()
}

fn draw_sidebar(frame: &mut Frame, game: &Game, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(6),
        ])
        .split(area);

    let score = Paragraph::new(Line::raw(game.score.to_string()))
        .alignment(Alignment::Center)
        .block(Block::default().title("SCORE").borders(Borders::ALL));
    frame.render_widget(score, chunks[0]);

    let next = Paragraph::new(preview_lines(&game.next.shape, game.next.color))
        .alignment(Alignment::Center)
        .block(Block::default().title("NEXT").borders(Borders::ALL));
    frame.render_widget(next, chunks[1]);

    let controls = Paragraph::new(vec![
        Line::raw("←/→ move"),
        Line::raw("↑ rotate"),
        Line::raw("↓ soft"),
        Line::raw("q/esc quit"),
    ])
    .block(Block::default().title("CONTROLS").borders(Borders::ALL));
    frame.render_widget(controls, chunks[3]);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::game::{Kind, SequenceSource};
    use crate::{BOARD_H, BOARD_W};

    fn render(game: &Game, flash: Option<RowFlash>, w: u16, h: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        terminal.draw(|frame| draw_game(frame, game, flash)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(w as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn game() -> Game {
        let src = SequenceSource::new(vec![(Kind::O, Rgb::YELLOW), (Kind::I, Rgb::CYAN)]);
        Game::new(src, BOARD_W, BOARD_H)
    }

    #[test]
    fn shows_sidebar_and_piece() {
        let screen = render(&game(), None, MIN_PANE_WIDTH, MIN_PANE_HEIGHT);
        assert!(screen.contains("BLOCKFALL"));
        assert!(screen.contains("SCORE"));
        assert!(screen.contains("NEXT"));
        assert!(screen.contains("CONTROLS"));
        // O piece in the well plus I preview
        assert_eq!(screen.matches('▛').count(), 8);
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn small_terminal_asks_for_resize() {
        let screen = render(&game(), None, 30, 10);
        assert!(screen.contains("RESIZE"));
    }

    #[test]
    fn flash_paints_whole_row_and_hides_piece() {
        let game = game();
        let mut stack = Board::new(BOARD_W, BOARD_H);
        stack.set(0, BOARD_H - 2, Cell::Filled(Rgb::GREEN));
        let rows = [BOARD_H - 1];
        let flash = RowFlash {
            board: &stack,
            rows: &rows,
            lit: true,
        };
        let screen = render(&game, Some(flash), MIN_PANE_WIDTH, MIN_PANE_HEIGHT);
        let solid = "█".repeat(BOARD_W * CELL_W);
        assert!(screen.lines().any(|line| line.contains(&solid)));
        // snapshot block plus the I preview; the falling O is not drawn
        assert_eq!(screen.matches('▛').count(), 5);
    }

    #[test]
    fn game_over_overlay() {
        let mut game = game();
        game.board.set(4, 2, Cell::Filled(Rgb::RED));
        game.tick();
        assert!(game.is_over());
        let screen = render(&game, None, MIN_PANE_WIDTH, MIN_PANE_HEIGHT);
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("score 0"));
    }
}
