use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::game::{BallState, Engine, Tile, WallShape};

const FIELD_BG: Color = Color::Rgb(10, 10, 20);
const WALL_FG: Color = Color::Rgb(0, 180, 200);
const GATE_FG: Color = Color::Rgb(100, 100, 130);
const HOLE_FG: Color = Color::Rgb(255, 215, 0);
const CAR_FG: Color = Color::Rgb(220, 80, 80);
const BALL_FG: Color = Color::Rgb(255, 215, 0);

pub fn render(frame: &mut Frame, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .title(" 🕳 Gatefall ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(80, 200, 255))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(8),    // Game field
            Constraint::Length(1), // Help bar
        ])
        .split(inner);

    let engine = &app.engine;

    let status = Line::from(vec![
        Span::styled(" 🕳 ", Style::default()),
        Span::styled(
            format!("Score: {:06} ", engine.points()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Level: {:02} ", engine.level()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Balls: {} ", "●".repeat(engine.balls_left())),
            Style::default().fg(Color::Green),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), chunks[0]);

    // Game field, centered in its chunk
    let field_w = engine.field().width() as u16;
    let field_h = engine.field().height() as u16;
    let area = chunks[1];
    let x = area.x + area.width.saturating_sub(field_w) / 2;
    let y = area.y + area.height.saturating_sub(field_h) / 2;
    let field_area = Rect::new(x, y, field_w.min(area.width), field_h.min(area.height));
    frame.render_widget(Paragraph::new(render_field(engine)), field_area);

    // Help bar
    if app.paused {
        let msg = Paragraph::new(Line::from(vec![Span::styled(
            " ⏸ PAUSED - Press P to resume ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]));
        frame.render_widget(msg, chunks[2]);
    } else {
        let help = Paragraph::new(Line::from(vec![
            Span::styled(" ←→ Move ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled(
                "SPACE Fire ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("↑↓ Scroll Walls ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("P Pause ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("R Restart ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Q Quit", Style::default().fg(Color::DarkGray)),
        ]));
        frame.render_widget(help, chunks[2]);
    }
}

/// One styled cell per tile, car sprite and balls overlaid on top.
fn render_field(engine: &Engine) -> Vec<Line<'static>> {
    let field = engine.field();
    let w = field.width();
    let h = field.height();

    let mut grid: Vec<Vec<(char, Style)>> =
        vec![vec![(' ', Style::default().bg(FIELD_BG)); w]; h];
    for y in 0..h {
        for x in 0..w {
            grid[y][x] = tile_cell(field.tiles()[y * w + x]);
        }
    }

    // Car sprite, two rows; the bottom-center gap is where the latched
    // ball shows.
    let car = engine.car();
    let car_style = Style::default().fg(CAR_FG).bg(FIELD_BG);
    for (i, ch) in ['▁', '▁', '█', '▁', '▁'].into_iter().enumerate() {
        put(&mut grid, car.pos.x - 2 + i as i32, car.pos.y - 1, ch, car_style);
    }
    for (i, ch) in ['◀', '▓', ' ', '▓', '▶'].into_iter().enumerate() {
        put(&mut grid, car.pos.x - 2 + i as i32, car.pos.y, ch, car_style);
    }

    // Busted balls vanish, fresh ones wait in the tally; the rest render
    // where they are, goal balls resting in their holes.
    let ball_style = Style::default()
        .fg(BALL_FG)
        .bg(FIELD_BG)
        .add_modifier(Modifier::BOLD);
    for ball in engine.balls() {
        if !matches!(ball.state, BallState::Fresh | BallState::Bust) {
            put(&mut grid, ball.pos.x, ball.pos.y, '●', ball_style);
        }
    }

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn put(grid: &mut [Vec<(char, Style)>], x: i32, y: i32, ch: char, style: Style) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if y < grid.len() && x < grid[y].len() {
        grid[y][x] = (ch, style);
    }
}

fn tile_cell(tile: Tile) -> (char, Style) {
    let style = Style::default().bg(FIELD_BG);
    match tile {
        Tile::Background => (' ', style),
        Tile::Wall(shape) => (wall_glyph(shape), style.fg(WALL_FG)),
        Tile::Gate => ('┄', style.fg(GATE_FG)),
        Tile::Hole => ('∪', style.fg(HOLE_FG)),
    }
}

fn wall_glyph(shape: WallShape) -> char {
    match shape {
        WallShape::Top => '▄',
        WallShape::Bottom => '▀',
        WallShape::Left => '▌',
        WallShape::Right => '▐',
        WallShape::TopLeft => '▗',
        WallShape::TopRight => '▖',
        WallShape::BottomLeft => '▝',
        WallShape::BottomRight => '▘',
        WallShape::HoleLeft => '▐',
        WallShape::HoleRight => '▌',
        WallShape::Mid => '█',
    }
}
