use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::scene;
use crate::game::GameState;
use crate::metrics::GameMetrics;

/// Dark LCD pixel
const PIXEL_COLOR: Color = Color::Rgb(35, 43, 1);
/// Green LCD background
const SCREEN_COLOR: Color = Color::Rgb(175, 215, 5);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let canvas = scene::compose(state);
        let lines: Vec<Line> = canvas
            .to_half_block_lines()
            .into_iter()
            .map(Line::from)
            .collect();
        let screen_area = centered(canvas.width() as u16, lines.len() as u16, chunks[1]);
        let screen =
            Paragraph::new(lines).style(Style::default().fg(PIXEL_COLOR).bg(SCREEN_COLOR));
        frame.render_widget(screen, screen_area);

        if let Some(overlay) = self.render_overlay(state) {
            let popup = centered(36, 8, chunks[1]);
            frame.render_widget(Clear, popup);
            frame.render_widget(overlay, popup);
        }

        // Render footer with controls
        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.snake.len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Longest: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.longest_snake.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Plain)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
    }

    /// Message box for a paused, lost or won game
    fn render_overlay(&self, state: &GameState) -> Option<Paragraph<'_>> {
        let (title, color, message) = if state.is_won {
            ("YOU WIN", Color::Green, "The snake fills the screen!")
        } else if !state.is_alive {
            ("GAME OVER", Color::Red, "")
        } else if state.is_paused {
            ("PAUSED", Color::Yellow, "Press an arrow key to play")
        } else {
            return None;
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
        ];

        if state.is_over() {
            text.push(Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            if !message.is_empty() {
                text.push(Line::from(message));
            }
            text.push(Line::from(""));
            text.push(Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]));
        } else {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                message,
                Style::default().fg(Color::Gray),
            )));
        }

        Some(
            Paragraph::new(text).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(color)),
            ),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / click to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle in the middle of `area`, clipped to it
fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(state: &GameState) -> String {
        screen_text_with(state, &GameMetrics::new())
    }

    fn screen_text_with(state: &GameState, metrics: &GameMetrics) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = Renderer::new();

        terminal
            .draw(|frame| renderer.render(frame, state, metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(20, 10, area), Rect::new(40, 15, 20, 10));
        assert_eq!(centered(200, 10, area), Rect::new(0, 15, 100, 10));
    }

    #[test]
    fn test_paused_overlay() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let state = engine.reset();
        let text = screen_text(&state);
        assert!(text.contains("PAUSED"));
        assert!(text.contains("Score: 0"));
    }

    #[test]
    fn test_header_shows_session_records() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let state = engine.reset();
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(30, 14);
        metrics.on_game_over(10, 9);

        let text = screen_text_with(&state, &metrics);
        assert!(text.contains("Best: 30"));
        assert!(text.contains("Length: 7"));
        assert!(text.contains("Longest: 14"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let mut state = engine.reset();
        state.is_alive = false;
        state.score = 12;
        let text = screen_text(&state);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 12"));
    }

    #[test]
    fn test_running_game_has_no_overlay() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let mut state = engine.reset();
        state.is_paused = false;
        let text = screen_text(&state);
        assert!(!text.contains("PAUSED"));
        assert!(text.contains('█') || text.contains('▀'));
    }
}
