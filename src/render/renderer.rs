use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use std::time::Duration;

use crate::game::{self, Action, GameConfig, GameStatus, Grid, Palette, Session};
use crate::input::Controller;
use crate::leaderboard::ScoreRecord;
use crate::metrics::format_elapsed;

const MOVES: [Action; 4] = [
    Action::Move(game::Direction::Up),
    Action::Move(game::Direction::Left),
    Action::Move(game::Direction::Down),
    Action::Move(game::Direction::Right),
];

/// Glyph and colour of one cell, carried through the grid untouched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileStyle {
    pub symbol: &'static str,
    pub style: Style,
}

impl TileStyle {
    pub const fn new(symbol: &'static str, style: Style) -> Self {
        Self { symbol, style }
    }
}

/// Terminal palette used by the interactive mode
pub fn terminal_palette() -> Palette<TileStyle> {
    Palette {
        empty: TileStyle::new(". ", Style::new().fg(Color::DarkGray)),
        snake: TileStyle::new(
            "■ ",
            Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        food: TileStyle::new(
            "● ",
            Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    }
}

/// Everything outside the session that the menu and footer show
pub struct MenuView<'a> {
    /// Settings the next session will start with
    pub config: &'a GameConfig,
    pub leaderboard: &'a [ScoreRecord],
    pub controller: &'a Controller,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        session: &Session<TileStyle>,
        view: &MenuView,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(session);
        frame.render_widget(stats, chunks[0]);

        let grid = session.grid();
        let board_area = centered_rect(
            cells_to_u16(grid.width()).saturating_mul(2).saturating_add(2),
            cells_to_u16(grid.height()).saturating_add(2),
            chunks[1],
        );
        frame.render_widget(self.render_grid(grid), board_area);

        match session.status() {
            GameStatus::Paused => {
                let overlay = centered_rect(24, 3, board_area);
                frame.render_widget(Clear, overlay);
                frame.render_widget(self.render_paused(), overlay);
            }
            GameStatus::Idle | GameStatus::Over => {
                let menu = centered_rect(40, 16, chunks[1]);
                frame.render_widget(Clear, menu);
                frame.render_widget(self.render_menu(session, view), menu);
            }
            GameStatus::Running => {}
        }

        let controls = self.render_controls(view.controller);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, grid: &Grid<TileStyle>) -> Paragraph<'static> {
        let lines: Vec<Line> = (0..grid.height())
            .map(|y| {
                let spans: Vec<Span> = grid
                    .row(y)
                    .iter()
                    .map(|tile| Span::styled(tile.style().symbol, tile.style().style))
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, session: &Session<TileStyle>) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Player: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                session.config().player_name.clone(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                session.elapsed_display().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Score: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                session.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_paused(&self) -> Paragraph<'static> {
        Paragraph::new(Line::from(Span::styled(
            "GAME PAUSED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
    }

    fn render_menu(
        &self,
        session: &Session<TileStyle>,
        view: &MenuView,
    ) -> Paragraph<'static> {
        let mut text = Vec::new();

        if session.status() == GameStatus::Over {
            text.push(Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            text.push(Line::from(format!(
                "Last score: {}    Time: {}",
                session.score(),
                session.elapsed_display()
            )));
        } else {
            text.push(Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(format!(
            "Player: {}    Speed: {}",
            view.config.player_name, view.config.speed
        )));
        text.push(Line::from(Span::styled(
            format!(
                "{} faster  {} slower",
                bound_keys(view.controller, &[Action::SpeedUp]),
                bound_keys(view.controller, &[Action::SpeedDown])
            ),
            Style::default().fg(Color::DarkGray),
        )));
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Leaderboard",
            Style::default().fg(Color::Yellow),
        )));

        if view.leaderboard.is_empty() {
            text.push(Line::from(Span::styled(
                "no scores yet",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (rank, entry) in view.leaderboard.iter().enumerate() {
            text.push(Line::from(format!(
                "{}. {:<15} {:>5}  {}",
                rank + 1,
                entry.name,
                entry.score,
                format_elapsed(Duration::from_secs_f64(entry.time.max(0.0)))
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                bound_keys(view.controller, &[Action::Start]),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to start or ", Style::default().fg(Color::Gray)),
            Span::styled(
                bound_keys(view.controller, &[Action::Quit]),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
    }

    fn render_controls(&self, controller: &Controller) -> Paragraph<'static> {
        let segments = [
            (bound_keys(controller, &MOVES), " to move", Color::Cyan),
            (
                bound_keys(controller, &[Action::Pause]),
                " to pause",
                Color::Yellow,
            ),
            (bound_keys(controller, &[Action::Quit]), " to quit", Color::Red),
        ];

        let mut spans = Vec::new();
        for (keys, label, color) in segments {
            // Unbound actions drop out of the footer
            if keys.is_empty() {
                continue;
            }
            if !spans.is_empty() {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(keys, Style::default().fg(color)));
            spans.push(Span::raw(label));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Grid side in terminal cells, saturating at the largest drawable size
fn cells_to_u16(cells: usize) -> u16 {
    u16::try_from(cells).unwrap_or(u16::MAX)
}

/// How a bound key symbol is shown on screen
fn key_label(symbol: &str) -> String {
    match symbol {
        "ArrowUp" => "↑".to_string(),
        "ArrowDown" => "↓".to_string(),
        "ArrowLeft" => "←".to_string(),
        "ArrowRight" => "→".to_string(),
        "Escape" => "Esc".to_string(),
        other if other.chars().count() == 1 => other.to_uppercase(),
        other => other.to_string(),
    }
}

/// Labels of every key bound to any of `actions`, with case variants folded
fn bound_keys(controller: &Controller, actions: &[Action]) -> String {
    let mut labels: Vec<String> = Vec::new();
    for action in actions {
        for key in controller.keys_for(*action) {
            let label = key_label(key);
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
    }
    labels.join("/")
}

/// Rectangle of at most `width x height` centred in `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
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
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw(session: &Session<TileStyle>, view: &MenuView, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 30)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, session, view))
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 10, 6);
        assert_eq!(centered_rect(4, 2, area), Rect::new(3, 2, 4, 2));
        assert_eq!(centered_rect(40, 20, area), area);
    }

    #[test]
    fn test_board_size_saturates() {
        assert_eq!(cells_to_u16(30), 30);
        assert_eq!(cells_to_u16(40_000), 40_000);
        assert_eq!(cells_to_u16(70_000), u16::MAX);
        assert_eq!(
            cells_to_u16(40_000).saturating_mul(2).saturating_add(2),
            u16::MAX
        );
    }

    #[test]
    fn test_menu_shown_before_start() {
        let config = GameConfig::small();
        let session = Session::new(config.clone(), terminal_palette()).unwrap();
        let controller = Controller::with_default_bindings();
        let view = MenuView {
            config: &config,
            leaderboard: &[],
            controller: &controller,
        };

        let text = draw(&session, &view, 60);
        assert!(text.contains("Leaderboard"));
        assert!(text.contains("no scores yet"));
        assert!(text.contains("Press Enter to start or Q to quit"));
        assert!(text.contains("+/= faster  -/_ slower"));
    }

    #[test]
    fn test_menu_shows_pending_speed() {
        let session = Session::new(GameConfig::small(), terminal_palette()).unwrap();
        let mut config = GameConfig::small();
        config.speed = 7;
        let controller = Controller::with_default_bindings();
        let view = MenuView {
            config: &config,
            leaderboard: &[],
            controller: &controller,
        };

        let text = draw(&session, &view, 60);
        assert!(text.contains("Speed: 7"));
    }

    #[test]
    fn test_running_board_drawn() {
        let config = GameConfig::small();
        let mut session = Session::new(config.clone(), terminal_palette()).unwrap();
        session.start();
        let controller = Controller::with_default_bindings();
        let view = MenuView {
            config: &config,
            leaderboard: &[],
            controller: &controller,
        };

        let text = draw(&session, &view, 60);
        assert!(text.contains("Snake"));
        assert!(text.contains("■"));
        assert!(text.contains("●"));
        assert!(!text.contains("Leaderboard"));
        assert!(text.contains("↑/W/←/A/↓/S/→/D to move | Esc to pause | Q to quit"));
    }

    #[test]
    fn test_footer_follows_bindings() {
        let config = GameConfig::small();
        let session = Session::new(config.clone(), terminal_palette()).unwrap();
        let mut controller = Controller::with_default_bindings();
        controller.bind(Action::Pause, &["p"]);
        let view = MenuView {
            config: &config,
            leaderboard: &[],
            controller: &controller,
        };

        let text = draw(&session, &view, 80);
        assert!(text.contains("Esc/P to pause"));

        // Nothing bound to quit: the segment disappears.
        let mut bare = Controller::new();
        bare.bind(Action::Pause, &["Escape"]);
        let view = MenuView {
            config: &config,
            leaderboard: &[],
            controller: &bare,
        };
        let text = draw(&session, &view, 80);
        assert!(text.contains("Esc to pause"));
        assert!(!text.contains("to move"));
        assert!(!text.contains(" to quit |"));
    }

    #[test]
    fn test_oversized_grid_does_not_panic() {
        // Session::new rejects this, so draw a bare grid directly.
        let grid = Grid::new(40_000, 2, terminal_palette().empty).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|frame| {
                let width = cells_to_u16(grid.width()).saturating_mul(2).saturating_add(2);
                let area = centered_rect(width, 4, frame.area());
                frame.render_widget(Renderer::new().render_grid(&grid), area);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("Snake"));
    }
}
