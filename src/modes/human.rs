use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, warn};

use super::ticker::TickTimer;
use crate::game::config::{MAX_SPEED, MIN_SPEED};
use crate::game::{Action, GameConfig, GameStatus, Session, TickOutcome};
use crate::input::{Controller, is_ctrl_c, key_symbol};
use crate::leaderboard::{FileLeaderboard, Leaderboard, ScoreRecord, ScoreSink};
use crate::render::{MenuView, Renderer, TileStyle, terminal_palette};

/// Where finished sessions are recorded
pub enum Scores {
    Memory(Leaderboard),
    File(FileLeaderboard),
}

impl Scores {
    pub fn entries(&self) -> &[ScoreRecord] {
        match self {
            Scores::Memory(board) => board.entries(),
            Scores::File(board) => board.board().entries(),
        }
    }
}

impl ScoreSink for Scores {
    fn submit(&mut self, record: ScoreRecord) {
        info!(name = %record.name, score = record.score, "submitting score");
        match self {
            Scores::Memory(board) => board.submit(record),
            Scores::File(board) => board.submit(record),
        }
    }
}

/// Interactive play in the terminal
pub struct HumanMode {
    config: GameConfig,
    session: Session<TileStyle>,
    scores: Scores,
    renderer: Renderer,
    controller: Controller,
    timer: TickTimer,
    should_quit: bool,
}

impl HumanMode {
    /// Set up the menu. The config is validated here so a bad one never reaches the terminal.
    pub fn new(config: GameConfig, scores: Scores) -> Result<Self> {
        config.validate().context("Invalid game configuration")?;
        let session = Session::new(config.clone(), terminal_palette())?;
        let timer = TickTimer::stopped(config.tick_interval());

        Ok(Self {
            config,
            session,
            scores,
            renderer: Renderer::new(),
            controller: Controller::with_default_bindings(),
            timer,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick, only while a session is live
                _ = self.timer.tick() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    let view = MenuView {
                        config: &self.config,
                        leaderboard: self.scores.entries(),
                        controller: &self.controller,
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, &view);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                self.timer.cancel();
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            if is_ctrl_c(&key) {
                self.should_quit = true;
                return Ok(());
            }

            let action = key_symbol(&key).and_then(|symbol| self.controller.resolve(&symbol));
            if let Some(action) = action {
                self.apply(action)?;
            }
        }

        Ok(())
    }

    fn apply(&mut self, action: Action) -> Result<()> {
        let in_menu = matches!(self.session.status(), GameStatus::Idle | GameStatus::Over);
        debug!(action = action.name(), in_menu, "key action");

        match action {
            Action::Move(direction) => self.session.change_heading(direction),
            Action::Pause if !in_menu => {
                self.session.toggle_pause();
            }
            Action::Start if in_menu => self.start_session()?,
            Action::Quit => self.should_quit = true,
            Action::SpeedUp if in_menu => self.step_speed(true),
            Action::SpeedDown if in_menu => self.step_speed(false),
            Action::Pause | Action::Start | Action::SpeedUp | Action::SpeedDown => {}
        }

        Ok(())
    }

    /// Change the speed the next session starts with, staying within the accepted range
    fn step_speed(&mut self, faster: bool) {
        let speed = if faster {
            self.config.speed.saturating_add(1)
        } else {
            self.config.speed.saturating_sub(1)
        };
        self.config.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        info!(speed = self.config.speed, "speed changed");
    }

    /// Build a fresh session and restart the tick timer at the configured speed
    fn start_session(&mut self) -> Result<()> {
        self.session = Session::new(self.config.clone(), terminal_palette())?;
        self.session.start();
        self.timer.cancel();
        self.timer = TickTimer::start(self.config.tick_interval());
        Ok(())
    }

    fn update_game(&mut self) {
        match self.session.tick(&mut self.scores) {
            TickOutcome::Over(over) => {
                if !self.timer.cancel() {
                    warn!("tick timer already released at game over");
                }
                info!(score = over.score, reason = ?over.reason, "back to menu");
            }
            TickOutcome::Suspended | TickOutcome::Moved | TickOutcome::Ate { .. } => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
