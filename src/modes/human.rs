use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{Action, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render at ~30 FPS
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

type TuiTerminal = Terminal<CrosstermBackend<Stderr>>;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Last known terminal size, for mouse steering
    screen_size: (u16, u16),
}

impl HumanMode {
    pub fn with_engine(mut engine: GameEngine) -> Self {
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            screen_size: (80, 24),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        if let Ok(size) = terminal::size() {
            self.screen_size = size;
        }

        let result = self.run_game_loop(&mut terminal).await;
        let cleanup = restore_terminal(&mut terminal);

        log::info!(
            "session over: {} games, high score {}",
            self.metrics.games_played,
            self.metrics.high_score
        );
        session_outcome(result, cleanup)
    }

    async fn run_game_loop(&mut self, terminal: &mut TuiTerminal) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_interval = Duration::from_millis(self.engine.config().tick_ms);
        let mut tick_timer = interval(tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    let running = !self.state.is_paused && !self.state.is_over();
                    self.metrics.update(running);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => {
                let (width, height) = self.screen_size;
                self.input_handler.handle_mouse_event(mouse, width, height)
            }
            Event::Resize(width, height) => {
                self.screen_size = (width, height);
                KeyAction::None
            }
            _ => KeyAction::None,
        };

        self.apply(action);
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::GameAction(Action::Move(dir)) => {
                if !self.state.is_over() {
                    self.engine.queue_direction(&mut self.state, dir);
                }
            }
            KeyAction::GameAction(Action::Continue) => {
                // No action needed
            }
            KeyAction::TogglePause => {
                if !self.state.is_over() {
                    self.engine.toggle_pause(&mut self.state);
                }
            }
            KeyAction::Restart => {
                self.reset_game();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        if self.state.is_over() {
            return;
        }

        let result = self.engine.step(&mut self.state, Action::Continue);

        // Track game over
        if result.terminated {
            self.metrics.on_game_over(self.state.score, self.state.snake.len());
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
    }
}

/// Raw mode, alternate screen and mouse capture. Whatever was switched on is
/// switched back off if a later step fails.
fn setup_terminal() -> Result<TuiTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let terminal = enter_screen();
    if terminal.is_err() {
        // The setup error is the one reported
        let mut stderr = stderr();
        let _ = disable_raw_mode();
        let _ = execute!(stderr, LeaveAlternateScreen, DisableMouseCapture);
    }
    terminal
}

fn enter_screen() -> Result<TuiTerminal> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stderr))
        .context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Undo `setup_terminal`. Every step is attempted; the first error is returned.
fn restore_terminal(terminal: &mut TuiTerminal) -> Result<()> {
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    let screen = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen");
    let cursor = terminal.show_cursor().context("Failed to show cursor");
    raw.and(screen).and(cursor)
}

/// A failed game loop outranks a failed cleanup
fn session_outcome(game: Result<()>, cleanup: Result<()>) -> Result<()> {
    if let Err(err) = &cleanup {
        log::warn!("terminal cleanup failed: {:#}", err);
    }
    game.and(cleanup)
}
