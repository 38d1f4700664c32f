use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use starstrike::renderer::{GameRenderer, RenderView};
use starstrike::{Game, GameConfig, GameEvent, InputAction, InputManager, ThreadRngSource};

/// The main application which owns the session and the terminal-facing parts.
pub struct App {
    running: bool,
    game: Game,
    rng: ThreadRngSource,
    /// Monotonic origin for every timer reading handed to the simulation
    clock_origin: Instant,
    frame_duration: Duration,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: GameConfig, frame_duration: Duration, reports_release: bool) -> Self {
        let mut rng = ThreadRngSource::default();
        let game = Game::new(config, &mut rng);

        Self {
            running: true,
            game,
            rng,
            clock_origin: Instant::now(),
            frame_duration,
            input_manager: InputManager::new(reports_release),
            renderer: GameRenderer::new(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();

            terminal.draw(|frame| {
                let view = RenderView::new(&self.game, frame.area());
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(self.game.state())?;
            let actions = self.input_manager.actions().to_vec();
            self.process_actions(&actions);

            // One clock reading per frame, shared by every timer in the tick
            let now = self.clock_origin.elapsed();
            let events = self
                .game
                .tick(now, self.input_manager.controls(), &mut self.rng);
            self.publish(&events);
            self.input_manager.end_frame();

            // Sleep off the rest of the frame budget
            if let Some(rest) = self.frame_duration.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }

        info!(score = self.game.score(), "quitting");
        Ok(())
    }

    /// Process session commands from the input manager
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            let events = match action {
                InputAction::Quit => {
                    self.running = false;
                    continue;
                }
                InputAction::Start => self.game.start(&mut self.rng),
                InputAction::Restart => self.game.restart(&mut self.rng),
            };
            self.input_manager.reset();
            self.publish(&events);
        }
    }

    /// The HUD reads score and health straight from the session, so events
    /// only need to reach the log here.
    fn publish(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::ScoreChanged(score) => debug!(score, "score changed"),
                GameEvent::HealthChanged(health) => debug!(health, "health changed"),
                GameEvent::GameOver { score } => {
                    info!(score, "final score");
                    self.input_manager.reset();
                }
            }
        }
    }
}
