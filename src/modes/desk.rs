//! The desk: snake window and music player side by side in one terminal.
//!
//! A single loop owns both widgets. Timers, key presses and finished
//! compose requests are all handled on that loop, so nothing is shared
//! across threads except the generator itself.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::player::{
    GenerationError, PlayerConfig, PlaylistController, SimulatedOutput, TextGenerator,
};
use crate::render::Renderer;
use crate::store::HighScoreStore;

const AUDIO_CLOCK: Duration = Duration::from_millis(250);
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

type ComposeResult = Result<String, GenerationError>;

pub struct DeskMode<S, G> {
    engine: GameEngine<StdRng, S>,
    game: GameState,
    player: PlaylistController<SimulatedOutput, StdRng>,
    generator: Arc<G>,
    compose_tx: mpsc::UnboundedSender<ComposeResult>,
    compose_rx: mpsc::UnboundedReceiver<ComposeResult>,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<S, G> DeskMode<S, G>
where
    S: HighScoreStore,
    G: TextGenerator + Send + Sync + 'static,
{
    pub fn new(
        game_config: GameConfig,
        player_config: PlayerConfig,
        store: S,
        generator: G,
        seed: Option<u64>,
    ) -> Result<Self> {
        let (game_rng, player_rng) = match seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (StdRng::from_entropy(), StdRng::from_entropy()),
        };

        let mut engine = GameEngine::new(game_config, game_rng, store);
        let game = engine.start();
        let player = PlaylistController::new(SimulatedOutput::new(), player_rng, player_config)
            .context("Failed to set up the player")?;
        let (compose_tx, compose_rx) = mpsc::unbounded_channel();

        Ok(Self {
            engine,
            game,
            player,
            generator: Arc::new(generator),
            compose_tx,
            compose_rx,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(high_score = self.game.high_score, "desk started");
        let result = self.run_desk_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_desk_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(Duration::from_millis(
            self.engine.config().tick_interval_ms,
        ));
        let mut audio_timer = interval(AUDIO_CLOCK);
        let mut render_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.engine.tick(&mut self.game);
                }

                _ = audio_timer.tick() => {
                    self.advance_audio(AUDIO_CLOCK);
                }

                Some(result) = self.compose_rx.recv() => {
                    self.on_composed(result);
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game, &self.player);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(high_score = self.game.high_score, "desk closed");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(direction) => self.game.steering.request(direction),
            KeyAction::Restart => self.engine.reset(&mut self.game),
            KeyAction::TogglePlayback => self.player.toggle_playback(),
            KeyAction::NextTrack => self.player.select_next(),
            KeyAction::PreviousTrack => self.player.select_previous(),
            KeyAction::Compose => self.start_compose(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn start_compose(&mut self) {
        let Some(request) = self.player.begin_generation() else {
            return;
        };

        let generator = Arc::clone(&self.generator);
        let tx = self.compose_tx.clone();
        tokio::spawn(async move {
            let result = generator.generate(&request).await;
            if tx.send(result).is_err() {
                debug!("desk closed before compose finished");
            }
        });
    }

    fn on_composed(&mut self, result: ComposeResult) {
        if let Err(err) = self.player.complete_generation(result) {
            debug!(error = %err, "compose result not added");
        }
    }

    fn advance_audio(&mut self, dt: Duration) {
        let events = self.player.audio_mut().advance(dt);
        for event in events {
            self.player.handle_event(event);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crate::player::LocalComposer;
    use crate::store::MemoryStore;

    fn desk() -> DeskMode<MemoryStore, LocalComposer> {
        DeskMode::new(
            GameConfig::default(),
            PlayerConfig::default(),
            MemoryStore::with_score(40),
            LocalComposer::with_seed(Duration::ZERO, 3),
            Some(9),
        )
        .unwrap()
    }

    #[test]
    fn test_desk_initialization() {
        let mode = desk();
        assert!(!mode.game.is_over());
        assert_eq!(mode.game.score, 0);
        assert_eq!(mode.game.high_score, 40);
        assert_eq!(mode.player.tracks().len(), 3);
    }

    #[test]
    fn test_steer_is_latched_until_tick() {
        let mut mode = desk();
        mode.handle_action(KeyAction::Steer(Direction::Left));
        assert_eq!(mode.game.direction(), Direction::Up);

        mode.engine.tick(&mut mode.game);
        assert_eq!(mode.game.direction(), Direction::Left);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut mode = desk();
        mode.game.score = 90;
        mode.game.high_score = 90;
        mode.handle_action(KeyAction::Restart);
        assert_eq!(mode.game.score, 0);
        assert_eq!(mode.game.high_score, 90);
    }

    #[test]
    fn test_audio_clock_drives_player() {
        let mut mode = desk();
        mode.handle_action(KeyAction::TogglePlayback);
        assert!(mode.player.is_playing());

        mode.advance_audio(Duration::from_secs(92));
        assert!((mode.player.progress_percent() - 50.0).abs() < 1e-9);

        // Cybernetic Pulse runs 184s; the end moves on to the next track.
        mode.advance_audio(Duration::from_secs(100));
        assert_eq!(mode.player.selected_index(), 1);
        assert!(mode.player.is_playing());
    }

    #[tokio::test]
    async fn test_double_compose_inserts_once() {
        let mut mode = desk();
        mode.handle_action(KeyAction::Compose);
        mode.handle_action(KeyAction::Compose);
        assert!(mode.player.is_generating());

        let result = mode.compose_rx.recv().await.unwrap();
        mode.on_composed(result);

        assert!(!mode.player.is_generating());
        assert_eq!(mode.player.tracks().len(), 4);
        assert_eq!(mode.player.selected_index(), 0);
        assert!(mode.player.is_playing());
        assert!(mode.compose_rx.try_recv().is_err());
    }

    #[test]
    fn test_stray_compose_result_is_dropped() {
        let mut mode = desk();
        mode.on_composed(Ok(
            r##"{"title": "Ghost", "artist": "x", "description": "y", "hexColor": "#fff"}"##
                .to_string(),
        ));

        assert_eq!(mode.player.tracks().len(), 3);
        assert!(!mode.player.is_generating());
    }

    #[test]
    fn test_quit() {
        let mut mode = desk();
        mode.handle_action(KeyAction::Quit);
        assert!(mode.should_quit);
    }
}
