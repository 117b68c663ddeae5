//! Game loop controller
//!
//! Owns the session and drives render + physics once per frame. Scheduling
//! belongs to the host: it calls [`Game::tick`] and asks for another frame
//! only while the tick reports the session is still active.
//!
//! ```text
//! Idle --start--> Running --ball lost--> Over --restart--> Running
//!                                          \--exit--> Exited
//! ```

use crate::error::ConfigError;
use crate::renderer::{Surface, render};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// User-facing affordances the controller toggles
pub trait Host {
    /// Show a blocking message (alert)
    fn notify(&mut self, message: &str);
    fn set_start_visible(&mut self, visible: bool);
    /// Restart and exit controls, shown only while the game is over
    fn set_over_controls_visible(&mut self, visible: bool);
    /// Leave the game entirely
    fn reload(&mut self);
}

/// A session bound to a drawing surface and a host
pub struct Game<S, H> {
    state: GameState,
    surface: S,
    host: H,
}

impl<S: Surface, H: Host> Game<S, H> {
    pub fn new(settings: Settings, seed: u64, surface: S, host: H) -> Result<Self, ConfigError> {
        let state = GameState::new(settings, seed)?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(Self {
            state,
            surface,
            host,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Whether the host should keep scheduling ticks
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Start trigger. Returns true when the host should begin ticking.
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            log::warn!("Ignoring start in phase {:?}", self.state.phase);
            return false;
        }

        self.state.phase = GamePhase::Running;
        self.host.set_start_visible(false);
        log::info!("Game started");
        true
    }

    /// Restart trigger. Returns true when the host should begin ticking.
    pub fn restart(&mut self) -> bool {
        if self.state.phase != GamePhase::Over {
            log::warn!("Ignoring restart in phase {:?}", self.state.phase);
            return false;
        }

        self.state.reset();
        self.host.set_over_controls_visible(false);
        log::info!("Game restarted");
        true
    }

    /// Exit trigger
    pub fn exit(&mut self) {
        if self.state.phase != GamePhase::Over {
            log::warn!("Ignoring exit in phase {:?}", self.state.phase);
            return;
        }

        self.state.phase = GamePhase::Exited;
        log::info!("Exiting game");
        self.host.notify("Exiting game...");
        self.host.reload();
    }

    /// Pointer moved to a surface-relative x
    pub fn pointer_move(&mut self, x: f32) {
        self.state.move_paddle(x);
    }

    /// One frame: render, step physics, surface any game over.
    /// Returns true if another tick should be scheduled.
    pub fn tick(&mut self) -> bool {
        render(&self.state, &mut self.surface);
        tick(&mut self.state);

        for event in self.state.drain_events() {
            match event {
                GameEvent::GameOver { score } => {
                    self.host
                        .notify(&format!("Game Over! Your score: {}", score));
                    self.host.set_over_controls_visible(true);
                }
                other => log::debug!("{:?}", other),
            }
        }

        self.state.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Color, RecordingSurface};
    use crate::sim::Ball;
    use glam::Vec2;

    #[derive(Debug, Default)]
    struct RecordingHost {
        messages: Vec<String>,
        start_visible: bool,
        over_controls_visible: bool,
        reloads: u32,
    }

    impl Host for RecordingHost {
        fn notify(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }

        fn set_start_visible(&mut self, visible: bool) {
            self.start_visible = visible;
        }

        fn set_over_controls_visible(&mut self, visible: bool) {
            self.over_controls_visible = visible;
        }

        fn reload(&mut self) {
            self.reloads += 1;
        }
    }

    fn new_game() -> Game<RecordingSurface, RecordingHost> {
        let host = RecordingHost {
            start_visible: true,
            ..Default::default()
        };
        Game::new(
            Settings::with_surface(400.0, 600.0),
            42,
            RecordingSurface::new(),
            host,
        )
        .unwrap()
    }

    /// Replace the balls with one about to drop past the left of the paddle
    fn doom(game: &mut Game<RecordingSurface, RecordingHost>) {
        let state = game.state_mut();
        let id = state.next_entity_id();
        state.balls = vec![Ball::new(
            id,
            Vec2::new(20.0, 592.0),
            Vec2::new(0.0, 1.0),
            8.0,
        )];
    }

    #[test]
    fn test_new_game_rejects_bad_settings() {
        let result = Game::new(
            Settings::with_surface(0.0, 0.0),
            1,
            RecordingSurface::new(),
            RecordingHost::default(),
        );
        assert!(matches!(result, Err(ConfigError::EmptySurface { .. })));
    }

    #[test]
    fn test_idle_tick_renders_without_physics() {
        let mut game = new_game();
        let before = game.state().balls.clone();

        assert!(!game.tick());
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.state().balls, before);
        assert_eq!(game.surface().frames, 1);
    }

    #[test]
    fn test_start_runs_and_hides_button() {
        let mut game = new_game();
        assert!(game.start());
        assert!(game.is_active());
        assert!(!game.host().start_visible);

        assert!(game.tick());
        assert_eq!(game.state().balls[0].pos, Vec2::new(201.0, 301.0));

        // Second start is ignored
        assert!(!game.start());
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_game_over_notifies_and_stops() {
        let mut game = new_game();
        game.start();
        doom(&mut game);

        assert!(!game.tick());
        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.host().messages, vec!["Game Over! Your score: 0"]);
        assert!(game.host().over_controls_visible);

        // Frame was drawn before the physics step ended the run
        assert_eq!(game.surface().count(Color::Ball), 1);

        // Further ticks neither move anything nor notify again
        let balls = game.state().balls.clone();
        assert!(!game.tick());
        assert_eq!(game.state().balls, balls);
        assert_eq!(game.host().messages.len(), 1);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut game = new_game();
        assert!(!game.restart());

        game.start();
        game.state_mut().score = 3;
        doom(&mut game);
        game.tick();

        assert!(game.restart());
        assert!(game.is_active());
        assert!(!game.host().over_controls_visible);
        let state = game.state();
        assert_eq!(state.score, 0);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, Vec2::new(200.0, 300.0));
        assert!(state.obstacles.is_empty());
        assert!(game.tick());
    }

    #[test]
    fn test_exit_only_after_game_over() {
        let mut game = new_game();
        game.exit();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.host().reloads, 0);

        game.start();
        doom(&mut game);
        game.tick();
        game.exit();

        assert_eq!(game.phase(), GamePhase::Exited);
        assert_eq!(game.host().reloads, 1);
        assert_eq!(
            game.host().messages.last().map(String::as_str),
            Some("Exiting game...")
        );
        assert!(!game.restart());
    }

    #[test]
    fn test_tick_drains_every_event() {
        let mut game = new_game();
        game.start();
        let state = game.state_mut();
        state.score = 9;
        let id = state.next_entity_id();
        state.balls = vec![Ball::new(
            id,
            Vec2::new(200.0, 578.0),
            Vec2::new(0.0, 1.0),
            8.0,
        )];

        // Hit, obstacle and ball spawn all happen this tick
        assert!(game.tick());
        assert_eq!(game.state().score, 10);
        assert_eq!(game.state().balls.len(), 2);
        assert!(game.state().events.is_empty());
        assert!(game.host().messages.is_empty());
    }

    #[test]
    fn test_pointer_moves_paddle_in_any_phase() {
        let mut game = new_game();
        game.pointer_move(250.0);
        assert_eq!(game.state().paddle.x, 150.0);

        game.pointer_move(-50.0);
        assert_eq!(game.state().paddle.x, 0.0);

        game.pointer_move(1000.0);
        assert_eq!(game.state().paddle.x, 200.0);
    }
}
