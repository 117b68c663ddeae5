//! Game state and core simulation types
//!
//! Entity storage plus the spawner. Nothing here reads a clock or a global;
//! all randomness flows from the seeded RNG owned by [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::settings::{Settings, SpeedDirection};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start trigger
    Idle,
    /// Active gameplay
    Running,
    /// A ball got past the paddle
    Over,
    /// Player left; the host reloads
    Exited,
}

/// Something the simulation wants the outside world to know about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the paddle; `score` is the new score
    PaddleHit { ball_id: u32, score: u32 },
    ObstacleSpawned { pos: Vec2 },
    BallSpawned { ball_id: u32, pos: Vec2 },
    /// Ball dropped below the surface outside the paddle
    BallLost { ball_id: u32 },
    /// Session ended with this score
    GameOver { score: u32 },
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
        }
    }

    /// Lower edge of the bounding circle
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Upper edge of the bounding circle
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }
}

/// A static rectangular obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// The player's paddle, pinned to the bottom edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Paddle horizontally centered on a surface
    pub fn centered(surface_width: f32, width: f32, height: f32) -> Self {
        Self {
            x: (surface_width - width) / 2.0,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// True when `x` lies strictly between the paddle's edges
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.x + self.width
    }

    /// Center the paddle under a pointer, kept fully on the surface
    pub fn follow_pointer(&mut self, pointer_x: f32, surface_width: f32) {
        let max_x = (surface_width - self.width).max(0.0);
        self.x = (pointer_x - self.width / 2.0).clamp(0.0, max_x);
    }
}

/// Fixed-magnitude speed component with a direction chosen by `direction`
pub fn random_speed(rng: &mut Pcg32, speed: f32, direction: SpeedDirection) -> f32 {
    match direction {
        SpeedDirection::Fixed => speed,
        SpeedDirection::RandomSign => {
            if rng.random_bool(0.5) {
                speed
            } else {
                -speed
            }
        }
    }
}

/// Uniform sample in `[0, max)`; an empty range collapses to 0
fn random_upto(rng: &mut Pcg32, max: f32) -> f32 {
    if max > 0.0 {
        rng.random_range(0.0..max)
    } else {
        0.0
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub score: u32,
    pub phase: GamePhase,
    pub paddle: Paddle,
    /// Balls in spawn order
    pub balls: Vec<Ball>,
    /// Obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle session: one ball at the center, paddle centered
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;

        let paddle = Paddle::centered(
            settings.surface_width,
            settings.paddle_width,
            settings.paddle_height,
        );
        let mut state = Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            phase: GamePhase::Idle,
            paddle,
            balls: Vec::new(),
            obstacles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };
        state.spawn_center_ball();

        Ok(state)
    }

    /// Whether physics runs this tick
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Surface center
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.settings.surface_width / 2.0,
            self.settings.surface_height / 2.0,
        )
    }

    fn fresh_velocity(&mut self) -> Vec2 {
        let speed = self.settings.ball_speed;
        let direction = self.settings.speed_direction;
        let x = random_speed(&mut self.rng, speed, direction);
        let y = random_speed(&mut self.rng, speed, direction);
        Vec2::new(x, y)
    }

    fn spawn_ball_at(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let vel = self.fresh_velocity();
        self.balls
            .push(Ball::new(id, pos, vel, self.settings.ball_radius));
        id
    }

    fn spawn_center_ball(&mut self) -> u32 {
        let center = self.center();
        self.spawn_ball_at(center)
    }

    /// Drop an obstacle somewhere above the floor margin. May overlap
    /// anything already on the surface.
    pub fn create_obstacle(&mut self) {
        let s = &self.settings;
        let max_x = s.surface_width - s.obstacle_width;
        let max_y = s.surface_height - s.obstacle_floor_margin;
        let size = Vec2::new(s.obstacle_width, s.obstacle_height);

        let pos = Vec2::new(
            random_upto(&mut self.rng, max_x),
            random_upto(&mut self.rng, max_y),
        );
        self.obstacles.push(Obstacle::new(pos, size));
        self.events.push(GameEvent::ObstacleSpawned { pos });
        log::debug!("Obstacle spawned at ({:.1}, {:.1})", pos.x, pos.y);
    }

    /// Add a ball somewhere in the upper half, fully inside the side walls
    pub fn create_new_ball(&mut self) {
        let radius = self.settings.ball_radius;
        let span_x = self.settings.surface_width - 2.0 * radius;
        let max_y = self.settings.surface_height / 2.0;

        let pos = Vec2::new(
            random_upto(&mut self.rng, span_x) + radius,
            random_upto(&mut self.rng, max_y),
        );
        let ball_id = self.spawn_ball_at(pos);
        self.events.push(GameEvent::BallSpawned { ball_id, pos });
        log::debug!("Ball {} spawned at ({:.1}, {:.1})", ball_id, pos.x, pos.y);
    }

    /// Start over: zero score, a single center ball, no obstacles, running
    pub fn reset(&mut self) {
        self.score = 0;
        self.balls.clear();
        self.obstacles.clear();
        self.events.clear();
        self.spawn_center_ball();
        self.phase = GamePhase::Running;
    }

    /// Pointer moved to `pointer_x` (surface-relative)
    pub fn move_paddle(&mut self, pointer_x: f32) {
        self.paddle
            .follow_pointer(pointer_x, self.settings.surface_width);
    }

    /// Credit one paddle contact and run the score-driven spawner
    pub fn score_paddle_hit(&mut self, ball_id: u32) {
        self.score += 1;
        self.events.push(GameEvent::PaddleHit {
            ball_id,
            score: self.score,
        });

        if self.score % self.settings.obstacle_every == 0 {
            self.create_obstacle();
        }
        if self.score % self.settings.ball_every == 0 {
            self.create_new_ball();
        }
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn settings() -> Settings {
        Settings::with_surface(400.0, 600.0)
    }

    #[test]
    fn test_new_state_is_idle_with_center_ball() {
        let state = GameState::new(settings(), 7).unwrap();
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(!state.is_active());
        assert_eq!(state.score, 0);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, Vec2::new(200.0, 300.0));
        assert_eq!(state.paddle.x, 100.0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_new_rejects_degenerate_surface() {
        assert!(GameState::new(Settings::with_surface(0.0, 600.0), 1).is_err());
    }

    #[test]
    fn test_fixed_direction_always_positive() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(random_speed(&mut rng, 1.0, SpeedDirection::Fixed), 1.0);
        }
    }

    #[test]
    fn test_random_sign_picks_both_directions() {
        let mut rng = Pcg32::seed_from_u64(3);
        let samples: Vec<f32> = (0..200)
            .map(|_| random_speed(&mut rng, 2.0, SpeedDirection::RandomSign))
            .collect();
        assert!(samples.iter().all(|s| s.abs() == 2.0));
        assert!(samples.contains(&2.0));
        assert!(samples.contains(&-2.0));
    }

    #[test]
    fn test_reset() {
        let mut state = GameState::new(settings(), 11).unwrap();
        state.score = 42;
        state.phase = GamePhase::Over;
        state.create_obstacle();
        state.create_new_ball();
        state.create_new_ball();

        state.reset();

        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, state.center());
        assert!(state.obstacles.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_full_width_obstacle_spawns_at_left_edge() {
        let settings = Settings {
            obstacle_width: 400.0,
            ..settings()
        };
        let mut state = GameState::new(settings, 5).unwrap();
        state.create_obstacle();
        assert_eq!(state.obstacles[0].pos.x, 0.0);
    }

    #[test]
    fn test_spawn_interval_triggers() {
        let mut state = GameState::new(settings(), 9).unwrap();
        let id = state.balls[0].id;

        for _ in 0..4 {
            state.score_paddle_hit(id);
        }
        assert!(state.obstacles.is_empty());

        state.score_paddle_hit(id);
        assert_eq!(state.score, 5);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.balls.len(), 1);

        for _ in 0..5 {
            state.score_paddle_hit(id);
        }
        assert_eq!(state.score, 10);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.balls.len(), 2);

        let events = state.drain_events();
        let hits = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PaddleHit { .. }))
            .count();
        assert_eq!(hits, 10);
        assert!(state.events.is_empty());
    }

    proptest! {
        #[test]
        fn prop_paddle_always_clamped(pointer in -10_000.0f32..10_000.0) {
            let mut state = GameState::new(settings(), 1).unwrap();
            state.move_paddle(pointer);
            prop_assert!(state.paddle.x >= 0.0);
            prop_assert!(state.paddle.x <= 400.0 - state.paddle.width);
        }

        #[test]
        fn prop_spawns_stay_in_bounds(seed in any::<u64>(), count in 1usize..20) {
            let mut state = GameState::new(settings(), seed).unwrap();
            for _ in 0..count {
                state.create_obstacle();
                state.create_new_ball();
            }
            for obstacle in &state.obstacles {
                prop_assert!(obstacle.pos.x >= 0.0 && obstacle.pos.x <= 350.0);
                prop_assert!(obstacle.pos.y >= 0.0 && obstacle.pos.y <= 500.0);
            }
            for ball in &state.balls[1..] {
                prop_assert!(ball.pos.x >= 8.0 && ball.pos.x <= 392.0);
                prop_assert!(ball.pos.y >= 0.0 && ball.pos.y <= 300.0);
                prop_assert_eq!(ball.vel, Vec2::new(1.0, 1.0));
            }
        }
    }
}
