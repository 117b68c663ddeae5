//! Paddle Rush - a single-screen paddle and ball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `game`: Loop controller driving render + physics per frame
//! - `renderer`: Drawing surface abstraction and the render step
//! - `settings`: Data-driven game constants

pub mod error;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use game::{Game, Host};
pub use settings::{Settings, SpeedDirection};

/// Default game constants
pub mod consts {
    /// Surface (canvas) dimensions
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 600.0;

    /// Paddle defaults - sits on the bottom edge
    pub const PADDLE_WIDTH: f32 = 200.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Horizontal speed added at the paddle tips (scaled by hit offset)
    pub const PADDLE_ENGLISH: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Per-axis speed magnitude, pixels per tick
    pub const BALL_SPEED: f32 = 1.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HEIGHT: f32 = 20.0;
    /// Obstacles never spawn in this band above the bottom edge
    pub const OBSTACLE_FLOOR_MARGIN: f32 = 100.0;

    /// Score intervals for spawning
    pub const OBSTACLE_EVERY: u32 = 5;
    pub const BALL_EVERY: u32 = 10;
}
