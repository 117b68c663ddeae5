//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Axis, ball_obstacle_collision, ball_rect_overlap, paddle_english};
pub use state::{Ball, GameEvent, GamePhase, GameState, Obstacle, Paddle, random_speed};
pub use tick::tick;
