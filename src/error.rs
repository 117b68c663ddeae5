//! Configuration errors
//!
//! The simulation itself never fails; everything here is caught once when a
//! session is built from [`Settings`](crate::Settings).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("surface must have a positive finite size, got {width}x{height}")]
    EmptySurface { width: f32, height: f32 },

    #[error("paddle {width}x{height} does not fit a {surface_width}x{surface_height} surface")]
    PaddleTooLarge {
        width: f32,
        height: f32,
        surface_width: f32,
        surface_height: f32,
    },

    #[error("obstacle {width}x{height} does not fit its spawn area {area_width}x{area_height}")]
    ObstacleTooLarge {
        width: f32,
        height: f32,
        area_width: f32,
        area_height: f32,
    },

    #[error("ball radius {radius} does not fit a {surface_width}x{surface_height} surface")]
    BallTooLarge {
        radius: f32,
        surface_width: f32,
        surface_height: f32,
    },

    #[error("{0} must be a positive finite number")]
    InvalidValue(&'static str),

    #[error("{0} spawn interval must be non-zero")]
    ZeroInterval(&'static str),

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
