//! Game settings
//!
//! Every tunable constant of a session. Loaded once when the game is built;
//! the simulation reads it but never writes it.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// How freshly spawned balls pick the sign of their velocity components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedDirection {
    /// Always positive (moving right and down). This is how the game has
    /// always played: the direction roll never picks the negative branch.
    #[default]
    Fixed,
    /// Each component independently picks a random sign
    RandomSign,
}

impl SpeedDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedDirection::Fixed => "Fixed",
            SpeedDirection::RandomSign => "RandomSign",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fixed" => Some(SpeedDirection::Fixed),
            "random" | "randomsign" | "random_sign" => Some(SpeedDirection::RandomSign),
            _ => None,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Surface ===
    pub surface_width: f32,
    pub surface_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Horizontal speed added when the ball hits a paddle tip
    pub paddle_english: f32,

    // === Balls ===
    pub ball_radius: f32,
    /// Per-axis speed magnitude of a fresh ball, pixels per tick
    pub ball_speed: f32,
    pub speed_direction: SpeedDirection,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Height of the band above the bottom edge kept free of new obstacles
    pub obstacle_floor_margin: f32,

    // === Spawning ===
    /// Spawn an obstacle every N points
    pub obstacle_every: u32,
    /// Spawn a ball every N points
    pub ball_every: u32,

    /// Fixed RNG seed (hosts seed from the clock when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_english: PADDLE_ENGLISH,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            speed_direction: SpeedDirection::Fixed,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_floor_margin: OBSTACLE_FLOOR_MARGIN,

            obstacle_every: OBSTACLE_EVERY,
            ball_every: BALL_EVERY,

            seed: None,
        }
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl Settings {
    /// Default settings on a surface of the given size
    pub fn with_surface(width: f32, height: f32) -> Self {
        Self {
            surface_width: width,
            surface_height: height,
            ..Self::default()
        }
    }

    /// Parse settings from JSON (missing fields take defaults) and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from JSON onto a surface of fixed size, then validate.
    /// The surface size in the JSON (if any) is ignored.
    pub fn from_json_on_surface(json: &str, width: f32, height: f32) -> Result<Self, ConfigError> {
        let settings = Settings {
            surface_width: width,
            surface_height: height,
            ..serde_json::from_str::<Settings>(json)?
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every spawn range and clamp range is non-empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = (self.surface_width, self.surface_height);
        if !positive(w) || !positive(h) {
            return Err(ConfigError::EmptySurface {
                width: w,
                height: h,
            });
        }

        if !positive(self.paddle_width) || !positive(self.paddle_height) {
            return Err(ConfigError::InvalidValue("paddle size"));
        }
        if self.paddle_width > w || self.paddle_height > h {
            return Err(ConfigError::PaddleTooLarge {
                width: self.paddle_width,
                height: self.paddle_height,
                surface_width: w,
                surface_height: h,
            });
        }
        if !self.paddle_english.is_finite() {
            return Err(ConfigError::InvalidValue("paddle english"));
        }

        if !positive(self.ball_radius) {
            return Err(ConfigError::InvalidValue("ball radius"));
        }
        if self.ball_radius * 2.0 > w || self.ball_radius * 2.0 > h {
            return Err(ConfigError::BallTooLarge {
                radius: self.ball_radius,
                surface_width: w,
                surface_height: h,
            });
        }
        if !positive(self.ball_speed) {
            return Err(ConfigError::InvalidValue("ball speed"));
        }

        if !positive(self.obstacle_width) || !positive(self.obstacle_height) {
            return Err(ConfigError::InvalidValue("obstacle size"));
        }
        if !self.obstacle_floor_margin.is_finite() || self.obstacle_floor_margin < 0.0 {
            return Err(ConfigError::InvalidValue("obstacle floor margin"));
        }
        let area_height = h - self.obstacle_floor_margin;
        if self.obstacle_width > w || self.obstacle_height > h || area_height < 0.0 {
            return Err(ConfigError::ObstacleTooLarge {
                width: self.obstacle_width,
                height: self.obstacle_height,
                area_width: w,
                area_height,
            });
        }

        if self.obstacle_every == 0 {
            return Err(ConfigError::ZeroInterval("obstacle"));
        }
        if self.ball_every == 0 {
            return Err(ConfigError::ZeroInterval("ball"));
        }

        Ok(())
    }

    /// Paddle top edge; a ball whose lower edge passes it is in the paddle band
    pub fn paddle_top(&self) -> f32 {
        self.surface_height - self.paddle_height
    }

    /// Canvas attribute holding optional settings JSON
    #[allow(dead_code)]
    const DATA_ATTRIBUTE: &'static str = "data-settings";

    /// Load settings from the canvas `data-settings` attribute (WASM only).
    /// The canvas size always wins over any configured surface size.
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::HtmlCanvasElement) -> Self {
        let (width, height) = (canvas.width() as f32, canvas.height() as f32);
        if let Some(json) = canvas.get_attribute(Self::DATA_ATTRIBUTE) {
            match Self::from_json_on_surface(&json, width, height) {
                Ok(settings) => {
                    log::info!("Loaded settings from canvas attribute");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring canvas settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::with_surface(width, height)
    }
}
