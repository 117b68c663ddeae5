//! Render step: paints a [`GameState`] onto a [`Surface`]

use glam::Vec2;

use super::surface::{Color, Surface};
use crate::sim::GameState;

/// Score label font
pub const SCORE_FONT: &str = "20px Arial";
/// Score label baseline position
pub const SCORE_POS: Vec2 = Vec2::new(10.0, 20.0);

/// Draw one frame: paddle, balls, obstacles, then the score on top
pub fn render<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    let settings = &state.settings;
    surface.clear(Vec2::new(settings.surface_width, settings.surface_height));

    let paddle = &state.paddle;
    surface.fill_rect(
        Vec2::new(paddle.x, settings.paddle_top()),
        Vec2::new(paddle.width, paddle.height),
        Color::Paddle,
    );

    for ball in &state.balls {
        surface.fill_circle(ball.pos, ball.radius, Color::Ball);
    }

    for obstacle in &state.obstacles {
        surface.fill_rect(obstacle.pos, obstacle.size, Color::Obstacle);
    }

    surface.fill_text(
        &format!("Score: {}", state.score),
        SCORE_POS,
        SCORE_FONT,
        Color::Text,
    );
}
