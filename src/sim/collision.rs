//! Collision detection and response for axis-aligned geometry
//!
//! Balls are circles, everything else is an axis-aligned rectangle. The
//! overlap test treats the ball as a box of half-size `radius`, so corners
//! count as hits a little early.

use glam::Vec2;

use super::state::{Ball, Obstacle, Paddle};

/// Axis along which a velocity is reflected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Negate the x component (side hit)
    Horizontal,
    /// Negate the y component (top/bottom hit)
    Vertical,
}

impl Axis {
    /// Mirror a velocity across this axis
    pub fn reflect(self, vel: Vec2) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::new(-vel.x, vel.y),
            Axis::Vertical => Vec2::new(vel.x, -vel.y),
        }
    }
}

/// Ball pokes past the left or right edge of a surface `width` wide
pub fn hits_side_wall(ball: &Ball, width: f32) -> bool {
    ball.pos.x + ball.radius > width || ball.pos.x - ball.radius < 0.0
}

/// Ball pokes past the top edge
pub fn hits_ceiling(ball: &Ball) -> bool {
    ball.top() < 0.0
}

/// Strict overlap between a ball's bounding box and a rectangle
pub fn ball_rect_overlap(pos: Vec2, radius: f32, rect_pos: Vec2, rect_size: Vec2) -> bool {
    pos.y + radius > rect_pos.y
        && pos.y - radius < rect_pos.y + rect_size.y
        && pos.x + radius > rect_pos.x
        && pos.x - radius < rect_pos.x + rect_size.x
}

/// Check a ball against an obstacle
///
/// Returns the reflection axis on overlap: whichever offset from the
/// obstacle's center is larger decides the side that was hit. Ties go to
/// the vertical axis.
pub fn ball_obstacle_collision(ball: &Ball, obstacle: &Obstacle) -> Option<Axis> {
    if !ball_rect_overlap(ball.pos, ball.radius, obstacle.pos, obstacle.size) {
        return None;
    }

    let offset = ball.pos - obstacle.center();
    if offset.x.abs() > offset.y.abs() {
        Some(Axis::Horizontal)
    } else {
        Some(Axis::Vertical)
    }
}

/// Horizontal speed change for a paddle hit at `ball_x`
///
/// Normalized offset from the paddle center (-1 at the left tip, +1 at the
/// right tip) scaled by `english`.
pub fn paddle_english(ball_x: f32, paddle: &Paddle, english: f32) -> f32 {
    let hit_position = (ball_x - paddle.center_x()) / (paddle.width / 2.0);
    hit_position * english
}
