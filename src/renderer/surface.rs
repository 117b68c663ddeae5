//! Drawing surface abstraction
//!
//! The four primitives the game needs from a 2D canvas. Hosts implement
//! [`Surface`]; [`RecordingSurface`] keeps the commands in memory for
//! headless runs and tests.

use glam::Vec2;

/// Fill colors used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Paddle,
    Ball,
    Obstacle,
    Text,
}

impl Color {
    /// CSS color string
    pub fn as_css(&self) -> &'static str {
        match self {
            Color::Paddle => "blue",
            Color::Ball => "red",
            Color::Obstacle => "green",
            Color::Text => "black",
        }
    }
}

/// A 2D drawing target
pub trait Surface {
    /// Erase everything in the `size` rectangle at the origin
    fn clear(&mut self, size: Vec2);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Draw text with its baseline starting at `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: Color);
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { size: Vec2 },
    Rect { pos: Vec2, size: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Text { text: String, pos: Vec2, font: String, color: Color },
}

/// Surface that remembers the last frame instead of drawing it
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    /// Number of `clear` calls seen, i.e. frames started
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of one color in the current frame
    pub fn count(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| match c {
                DrawCommand::Rect { color: c, .. }
                | DrawCommand::Circle { color: c, .. }
                | DrawCommand::Text { color: c, .. } => *c == color,
                DrawCommand::Clear { .. } => false,
            })
            .count()
    }

    /// Text drawn in the current frame
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, size: Vec2) {
        // Clearing starts a new frame; keep memory bounded to one frame
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { size });
        self.frames += 1;
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect { pos, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            font: font.to_string(),
            color,
        });
    }
}
