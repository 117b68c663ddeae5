//! Rendering module
//!
//! Immediate-mode 2D drawing through the [`Surface`] trait.

pub mod draw;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use draw::render;
pub use surface::{Color, DrawCommand, RecordingSurface, Surface};
