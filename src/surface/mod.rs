mod memory;
mod scope;

use egui::{Pos2, Rect};
use image::RgbaImage;

use crate::canvas::CanvasDimensions;
use crate::color::Color;
use crate::raster::CanvasImage;
use crate::state::{FontAttributes, ShapeKind};

pub use memory::{MemorySurface, SurfaceJournal, SurfaceOp};
pub use scope::StyleScope;

/// Style state covered by `save`/`restore`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStyle {
    pub stroke: Color,
    pub fill: Color,
    pub line_width: f32,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            stroke: Color::BLACK,
            fill: Color::BLACK,
            line_width: 1.0,
        }
    }
}

/// Which part of a shape to paint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapePaint {
    Fill,
    Border,
}

/// The 2D raster every command draws onto.
///
/// Geometry, text layout and stroking are the implementor's business;
/// commands only decide what to draw, in which order and with which style.
pub trait DrawingSurface {
    fn dimensions(&self) -> CanvasDimensions;

    /// Change the raster size. Like an HTML canvas, this discards content.
    fn resize(&mut self, dimensions: CanvasDimensions);

    fn clear(&mut self, region: Rect);

    /// Composite `image` with its top-left corner at `at`
    fn draw_image(&mut self, image: &CanvasImage, at: Pos2);

    fn style(&self) -> SurfaceStyle;

    fn set_stroke_style(&mut self, color: Color);

    fn set_fill_style(&mut self, color: Color);

    fn set_line_width(&mut self, width: f32);

    /// Push the current style
    fn save(&mut self);

    /// Pop the last pushed style. Unbalanced calls are ignored.
    fn restore(&mut self);

    fn stroke_path(&mut self, points: &[Pos2]);

    fn draw_shape(&mut self, kind: ShapeKind, start: Pos2, end: Pos2, paint: ShapePaint);

    fn fill_dot(&mut self, center: Pos2, size: f32);

    fn fill_text(&mut self, text: &str, anchor: Pos2, font: &FontAttributes);

    /// Copy of the pixels in `region`, or `None` when the region misses the raster
    fn export(&self, region: Rect) -> Option<RgbaImage>;
}
