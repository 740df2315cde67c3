use std::sync::Arc;

use egui::{Pos2, Rect};
use image::{imageops, Rgba, RgbaImage};
use log::warn;
use parking_lot::Mutex;
use uuid::Uuid;

use super::{DrawingSurface, ShapePaint, SurfaceStyle};
use crate::canvas::CanvasDimensions;
use crate::color::Color;
use crate::raster::CanvasImage;
use crate::state::{FontAttributes, ShapeKind};

/// One call made against a [`MemorySurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Resize(CanvasDimensions),
    Clear(Rect),
    DrawImage { image: Uuid, at: Pos2 },
    StrokePath { points: Vec<Pos2>, style: SurfaceStyle },
    Shape { kind: ShapeKind, start: Pos2, end: Pos2, paint: ShapePaint, style: SurfaceStyle },
    Dot { center: Pos2, size: f32, color: Color },
    Text { text: String, anchor: Pos2, font: FontAttributes, color: Color },
}

/// Shared, cloneable view of everything drawn on a [`MemorySurface`]
#[derive(Debug, Clone, Default)]
pub struct SurfaceJournal {
    ops: Arc<Mutex<Vec<SurfaceOp>>>,
}

impl SurfaceJournal {
    fn record(&self, op: SurfaceOp) {
        self.ops.lock().push(op);
    }

    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.ops.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().is_empty()
    }

    pub fn clear(&self) {
        self.ops.lock().clear();
    }

    /// Every stroked path, in drawing order
    pub fn stroked_paths(&self) -> Vec<Vec<Pos2>> {
        self.ops
            .lock()
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::StrokePath { points, .. } => Some(points.clone()),
                _ => None,
            })
            .collect()
    }
}

/// In-memory raster surface. Images and clears touch real pixels; vector
/// operations are journaled only.
pub struct MemorySurface {
    raster: RgbaImage,
    style: SurfaceStyle,
    saved: Vec<SurfaceStyle>,
    journal: SurfaceJournal,
}

impl std::fmt::Debug for MemorySurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySurface")
            .field("width", &self.raster.width())
            .field("height", &self.raster.height())
            .field("style", &self.style)
            .field("saved", &self.saved.len())
            .field("ops", &self.journal.len())
            .finish()
    }
}

impl MemorySurface {
    pub fn new(dimensions: CanvasDimensions) -> Self {
        Self {
            raster: RgbaImage::new(dimensions.width, dimensions.height),
            style: SurfaceStyle::default(),
            saved: Vec::new(),
            journal: SurfaceJournal::default(),
        }
    }

    pub fn journal(&self) -> SurfaceJournal {
        self.journal.clone()
    }

    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.raster.get_pixel_checked(x, y).copied()
    }

    /// Number of styles pushed and not yet restored
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Clip `region` to the raster, as (x, y, width, height)
    fn clip(&self, region: Rect) -> Option<(u32, u32, u32, u32)> {
        let max_x = self.raster.width() as f32;
        let max_y = self.raster.height() as f32;
        let min_x = region.min.x.floor().clamp(0.0, max_x) as u32;
        let min_y = region.min.y.floor().clamp(0.0, max_y) as u32;
        let end_x = region.max.x.ceil().clamp(0.0, max_x) as u32;
        let end_y = region.max.y.ceil().clamp(0.0, max_y) as u32;
        let width = end_x.saturating_sub(min_x);
        let height = end_y.saturating_sub(min_y);
        if width == 0 || height == 0 {
            None
        } else {
            Some((min_x, min_y, width, height))
        }
    }
}

impl DrawingSurface for MemorySurface {
    fn dimensions(&self) -> CanvasDimensions {
        CanvasDimensions::new(self.raster.width(), self.raster.height())
    }

    fn resize(&mut self, dimensions: CanvasDimensions) {
        self.raster = RgbaImage::new(dimensions.width, dimensions.height);
        self.journal.record(SurfaceOp::Resize(dimensions));
    }

    fn clear(&mut self, region: Rect) {
        if let Some((x, y, width, height)) = self.clip(region) {
            let blank = RgbaImage::new(width, height);
            imageops::replace(&mut self.raster, &blank, x as i64, y as i64);
        }
        self.journal.record(SurfaceOp::Clear(region));
    }

    fn draw_image(&mut self, image: &CanvasImage, at: Pos2) {
        if !image.is_loaded() {
            warn!("Skipping draw of unloaded image {}", image.id());
            return;
        }
        imageops::overlay(&mut self.raster, image.pixels(), at.x.round() as i64, at.y.round() as i64);
        self.journal.record(SurfaceOp::DrawImage { image: image.id(), at });
    }

    fn style(&self) -> SurfaceStyle {
        self.style
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.style.stroke = color;
    }

    fn set_fill_style(&mut self, color: Color) {
        self.style.fill = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.style.line_width = width;
    }

    fn save(&mut self) {
        self.saved.push(self.style);
    }

    fn restore(&mut self) {
        if let Some(style) = self.saved.pop() {
            self.style = style;
        }
    }

    fn stroke_path(&mut self, points: &[Pos2]) {
        self.journal.record(SurfaceOp::StrokePath {
            points: points.to_vec(),
            style: self.style,
        });
    }

    fn draw_shape(&mut self, kind: ShapeKind, start: Pos2, end: Pos2, paint: ShapePaint) {
        self.journal.record(SurfaceOp::Shape {
            kind,
            start,
            end,
            paint,
            style: self.style,
        });
    }

    fn fill_dot(&mut self, center: Pos2, size: f32) {
        self.journal.record(SurfaceOp::Dot {
            center,
            size,
            color: self.style.fill,
        });
    }

    fn fill_text(&mut self, text: &str, anchor: Pos2, font: &FontAttributes) {
        self.journal.record(SurfaceOp::Text {
            text: text.to_owned(),
            anchor,
            font: font.clone(),
            color: self.style.fill,
        });
    }

    fn export(&self, region: Rect) -> Option<RgbaImage> {
        let (x, y, width, height) = self.clip(region)?;
        Some(imageops::crop_imm(&self.raster, x, y, width, height).to_image())
    }
}
