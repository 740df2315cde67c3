use std::sync::Arc;

use egui::Rect;
use futures::future::{self, LocalBoxFuture};
use image::{Rgba, RgbaImage};
use log::warn;
use uuid::Uuid;

use crate::canvas::CanvasDimensions;
use crate::surface::DrawingSurface;

/// Immutable raster shared between commands and the surface
#[derive(Clone)]
pub struct CanvasImage {
    id: Uuid,
    pixels: RgbaImage,
}

// Custom Debug so pixel buffers don't end up in logs
impl std::fmt::Debug for CanvasImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasImage")
            .field("id", &self.id)
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

pub type ImageRef = Arc<CanvasImage>;

impl CanvasImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            id: Uuid::new_v4(),
            pixels,
        }
    }

    pub fn new_ref(pixels: RgbaImage) -> ImageRef {
        Arc::new(Self::new(pixels))
    }

    /// Solid image, used for the blank baseline of a fresh canvas
    pub fn filled(dimensions: CanvasDimensions, color: Rgba<u8>) -> ImageRef {
        Self::new_ref(RgbaImage::from_pixel(dimensions.width, dimensions.height, color))
    }

    /// Placeholder for an image whose data never arrived
    pub fn unloaded() -> ImageRef {
        Self::new_ref(RgbaImage::new(0, 0))
    }

    pub fn decode(bytes: &[u8]) -> Result<ImageRef, image::ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::new_ref(decoded.to_rgba8()))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn dimensions(&self) -> CanvasDimensions {
        CanvasDimensions::new(self.pixels.width(), self.pixels.height())
    }

    pub fn is_loaded(&self) -> bool {
        !self.dimensions().is_empty()
    }
}

/// Produces an image snapshot of a surface region. May complete later, the
/// way an image element finishes decoding.
pub trait ImageSource {
    fn capture(&self, surface: &dyn DrawingSurface, region: Rect) -> LocalBoxFuture<'static, Option<ImageRef>>;
}

/// Crops the surface raster directly
#[derive(Debug, Default, Clone, Copy)]
pub struct SurfaceImageSource;

impl ImageSource for SurfaceImageSource {
    fn capture(&self, surface: &dyn DrawingSurface, region: Rect) -> LocalBoxFuture<'static, Option<ImageRef>> {
        let captured = surface.export(region).map(CanvasImage::new_ref);
        if captured.is_none() {
            warn!("Nothing to capture in region {:?}", region);
        }
        Box::pin(future::ready(captured))
    }
}
