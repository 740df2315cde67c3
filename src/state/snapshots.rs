use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::canvas::CanvasDimensions;
use crate::raster::ImageRef;

/// Shape geometries the shape tools can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Square,
    Ellipse,
    Circle,
    Polygon { sides: u32 },
}

/// Rectangle/ellipse/polygon drawn between two drag points
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeState {
    pub main: ShapeKind,
    /// Shape used when the drag is constrained, e.g. square for rectangle
    pub alternate: ShapeKind,
    pub constrained: bool,
    pub filled: bool,
    pub bordered: bool,
    pub start: Pos2,
    pub end: Pos2,
}

impl ShapeState {
    /// The geometry actually drawn
    pub fn active_shape(&self) -> ShapeKind {
        if self.constrained { self.alternate } else { self.main }
    }
}

/// How a tracer tool builds its path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceMode {
    /// Every pointer position
    Freehand,
    /// Start and current position only
    Line,
}

/// Pencil/line family
#[derive(Debug, Clone, PartialEq)]
pub struct TracerState {
    pub mode: TraceMode,
    pub points: Vec<Pos2>,
}

/// Spray paint: every dot the nozzle emitted
#[derive(Debug, Clone, PartialEq)]
pub struct AerosolState {
    /// One entry per emission tick
    pub emissions: Vec<Vec<Pos2>>,
    pub dot_size: f32,
}

impl AerosolState {
    pub fn dot_count(&self) -> usize {
        self.emissions.iter().map(Vec::len).sum()
    }
}

/// Full image drawn at the origin: pasted content, a loaded file or the
/// blank baseline of a new canvas
#[derive(Debug, Clone)]
pub struct DrawingState {
    pub image: ImageRef,
    /// Clear the whole surface before drawing
    pub replace: bool,
}

/// Canvas size change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeState {
    before: CanvasDimensions,
    after: CanvasDimensions,
}

impl ResizeState {
    pub fn new(before: CanvasDimensions, after: CanvasDimensions) -> Self {
        Self { before, after }
    }

    pub fn before(&self) -> CanvasDimensions {
        self.before
    }

    pub fn after(&self) -> CanvasDimensions {
        self.after
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontAttributes {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Default for FontAttributes {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_owned(),
            size: 16.0,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextState {
    pub anchor: Pos2,
    pub text: String,
    pub font: FontAttributes,
}
