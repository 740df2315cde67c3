mod anchor;

use egui::{Pos2, Rect, Vec2};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::ColorContext;
use crate::command::Command;
use crate::state::{ResizeState, StatePayload, ToolState};

pub use anchor::{Anchor, AnchorSet};
use anchor::Edge;

pub const MIN_CANVAS_WIDTH: u32 = 250;
pub const MIN_CANVAS_HEIGHT: u32 = 250;

/// Pixel size of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasDimensions {
    pub width: u32,
    pub height: u32,
}

impl CanvasDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Per-axis floor, each axis clamped independently
    pub fn clamp_min(self, min: CanvasDimensions) -> Self {
        Self {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }

    /// Per-axis minimum of the two sizes
    pub fn overlap(self, other: CanvasDimensions) -> Self {
        Self {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
        }
    }

    /// Rectangle anchored at the origin
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(self.width as f32, self.height as f32))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for CanvasDimensions {
    fn default() -> Self {
        Self::new(MIN_CANVAS_WIDTH, MIN_CANVAS_HEIGHT)
    }
}

/// Drag in progress on one of the handles
#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    anchor: Anchor,
    fixed: Pos2,
    before: CanvasDimensions,
}

/// Owns the canvas size, the preview size shown while dragging, and the
/// eight resize handles derived from them.
#[derive(Debug, Clone)]
pub struct CanvasOperations {
    dimensions: CanvasDimensions,
    preview: CanvasDimensions,
    anchors: AnchorSet,
    min: CanvasDimensions,
    offset: f32,
    drag: Option<ActiveDrag>,
}

impl CanvasOperations {
    pub fn new(initial: CanvasDimensions, min: CanvasDimensions, offset: f32) -> Self {
        let dimensions = initial.clamp_min(min);
        Self {
            dimensions,
            preview: dimensions,
            anchors: AnchorSet::compute(dimensions, offset),
            min,
            offset,
            drag: None,
        }
    }

    pub fn dimensions(&self) -> CanvasDimensions {
        self.dimensions
    }

    pub fn preview_dimensions(&self) -> CanvasDimensions {
        self.preview
    }

    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    pub fn anchor(&self, anchor: Anchor) -> Pos2 {
        self.anchors.get(anchor)
    }

    pub fn min_dimensions(&self) -> CanvasDimensions {
        self.min
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Set the canvas size, clamp it to the minimum and re-derive every handle
    pub fn update_canvas_dimensions(&mut self, width: u32, height: u32) {
        self.preview = CanvasDimensions::new(width, height).clamp_min(self.min);
        self.anchors = AnchorSet::compute(self.preview, self.offset);
        self.dimensions = self.preview;
        debug!(
            "Canvas dimensions set to {}x{} (requested {}x{})",
            self.dimensions.width, self.dimensions.height, width, height
        );
    }

    pub fn begin_drag(&mut self, anchor: Anchor) {
        // An abandoned drag may have left a handle at the pointer
        self.anchors = AnchorSet::compute(self.dimensions, self.offset);
        self.drag = Some(ActiveDrag {
            anchor,
            fixed: self.anchors.get(anchor.opposite()),
            before: self.dimensions,
        });
        self.preview = self.dimensions;
    }

    /// Follow the pointer while a handle is dragged. Only the preview size
    /// changes; no command is produced.
    pub fn drag_move(&mut self, pointer: Pos2) {
        let Some(drag) = self.drag else {
            return;
        };
        self.preview = self.preview_for(drag, pointer);
        self.anchors.set(drag.anchor, pointer);
    }

    /// Finish the drag, commit the clamped size and produce the one resize
    /// command describing it.
    pub fn end_drag(&mut self, pointer: Pos2, line_width: f32, colors: &ColorContext) -> Option<Command> {
        let drag = self.drag.take()?;
        let preview = self.preview_for(drag, pointer);
        self.update_canvas_dimensions(preview.width, preview.height);

        let state = ToolState::capture(
            line_width,
            colors,
            StatePayload::Resize(ResizeState::new(drag.before, self.dimensions)),
        );
        debug!(
            "Resize drag on {} finished: {}x{} -> {}x{}",
            drag.anchor.as_str(),
            drag.before.width,
            drag.before.height,
            self.dimensions.width,
            self.dimensions.height
        );
        Some(Command::new(state))
    }

    fn preview_for(&self, drag: ActiveDrag, pointer: Pos2) -> CanvasDimensions {
        let span = 2.0 * self.offset;
        let width = match drag.anchor.horizontal() {
            Edge::Start => drag.fixed.x - pointer.x - span,
            Edge::End => pointer.x - drag.fixed.x - span,
            Edge::Center => self.preview.width as f32,
        };
        let height = match drag.anchor.vertical() {
            Edge::Start => drag.fixed.y - pointer.y - span,
            Edge::End => pointer.y - drag.fixed.y - span,
            Edge::Center => self.preview.height as f32,
        };
        CanvasDimensions::new(width.round().max(0.0) as u32, height.round().max(0.0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operations() -> CanvasOperations {
        CanvasOperations::new(
            CanvasDimensions::new(500, 500),
            CanvasDimensions::new(MIN_CANVAS_WIDTH, MIN_CANVAS_HEIGHT),
            0.0,
        )
    }

    #[test]
    fn test_update_derives_anchors() {
        let mut ops = operations();
        ops.update_canvas_dimensions(500, 500);
        assert_eq!(ops.anchor(Anchor::BottomRight), Pos2::new(500.0, 500.0));
        assert_eq!(ops.anchor(Anchor::BottomMiddle), Pos2::new(250.0, 500.0));
    }

    #[test]
    fn test_update_clamps_each_axis() {
        let mut ops = operations();
        ops.update_canvas_dimensions(200, 0);
        assert_eq!(ops.preview_dimensions().width, MIN_CANVAS_WIDTH);
        assert_eq!(ops.preview_dimensions().height, MIN_CANVAS_HEIGHT);

        ops.update_canvas_dimensions(900, 10);
        assert_eq!(ops.dimensions(), CanvasDimensions::new(900, MIN_CANVAS_HEIGHT));
    }

    #[test]
    fn test_drag_move_only_touches_preview() {
        let mut ops = operations();
        ops.begin_drag(Anchor::MiddleRight);
        ops.drag_move(Pos2::new(640.0, 100.0));

        assert_eq!(ops.preview_dimensions(), CanvasDimensions::new(640, 500));
        assert_eq!(ops.dimensions(), CanvasDimensions::new(500, 500));
        assert_eq!(ops.anchor(Anchor::MiddleRight), Pos2::new(640.0, 100.0));
    }

    #[test]
    fn test_drag_from_start_edge_uses_fixed_opposite() {
        let mut ops = operations();
        ops.begin_drag(Anchor::TopLeft);
        ops.drag_move(Pos2::new(-100.0, 50.0));
        assert_eq!(ops.preview_dimensions(), CanvasDimensions::new(600, 450));
    }

    #[test]
    fn test_end_drag_commits_and_emits_resize() {
        let mut ops = operations();
        let colors = ColorContext::default();
        ops.begin_drag(Anchor::BottomRight);
        ops.drag_move(Pos2::new(700.0, 650.0));
        let command = ops.end_drag(Pos2::new(720.0, 100.0), 1.0, &colors).expect("resize command");

        assert_eq!(ops.dimensions(), CanvasDimensions::new(720, MIN_CANVAS_HEIGHT));
        assert!(!ops.is_dragging());
        assert_eq!(ops.anchor(Anchor::BottomRight), Pos2::new(720.0, 250.0));

        let resize = command.resize_state().expect("resize payload");
        assert_eq!(resize.before(), CanvasDimensions::new(500, 500));
        assert_eq!(resize.after(), CanvasDimensions::new(720, MIN_CANVAS_HEIGHT));
    }

    #[test]
    fn test_restarted_drag_measures_from_committed_size() {
        let mut ops = operations();
        let colors = ColorContext::default();
        ops.begin_drag(Anchor::BottomRight);
        ops.drag_move(Pos2::new(900.0, 900.0));

        ops.begin_drag(Anchor::TopLeft);
        assert_eq!(ops.anchor(Anchor::BottomRight), Pos2::new(500.0, 500.0));
        let command = ops.end_drag(Pos2::new(0.0, 0.0), 1.0, &colors).expect("resize command");

        let resize = command.resize_state().expect("resize payload");
        assert_eq!(resize.before(), CanvasDimensions::new(500, 500));
        assert_eq!(resize.after(), CanvasDimensions::new(500, 500));
    }

    #[test]
    fn test_end_drag_without_begin_yields_nothing() {
        let mut ops = operations();
        let colors = ColorContext::default();
        assert!(ops.end_drag(Pos2::new(10.0, 10.0), 1.0, &colors).is_none());
        ops.drag_move(Pos2::new(10.0, 10.0));
        assert_eq!(ops.preview_dimensions(), CanvasDimensions::new(500, 500));
    }
}
