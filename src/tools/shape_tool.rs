use egui::Pos2;
use log::debug;

use crate::color::ColorContext;
use crate::command::Command;
use crate::state::{ShapeKind, ShapeState, StatePayload, ToolState};
use crate::tools::Tool;

/// Rectangle, ellipse and polygon tools. Holding the constraint switches
/// to the alternate shape (square, circle).
#[derive(Debug, Clone)]
pub struct ShapeTool {
    main: ShapeKind,
    alternate: ShapeKind,
    filled: bool,
    bordered: bool,
    constrained: bool,
    line_width: f32,
    start: Option<Pos2>,
}

impl ShapeTool {
    pub fn new(main: ShapeKind, alternate: ShapeKind, line_width: f32) -> Self {
        Self {
            main,
            alternate,
            filled: false,
            bordered: true,
            constrained: false,
            line_width,
            start: None,
        }
    }

    pub fn rectangle(line_width: f32) -> Self {
        Self::new(ShapeKind::Rectangle, ShapeKind::Square, line_width)
    }

    pub fn ellipse(line_width: f32) -> Self {
        Self::new(ShapeKind::Ellipse, ShapeKind::Circle, line_width)
    }

    pub fn polygon(sides: u32, line_width: f32) -> Self {
        let kind = ShapeKind::Polygon { sides };
        Self::new(kind, kind, line_width)
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    pub fn set_bordered(&mut self, bordered: bool) {
        self.bordered = bordered;
    }

    pub fn set_constrained(&mut self, constrained: bool) {
        self.constrained = constrained;
    }
}

impl Tool for ShapeTool {
    fn name(&self) -> &'static str {
        match self.main {
            ShapeKind::Rectangle | ShapeKind::Square => "Rectangle",
            ShapeKind::Ellipse | ShapeKind::Circle => "Ellipse",
            ShapeKind::Polygon { .. } => "Polygon",
        }
    }

    fn deactivate(&mut self) {
        self.start = None;
    }

    fn line_width(&self) -> f32 {
        self.line_width
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn on_pointer_down(&mut self, pos: Pos2, _colors: &ColorContext) -> Option<Command> {
        self.start = Some(pos);
        None
    }

    fn on_pointer_move(&mut self, _pos: Pos2, _colors: &ColorContext) -> Option<Command> {
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, colors: &ColorContext) -> Option<Command> {
        let start = self.start.take()?;
        if start == pos {
            debug!("Ignoring zero-size {}", self.name());
            return None;
        }
        if !self.filled && !self.bordered {
            return None;
        }

        let state = ToolState::capture(
            self.line_width,
            colors,
            StatePayload::Shape(ShapeState {
                main: self.main,
                alternate: self.alternate,
                constrained: self.constrained,
                filled: self.filled,
                bordered: self.bordered,
                start,
                end: pos,
            }),
        );
        Some(Command::new(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_produces_shape_command() {
        let colors = ColorContext::default();
        let mut tool = ShapeTool::rectangle(2.0);
        tool.set_filled(true);
        tool.set_constrained(true);
        tool.on_pointer_down(Pos2::new(1.0, 1.0), &colors);
        let command = tool.on_pointer_up(Pos2::new(40.0, 30.0), &colors).unwrap();

        let StatePayload::Shape(shape) = command.state().payload() else {
            panic!("expected a shape payload");
        };
        assert_eq!(shape.active_shape(), ShapeKind::Square);
        assert!(shape.filled && shape.bordered);
        assert_eq!(shape.end, Pos2::new(40.0, 30.0));
    }

    #[test]
    fn test_click_without_drag_is_ignored() {
        let colors = ColorContext::default();
        let mut tool = ShapeTool::ellipse(1.0);
        tool.on_pointer_down(Pos2::new(5.0, 5.0), &colors);
        assert!(tool.on_pointer_up(Pos2::new(5.0, 5.0), &colors).is_none());
    }

    #[test]
    fn test_invisible_shape_is_ignored() {
        let colors = ColorContext::default();
        let mut tool = ShapeTool::polygon(6, 1.0);
        tool.set_bordered(false);
        tool.on_pointer_down(Pos2::ZERO, &colors);
        assert!(tool.on_pointer_up(Pos2::new(5.0, 5.0), &colors).is_none());
    }
}
