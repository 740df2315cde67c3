mod snapshots;

use crate::color::{Color, ColorContext};

pub use snapshots::{
    AerosolState, DrawingState, FontAttributes, ResizeState, ShapeKind, ShapeState, TextState,
    TraceMode, TracerState,
};

/// Everything a command needs to redraw its operation. Never mutated once
/// a command owns it.
#[derive(Debug, Clone)]
pub struct ToolState {
    line_width: f32,
    primary: Color,
    secondary: Color,
    payload: StatePayload,
}

/// Tool-specific part of a [`ToolState`]
#[derive(Debug, Clone)]
pub enum StatePayload {
    Shape(ShapeState),
    Tracer(TracerState),
    Aerosol(AerosolState),
    Drawing(DrawingState),
    Resize(ResizeState),
    Text(TextState),
}

impl StatePayload {
    pub fn name(&self) -> &'static str {
        match self {
            StatePayload::Shape(_) => "shape",
            StatePayload::Tracer(_) => "tracer",
            StatePayload::Aerosol(_) => "aerosol",
            StatePayload::Drawing(_) => "drawing",
            StatePayload::Resize(_) => "resize",
            StatePayload::Text(_) => "text",
        }
    }
}

impl ToolState {
    /// Snapshot the tool's line width and the current colors together with
    /// the tool-specific payload
    pub fn capture(line_width: f32, colors: &ColorContext, payload: StatePayload) -> Self {
        Self {
            line_width,
            primary: colors.primary,
            secondary: colors.secondary,
            payload,
        }
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn primary(&self) -> Color {
        self.primary
    }

    pub fn secondary(&self) -> Color {
        self.secondary
    }

    pub fn payload(&self) -> &StatePayload {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    #[test]
    fn test_capture_copies_colors() {
        let mut colors = ColorContext::new(Color::rgba(10, 20, 30, 1.0), Color::WHITE);
        let state = ToolState::capture(
            4.0,
            &colors,
            StatePayload::Tracer(TracerState {
                mode: TraceMode::Freehand,
                points: vec![Pos2::ZERO],
            }),
        );

        colors.swap();
        assert_eq!(state.primary(), Color::rgba(10, 20, 30, 1.0));
        assert_eq!(state.secondary(), Color::WHITE);
        assert_eq!(state.line_width(), 4.0);
        assert_eq!(state.payload().name(), "tracer");
    }

    #[test]
    fn test_constrained_shape_uses_alternate() {
        let mut shape = ShapeState {
            main: ShapeKind::Rectangle,
            alternate: ShapeKind::Square,
            constrained: false,
            filled: true,
            bordered: true,
            start: Pos2::ZERO,
            end: Pos2::new(10.0, 20.0),
        };
        assert_eq!(shape.active_shape(), ShapeKind::Rectangle);
        shape.constrained = true;
        assert_eq!(shape.active_shape(), ShapeKind::Square);
    }
}
