use egui::Pos2;

use crate::color::ColorContext;
use crate::command::Command;
use crate::state::{FontAttributes, StatePayload, TextState, ToolState};
use crate::tools::Tool;

/// Places text: a click picks the anchor, the text arrives once the user
/// confirms it.
#[derive(Debug, Clone)]
pub struct TextTool {
    font: FontAttributes,
    line_width: f32,
    anchor: Option<Pos2>,
}

impl TextTool {
    pub fn new(font: FontAttributes) -> Self {
        Self {
            font,
            line_width: 1.0,
            anchor: None,
        }
    }

    pub fn font(&self) -> &FontAttributes {
        &self.font
    }

    pub fn set_font(&mut self, font: FontAttributes) {
        self.font = font;
    }

    pub fn anchor(&self) -> Option<Pos2> {
        self.anchor
    }

    /// Turn the confirmed text into a command. Empty text is dropped.
    pub fn commit(&mut self, text: &str, colors: &ColorContext) -> Option<Command> {
        let anchor = self.anchor.take()?;
        if text.is_empty() {
            return None;
        }
        let state = ToolState::capture(
            self.line_width,
            colors,
            StatePayload::Text(TextState {
                anchor,
                text: text.to_owned(),
                font: self.font.clone(),
            }),
        );
        Some(Command::new(state))
    }
}

impl Default for TextTool {
    fn default() -> Self {
        Self::new(FontAttributes::default())
    }
}

impl Tool for TextTool {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn deactivate(&mut self) {
        self.anchor = None;
    }

    fn line_width(&self) -> f32 {
        self.line_width
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn on_pointer_down(&mut self, _pos: Pos2, _colors: &ColorContext) -> Option<Command> {
        None
    }

    fn on_pointer_move(&mut self, _pos: Pos2, _colors: &ColorContext) -> Option<Command> {
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, _colors: &ColorContext) -> Option<Command> {
        self.anchor = Some(pos);
        None
    }
}
