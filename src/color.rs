use egui::Color32;
use serde::{Deserialize, Serialize};

/// RGBA color as the editor's pickers expose it: 0-255 channels and an
/// alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 1.0);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 1.0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha as a byte, clamped to [0, 255]
    pub fn alpha_byte(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// `RRGGBBAA` in upper-case hex
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.alpha_byte())
    }

    pub fn to_color32(&self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.alpha_byte())
    }

    pub fn to_rgba8(&self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.alpha_byte()])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// The two colors every tool reads when it snapshots its state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorContext {
    pub primary: Color,
    pub secondary: Color,
}

impl ColorContext {
    pub fn new(primary: Color, secondary: Color) -> Self {
        Self { primary, secondary }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.primary, &mut self.secondary);
    }
}

impl Default for ColorContext {
    fn default() -> Self {
        Self::new(Color::BLACK, Color::WHITE)
    }
}
