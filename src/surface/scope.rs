use std::ops::{Deref, DerefMut};

use super::DrawingSurface;

/// Saves the surface style on creation and restores it when dropped, so a
/// command leaves stroke/fill/line width as it found them on every exit path.
pub struct StyleScope<'a> {
    surface: &'a mut (dyn DrawingSurface + 'a),
}

impl<'a> StyleScope<'a> {
    pub fn new(surface: &'a mut (dyn DrawingSurface + 'a)) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<'a> Deref for StyleScope<'a> {
    type Target = dyn DrawingSurface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'a> DerefMut for StyleScope<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for StyleScope<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasDimensions;
    use crate::color::Color;
    use crate::surface::MemorySurface;

    fn paint_red(surface: &mut dyn DrawingSurface, bail_early: bool) -> bool {
        let mut scoped = StyleScope::new(surface);
        scoped.set_stroke_style(Color::rgba(255, 0, 0, 1.0));
        if bail_early {
            return false;
        }
        scoped.set_line_width(8.0);
        true
    }

    #[test]
    fn test_style_restored_after_scope() {
        let mut surface = MemorySurface::new(CanvasDimensions::new(10, 10));
        let before = surface.style();
        assert!(paint_red(&mut surface, false));
        assert_eq!(surface.style(), before);
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_style_restored_on_early_return() {
        let mut surface = MemorySurface::new(CanvasDimensions::new(10, 10));
        let before = surface.style();
        assert!(!paint_red(&mut surface, true));
        assert_eq!(surface.style(), before);
        assert_eq!(surface.save_depth(), 0);
    }
}
