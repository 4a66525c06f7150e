//! Single-glyph icons with an optional rotation

use crate::layout::Rect;
use crate::render::Renderer;
use crate::style::Style;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Plus,
    Minus,
    Check,
    Cross,
    Dot,
}

/// Rotation applied to an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Half,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    pub kind: IconKind,
    pub rotation: Rotation,
}

impl Icon {
    pub fn new(kind: IconKind) -> Self {
        Icon {
            kind,
            rotation: Rotation::None,
        }
    }

    pub fn rotated(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Glyph drawn for the icon. Every kind is symmetric under a half
    /// turn, so rotation never changes the cell.
    pub fn glyph(&self) -> char {
        match self.kind {
            IconKind::Plus => '+',
            IconKind::Minus => '−',
            IconKind::Check => '✓',
            IconKind::Cross => '✗',
            IconKind::Dot => '•',
        }
    }

    /// Draw at the top-left cell of `bounds`
    pub fn draw(&self, renderer: &mut Renderer, bounds: Rect, style: &Style) -> Result<()> {
        if bounds.is_empty() {
            return Ok(());
        }
        renderer.draw_text(bounds.x, bounds.y, &self.glyph().to_string(), style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_turn_keeps_symmetric_glyphs() {
        assert_eq!(Icon::new(IconKind::Minus).rotated(Rotation::Half).glyph(), '−');
        assert_eq!(Icon::new(IconKind::Plus).glyph(), '+');
    }

    #[test]
    fn test_draws_glyph_at_origin() {
        let mut renderer = Renderer::headless();
        Icon::new(IconKind::Check)
            .draw(&mut renderer, Rect::new(2, 1, 3, 1), &Style::default())
            .unwrap();
        Icon::new(IconKind::Cross)
            .draw(&mut renderer, Rect::new(0, 0, 0, 0), &Style::default())
            .unwrap();
        assert_eq!(renderer.output_text(), "✓");
    }
}
