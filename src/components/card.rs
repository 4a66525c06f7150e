//! Card - bordered frame that widgets draw their content inside

use crate::context::RenderContext;
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Bordered container frame
///
/// A card only draws chrome; the widget that owns it renders into the inner
/// rectangle returned by [`Card::draw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    padding_x: u16,
}

impl Card {
    pub fn new() -> Self {
        Card { padding_x: 1 }
    }

    /// Horizontal padding between border and content
    pub fn with_padding(mut self, padding_x: u16) -> Self {
        self.padding_x = padding_x;
        self
    }

    /// Columns taken by border and padding
    pub fn chrome_width(&self) -> u16 {
        2 + self.padding_x * 2
    }

    /// Rows taken by the border
    pub fn chrome_height(&self) -> u16 {
        2
    }

    /// Content area for a given outer rectangle
    pub fn inner(&self, bounds: Rect) -> Rect {
        Rect::new(
            bounds.x.saturating_add(1 + self.padding_x),
            bounds.y.saturating_add(1),
            bounds.width.saturating_sub(self.chrome_width()),
            bounds.height.saturating_sub(self.chrome_height()),
        )
    }

    /// Draw the border and blank the interior; returns the content area
    pub fn draw(&self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<Rect> {
        if bounds.width < 2 || bounds.height < 2 {
            return Ok(self.inner(bounds));
        }

        let chars = ctx.theme.border_chars();
        let style = ctx.theme.frame_style(ctx.focused);
        let span = (bounds.width - 2) as usize;
        let horizontal = chars.horizontal.to_string().repeat(span);

        renderer.draw_text(
            bounds.x,
            bounds.y,
            &format!("{}{}{}", chars.top_left, horizontal, chars.top_right),
            &style,
        )?;

        let vertical = chars.vertical.to_string();
        let blank = " ".repeat(span);
        for row in bounds.y + 1..bounds.bottom() - 1 {
            renderer.draw_text(bounds.x, row, &vertical, &style)?;
            renderer.write_text(&blank)?;
            renderer.write_styled(&vertical, &style)?;
        }

        renderer.draw_text(
            bounds.x,
            bounds.bottom() - 1,
            &format!("{}{}{}", chars.bottom_left, horizontal, chars.bottom_right),
            &style,
        )?;

        Ok(self.inner(bounds))
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn test_inner_area() {
        let card = Card::new();
        assert_eq!(card.inner(Rect::new(0, 0, 20, 5)), Rect::new(2, 1, 16, 3));
        assert_eq!(card.chrome_width(), 4);
    }

    #[test]
    fn test_draws_rounded_frame() {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();

        let inner = Card::new()
            .draw(&mut renderer, Rect::new(0, 0, 6, 3), &ctx)
            .unwrap();

        assert_eq!(inner, Rect::new(2, 1, 2, 1));
        assert_eq!(renderer.output_text(), "╭────╮│    │╰────╯");
    }

    #[test]
    fn test_tiny_bounds_draw_nothing() {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();

        Card::new()
            .draw(&mut renderer, Rect::new(0, 0, 1, 1), &ctx)
            .unwrap();
        assert!(renderer.output().is_empty());
    }
}
