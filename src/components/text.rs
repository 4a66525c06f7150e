//! Text component for wrapped, styled paragraphs

use crate::accessibility::AccessibilityRole;
use crate::component::Component;
use crate::context::{RenderContext, UseTheme};
use crate::event::EventHandler;
use crate::layout::{text_width, truncate, wrap_text, Rect};
use crate::render::Renderer;
use crate::style::Style;
use anyhow::Result;

/// Horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Role-based default styling, resolved against the theme at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRole {
    #[default]
    Body,
    Heading,
    Muted,
}

/// Text component
pub struct Text {
    content: String,
    role: TextRole,
    style: Option<Style>,
    align: TextAlign,
    wrap: bool,
    dirty: bool,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Text {
            content: content.into(),
            role: TextRole::Body,
            style: None,
            align: TextAlign::Start,
            wrap: true,
            dirty: true,
        }
    }

    pub fn heading(content: impl Into<String>) -> Self {
        Self::new(content).with_role(TextRole::Heading).with_wrap(false)
    }

    pub fn with_role(mut self, role: TextRole) -> Self {
        self.role = role;
        self
    }

    /// Explicit style, overriding the role's theme style
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Wrap onto multiple lines (default) or truncate to one
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.dirty = true;
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    /// Lines as laid out at `width`
    pub fn lines(&self, width: u16) -> Vec<String> {
        if self.content.is_empty() || width == 0 {
            return Vec::new();
        }
        if self.wrap {
            wrap_text(&self.content, width as usize)
        } else {
            vec![truncate(&self.content, width as usize)]
        }
    }

    /// Render only the rows `[skip, skip + bounds.height)` of the laid-out text
    pub fn render_window(
        &mut self,
        renderer: &mut Renderer,
        bounds: Rect,
        skip: usize,
        ctx: &RenderContext,
    ) -> Result<()> {
        let theme = self.use_theme(ctx);
        let style = self.style.unwrap_or_else(|| match self.role {
            TextRole::Body => theme.text_style(),
            TextRole::Heading => theme.heading_style(),
            TextRole::Muted => theme.muted_style(),
        });

        for (row, line) in self
            .lines(bounds.width)
            .iter()
            .skip(skip)
            .take(bounds.height as usize)
            .enumerate()
        {
            let slack = bounds.width.saturating_sub(text_width(line) as u16);
            let x = match self.align {
                TextAlign::Start => bounds.x,
                TextAlign::Center => bounds.x + slack / 2,
                TextAlign::End => bounds.x + slack,
            };
            renderer.draw_text(x, bounds.y + row as u16, line, &style)?;
        }

        self.dirty = false;
        Ok(())
    }
}

impl EventHandler for Text {}

impl Component for Text {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        self.render_window(renderer, bounds, 0, ctx)
    }

    fn min_size(&self) -> (u16, u16) {
        let widest = self.content.lines().map(text_width).max().unwrap_or(0);
        (widest as u16, self.content.lines().count() as u16)
    }

    fn preferred_height(&self, width: u16) -> u16 {
        self.lines(width).len() as u16
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn accessibility_role(&self) -> AccessibilityRole {
        match self.role {
            TextRole::Heading => AccessibilityRole::Heading { level: 2 },
            _ => AccessibilityRole::Text,
        }
    }

    fn name(&self) -> &str {
        "Text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    fn render(text: &mut Text, bounds: Rect) -> String {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();
        text.render(&mut renderer, bounds, &ctx).unwrap();
        renderer.output_text()
    }

    #[test]
    fn test_wraps_to_width() {
        let mut text = Text::new("one two three four");
        assert_eq!(text.preferred_height(9), 3);
        assert_eq!(render(&mut text, Rect::new(0, 0, 9, 5)), "one twothreefour");
        assert_eq!(text.lines(10), vec!["one two", "three four"]);
    }

    #[test]
    fn test_clips_to_bounds_height() {
        let mut text = Text::new("a b c d e f");
        assert_eq!(render(&mut text, Rect::new(0, 0, 1, 2)), "ab");
    }

    #[test]
    fn test_heading_truncates() {
        let text = Text::heading("A long heading");
        assert_eq!(text.lines(6), vec!["A lon…"]);
        assert_eq!(
            text.accessibility_role(),
            AccessibilityRole::Heading { level: 2 }
        );
    }

    #[test]
    fn test_window_skips_rows() {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();
        let mut text = Text::new("a b c");

        text.render_window(&mut renderer, Rect::new(0, 0, 1, 5), 1, &ctx)
            .unwrap();
        assert_eq!(renderer.output_text(), "bc");
    }

    #[test]
    fn test_empty_text_renders_nothing() {
        let mut text = Text::new("");
        assert_eq!(text.preferred_height(10), 0);
        assert_eq!(render(&mut text, Rect::new(0, 0, 10, 1)), "");
    }
}
