//! Button - a bracketed label that can be clicked when enabled

use crate::accessibility::AccessibilityRole;
use crate::component::Component;
use crate::context::{RenderContext, UseTheme};
use crate::event::{Event, EventHandler};
use crate::layout::{text_width, Rect};
use crate::render::Renderer;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
}

pub struct Button {
    label: String,
    variant: ButtonVariant,
    enabled: bool,
    last_bounds: Rect,
    dirty: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Button {
            label: label.into(),
            variant: ButtonVariant::Primary,
            enabled: true,
            last_bounds: Rect::default(),
            dirty: true,
        }
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn variant(&self) -> ButtonVariant {
        self.variant
    }

    pub fn set_variant(&mut self, variant: ButtonVariant) {
        if variant != self.variant {
            self.variant = variant;
            self.dirty = true;
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        if label != self.label {
            self.label = label;
            self.dirty = true;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled != self.enabled {
            self.enabled = enabled;
            self.dirty = true;
        }
    }

    /// Cells the rendered button covers
    pub fn width(&self) -> u16 {
        text_width(&self.label) as u16 + 4
    }

    /// Area drawn on the last render
    pub fn bounds(&self) -> Rect {
        self.last_bounds
    }

    /// True for a click on an enabled button
    pub fn is_pressed_by(&self, event: &Event) -> bool {
        self.enabled && event.is_click_in(self.last_bounds)
    }
}

impl EventHandler for Button {
    fn handle_event(&mut self, event: &Event) -> bool {
        self.is_pressed_by(event)
    }
}

impl Component for Button {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let theme = self.use_theme(ctx);
        let width = self.width().min(bounds.width);
        self.last_bounds = Rect::new(bounds.x, bounds.y, width, bounds.height.min(1));
        if self.last_bounds.is_empty() {
            return Ok(());
        }

        let style = if !self.enabled {
            theme.muted_style()
        } else {
            match self.variant {
                ButtonVariant::Primary => theme.accent_style().bold(true),
                ButtonVariant::Secondary => theme.text_style(),
            }
        };
        let style = if self.enabled && ctx.focused {
            style.reverse(true)
        } else {
            style
        };

        let text = crate::render::fit_to_width(&format!("[ {} ]", self.label), width as usize);
        renderer.draw_text(bounds.x, bounds.y, &text, &style)?;

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (self.width(), 1)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn focusable(&self) -> bool {
        self.enabled
    }

    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::Button
    }

    fn name(&self) -> &str {
        "Button"
    }
}
