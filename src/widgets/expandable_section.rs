//! Expandable section - a header that discloses a block of content
//!
//! The body stays laid out at all times. Its visible height moves between
//! zero and [`MAX_EXPANDED_ROWS`]; content taller than that is clipped.

use crate::accessibility::AccessibilityRole;
use crate::component::Component;
use crate::components::{Card, Icon, IconKind, Image, Rotation, Text};
use crate::context::{RenderContext, UseAccessibility, UseTheme};
use crate::event::{Event, EventHandler};
use crate::layout::{truncate, Rect};
use crate::render::Renderer;
use anyhow::Result;

/// Cap on the body's visible height, in rows
pub const MAX_EXPANDED_ROWS: u16 = 12;

/// Rows the body grows or shrinks by per tick
const TRANSITION_STEP: u16 = 3;

/// Header thumbnail size when an image is configured (cols, rows)
const THUMBNAIL: (u16, u16) = (6, 2);

/// Disclosure state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpansionState {
    expanded: bool,
}

impl ExpansionState {
    pub fn new() -> Self {
        ExpansionState { expanded: false }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Flip the state; returns the new value
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }
}

/// Icon shown in the header for a disclosure state
pub fn toggle_icon(expanded: bool) -> Icon {
    if expanded {
        Icon::new(IconKind::Minus).rotated(Rotation::Half)
    } else {
        Icon::new(IconKind::Plus)
    }
}

/// Row limit moving toward a target a fixed step at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightTransition {
    current: u16,
    target: u16,
}

impl HeightTransition {
    pub fn new(rows: u16) -> Self {
        HeightTransition {
            current: rows,
            target: rows,
        }
    }

    pub fn current(&self) -> u16 {
        self.current
    }

    pub fn target(&self) -> u16 {
        self.target
    }

    pub fn set_target(&mut self, target: u16) {
        self.target = target;
    }

    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }

    /// Jump to the target
    pub fn snap(&mut self) -> bool {
        let moved = self.is_animating();
        self.current = self.target;
        moved
    }

    /// Advance one step; returns true if the height changed
    pub fn tick(&mut self) -> bool {
        if self.current < self.target {
            self.current = (self.current + TRANSITION_STEP).min(self.target);
            true
        } else if self.current > self.target {
            self.current = self.current.saturating_sub(TRANSITION_STEP).max(self.target);
            true
        } else {
            false
        }
    }
}

/// Collapsible section with a clickable header
pub struct ExpandableSection {
    title: String,
    content: Text,
    image: Option<Image>,
    state: ExpansionState,
    transition: HeightTransition,
    card: Card,
    header: Rect,
    focused: bool,
    dirty: bool,
}

impl ExpandableSection {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        ExpandableSection {
            title: title.into(),
            content: Text::new(content),
            image: None,
            state: ExpansionState::new(),
            transition: HeightTransition::new(0),
            card: Card::new(),
            header: Rect::default(),
            focused: false,
            dirty: true,
        }
    }

    /// Show an image reference in the header
    pub fn with_image(self, reference: impl Into<String>) -> Self {
        self.with_image_component(Image::new(reference))
    }

    pub fn with_image_component(mut self, image: Image) -> Self {
        self.image = Some(image);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded()
    }

    /// Icon for the current state
    pub fn icon(&self) -> Icon {
        toggle_icon(self.state.is_expanded())
    }

    pub fn transition(&self) -> &HeightTransition {
        &self.transition
    }

    /// Header hit area from the last render
    pub fn header_area(&self) -> Rect {
        self.header
    }

    pub fn toggle(&mut self) {
        let expanded = self.state.toggle();
        self.transition
            .set_target(if expanded { MAX_EXPANDED_ROWS } else { 0 });
        tracing::debug!(title = %self.title, expanded, "section toggled");
        self.dirty = true;
    }

    /// True if the content is taller than the expanded body at `width`
    pub fn is_clipped(&self, width: u16) -> bool {
        self.content_rows(width) > MAX_EXPANDED_ROWS
    }

    fn content_width(&self, width: u16) -> u16 {
        width.saturating_sub(self.card.chrome_width())
    }

    fn content_rows(&self, width: u16) -> u16 {
        self.content.preferred_height(self.content_width(width))
    }

    fn header_rows(&self) -> u16 {
        if self.image.is_some() {
            THUMBNAIL.1
        } else {
            1
        }
    }

    /// Body rows visible right now at `width`
    pub fn visible_body_rows(&self, width: u16) -> u16 {
        self.transition.current().min(self.content_rows(width))
    }
}

impl EventHandler for ExpandableSection {
    fn handle_event(&mut self, event: &Event) -> bool {
        let activated = event.is_click_in(self.header) || (self.focused && event.is_activate_key());
        if activated {
            self.toggle();
        }
        activated
    }

    fn on_focus(&mut self) {
        self.focused = true;
        self.dirty = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
        self.dirty = true;
    }
}

impl Component for ExpandableSection {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        if self.use_reduced_motion(ctx) {
            self.transition.snap();
        }

        let theme = self.use_theme(ctx);
        let inner = self.card.draw(renderer, bounds, ctx)?;
        let (header, body) = inner.split_top(self.header_rows());
        self.header = Rect::new(bounds.x, header.y, bounds.width, header.height);

        let mut title_area = header;
        if let Some(image) = self.image.as_mut() {
            let (thumb, rest) = header.split_left(THUMBNAIL.0);
            image.render(renderer, thumb, ctx)?;
            title_area = rest.split_left(1).1;
        }

        // Title on the left, toggle icon in the last column
        let title_row = title_area.row(0);
        if title_row.width > 2 {
            let title = truncate(&self.title, (title_row.width - 2) as usize);
            let style = if ctx.focused {
                theme.heading_style().underline(true)
            } else {
                theme.heading_style()
            };
            renderer.draw_text(title_row.x, title_row.y, &title, &style)?;
        }
        if !title_row.is_empty() {
            let icon_cell = Rect::new(title_row.right() - 1, title_row.y, 1, 1);
            self.icon().draw(renderer, icon_cell, &theme.accent_style())?;
        }

        let rows = self.transition.current().min(body.height);
        let (visible, _) = body.split_top(rows);
        self.content.render(renderer, visible, ctx)?;

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (self.card.chrome_width() + 4, self.card.chrome_height() + self.header_rows())
    }

    fn preferred_height(&self, width: u16) -> u16 {
        self.card.chrome_height() + self.header_rows() + self.visible_body_rows(width)
    }

    fn tick(&mut self, ctx: &RenderContext) -> bool {
        if self.use_reduced_motion(ctx) {
            self.transition.snap()
        } else {
            self.transition.tick()
        }
    }

    fn on_mount(&mut self) {
        self.state = ExpansionState::new();
        self.transition = HeightTransition::new(0);
        if let Some(image) = self.image.as_mut() {
            image.on_mount();
        }
        self.dirty = true;
    }

    fn on_unmount(&mut self) {
        if let Some(image) = self.image.as_mut() {
            image.on_unmount();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.transition.is_animating()
    }

    fn focusable(&self) -> bool {
        true
    }

    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::Region
    }

    fn name(&self) -> &str {
        "ExpandableSection"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessibility::AccessibilitySettings;
    use crate::event::{Key, MouseEvent};
    use crate::theme::Theme;

    const WIDTH: u16 = 30;

    fn render(section: &mut ExpandableSection, ctx: &RenderContext) -> String {
        let mut renderer = Renderer::headless();
        let height = section.preferred_height(WIDTH);
        section
            .render(&mut renderer, Rect::new(0, 0, WIDTH, height), ctx)
            .unwrap();
        renderer.output_text()
    }

    fn settle(section: &mut ExpandableSection, ctx: &RenderContext) {
        while section.tick(ctx) {}
    }

    #[test]
    fn test_starts_collapsed() {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let mut section = ExpandableSection::new("Details", "Hidden body");

        let text = render(&mut section, &ctx);
        assert!(!section.is_expanded());
        assert!(text.contains("Details"));
        assert!(text.contains('+'));
        assert!(!text.contains("Hidden body"));
        assert_eq!(section.preferred_height(WIDTH), 3);
    }

    #[test]
    fn test_header_click_expands() {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let mut section = ExpandableSection::new("Details", "Hidden body");
        render(&mut section, &ctx);

        assert!(section.handle_event(&Event::Mouse(MouseEvent::click(5, 1))));
        assert!(section.is_expanded());
        assert_eq!(section.icon(), Icon::new(IconKind::Minus).rotated(Rotation::Half));
        assert!(section.is_dirty());

        settle(&mut section, &ctx);
        let text = render(&mut section, &ctx);
        assert!(text.contains("Hidden body"));
        assert!(text.contains('−'));
    }

    #[test]
    fn test_click_outside_header_is_ignored() {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let mut section = ExpandableSection::new("Details", "Hidden body");
        render(&mut section, &ctx);

        assert!(!section.handle_event(&Event::Mouse(MouseEvent::click(5, 10))));
        assert!(!section.is_expanded());
    }

    #[test]
    fn test_toggle_twice_returns_to_collapsed() {
        let mut state = ExpansionState::new();
        assert!(state.toggle());
        assert!(!state.toggle());
        assert_eq!(state, ExpansionState::new());
    }

    #[test]
    fn test_transition_steps_toward_target() {
        let mut transition = HeightTransition::new(0);
        transition.set_target(MAX_EXPANDED_ROWS);
        assert!(transition.tick());
        assert_eq!(transition.current(), TRANSITION_STEP);

        transition.set_target(0);
        assert!(transition.tick());
        assert_eq!(transition.current(), 0);
        assert!(!transition.tick());
    }

    #[test]
    fn test_reduced_motion_snaps() {
        let theme = Theme::headless();
        let mut reduced = AccessibilitySettings::new();
        reduced.prefer_reduced_motion = true;
        let ctx = RenderContext::new(&theme).with_accessibility(&reduced);
        let mut section = ExpandableSection::new("Details", "Hidden body");

        section.toggle();
        assert!(section.tick(&ctx));
        assert_eq!(section.transition().current(), MAX_EXPANDED_ROWS);
        assert!(!section.transition().is_animating());
    }

    #[test]
    fn test_long_content_is_clipped() {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let body = (1..=20).map(|n| format!("line{n}")).collect::<Vec<_>>().join("\n");
        let mut section = ExpandableSection::new("Long", body);

        assert!(section.is_clipped(WIDTH));
        section.toggle();
        settle(&mut section, &ctx);

        assert_eq!(section.visible_body_rows(WIDTH), MAX_EXPANDED_ROWS);
        let text = render(&mut section, &ctx);
        assert!(text.contains("line12"));
        assert!(!text.contains("line13"));
    }

    #[test]
    fn test_short_content_uses_own_height() {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let mut section = ExpandableSection::new("Short", "one\ntwo");
        section.toggle();
        settle(&mut section, &ctx);

        assert!(!section.is_clipped(WIDTH));
        assert_eq!(section.preferred_height(WIDTH), 2 + 1 + 2);
    }

    #[test]
    fn test_keyboard_toggle_needs_focus() {
        let mut section = ExpandableSection::new("Details", "Body");
        assert!(!section.handle_event(&Event::Key(Key::Enter)));

        section.on_focus();
        assert!(section.handle_event(&Event::Key(Key::Char(' '))));
        assert!(section.is_expanded());
    }

    #[test]
    fn test_remount_collapses() {
        let mut section = ExpandableSection::new("Details", "Body");
        section.toggle();
        section.on_mount();
        assert!(!section.is_expanded());
        assert_eq!(section.transition().current(), 0);
    }

    #[test]
    fn test_missing_header_image_does_not_fail() {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let mut section =
            ExpandableSection::new("Pictured", "Body").with_image("/nonexistent/thumb.png");

        let text = render(&mut section, &ctx);
        assert!(text.contains("Pictured"));
        assert_eq!(section.header_area().height, 2);
    }
}
