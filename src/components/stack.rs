//! Vertical stack container with focus cycling

use crate::component::{propagate_event, Component, Container};
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Lays children out top to bottom at their preferred heights
///
/// Keyboard events go to the focused child; Tab and BackTab move focus
/// between focusable children. Mouse events are offered to every child in
/// order until one consumes them.
pub struct Stack {
    children: Vec<Box<dyn Component>>,
    gap: u16,
    focused: Option<usize>,
    dirty: bool,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            children: Vec::new(),
            gap: 0,
            focused: None,
            dirty: true,
        }
    }

    /// Blank rows between children
    pub fn with_gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Builder form of [`Container::add_child`]
    pub fn with_child(mut self, child: Box<dyn Component>) -> Self {
        self.add_child(child);
        self
    }

    /// Index of the child holding keyboard focus
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Give focus to the child at `index` if it accepts focus
    pub fn focus(&mut self, index: usize) -> bool {
        if !self.children.get(index).is_some_and(|c| c.focusable()) {
            return false;
        }
        if let Some(prev) = self.focused {
            if prev == index {
                return true;
            }
            self.children[prev].on_blur();
        }
        self.children[index].on_focus();
        self.focused = Some(index);
        self.dirty = true;
        true
    }

    /// Move focus to the next (or previous) focusable child, wrapping around
    pub fn cycle_focus(&mut self, forward: bool) -> bool {
        let len = self.children.len();
        if len == 0 {
            return false;
        }

        let start = self.focused.unwrap_or(if forward { len - 1 } else { 0 });
        for step in 1..=len {
            let index = if forward {
                (start + step) % len
            } else {
                (start + len - step % len) % len
            };
            if self.children[index].focusable() {
                return self.focus(index);
            }
        }
        false
    }

    /// Rectangles each child occupies inside `bounds`
    pub fn layout(&self, bounds: Rect) -> Vec<Rect> {
        let mut rects = Vec::with_capacity(self.children.len());
        let mut y = bounds.y;

        for child in &self.children {
            let remaining = bounds.bottom().saturating_sub(y);
            let height = child.preferred_height(bounds.width).min(remaining);
            rects.push(Rect::new(bounds.x, y, bounds.width, height));
            y = y.saturating_add(height).saturating_add(self.gap);
        }

        rects
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for Stack {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(Key::Tab) => self.cycle_focus(true),
            Event::Key(Key::BackTab) => self.cycle_focus(false),
            Event::Key(_) | Event::Paste(_) => match self.focused {
                Some(index) => self.children[index].handle_event(event),
                None => false,
            },
            Event::Mouse(_) => match propagate_event(&mut self.children, event) {
                Some(index) => {
                    // Clicking a widget focuses it
                    self.focus(index);
                    true
                }
                None => false,
            },
            _ => {
                let mut consumed = false;
                for child in &mut self.children {
                    consumed |= child.handle_event(event);
                }
                consumed
            }
        }
    }
}

impl Component for Stack {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let rects = self.layout(bounds);
        let focused = self.focused;

        for (index, (child, rect)) in self.children.iter_mut().zip(rects).enumerate() {
            if rect.is_empty() {
                continue;
            }
            let child_ctx = ctx.with_focus(focused == Some(index));
            child.render(renderer, rect, &child_ctx)?;
        }

        self.dirty = false;
        Ok(())
    }

    fn preferred_height(&self, width: u16) -> u16 {
        let gaps = self.gap * self.children.len().saturating_sub(1) as u16;
        self.children
            .iter()
            .map(|c| c.preferred_height(width))
            .sum::<u16>()
            + gaps
    }

    fn tick(&mut self, ctx: &RenderContext) -> bool {
        let mut changed = false;
        for child in &mut self.children {
            changed |= child.tick(ctx);
        }
        changed
    }

    fn on_mount(&mut self) {
        for child in &mut self.children {
            child.on_mount();
        }
    }

    fn on_unmount(&mut self) {
        for child in &mut self.children {
            child.on_unmount();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        for child in &mut self.children {
            child.mark_dirty();
        }
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.children.iter().any(|c| c.is_dirty())
    }

    fn focusable(&self) -> bool {
        self.children.iter().any(|c| c.focusable())
    }

    fn name(&self) -> &str {
        "Stack"
    }
}

impl Container for Stack {
    fn children_mut(&mut self) -> &mut [Box<dyn Component>] {
        &mut self.children
    }

    fn children(&self) -> &[Box<dyn Component>] {
        &self.children
    }

    fn add_child(&mut self, child: Box<dyn Component>) {
        self.children.push(child);
        self.dirty = true;
    }

    fn remove_child(&mut self, index: usize) -> Option<Box<dyn Component>> {
        if index >= self.children.len() {
            return None;
        }
        self.focused = match self.focused {
            Some(f) if f == index => None,
            Some(f) if f > index => Some(f - 1),
            other => other,
        };
        self.dirty = true;
        Some(self.children.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Text;
    use crate::event::MouseEvent;
    use crate::theme::Theme;

    struct Stub {
        height: u16,
        focusable: bool,
        has_focus: bool,
        keys: usize,
        hit: Rect,
        last_bounds: Rect,
    }

    impl Stub {
        fn new(height: u16, focusable: bool) -> Self {
            Stub {
                height,
                focusable,
                has_focus: false,
                keys: 0,
                hit: Rect::default(),
                last_bounds: Rect::default(),
            }
        }
    }

    impl EventHandler for Stub {
        fn handle_event(&mut self, event: &Event) -> bool {
            match event {
                Event::Key(_) => {
                    self.keys += 1;
                    true
                }
                _ => event.is_click_in(self.hit),
            }
        }

        fn on_focus(&mut self) {
            self.has_focus = true;
        }

        fn on_blur(&mut self) {
            self.has_focus = false;
        }
    }

    impl Component for Stub {
        fn render(&mut self, _r: &mut Renderer, bounds: Rect, _ctx: &RenderContext) -> Result<()> {
            self.last_bounds = bounds;
            self.hit = bounds;
            Ok(())
        }

        fn preferred_height(&self, _width: u16) -> u16 {
            self.height
        }

        fn focusable(&self) -> bool {
            self.focusable
        }
    }

    #[test]
    fn test_layout_uses_preferred_heights() {
        let stack = Stack::new()
            .with_gap(1)
            .with_child(Box::new(Stub::new(3, false)))
            .with_child(Box::new(Text::new("one two three")));

        let rects = stack.layout(Rect::new(0, 0, 7, 20));
        assert_eq!(rects[0], Rect::new(0, 0, 7, 3));
        assert_eq!(rects[1], Rect::new(0, 4, 7, 2));
        assert_eq!(stack.preferred_height(7), 6);
    }

    #[test]
    fn test_layout_clips_at_bottom() {
        let stack = Stack::new()
            .with_child(Box::new(Stub::new(5, false)))
            .with_child(Box::new(Stub::new(5, false)));

        let rects = stack.layout(Rect::new(0, 0, 10, 7));
        assert_eq!(rects[1], Rect::new(0, 5, 10, 2));
    }

    #[test]
    fn test_tab_skips_unfocusable_children() {
        let mut stack = Stack::new()
            .with_child(Box::new(Stub::new(1, true)))
            .with_child(Box::new(Stub::new(1, false)))
            .with_child(Box::new(Stub::new(1, true)));

        assert!(stack.handle_event(&Event::Key(Key::Tab)));
        assert_eq!(stack.focused(), Some(0));
        stack.handle_event(&Event::Key(Key::Tab));
        assert_eq!(stack.focused(), Some(2));
        stack.handle_event(&Event::Key(Key::Tab));
        assert_eq!(stack.focused(), Some(0));
        stack.handle_event(&Event::Key(Key::BackTab));
        assert_eq!(stack.focused(), Some(2));
    }

    #[test]
    fn test_keys_need_focus() {
        let mut stack = Stack::new().with_child(Box::new(Stub::new(1, true)));
        assert!(!stack.handle_event(&Event::Key(Key::Enter)));

        stack.focus(0);
        assert!(stack.handle_event(&Event::Key(Key::Enter)));
    }

    #[test]
    fn test_click_focuses_child() {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();
        let mut stack = Stack::new()
            .with_child(Box::new(Stub::new(2, true)))
            .with_child(Box::new(Stub::new(2, true)));

        stack
            .render(&mut renderer, Rect::new(0, 0, 10, 10), &ctx)
            .unwrap();
        assert!(stack.handle_event(&Event::Mouse(MouseEvent::click(1, 3))));
        assert_eq!(stack.focused(), Some(1));
        assert!(!stack.handle_event(&Event::Mouse(MouseEvent::click(1, 8))));
    }

    #[test]
    fn test_remove_child_adjusts_focus() {
        let mut stack = Stack::new()
            .with_child(Box::new(Stub::new(1, true)))
            .with_child(Box::new(Stub::new(1, true)));
        stack.focus(1);

        assert!(stack.remove_child(0).is_some());
        assert_eq!(stack.focused(), Some(0));
        assert!(stack.remove_child(5).is_none());
    }
}
