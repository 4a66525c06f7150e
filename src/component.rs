//! Component system - trait and lifecycle for UI elements

use crate::accessibility::AccessibilityRole;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Core component trait for all UI elements
///
/// Components use a hybrid approach:
/// - Retained: the component value owns its interaction state
/// - Immediate: drawing happens fresh each frame via `render()`
pub trait Component: EventHandler {
    /// Render the component into the given rectangle
    ///
    /// Components should record any hit areas they need for mouse input here,
    /// since bounds are only known at render time.
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()>;

    /// Minimum size needed for this component (cols, rows)
    fn min_size(&self) -> (u16, u16) {
        (0, 0)
    }

    /// Rows wanted when laid out at `width` columns
    fn preferred_height(&self, _width: u16) -> u16 {
        self.min_size().1
    }

    /// Advance time-based state by one frame; returns true if anything changed
    fn tick(&mut self, _ctx: &RenderContext) -> bool {
        false
    }

    /// Called when the component is mounted; state starts fresh here
    fn on_mount(&mut self) {}

    /// Called before the component is unmounted
    fn on_unmount(&mut self) {}

    /// Mark component as needing redraw
    fn mark_dirty(&mut self) {}

    /// Check if component needs redraw
    fn is_dirty(&self) -> bool {
        true
    }

    /// Whether the component accepts keyboard focus
    fn focusable(&self) -> bool {
        false
    }

    /// Semantic role for assistive output
    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::None
    }

    /// Component name for debugging
    fn name(&self) -> &str {
        "Component"
    }
}

/// Component that holds child components
pub trait Container: Component {
    fn children_mut(&mut self) -> &mut [Box<dyn Component>];

    fn children(&self) -> &[Box<dyn Component>];

    fn add_child(&mut self, child: Box<dyn Component>);

    fn remove_child(&mut self, index: usize) -> Option<Box<dyn Component>>;
}

/// Offer an event to children in order until one consumes it; returns the
/// index of the consumer
pub fn propagate_event(children: &mut [Box<dyn Component>], event: &Event) -> Option<usize> {
    children
        .iter_mut()
        .position(|child| child.handle_event(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    struct TestComponent {
        dirty: bool,
        consumes: bool,
        seen: usize,
    }

    impl EventHandler for TestComponent {
        fn handle_event(&mut self, _event: &Event) -> bool {
            self.seen += 1;
            self.consumes
        }
    }

    impl Component for TestComponent {
        fn render(
            &mut self,
            _renderer: &mut Renderer,
            _bounds: Rect,
            _ctx: &RenderContext,
        ) -> Result<()> {
            self.dirty = false;
            Ok(())
        }

        fn min_size(&self) -> (u16, u16) {
            (4, 2)
        }

        fn mark_dirty(&mut self) {
            self.dirty = true;
        }

        fn is_dirty(&self) -> bool {
            self.dirty
        }

        fn name(&self) -> &str {
            "TestComponent"
        }
    }

    fn child(consumes: bool) -> TestComponent {
        TestComponent {
            dirty: true,
            consumes,
            seen: 0,
        }
    }

    #[test]
    fn test_component_dirty_tracking() {
        let mut comp = child(false);
        assert!(comp.is_dirty());

        let mut renderer = Renderer::headless();
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        comp.render(&mut renderer, Rect::new(0, 0, 10, 10), &ctx)
            .unwrap();
        assert!(!comp.is_dirty());

        comp.mark_dirty();
        assert!(comp.is_dirty());
    }

    #[test]
    fn test_preferred_height_defaults_to_min_size() {
        assert_eq!(child(false).preferred_height(80), 2);
    }

    #[test]
    fn test_propagation_stops_at_consumer() {
        let mut children: Vec<Box<dyn Component>> =
            vec![Box::new(child(false)), Box::new(child(true)), Box::new(child(true))];

        assert_eq!(propagate_event(&mut children, &Event::FocusGained), Some(1));
        assert_eq!(propagate_event(&mut children[..1], &Event::FocusGained), None);
    }
}
