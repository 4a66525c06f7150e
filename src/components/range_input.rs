//! Range input - a horizontal track with a thumb, reporting integer values
//!
//! The input is controlled: it never stores the value itself. The owner
//! passes the current value in when rendering and applies whatever
//! [`RangeInput::interpret`] reports.

use crate::context::{RenderContext, UseTheme};
use crate::event::{Event, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

const FILLED: char = '━';
const EMPTY: char = '─';
const THUMB: char = '●';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeInput {
    min: i32,
    max: i32,
    step: i32,
    page: i32,
    track: Rect,
}

impl RangeInput {
    /// Range `[min, max]`; a reversed range is swapped
    pub fn new(min: i32, max: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        RangeInput {
            min,
            max,
            step: 1,
            page: 10,
            track: Rect::default(),
        }
    }

    pub fn with_step(mut self, step: i32) -> Self {
        self.step = step.max(1);
        self
    }

    /// Increment for PageUp/PageDown
    pub fn with_page(mut self, page: i32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Track area from the last render
    pub fn track(&self) -> Rect {
        self.track
    }

    /// Clamp to the range and snap to the step grid
    pub fn clamp(&self, value: i32) -> i32 {
        let value = value.clamp(self.min, self.max);
        let snapped = self.min + (value - self.min + self.step / 2) / self.step * self.step;
        snapped.min(self.max)
    }

    /// Value under a track column (first column is `min`, last is `max`)
    pub fn value_at_column(&self, col: u16) -> i32 {
        let span = self.track.width.saturating_sub(1) as i64;
        if span == 0 {
            return self.min;
        }
        let offset = col.saturating_sub(self.track.x).min(span as u16) as i64;
        let range = (self.max - self.min) as i64;
        let value = self.min as i64 + (offset * range + span / 2) / span;
        self.clamp(value as i32)
    }

    /// Track column showing `value`
    pub fn column_for(&self, value: i32) -> u16 {
        let span = self.track.width.saturating_sub(1) as i64;
        let range = (self.max - self.min) as i64;
        if range == 0 {
            return self.track.x;
        }
        let offset = (self.clamp(value) - self.min) as i64;
        self.track.x + ((offset * span + range / 2) / range) as u16
    }

    /// Value this input would report for `event`, given the current value
    ///
    /// Keys are only meaningful while the owner has focus; the owner decides
    /// whether to pass them on.
    pub fn interpret(&self, event: &Event, current: i32) -> Option<i32> {
        let reported = match event {
            Event::Mouse(m) if event.is_press_or_drag_in(self.track) => self.value_at_column(m.col),
            Event::Key(Key::Left) | Event::Key(Key::Char('h')) => current - self.step,
            Event::Key(Key::Right) | Event::Key(Key::Char('l')) => current + self.step,
            Event::Key(Key::PageDown) => current - self.page,
            Event::Key(Key::PageUp) => current + self.page,
            Event::Key(Key::Home) => self.min,
            Event::Key(Key::End) => self.max,
            _ => return None,
        };
        Some(self.clamp(reported))
    }

    /// Draw the track for `value` across the first row of `bounds`
    pub fn draw(&mut self, renderer: &mut Renderer, bounds: Rect, value: i32, ctx: &RenderContext) -> Result<()> {
        self.track = bounds.row(0);
        if self.track.is_empty() {
            return Ok(());
        }

        let theme = self.use_theme(ctx);
        let thumb = (self.column_for(value) - self.track.x) as usize;
        let width = self.track.width as usize;

        let filled: String = std::iter::repeat(FILLED).take(thumb).collect();
        let empty: String = std::iter::repeat(EMPTY).take(width - thumb - 1).collect();
        let thumb_style = if ctx.focused {
            theme.accent_style().reverse(true)
        } else {
            theme.accent_style().bold(true)
        };

        renderer.draw_text(self.track.x, self.track.y, &filled, &theme.accent_style())?;
        renderer.write_styled(&THUMB.to_string(), &thumb_style)?;
        renderer.write_styled(&empty, &theme.muted_style())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseEvent;
    use crate::theme::Theme;

    fn drawn(width: u16, value: i32) -> (RangeInput, String) {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();
        let mut input = RangeInput::new(0, 100);
        input
            .draw(&mut renderer, Rect::new(0, 5, width, 1), value, &ctx)
            .unwrap();
        (input, renderer.output_text())
    }

    #[test]
    fn test_track_rendering() {
        assert_eq!(drawn(11, 50).1, "━━━━━●─────");
        assert_eq!(drawn(11, 0).1, "●──────────");
        assert_eq!(drawn(11, 100).1, "━━━━━━━━━━●");
    }

    #[test]
    fn test_column_mapping_hits_both_ends() {
        let (input, _) = drawn(101, 0);
        assert_eq!(input.value_at_column(0), 0);
        assert_eq!(input.value_at_column(100), 100);
        assert_eq!(input.value_at_column(37), 37);
        assert_eq!(input.value_at_column(500), 100);
    }

    #[test]
    fn test_drag_reports_value() {
        let (input, _) = drawn(11, 50);
        let drag = Event::Mouse(MouseEvent::drag(2, 5));
        assert_eq!(input.interpret(&drag, 50), Some(20));

        let off_track = Event::Mouse(MouseEvent::drag(2, 6));
        assert_eq!(input.interpret(&off_track, 50), None);
    }

    #[test]
    fn test_keys_step_and_clamp() {
        let input = RangeInput::new(0, 100);
        assert_eq!(input.interpret(&Event::Key(Key::Right), 50), Some(51));
        assert_eq!(input.interpret(&Event::Key(Key::Char('h')), 0), Some(0));
        assert_eq!(input.interpret(&Event::Key(Key::PageUp), 95), Some(100));
        assert_eq!(input.interpret(&Event::Key(Key::Home), 42), Some(0));
        assert_eq!(input.interpret(&Event::Key(Key::Enter), 42), None);
    }

    #[test]
    fn test_clamp_snaps_to_step() {
        let input = RangeInput::new(0, 100).with_step(5);
        assert_eq!(input.clamp(12), 10);
        assert_eq!(input.clamp(13), 15);
        assert_eq!(input.clamp(-4), 0);
        assert_eq!(input.clamp(400), 100);
    }
}
