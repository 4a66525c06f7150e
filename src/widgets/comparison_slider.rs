//! Comparison slider - two images split by a draggable divider
//!
//! The left image shows over `[0, position]%` of the width, the right image
//! over `[position, 100]%`, with a divider line at `position`%. The split is
//! adjusted through a range control below the images.

use crate::accessibility::AccessibilityRole;
use crate::component::Component;
use crate::components::{Card, Image, RangeInput};
use crate::context::{RenderContext, UseTheme};
use crate::event::{Event, EventHandler};
use crate::layout::{percent_of, truncate, Rect, Span};
use crate::render::Renderer;
use anyhow::Result;
use image::{imageops, Rgba, RgbaImage};
use std::ops::Range;

/// Split position a freshly mounted slider starts at
pub const DEFAULT_POSITION: u8 = 50;

const DEFAULT_IMAGE_ROWS: u16 = 8;

/// Fill used for a side whose image could not be decoded
const MISSING_PIXEL: Rgba<u8> = Rgba([48, 48, 52, 255]);

/// Split position, always within `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderState {
    position: u8,
}

impl SliderState {
    pub fn new() -> Self {
        SliderState {
            position: DEFAULT_POSITION,
        }
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    /// Set from any reported value, clamping to `[0, 100]`; returns true if
    /// the position changed
    pub fn set(&mut self, value: i32) -> bool {
        let clamped = value.clamp(0, 100) as u8;
        let changed = clamped != self.position;
        self.position = clamped;
        changed
    }
}

impl Default for SliderState {
    fn default() -> Self {
        Self::new()
    }
}

/// Visible extent of each image for a split position, in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitGeometry {
    pub left: Span,
    pub right: Span,
    pub divider: u8,
}

/// [`SplitGeometry`] mapped onto a concrete width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitColumns {
    pub left: Range<u32>,
    pub right: Range<u32>,
    /// Column the divider is drawn on; `None` for zero width
    pub divider: Option<u32>,
}

impl SplitGeometry {
    pub fn at(position: u8) -> Self {
        let position = position.min(100);
        SplitGeometry {
            left: Span::new(0, position),
            right: Span::new(position, 100),
            divider: position,
        }
    }

    /// Columns each side covers across `width`. The two ranges tile
    /// `[0, width)` with no gap or overlap.
    pub fn columns(&self, width: u32) -> SplitColumns {
        let left = self.left.to_range(width);
        let right = self.right.to_range(width);
        let divider = match width {
            0 => None,
            _ => Some(percent_of(self.divider, width).min(width - 1)),
        };
        SplitColumns {
            left,
            right,
            divider,
        }
    }
}

/// Build the split image at `width` x `height` pixels
///
/// Both sources are scaled to the target size; columns left of the split
/// come from `left`, the rest from `right`. `divider_width` pixel columns
/// starting at the divider are painted with `divider_color`.
pub fn composite(
    left: &RgbaImage,
    right: &RgbaImage,
    (width, height): (u32, u32),
    position: u8,
    divider_width: u32,
    divider_color: Rgba<u8>,
) -> RgbaImage {
    let mut out = RgbaImage::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let left = fit(left, width, height);
    let right = fit(right, width, height);
    let columns = SplitGeometry::at(position).columns(width);

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        *pixel = if columns.left.contains(&x) {
            *left.get_pixel(x, y)
        } else {
            *right.get_pixel(x, y)
        };
    }

    if let Some(divider) = columns.divider {
        // Keep the line on screen when the split sits at the right edge
        let start = divider.min(width.saturating_sub(divider_width.max(1)));
        for x in start..(start + divider_width.max(1)).min(width) {
            for y in 0..height {
                out.put_pixel(x, y, divider_color);
            }
        }
    }

    out
}

fn fit(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.width() == 0 || image.height() == 0 {
        return RgbaImage::from_pixel(width, height, MISSING_PIXEL);
    }
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, imageops::FilterType::Triangle)
}

/// Inputs a cached composite was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CompositeKey {
    position: u8,
    size: (u32, u32),
    divider: Rgba<u8>,
}

/// Before/after image comparison with a split control
pub struct ComparisonSlider {
    title: String,
    left_label: String,
    right_label: String,
    left: Image,
    right: Image,
    state: SliderState,
    range: RangeInput,
    card: Card,
    image_rows: u16,
    image_area: Rect,
    cached: Option<(CompositeKey, RgbaImage)>,
    focused: bool,
    dirty: bool,
}

impl ComparisonSlider {
    pub fn new(
        left_image: impl Into<String>,
        right_image: impl Into<String>,
        title: impl Into<String>,
        left_label: impl Into<String>,
        right_label: impl Into<String>,
    ) -> Self {
        Self::with_images(
            Image::new(left_image),
            Image::new(right_image),
            title,
            left_label,
            right_label,
        )
    }

    /// Slider over already-built image components
    pub fn with_images(
        left: Image,
        right: Image,
        title: impl Into<String>,
        left_label: impl Into<String>,
        right_label: impl Into<String>,
    ) -> Self {
        ComparisonSlider {
            title: title.into(),
            left_label: left_label.into(),
            right_label: right_label.into(),
            left,
            right,
            state: SliderState::new(),
            range: RangeInput::new(0, 100),
            card: Card::new(),
            image_rows: DEFAULT_IMAGE_ROWS,
            image_area: Rect::default(),
            cached: None,
            focused: false,
            dirty: true,
        }
    }

    /// Terminal rows given to the image area
    pub fn with_image_rows(mut self, rows: u16) -> Self {
        self.image_rows = rows.max(1);
        self
    }

    pub fn position(&self) -> u8 {
        self.state.position()
    }

    pub fn geometry(&self) -> SplitGeometry {
        SplitGeometry::at(self.state.position())
    }

    /// Apply a value reported by the range control
    pub fn set_position(&mut self, value: i32) {
        if self.state.set(value) {
            tracing::trace!(position = self.state.position(), "split moved");
            self.dirty = true;
        }
    }

    /// Image area from the last render
    pub fn image_area(&self) -> Rect {
        self.image_area
    }

    fn draw_images(&mut self, renderer: &mut Renderer, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (r, g, b) = ctx.theme.divider_color.to_rgb();
        let key = CompositeKey {
            position: self.state.position(),
            size: renderer.image_pixel_size(area),
            divider: Rgba([r, g, b, 255]),
        };

        let stale = !matches!(&self.cached, Some((cached, _)) if *cached == key);
        if stale {
            let empty = RgbaImage::new(0, 0);
            let left = self.left.pixels().cloned().unwrap_or_else(|| empty.clone());
            let right = self.right.pixels().cloned().unwrap_or(empty);
            let divider_width = (key.size.0 / area.width.max(1) as u32).clamp(1, 4);

            let image = composite(
                &left,
                &right,
                key.size,
                key.position,
                divider_width,
                key.divider,
            );
            self.cached = Some((key, image));
        }

        if let Some((_, image)) = &self.cached {
            renderer.render_image(image, area)?;
        }
        Ok(())
    }

    fn draw_labels(&self, renderer: &mut Renderer, area: Rect, ctx: &RenderContext) -> Result<()> {
        let theme = self.use_theme(ctx);
        let style = theme.overlay_style();
        let half = (area.width / 2) as usize;

        if !self.left_label.is_empty() && half > 0 {
            let label = truncate(&format!(" {} ", self.left_label), half);
            renderer.draw_text(area.x, area.y, &label, &style)?;
        }
        if !self.right_label.is_empty() && half > 0 {
            let label = truncate(&format!(" {} ", self.right_label), half);
            let x = area.right() - crate::layout::text_width(&label) as u16;
            renderer.draw_text(x, area.y, &label, &style)?;
        }
        Ok(())
    }
}

impl EventHandler for ComparisonSlider {
    fn handle_event(&mut self, event: &Event) -> bool {
        let reported = match event {
            Event::Mouse(m) if event.is_press_or_drag_in(self.image_area) => {
                // Dragging on the picture moves the split too
                let columns = self.image_area.width.saturating_sub(1).max(1) as i32;
                Some((m.col - self.image_area.x) as i32 * 100 / columns)
            }
            Event::Mouse(_) => self.range.interpret(event, self.state.position() as i32),
            Event::Key(_) if self.focused => self.range.interpret(event, self.state.position() as i32),
            _ => None,
        };

        match reported {
            Some(value) => {
                self.set_position(value);
                true
            }
            None => false,
        }
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

impl Component for ComparisonSlider {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let inner = self.card.draw(renderer, bounds, ctx)?;
        let theme = self.use_theme(ctx);

        let (title_row, rest) = inner.split_top(1);
        let image_rows = rest.height.saturating_sub(1);
        let (image_area, control_row) = rest.split_top(image_rows);
        self.image_area = image_area;

        if !title_row.is_empty() {
            renderer.draw_text(
                title_row.x,
                title_row.y,
                &truncate(&self.title, title_row.width as usize),
                &theme.heading_style(),
            )?;
        }

        if !image_area.is_empty() {
            self.draw_images(renderer, image_area, ctx)?;
            self.draw_labels(renderer, image_area, ctx)?;
        }

        self.range
            .draw(renderer, control_row, self.state.position() as i32, ctx)?;

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (self.card.chrome_width() + 10, self.card.chrome_height() + 3)
    }

    fn preferred_height(&self, _width: u16) -> u16 {
        self.card.chrome_height() + 1 + self.image_rows + 1
    }

    fn on_mount(&mut self) {
        self.state = SliderState::new();
        self.cached = None;
        self.left.on_mount();
        self.right.on_mount();
        self.dirty = true;
    }

    fn on_unmount(&mut self) {
        self.cached = None;
        self.left.on_unmount();
        self.right.on_unmount();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn focusable(&self) -> bool {
        true
    }

    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::Slider
    }

    fn name(&self) -> &str {
        "ComparisonSlider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Key, MouseEvent};
    use crate::theme::{Color, Theme};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn slider() -> ComparisonSlider {
        ComparisonSlider::with_images(
            Image::from_rgba(RgbaImage::from_pixel(8, 8, RED)),
            Image::from_rgba(RgbaImage::from_pixel(8, 8, BLUE)),
            "Before and after",
            "Before",
            "After",
        )
        .with_image_rows(4)
    }

    fn render(slider: &mut ComparisonSlider) -> Renderer {
        render_with(slider, &Theme::headless())
    }

    fn render_with(slider: &mut ComparisonSlider, theme: &Theme) -> Renderer {
        let ctx = RenderContext::new(theme);
        let mut renderer = Renderer::headless();
        let height = slider.preferred_height(40);
        slider
            .render(&mut renderer, Rect::new(0, 0, 40, height), &ctx)
            .unwrap();
        renderer
    }

    #[test]
    fn test_default_split_is_even() {
        let slider = slider();
        assert_eq!(slider.position(), 50);

        let geometry = slider.geometry();
        assert_eq!(geometry.left, Span::new(0, 50));
        assert_eq!(geometry.right, Span::new(50, 100));
        assert_eq!(geometry.divider, 50);
    }

    #[test]
    fn test_spans_always_sum_to_whole() {
        for position in 0..=100u8 {
            let geometry = SplitGeometry::at(position);
            assert_eq!(geometry.left.len() + geometry.right.len(), 100);
            assert_eq!(geometry.left.end, geometry.right.start);
            assert_eq!(geometry.divider, position);
        }
    }

    #[test]
    fn test_columns_tile_width() {
        for position in 0..=100u8 {
            for width in [1u32, 9, 40, 333] {
                let columns = SplitGeometry::at(position).columns(width);
                assert_eq!(columns.left.start, 0);
                assert_eq!(columns.left.end, columns.right.start);
                assert_eq!(columns.right.end, width);
                assert!(columns.divider.is_some_and(|d| d < width));
            }
        }
        assert_eq!(SplitGeometry::at(50).columns(0).divider, None);
    }

    #[test]
    fn test_position_is_clamped() {
        let mut state = SliderState::new();
        assert!(state.set(250));
        assert_eq!(state.position(), 100);
        assert!(state.set(-3));
        assert_eq!(state.position(), 0);
        assert!(!state.set(-90));
    }

    #[test]
    fn test_composite_clips_each_side() {
        let left = RgbaImage::from_pixel(3, 3, RED);
        let right = RgbaImage::from_pixel(5, 2, BLUE);

        let image = composite(&left, &right, (10, 2), 30, 1, WHITE);
        assert_eq!(*image.get_pixel(0, 0), RED);
        assert_eq!(*image.get_pixel(2, 1), RED);
        assert_eq!(*image.get_pixel(3, 0), WHITE);
        assert_eq!(*image.get_pixel(4, 0), BLUE);
        assert_eq!(*image.get_pixel(9, 1), BLUE);
    }

    #[test]
    fn test_composite_extremes() {
        let left = RgbaImage::from_pixel(2, 2, RED);
        let right = RgbaImage::from_pixel(2, 2, BLUE);

        let all_right = composite(&left, &right, (10, 1), 0, 1, WHITE);
        assert_eq!(*all_right.get_pixel(0, 0), WHITE);
        assert!((1..10).all(|x| *all_right.get_pixel(x, 0) == BLUE));

        let all_left = composite(&left, &right, (10, 1), 100, 1, WHITE);
        assert!((0..9).all(|x| *all_left.get_pixel(x, 0) == RED));
        assert_eq!(*all_left.get_pixel(9, 0), WHITE);
    }

    #[test]
    fn test_missing_image_uses_fill() {
        let left = RgbaImage::new(0, 0);
        let right = RgbaImage::from_pixel(2, 2, BLUE);
        let image = composite(&left, &right, (4, 1), 50, 1, WHITE);
        assert_eq!(*image.get_pixel(0, 0), MISSING_PIXEL);
    }

    #[test]
    fn test_render_shows_title_labels_and_track() {
        let mut slider = slider();
        let text = render(&mut slider).output_text();

        assert!(text.contains("Before and after"));
        assert!(text.contains(" Before "));
        assert!(text.contains(" After "));
        assert!(text.contains('●'));
        assert_eq!(slider.image_area(), Rect::new(2, 2, 36, 4));
    }

    /// Cursor move written just before `label` in raw output
    fn label_cell(raw: &str, label: &str) -> Option<String> {
        let at = raw.find(label)?;
        let end = raw[..at].rfind('H')?;
        let start = raw[..end].rfind("\x1b[")?;
        Some(raw[start..=end].to_string())
    }

    #[test]
    fn test_labels_stay_put_when_split_moves() {
        let mut slider = slider();
        let mut cells = Vec::new();
        for position in [0, 100] {
            slider.set_position(position);
            let renderer = render(&mut slider);
            let raw = String::from_utf8_lossy(renderer.output()).into_owned();
            cells.push((label_cell(&raw, " Before "), label_cell(&raw, " After ")));
        }

        assert_eq!(cells[0], cells[1]);
        // Image area starts at (2, 2); the right label ends at its right edge
        assert_eq!(cells[0].0.as_deref(), Some("\x1b[3;3H"));
        assert_eq!(cells[0].1.as_deref(), Some("\x1b[3;32H"));
    }

    #[test]
    fn test_divider_color_change_rebuilds_composite() {
        let mut slider = slider();
        render(&mut slider);
        let (first_key, first_image) = slider.cached.clone().unwrap();

        let mut theme = Theme::headless();
        theme.divider_color = Color::rgb(255, 0, 255);
        render_with(&mut slider, &theme);
        let (key, image) = slider.cached.as_ref().unwrap();

        assert_eq!(key.position, first_key.position);
        assert_eq!(key.size, first_key.size);
        assert_eq!(key.divider, Rgba([255, 0, 255, 255]));
        assert_ne!(*image, first_image);
    }

    #[test]
    fn test_drag_on_track_moves_split() {
        let mut slider = slider();
        render(&mut slider);

        // Track spans columns 2..38 on the last inner row
        let track_row = 6;
        assert!(slider.handle_event(&Event::Mouse(MouseEvent::drag(2, track_row))));
        assert_eq!(slider.position(), 0);
        assert!(slider.handle_event(&Event::Mouse(MouseEvent::drag(37, track_row))));
        assert_eq!(slider.position(), 100);
        assert!(slider.is_dirty());
    }

    #[test]
    fn test_drag_on_image_moves_split() {
        let mut slider = slider();
        render(&mut slider);

        assert!(slider.handle_event(&Event::Mouse(MouseEvent::click(2, 3))));
        assert_eq!(slider.position(), 0);
    }

    #[test]
    fn test_keys_require_focus() {
        let mut slider = slider();
        assert!(!slider.handle_event(&Event::Key(Key::Right)));
        assert_eq!(slider.position(), 50);

        slider.on_focus();
        assert!(slider.handle_event(&Event::Key(Key::Right)));
        assert_eq!(slider.position(), 51);
        slider.handle_event(&Event::Key(Key::End));
        slider.handle_event(&Event::Key(Key::Right));
        assert_eq!(slider.position(), 100);
    }

    #[test]
    fn test_remount_resets_position() {
        let mut slider = slider();
        slider.set_position(12);
        slider.on_mount();
        assert_eq!(slider.position(), DEFAULT_POSITION);
    }
}
