//! Image component - decodes a file reference lazily and draws it with the
//! renderer's graphics backend
//!
//! Decoding happens on first use. A reference that can't be decoded is
//! logged once and drawn as a placeholder; it never fails the frame.

use crate::accessibility::AccessibilityRole;
use crate::component::Component;
use crate::context::{RenderContext, UseTheme};
use crate::error::WidgetError;
use crate::event::EventHandler;
use crate::layout::{truncate, text_width, Rect};
use crate::render::Renderer;
use anyhow::Result;
use image::RgbaImage;

const PLACEHOLDER_FILL: char = '░';

/// Where the pixels come from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Filesystem path, decoded on first use
    Reference(String),
    /// Pixels supplied directly
    Pixels(RgbaImage),
}

#[derive(Debug)]
enum Pixels {
    Unloaded,
    Ready(RgbaImage),
    Failed,
}

/// Static image component
pub struct Image {
    source: ImageSource,
    pixels: Pixels,
    alt: String,
    dirty: bool,
}

impl Image {
    /// Image decoded from a file path
    pub fn new(reference: impl Into<String>) -> Self {
        Image {
            source: ImageSource::Reference(reference.into()),
            pixels: Pixels::Unloaded,
            alt: String::new(),
            dirty: true,
        }
    }

    /// Image from in-memory pixels
    pub fn from_rgba(image: RgbaImage) -> Self {
        Image {
            pixels: Pixels::Ready(image.clone()),
            source: ImageSource::Pixels(image),
            alt: String::new(),
            dirty: true,
        }
    }

    /// Text shown in the placeholder when the image can't be drawn
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Decoded pixels, loading them if needed; `None` if decoding failed
    pub fn pixels(&mut self) -> Option<&RgbaImage> {
        if matches!(self.pixels, Pixels::Unloaded) {
            self.pixels = match load(&self.source) {
                Ok(image) => Pixels::Ready(image),
                Err(err) => {
                    tracing::warn!(error = %err, "image unavailable, drawing placeholder");
                    Pixels::Failed
                }
            };
        }
        match &self.pixels {
            Pixels::Ready(image) => Some(image),
            _ => None,
        }
    }

    /// Pixel dimensions, if the image is loaded
    pub fn dimensions(&mut self) -> Option<(u32, u32)> {
        self.pixels().map(|image| image.dimensions())
    }

    /// Draw the "no image" box used when decoding failed
    pub fn draw_placeholder(&self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        if bounds.is_empty() {
            return Ok(());
        }
        let theme = self.use_theme(ctx);
        renderer.fill(bounds, PLACEHOLDER_FILL, &theme.muted_style())?;

        let label = if self.alt.is_empty() { "image unavailable" } else { &self.alt };
        let label = truncate(label, bounds.width as usize);
        let x = bounds.x + (bounds.width - text_width(&label) as u16) / 2;
        let y = bounds.y + bounds.height / 2;
        renderer.draw_text(x, y, &label, &theme.muted_style())
    }
}

/// Decode an image source into RGBA pixels
pub fn load(source: &ImageSource) -> std::result::Result<RgbaImage, WidgetError> {
    match source {
        ImageSource::Pixels(image) => Ok(image.clone()),
        ImageSource::Reference(reference) => image::open(reference)
            .map(|decoded| decoded.to_rgba8())
            .map_err(|source| WidgetError::ImageLoad {
                reference: reference.clone(),
                source,
            }),
    }
}

impl EventHandler for Image {}

impl Component for Image {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        if bounds.is_empty() {
            return Ok(());
        }

        let drawn = match self.pixels() {
            Some(image) => {
                renderer.render_image(image, bounds)?;
                true
            }
            None => false,
        };
        if !drawn {
            self.draw_placeholder(renderer, bounds, ctx)?;
        }

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (1, 1)
    }

    fn on_mount(&mut self) {
        if matches!(self.source, ImageSource::Reference(_)) && matches!(self.pixels, Pixels::Failed) {
            // Retry a failed file on remount
            self.pixels = Pixels::Unloaded;
        }
    }

    fn on_unmount(&mut self) {
        if let ImageSource::Reference(_) = self.source {
            self.pixels = Pixels::Unloaded;
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::Image
    }

    fn name(&self) -> &str {
        "Image"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use image::Rgba;

    #[test]
    fn test_missing_file_draws_placeholder() {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();
        let mut image = Image::new("/nonexistent/picture.png").with_alt("before");

        image
            .render(&mut renderer, Rect::new(0, 0, 10, 1), &ctx)
            .unwrap();

        assert!(image.pixels().is_none());
        assert!(renderer.output_text().ends_with("before"));
    }

    #[test]
    fn test_load_error_names_reference() {
        let err = load(&ImageSource::Reference("nope.png".into())).unwrap_err();
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn test_pixels_render_as_half_blocks() {
        let theme = Theme::headless();
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();
        let mut image = Image::from_rgba(RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255])));

        image
            .render(&mut renderer, Rect::new(0, 0, 2, 1), &ctx)
            .unwrap();

        assert_eq!(renderer.output_text(), "▀▀");
        assert_eq!(image.dimensions(), Some((4, 4)));
    }

    #[test]
    fn test_unmount_keeps_in_memory_pixels() {
        let mut image = Image::from_rgba(RgbaImage::new(2, 2));
        image.on_unmount();
        assert!(image.pixels().is_some());
    }
}
