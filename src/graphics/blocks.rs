//! Half-block backend: each cell shows two vertical pixels via `▀`

use super::ImageRenderer;
use crate::layout::Rect;
use crate::terminal::TerminalCapabilities;
use crate::theme::Color;
use anyhow::Result;
use image::{imageops, Rgba, RgbaImage};
use std::io::Write;

const UPPER_HALF: char = '▀';

impl ImageRenderer {
    pub(super) fn render_blocks<W: Write>(
        &mut self,
        writer: &mut W,
        image: &RgbaImage,
        area: Rect,
        caps: &TerminalCapabilities,
    ) -> Result<()> {
        let (px_width, px_height) = (area.width as u32, area.height as u32 * 2);

        let resized;
        let pixels = if image.dimensions() == (px_width, px_height) {
            image
        } else {
            resized = imageops::resize(image, px_width, px_height, imageops::FilterType::Nearest);
            &resized
        };

        for cy in 0..area.height as u32 {
            self.line_buffer.clear();

            for cx in 0..px_width {
                let top = flatten(pixels.get_pixel(cx, cy * 2));
                let bottom = flatten(pixels.get_pixel(cx, cy * 2 + 1));
                self.line_buffer.push_str(&top.fg(caps));
                self.line_buffer.push_str(&bottom.bg(caps));
                self.line_buffer.push(UPPER_HALF);
            }

            write!(
                writer,
                "\x1b[{};{}H{}\x1b[0m",
                area.y as u32 + cy + 1,
                area.x + 1,
                self.line_buffer
            )?;
        }

        Ok(())
    }
}

/// Composite a pixel over black
fn flatten(pixel: &Rgba<u8>) -> Color {
    let [r, g, b, a] = pixel.0;
    let scale = |c: u8| (c as u16 * a as u16 / 255) as u8;
    Color::rgb(scale(r), scale(g), scale(b))
}
