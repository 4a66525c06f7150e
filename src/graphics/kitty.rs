//! Kitty graphics protocol backend

use super::ImageRenderer;
use crate::layout::Rect;
use anyhow::Result;
use base64::Engine;
use image::{ImageFormat, RgbaImage};
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};

/// Maximum base64 payload per escape sequence
const CHUNK_SIZE: usize = 4096;

impl ImageRenderer {
    /// Transmit and place a PNG-encoded image scaled into `area`
    pub(super) fn render_kitty<W: Write>(
        &mut self,
        writer: &mut W,
        image: &RgbaImage,
        area: Rect,
        image_id: u32,
    ) -> Result<()> {
        let encoded = encode_png_base64(image)?;
        let total_chunks = encoded.len().div_ceil(CHUNK_SIZE);

        write!(writer, "\x1b[{};{}H", area.y + 1, area.x + 1)?;

        for (i, chunk) in encoded.as_bytes().chunks(CHUNK_SIZE).enumerate() {
            let more = if i + 1 < total_chunks { 1 } else { 0 };

            self.line_buffer.clear();
            if i == 0 {
                // z=-1 keeps text overlays visible above the image
                write!(
                    self.line_buffer,
                    "\x1b_Ga=T,f=100,t=d,i={},c={},r={},z=-1,C=1,q=2,m={};",
                    image_id, area.width, area.height, more
                )?;
            } else {
                write!(self.line_buffer, "\x1b_Gm={};", more)?;
            }
            // base64 output is ASCII
            self.line_buffer.push_str(&String::from_utf8_lossy(chunk));
            self.line_buffer.push_str("\x1b\\");

            let command = std::mem::take(&mut self.line_buffer);
            self.write_kitty_command(writer, &command)?;
            self.line_buffer = command;
        }

        Ok(())
    }
}

/// PNG-encode and base64 the image
fn encode_png_base64(image: &RgbaImage) -> Result<String> {
    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(png))
}
