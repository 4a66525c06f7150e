//! Graphics backends for placing images in the terminal
//!
//! - Kitty graphics protocol for terminals that support it (with tmux passthrough)
//! - Truecolor half-blocks everywhere else: two vertical pixels per cell

mod blocks;
mod kitty;

use crate::layout::Rect;
use crate::terminal::{TerminalCapabilities, TerminalGeometry};
use anyhow::Result;
use image::RgbaImage;
use std::io::Write;

/// Environment variable that forces a backend (`kitty` or `blocks`)
pub const BACKEND_ENV: &str = "PAGEKIT_GRAPHICS";

/// Default capacity for per-line escape buffers
pub(super) const LINE_BUFFER_CAPACITY: usize = 1024;

/// Image rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsBackend {
    /// Kitty graphics protocol
    Kitty,
    /// Unicode upper-half blocks with fg/bg colors (universal fallback)
    HalfBlocks,
}

impl GraphicsBackend {
    /// Pick a backend from an override value or the terminal's capabilities
    pub fn select(override_value: Option<&str>, caps: &TerminalCapabilities) -> Self {
        match override_value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("kitty") => GraphicsBackend::Kitty,
            Some("blocks") | Some("halfblocks") => GraphicsBackend::HalfBlocks,
            Some(other) => {
                tracing::warn!(value = other, "unknown {} value, detecting", BACKEND_ENV);
                Self::detect(caps)
            }
            None => Self::detect(caps),
        }
    }

    /// Pick a backend honoring `PAGEKIT_GRAPHICS`
    pub fn from_env(caps: &TerminalCapabilities) -> Self {
        let value = std::env::var(BACKEND_ENV).ok();
        Self::select(value.as_deref(), caps)
    }

    /// Best backend the terminal supports
    pub fn detect(caps: &TerminalCapabilities) -> Self {
        if caps.kitty_graphics {
            GraphicsBackend::Kitty
        } else {
            GraphicsBackend::HalfBlocks
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            GraphicsBackend::Kitty => "Kitty Graphics",
            GraphicsBackend::HalfBlocks => "Unicode Half-Blocks",
        }
    }

    /// Pixel resolution an image should have to fill `cols` x `rows` cells
    pub fn pixel_size(&self, cols: u16, rows: u16, geometry: &TerminalGeometry) -> (u32, u32) {
        match self {
            GraphicsBackend::Kitty => geometry.pixels_for(cols, rows),
            GraphicsBackend::HalfBlocks => (cols as u32, rows as u32 * 2),
        }
    }
}

/// Writes images for the selected backend
pub struct ImageRenderer {
    pub(super) backend: GraphicsBackend,
    pub(super) in_tmux: bool,
    pub(super) line_buffer: String,
    /// Kitty image ids handed out since the last clear
    next_image_id: u32,
}

impl ImageRenderer {
    pub fn new(backend: GraphicsBackend, in_tmux: bool) -> Self {
        ImageRenderer {
            backend,
            in_tmux,
            line_buffer: String::with_capacity(LINE_BUFFER_CAPACITY),
            next_image_id: 1,
        }
    }

    pub fn backend(&self) -> GraphicsBackend {
        self.backend
    }

    /// Draw `image` scaled to fill `area`
    pub fn render_rgba<W: Write>(
        &mut self,
        writer: &mut W,
        image: &RgbaImage,
        area: Rect,
        caps: &TerminalCapabilities,
    ) -> Result<()> {
        if area.is_empty() || image.width() == 0 || image.height() == 0 {
            return Ok(());
        }

        match self.backend {
            GraphicsBackend::Kitty => {
                let id = self.next_image_id;
                self.next_image_id = self.next_image_id.wrapping_add(1).max(1);
                self.render_kitty(writer, image, area, id)
            }
            GraphicsBackend::HalfBlocks => self.render_blocks(writer, image, area, caps),
        }
    }

    /// Remove all placed images (Kitty only; half-blocks are overwritten by text)
    pub fn delete_all_images<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        self.next_image_id = 1;

        if self.backend != GraphicsBackend::Kitty {
            return Ok(());
        }
        self.write_kitty_command(writer, "\x1b_Ga=d,d=A,q=2\x1b\\")
    }

    /// Write a Kitty command, wrapping it for tmux passthrough when needed
    pub(super) fn write_kitty_command<W: Write>(&self, writer: &mut W, command: &str) -> Result<()> {
        if self.in_tmux {
            let escaped = command.replace('\x1b', "\x1b\x1b");
            write!(writer, "\x1bPtmux;{}\x1b\\", escaped)?;
        } else {
            writer.write_all(command.as_bytes())?;
        }
        Ok(())
    }
}
