//! Rendering backend - buffered terminal output, headless capture, and images
//!
//! All drawing goes through a single buffered sink. A live renderer flushes it
//! to stdout; a headless renderer keeps it in memory so tests can inspect it.

use crate::graphics::{GraphicsBackend, ImageRenderer};
use crate::layout::{text_width, Rect};
use crate::style::Style;
use crate::terminal::TerminalContext;
use anyhow::Result;
use image::RgbaImage;
use std::io::{self, BufWriter, Write};

/// Default buffer capacity for write batching (16KB)
const WRITE_BUFFER_CAPACITY: usize = 16 * 1024;

/// Where rendered bytes go
enum Sink {
    Terminal(BufWriter<io::Stdout>),
    Capture(Vec<u8>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Terminal(w) => w.write(buf),
            Sink::Capture(v) => v.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Terminal(w) => w.flush(),
            Sink::Capture(_) => Ok(()),
        }
    }
}

/// Immediate-mode renderer that components draw into each frame
pub struct Renderer {
    sink: Sink,
    context: TerminalContext,
    image_renderer: ImageRenderer,
    in_alt_screen: bool,
}

impl Renderer {
    /// Renderer for the live terminal, with the backend chosen from the
    /// environment and detected capabilities
    pub fn new() -> Result<Self> {
        let context = TerminalContext::detect()?;
        let backend = GraphicsBackend::from_env(&context.capabilities);
        Ok(Self::with_parts(
            Sink::Terminal(BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, io::stdout())),
            context,
            backend,
        ))
    }

    /// Renderer for the live terminal with a forced graphics backend
    pub fn with_backend(backend: GraphicsBackend) -> Result<Self> {
        let context = TerminalContext::detect()?;
        Ok(Self::with_parts(
            Sink::Terminal(BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, io::stdout())),
            context,
            backend,
        ))
    }

    /// Renderer that captures output in memory (80x24, truecolor, half-blocks)
    pub fn headless() -> Self {
        Self::with_parts(
            Sink::Capture(Vec::new()),
            TerminalContext::headless(),
            GraphicsBackend::HalfBlocks,
        )
    }

    fn with_parts(sink: Sink, context: TerminalContext, backend: GraphicsBackend) -> Self {
        tracing::info!(
            backend = backend.name(),
            cols = context.geometry.cols,
            rows = context.geometry.rows,
            "renderer ready"
        );
        let in_tmux = context.capabilities.in_multiplexer;
        Renderer {
            sink,
            context,
            image_renderer: ImageRenderer::new(backend, in_tmux),
            in_alt_screen: false,
        }
    }

    pub fn graphics_backend(&self) -> GraphicsBackend {
        self.image_renderer.backend()
    }

    pub fn context(&self) -> &TerminalContext {
        &self.context
    }

    /// Re-read terminal geometry (call after a resize event)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        if matches!(self.sink, Sink::Terminal(_)) {
            self.context.refresh_geometry()?;
        }
        Ok(())
    }

    /// Enter the alternate screen (flushes immediately)
    pub fn enter_alt_screen(&mut self) -> Result<()> {
        if !self.in_alt_screen {
            write!(self.sink, "\x1b[?1049h")?;
            self.sink.flush()?;
            self.in_alt_screen = true;
        }
        Ok(())
    }

    /// Leave the alternate screen (flushes immediately)
    pub fn exit_alt_screen(&mut self) -> Result<()> {
        if self.in_alt_screen {
            write!(self.sink, "\x1b[?1049l")?;
            self.sink.flush()?;
            self.in_alt_screen = false;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        write!(self.sink, "\x1b[2J")?;
        Ok(())
    }

    /// Move cursor to a cell (0-indexed)
    #[inline]
    pub fn move_cursor(&mut self, col: u16, row: u16) -> Result<()> {
        write!(self.sink, "\x1b[{};{}H", row + 1, col + 1)?;
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> Result<()> {
        write!(self.sink, "\x1b[?25l")?;
        Ok(())
    }

    pub fn show_cursor(&mut self) -> Result<()> {
        write!(self.sink, "\x1b[?25h")?;
        Ok(())
    }

    /// Write text at the cursor
    #[inline]
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        self.sink.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write text with a style, resetting attributes afterwards
    pub fn write_styled(&mut self, text: &str, style: &Style) -> Result<()> {
        if style.is_plain() {
            return self.write_text(text);
        }
        let codes = style.to_ansi(&self.context.capabilities);
        write!(self.sink, "{}{}\x1b[0m", codes, text)?;
        Ok(())
    }

    /// Move to a cell and write styled text there
    pub fn draw_text(&mut self, col: u16, row: u16, text: &str, style: &Style) -> Result<()> {
        self.move_cursor(col, row)?;
        self.write_styled(text, style)
    }

    /// Fill a rectangle with a character
    pub fn fill(&mut self, area: Rect, ch: char, style: &Style) -> Result<()> {
        if area.is_empty() {
            return Ok(());
        }
        let line: String = std::iter::repeat(ch).take(area.width as usize).collect();
        for row in area.y..area.bottom() {
            self.draw_text(area.x, row, &line, style)?;
        }
        Ok(())
    }

    /// Blank a rectangle
    pub fn clear_area(&mut self, area: Rect) -> Result<()> {
        self.fill(area, ' ', &Style::new())
    }

    /// Pixel size an image should be composed at to fill `area`
    pub fn image_pixel_size(&self, area: Rect) -> (u32, u32) {
        self.graphics_backend()
            .pixel_size(area.width, area.height, &self.context.geometry)
    }

    /// Draw an RGBA image scaled into `area`
    pub fn render_image(&mut self, image: &RgbaImage, area: Rect) -> Result<()> {
        let caps = self.context.capabilities;
        self.image_renderer
            .render_rgba(&mut self.sink, image, area, &caps)
    }

    /// Remove previously placed images
    pub fn clear_images(&mut self) -> Result<()> {
        self.image_renderer.delete_all_images(&mut self.sink)
    }

    /// Start a frame: hide the cursor and drop last frame's images
    pub fn begin_frame(&mut self) -> Result<()> {
        self.hide_cursor()?;
        self.clear_images()
    }

    /// Finish a frame and push everything to the terminal
    pub fn end_frame(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Captured bytes of a headless renderer (empty for a live one)
    pub fn output(&self) -> &[u8] {
        match &self.sink {
            Sink::Capture(buf) => buf,
            Sink::Terminal(_) => &[],
        }
    }

    /// Captured output as text, with escape sequences removed
    pub fn output_text(&self) -> String {
        strip_ansi(&String::from_utf8_lossy(self.output()))
    }

    /// Drop captured output
    pub fn reset_output(&mut self) {
        if let Sink::Capture(buf) = &mut self.sink {
            buf.clear();
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        let _ = self.exit_alt_screen();
        let _ = self.show_cursor();
        let _ = self.sink.flush();
    }
}

/// Remove CSI and APC/DCS escape sequences, keeping printable text
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('[') => {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some('_') | Some('P') => {
                while let Some(c) = chars.next() {
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    out
}

/// Width-aware helper: pad or cut `text` to exactly `width` cells
pub fn fit_to_width(text: &str, width: usize) -> String {
    let cut = crate::layout::truncate(text, width);
    let pad = width.saturating_sub(text_width(&cut));
    format!("{}{}", cut, " ".repeat(pad))
}
