//! Terminal abstraction - geometry and capability detection

use anyhow::Result;

/// Default cell size used when the terminal does not report pixel dimensions
const FALLBACK_CELL_WIDTH: u16 = 10;
const FALLBACK_CELL_HEIGHT: u16 = 20;

/// Terminal geometry in cells, with an estimate of the cell size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    /// Terminal width in columns
    pub cols: u16,
    /// Terminal height in rows
    pub rows: u16,
    /// Width of one cell in pixels
    pub cell_width: u16,
    /// Height of one cell in pixels
    pub cell_height: u16,
}

impl TerminalGeometry {
    /// Geometry with an explicit cell size
    pub fn new(cols: u16, rows: u16, cell_width: u16, cell_height: u16) -> Self {
        TerminalGeometry {
            cols,
            rows,
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
        }
    }

    /// Fixed 80x24 geometry used by headless rendering
    pub fn headless() -> Self {
        Self::new(80, 24, FALLBACK_CELL_WIDTH, FALLBACK_CELL_HEIGHT)
    }

    /// Query the live terminal
    ///
    /// Prefers the pixel-aware window size report and falls back to the plain
    /// cell size with estimated cell pixels.
    #[cfg(feature = "tui")]
    pub fn detect() -> Result<Self> {
        use anyhow::Context;

        if let Ok(size) = crossterm::terminal::window_size() {
            if size.columns > 0 && size.rows > 0 && size.width > 0 && size.height > 0 {
                return Ok(Self::new(
                    size.columns,
                    size.rows,
                    size.width / size.columns,
                    size.height / size.rows,
                ));
            }
        }

        let (cols, rows) = crossterm::terminal::size().context("Failed to get terminal size")?;
        Ok(Self::new(
            cols,
            rows,
            FALLBACK_CELL_WIDTH,
            FALLBACK_CELL_HEIGHT,
        ))
    }

    /// Without a live terminal backend there is nothing to query
    #[cfg(not(feature = "tui"))]
    pub fn detect() -> Result<Self> {
        Ok(Self::headless())
    }

    /// Pixel size of a block of cells
    pub fn pixels_for(&self, cols: u16, rows: u16) -> (u32, u32) {
        (
            cols as u32 * self.cell_width as u32,
            rows as u32 * self.cell_height as u32,
        )
    }
}

/// Terminal capability flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// Supports the Kitty graphics protocol
    pub kitty_graphics: bool,
    /// Supports 24-bit color
    pub truecolor: bool,
    /// Supports the 256-color palette
    pub colors_256: bool,
    /// Running inside tmux/screen
    pub in_multiplexer: bool,
}

impl TerminalCapabilities {
    /// Detect capabilities from the environment
    pub fn detect() -> Self {
        let term = std::env::var("TERM").unwrap_or_default();
        let colorterm = std::env::var("COLORTERM").unwrap_or_default();
        let kitty_window = std::env::var("KITTY_WINDOW_ID").is_ok();

        let truecolor =
            colorterm.contains("truecolor") || colorterm.contains("24bit") || kitty_window;

        TerminalCapabilities {
            kitty_graphics: kitty_window || term.contains("kitty"),
            truecolor,
            colors_256: truecolor || term.contains("256"),
            in_multiplexer: std::env::var("TMUX").is_ok() || term.starts_with("screen"),
        }
    }

    /// Deterministic capabilities for headless rendering and tests
    pub fn headless() -> Self {
        TerminalCapabilities {
            kitty_graphics: false,
            truecolor: true,
            colors_256: true,
            in_multiplexer: false,
        }
    }
}

/// Geometry and capabilities of the output terminal
#[derive(Debug, Clone, Copy)]
pub struct TerminalContext {
    pub geometry: TerminalGeometry,
    pub capabilities: TerminalCapabilities,
}

impl TerminalContext {
    /// Detect the current terminal
    pub fn detect() -> Result<Self> {
        Ok(TerminalContext {
            geometry: TerminalGeometry::detect()?,
            capabilities: TerminalCapabilities::detect(),
        })
    }

    /// Fixed context used by headless rendering
    pub fn headless() -> Self {
        TerminalContext {
            geometry: TerminalGeometry::headless(),
            capabilities: TerminalCapabilities::headless(),
        }
    }

    /// Re-read geometry after a resize
    pub fn refresh_geometry(&mut self) -> Result<()> {
        self.geometry = TerminalGeometry::detect()?;
        Ok(())
    }
}
