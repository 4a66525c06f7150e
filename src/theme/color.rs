//! Colors with degradation to the terminal's palette

use crate::terminal::TerminalCapabilities;

/// A theme color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// 24-bit color
    Rgb(u8, u8, u8),
    /// One of the 16 standard ANSI colors (0-15)
    Ansi(u8),
}

/// RGB approximations of the 16 ANSI colors, by index
const ANSI_PALETTE: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (170, 0, 0),
    (0, 170, 0),
    (170, 85, 0),
    (0, 0, 170),
    (170, 0, 170),
    (0, 170, 170),
    (170, 170, 170),
    (85, 85, 85),
    (255, 85, 85),
    (85, 255, 85),
    (255, 255, 85),
    (85, 85, 255),
    (255, 85, 255),
    (85, 255, 255),
    (255, 255, 255),
];

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    pub fn white() -> Self {
        Color::Rgb(255, 255, 255)
    }

    pub fn black() -> Self {
        Color::Rgb(0, 0, 0)
    }

    pub fn gray() -> Self {
        Color::Rgb(128, 128, 128)
    }

    /// RGB value of this color
    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Ansi(idx) => ANSI_PALETTE[(idx & 0x0f) as usize],
        }
    }

    /// Foreground escape sequence for the given terminal
    pub fn fg(&self, caps: &TerminalCapabilities) -> String {
        self.escape(caps, 38)
    }

    /// Background escape sequence for the given terminal
    pub fn bg(&self, caps: &TerminalCapabilities) -> String {
        self.escape(caps, 48)
    }

    fn escape(&self, caps: &TerminalCapabilities, layer: u8) -> String {
        if let Color::Ansi(idx) = *self {
            return ansi16_escape(idx & 0x0f, layer);
        }

        let (r, g, b) = self.to_rgb();
        if caps.truecolor {
            format!("\x1b[{};2;{};{};{}m", layer, r, g, b)
        } else if caps.colors_256 {
            format!("\x1b[{};5;{}m", layer, rgb_to_256(r, g, b))
        } else {
            ansi16_escape(nearest_ansi16(r, g, b), layer)
        }
    }
}

fn ansi16_escape(idx: u8, layer: u8) -> String {
    // 30-37 / 90-97 for foreground, 40-47 / 100-107 for background
    let base = if layer == 38 { 30 } else { 40 };
    let code = if idx < 8 {
        base + idx as u16
    } else {
        base + 60 + (idx - 8) as u16
    };
    format!("\x1b[{}m", code)
}

/// Map RGB onto the xterm 256-color cube or grayscale ramp
pub(crate) fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            249..=255 => 231,
            _ => 232 + (r - 8) / 10,
        };
    }

    let scale = |c: u8| (c as u16 * 5 / 255) as u8;
    16 + 36 * scale(r) + 6 * scale(g) + scale(b)
}

/// Closest of the 16 ANSI colors by squared distance
pub(crate) fn nearest_ansi16(r: u8, g: u8, b: u8) -> u8 {
    let distance = |(pr, pg, pb): (u8, u8, u8)| {
        let dr = r as i32 - pr as i32;
        let dg = g as i32 - pg as i32;
        let db = b as i32 - pb as i32;
        dr * dr + dg * dg + db * db
    };

    ANSI_PALETTE
        .iter()
        .enumerate()
        .min_by_key(|(_, rgb)| distance(**rgb))
        .map(|(idx, _)| idx as u8)
        .unwrap_or(7)
}
