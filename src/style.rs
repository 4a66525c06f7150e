//! Style values for text and cells
//!
//! A `Style` is a small value type describing how a run of text looks. Widgets
//! compute it from their visual state and the theme turns it into escape codes.

use crate::terminal::TerminalCapabilities;
use crate::theme::Color;

/// Visual attributes of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl Style {
    /// Style with no attributes
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn dim(mut self, dim: bool) -> Self {
        self.dim = dim;
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Overlay `other` on top of this style; set fields in `other` win
    pub fn patch(mut self, other: Style) -> Self {
        self.fg = other.fg.or(self.fg);
        self.bg = other.bg.or(self.bg);
        self.bold |= other.bold;
        self.dim |= other.dim;
        self.underline |= other.underline;
        self.reverse |= other.reverse;
        self
    }

    /// True if rendering this style emits nothing
    pub fn is_plain(&self) -> bool {
        *self == Style::default()
    }

    /// Escape sequence selecting this style (empty for a plain style)
    pub fn to_ansi(&self, caps: &TerminalCapabilities) -> String {
        let mut out = String::new();
        if let Some(fg) = self.fg {
            out.push_str(&fg.fg(caps));
        }
        if let Some(bg) = self.bg {
            out.push_str(&bg.bg(caps));
        }
        if self.bold {
            out.push_str("\x1b[1m");
        }
        if self.dim {
            out.push_str("\x1b[2m");
        }
        if self.underline {
            out.push_str("\x1b[4m");
        }
        if self.reverse {
            out.push_str("\x1b[7m");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_style_emits_nothing() {
        let caps = TerminalCapabilities::headless();
        assert!(Style::new().is_plain());
        assert_eq!(Style::new().to_ansi(&caps), "");
    }

    #[test]
    fn test_attributes_render_in_order() {
        let caps = TerminalCapabilities::headless();
        let style = Style::new().fg(Color::white()).bold(true).underline(true);
        assert_eq!(
            style.to_ansi(&caps),
            "\x1b[38;2;255;255;255m\x1b[1m\x1b[4m"
        );
    }

    #[test]
    fn test_patch_overrides_colors_and_merges_flags() {
        let base = Style::new().fg(Color::gray()).dim(true);
        let patched = base.patch(Style::new().fg(Color::white()).bold(true));

        assert_eq!(patched.fg, Some(Color::white()));
        assert!(patched.dim);
        assert!(patched.bold);
    }
}
