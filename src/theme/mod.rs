//! Theming: palette, border glyphs, and escape-code generation

mod color;

pub use color::Color;

use crate::accessibility::AccessibilitySettings;
use crate::style::Style;
use crate::terminal::TerminalCapabilities;

/// Border style for cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    None,
    Single,
    Rounded,
    Heavy,
    Ascii,
}

/// Colors and glyph choices shared by all widgets
#[derive(Debug, Clone)]
pub struct Theme {
    pub text_fg: Color,
    pub heading_fg: Color,
    pub muted_fg: Color,
    pub accent: Color,
    pub success_fg: Color,
    pub error_fg: Color,

    pub selected_fg: Color,
    pub selected_bg: Color,

    pub border_color: Color,
    pub focus_border_color: Color,
    pub divider_color: Color,

    pub overlay_fg: Color,
    pub overlay_bg: Color,

    pub border_style: BorderStyle,

    pub accessibility: AccessibilitySettings,

    caps: TerminalCapabilities,
}

impl Theme {
    /// Create a theme for the given terminal, reading accessibility settings
    /// from the environment
    pub fn new(caps: TerminalCapabilities) -> Self {
        Self::with_accessibility(caps, AccessibilitySettings::from_env())
    }

    /// Create a theme with explicit accessibility settings
    pub fn with_accessibility(caps: TerminalCapabilities, accessibility: AccessibilitySettings) -> Self {
        let theme = Theme {
            text_fg: Color::rgb(220, 220, 220),
            heading_fg: Color::white(),
            muted_fg: Color::gray(),
            accent: Color::rgb(100, 150, 255),
            success_fg: Color::rgb(100, 220, 120),
            error_fg: Color::rgb(255, 100, 100),

            selected_fg: Color::white(),
            selected_bg: Color::rgb(40, 60, 110),

            border_color: Color::rgb(90, 90, 100),
            focus_border_color: Color::rgb(100, 150, 255),
            divider_color: Color::white(),

            overlay_fg: Color::white(),
            overlay_bg: Color::rgb(20, 20, 25),

            border_style: BorderStyle::Rounded,

            accessibility,

            caps,
        };

        if theme.accessibility.high_contrast {
            theme.into_high_contrast()
        } else {
            theme
        }
    }

    /// Deterministic theme for headless rendering and tests
    pub fn headless() -> Self {
        Self::with_accessibility(TerminalCapabilities::headless(), AccessibilitySettings::new())
    }

    /// Swap the palette for maximum contrast
    fn into_high_contrast(mut self) -> Self {
        self.text_fg = Color::white();
        self.muted_fg = Color::rgb(200, 200, 200);
        self.accent = Color::rgb(255, 255, 0);
        self.success_fg = Color::rgb(0, 255, 0);
        self.error_fg = Color::rgb(255, 60, 60);
        self.selected_fg = Color::black();
        self.selected_bg = Color::rgb(255, 255, 0);
        self.border_color = Color::white();
        self.focus_border_color = Color::rgb(255, 255, 0);
        self.overlay_bg = Color::black();
        self.border_style = BorderStyle::Heavy;
        self
    }

    /// Capabilities this theme degrades colors for
    pub fn capabilities(&self) -> &TerminalCapabilities {
        &self.caps
    }

    /// Escape codes for a style on this terminal
    pub fn paint(&self, style: &Style) -> String {
        style.to_ansi(&self.caps)
    }

    pub fn text_style(&self) -> Style {
        Style::new().fg(self.text_fg)
    }

    pub fn heading_style(&self) -> Style {
        Style::new().fg(self.heading_fg).bold(true)
    }

    pub fn muted_style(&self) -> Style {
        Style::new().fg(self.muted_fg).dim(true)
    }

    pub fn accent_style(&self) -> Style {
        Style::new().fg(self.accent)
    }

    pub fn success_style(&self) -> Style {
        Style::new().fg(self.success_fg).bold(true)
    }

    pub fn error_style(&self) -> Style {
        Style::new().fg(self.error_fg).bold(true)
    }

    pub fn selected_style(&self) -> Style {
        Style::new().fg(self.selected_fg).bg(self.selected_bg)
    }

    pub fn overlay_style(&self) -> Style {
        Style::new().fg(self.overlay_fg).bg(self.overlay_bg).bold(true)
    }

    pub fn frame_style(&self, focused: bool) -> Style {
        let color = if focused {
            self.focus_border_color
        } else {
            self.border_color
        };
        Style::new().fg(color)
    }

    /// Glyphs for the current border style
    pub fn border_chars(&self) -> BorderChars {
        match self.border_style {
            BorderStyle::None => BorderChars::uniform(' '),
            BorderStyle::Single => BorderChars::new('─', '│', ['┌', '┐', '└', '┘']),
            BorderStyle::Rounded => BorderChars::new('─', '│', ['╭', '╮', '╰', '╯']),
            BorderStyle::Heavy => BorderChars::new('━', '┃', ['┏', '┓', '┗', '┛']),
            BorderStyle::Ascii => BorderChars::new('-', '|', ['+', '+', '+', '+']),
        }
    }
}

/// Border characters for drawing boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderChars {
    /// Corners in order: top-left, top-right, bottom-left, bottom-right
    pub fn new(horizontal: char, vertical: char, corners: [char; 4]) -> Self {
        BorderChars {
            horizontal,
            vertical,
            top_left: corners[0],
            top_right: corners[1],
            bottom_left: corners[2],
            bottom_right: corners[3],
        }
    }

    fn uniform(ch: char) -> Self {
        Self::new(ch, ch, [ch; 4])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_theme_uses_rounded_borders() {
        let theme = Theme::headless();
        assert_eq!(theme.border_chars().top_left, '╭');
        assert!(!theme.paint(&theme.heading_style()).is_empty());
    }

    #[test]
    fn test_high_contrast_palette() {
        let mut settings = AccessibilitySettings::new();
        settings.high_contrast = true;
        let theme = Theme::with_accessibility(TerminalCapabilities::headless(), settings);

        assert_eq!(theme.text_fg, Color::white());
        assert_eq!(theme.border_style, BorderStyle::Heavy);
        assert_eq!(theme.border_chars().horizontal, '━');
    }

    #[test]
    fn test_focus_changes_border_color() {
        let theme = Theme::headless();
        assert_ne!(theme.frame_style(true), theme.frame_style(false));
    }
}
