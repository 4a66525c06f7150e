//! Rendering context - provides theme and accessibility settings to components

use crate::accessibility::AccessibilitySettings;
use crate::theme::Theme;

/// Context passed down the component tree during rendering
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Current theme
    pub theme: &'a Theme,

    /// Accessibility settings
    pub accessibility: &'a AccessibilitySettings,

    /// Whether the component being rendered holds keyboard focus
    pub focused: bool,
}

impl<'a> RenderContext<'a> {
    /// Context using the theme's own accessibility settings
    pub fn new(theme: &'a Theme) -> Self {
        RenderContext {
            theme,
            accessibility: &theme.accessibility,
            focused: false,
        }
    }

    /// Child context with different accessibility settings
    pub fn with_accessibility(&self, accessibility: &'a AccessibilitySettings) -> Self {
        RenderContext {
            accessibility,
            ..*self
        }
    }

    /// Child context with the focus flag set
    pub fn with_focus(&self, focused: bool) -> Self {
        RenderContext { focused, ..*self }
    }
}

/// Hook trait for accessing the theme from context
pub trait UseTheme {
    fn use_theme<'a>(&self, ctx: &RenderContext<'a>) -> &'a Theme {
        ctx.theme
    }
}

/// Hook trait for accessing accessibility settings from context
pub trait UseAccessibility {
    fn use_accessibility<'a>(&self, ctx: &RenderContext<'a>) -> &'a AccessibilitySettings {
        ctx.accessibility
    }

    fn use_reduced_motion(&self, ctx: &RenderContext) -> bool {
        ctx.accessibility.prefer_reduced_motion
    }
}

impl<T> UseTheme for T {}
impl<T> UseAccessibility for T {}
