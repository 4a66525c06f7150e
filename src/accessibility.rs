//! Accessibility settings and roles

/// Accessibility preferences, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibilitySettings {
    /// Use high contrast colors
    pub high_contrast: bool,

    /// Skip animations (sections snap open and closed)
    pub prefer_reduced_motion: bool,

    /// A screen reader is active
    pub screen_reader_enabled: bool,
}

impl AccessibilitySettings {
    /// Default settings: everything off
    pub fn new() -> Self {
        Self {
            high_contrast: false,
            prefer_reduced_motion: false,
            screen_reader_enabled: false,
        }
    }

    /// Detect settings from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = |key: &str| {
            lookup(key)
                .map(|value| !matches!(value.trim(), "" | "0" | "false" | "no" | "off"))
                .unwrap_or(false)
        };

        Self {
            high_contrast: enabled("ACCESSIBILITY_HIGH_CONTRAST"),
            prefer_reduced_motion: enabled("ACCESSIBILITY_REDUCED_MOTION"),
            screen_reader_enabled: enabled("SCREEN_READER"),
        }
    }
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Semantic role a component exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibilityRole {
    None,
    Button,
    Slider,
    Image,
    Heading { level: u8 },
    Region,
    RadioGroup,
    Radio,
    Text,
}
