//! pagekit - interactive content widgets for the terminal
//!
//! Three stateful widgets meant to be dropped into a content page:
//! - `ComparisonSlider`: two images split by a draggable divider
//! - `ExpandableSection`: a header that discloses a block of content
//! - `QuickQuiz`: one multiple-choice question with feedback
//!
//! Components keep their own interaction state and are redrawn in full each
//! frame. Images go out over the Kitty graphics protocol when the terminal
//! supports it and as truecolor half-blocks otherwise.

pub mod accessibility;
pub mod component;
pub mod components;
pub mod context;
pub mod error;
pub mod event;
pub mod graphics;
pub mod layout;
pub mod render;
pub mod style;
pub mod terminal;
pub mod theme;
pub mod widgets;

// Re-export commonly used types
pub use accessibility::{AccessibilityRole, AccessibilitySettings};
pub use component::{Component, Container};
pub use components::{Button, Card, Icon, IconKind, Image, RangeInput, Stack, Text};
pub use context::{RenderContext, UseAccessibility, UseTheme};
pub use error::WidgetError;
#[cfg(feature = "tui")]
pub use event::EventPoller;
pub use event::{Event, EventHandler, Key, MouseEvent};
pub use graphics::GraphicsBackend;
pub use layout::Rect;
pub use render::Renderer;
pub use style::Style;
pub use terminal::{TerminalCapabilities, TerminalContext, TerminalGeometry};
pub use theme::{BorderChars, BorderStyle, Color, Theme};
pub use widgets::{ComparisonSlider, ExpandableSection, QuickQuiz};
