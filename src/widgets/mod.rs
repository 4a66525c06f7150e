//! Content page widgets

pub mod comparison_slider;
pub mod expandable_section;
pub mod quick_quiz;

pub use comparison_slider::{composite, ComparisonSlider, SliderState, SplitColumns, SplitGeometry};
pub use expandable_section::{
    toggle_icon, ExpandableSection, ExpansionState, HeightTransition, MAX_EXPANDED_ROWS,
};
pub use quick_quiz::{
    control_visual, option_visual, ControlVisual, OptionVisual, QuickQuiz, QuizPhase, QuizState,
};
