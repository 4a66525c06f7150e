//! Building blocks the widgets are made from

pub mod button;
pub mod card;
pub mod icon;
pub mod image;
pub mod range_input;
pub mod stack;
pub mod text;

pub use button::{Button, ButtonVariant};
pub use card::Card;
pub use icon::{Icon, IconKind, Rotation};
pub use image::{Image, ImageSource};
pub use range_input::RangeInput;
pub use stack::Stack;
pub use text::{Text, TextAlign, TextRole};
