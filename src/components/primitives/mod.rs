//! Primitive Components
//!
//! Basic building blocks like buttons, inputs, etc.

pub mod button;
pub mod checkbox;
pub mod text_input;

pub use button::{Button, ButtonSize, ButtonVariant};
pub use checkbox::Checkbox;
pub use text_input::{TextInput, TextInputEvent, text_input};
