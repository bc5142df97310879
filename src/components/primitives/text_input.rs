//! TextInput Component
//!
//! Single-line input driven by key-down events. Emits
//! [`TextInputEvent::Changed`] after every edit.

use gpui::{
    Context, ElementId, Entity, EventEmitter, FocusHandle, Focusable, InteractiveElement,
    IntoElement, KeyDownEvent, ParentElement, Render, SharedString, StatefulInteractiveElement,
    Styled, Window, div, prelude::*, px,
};

use crate::theme::colors::RosterColors;

/// Emitted by [`TextInput`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInputEvent {
    Changed(String),
}

/// A text input component
pub struct TextInput {
    id: ElementId,
    value: String,
    placeholder: SharedString,
    focus_handle: FocusHandle,
}

impl EventEmitter<TextInputEvent> for TextInput {}

impl TextInput {
    pub fn new(id: impl Into<ElementId>, cx: &mut Context<Self>) -> Self {
        Self {
            id: id.into(),
            value: String::new(),
            placeholder: SharedString::default(),
            focus_handle: cx.focus_handle(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value and notify subscribers
    pub fn set_value(&mut self, value: impl Into<String>, cx: &mut Context<Self>) {
        let value = value.into();
        if value != self.value {
            self.value = value;
            cx.emit(TextInputEvent::Changed(self.value.clone()));
            cx.notify();
        }
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<SharedString>) {
        self.placeholder = placeholder.into();
    }

    fn on_key_down(&mut self, event: &KeyDownEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let keystroke = &event.keystroke;
        if keystroke.modifiers.control || keystroke.modifiers.platform {
            return;
        }
        if let Some(value) = edit(&self.value, &keystroke.key, keystroke.key_char.as_deref()) {
            self.set_value(value, cx);
            cx.stop_propagation();
        }
    }
}

/// Value after one key press, or `None` when the key does not edit
pub fn edit(value: &str, key: &str, key_char: Option<&str>) -> Option<String> {
    match key {
        "backspace" => {
            let mut value = value.to_string();
            value.pop().map(|_| value)
        }
        "escape" => (!value.is_empty()).then(String::new),
        "enter" | "tab" => None,
        _ => key_char
            .filter(|text| !text.is_empty() && text.chars().all(|c| !c.is_control()))
            .map(|text| format!("{value}{text}")),
    }
}

impl Focusable for TextInput {
    fn focus_handle(&self, _cx: &gpui::App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for TextInput {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let is_focused = self.focus_handle.is_focused(window);
        let border_color = if is_focused {
            RosterColors::border_focus()
        } else {
            RosterColors::border()
        };

        let (display_text, text_color) = if self.value.is_empty() {
            (self.placeholder.clone(), RosterColors::text_muted())
        } else {
            (
                SharedString::from(self.value.clone()),
                RosterColors::text_primary(),
            )
        };

        div()
            .id(self.id.clone())
            .track_focus(&self.focus_handle)
            .on_key_down(cx.listener(Self::on_key_down))
            .on_click(cx.listener(|this, _event, window, _cx| {
                this.focus_handle.focus(window);
            }))
            .flex()
            .items_center()
            .gap_2()
            .px_3()
            .py_2()
            .bg(RosterColors::surface_raised())
            .border_1()
            .border_color(border_color)
            .rounded(px(10.0))
            .text_color(text_color)
            .text_sm()
            .min_w(px(240.0))
            .cursor_text()
            .child(div().text_color(RosterColors::text_muted()).child("⌕"))
            .child(display_text)
            .when(is_focused, |el| {
                el.child(div().w(px(1.0)).h(px(16.0)).bg(RosterColors::accent()))
            })
    }
}

/// Create a text input entity
pub fn text_input<V: 'static>(
    id: impl Into<ElementId>,
    placeholder: impl Into<SharedString>,
    cx: &mut Context<V>,
) -> Entity<TextInput> {
    let id = id.into();
    let placeholder = placeholder.into();
    cx.new(|cx| {
        let mut input = TextInput::new(id, cx);
        input.set_placeholder(placeholder);
        input
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace() {
        assert_eq!(edit("re", "e", Some("e")).as_deref(), Some("ree"));
        assert_eq!(edit("ree", "backspace", None).as_deref(), Some("re"));
        assert_eq!(edit("", "backspace", None), None);
    }

    #[test]
    fn test_escape_clears() {
        assert_eq!(edit("reed", "escape", None).as_deref(), Some(""));
        assert_eq!(edit("", "escape", None), None);
    }

    #[test]
    fn test_non_text_keys_ignored() {
        assert_eq!(edit("a", "left", None), None);
        assert_eq!(edit("a", "enter", Some("\n")), None);
        assert_eq!(edit("a", "space", Some(" ")).as_deref(), Some("a "));
    }
}
