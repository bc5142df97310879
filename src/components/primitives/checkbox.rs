//! Checkbox Component

use gpui::{
    App, ClickEvent, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window, div, prelude::*, px,
};

use crate::theme::colors::RosterColors;
use crate::theme::metrics::Metrics;

/// A checkbox component
#[derive(IntoElement)]
pub struct Checkbox {
    id: ElementId,
    checked: bool,
    label: Option<SharedString>,
    on_change: Option<Box<dyn Fn(bool, &mut Window, &mut App) + 'static>>,
}

impl Checkbox {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            checked: false,
            label: None,
            on_change: None,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Called with the new checked state
    pub fn on_change(mut self, handler: impl Fn(bool, &mut Window, &mut App) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }
}

impl RenderOnce for Checkbox {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let checked = self.checked;

        let (box_bg, border_color) = if checked {
            (RosterColors::accent(), RosterColors::accent())
        } else {
            (RosterColors::surface_raised(), RosterColors::border())
        };

        div()
            .id(self.id)
            .flex()
            .items_center()
            .gap_2()
            .cursor_pointer()
            .child(
                div()
                    .size(px(Metrics::CHECKBOX_SIZE))
                    .rounded(px(Metrics::RADIUS_SM))
                    .border_1()
                    .border_color(border_color)
                    .bg(box_bg)
                    .flex()
                    .items_center()
                    .justify_center()
                    .text_color(RosterColors::text_primary())
                    .text_size(px(Metrics::TEXT_XS))
                    .when(checked, |el| el.child("✓")),
            )
            .when_some(self.label, |el, label| {
                el.child(
                    div()
                        .text_sm()
                        .text_color(RosterColors::text_secondary())
                        .child(label),
                )
            })
            .when_some(self.on_change, |el, handler| {
                el.on_click(move |_event: &ClickEvent, window, cx| {
                    // rows underneath must not see the click
                    cx.stop_propagation();
                    handler(!checked, window, cx);
                })
            })
    }
}
