//! Header Component
//!
//! Application header with logo, title, loader status and language switcher.

use gpui::{
    App, ClickEvent, InteractiveElement, IntoElement, ParentElement, RenderOnce, Rgba,
    SharedString, StatefulInteractiveElement, Styled, Window, div, prelude::*, px,
};

use crate::theme::colors::RosterColors;

/// Header component
#[derive(IntoElement)]
pub struct Header {
    title: SharedString,
    status: Option<(SharedString, Rgba)>,
    locale_label: SharedString,
    on_locale_toggle: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
}

impl Header {
    pub fn new(title: impl Into<SharedString>, locale_label: impl Into<SharedString>) -> Self {
        Self {
            title: title.into(),
            status: None,
            locale_label: locale_label.into(),
            on_locale_toggle: None,
        }
    }

    /// Status dot and label shown left of the language switcher
    pub fn status(mut self, label: impl Into<SharedString>, color: Rgba) -> Self {
        self.status = Some((label.into(), color));
        self
    }

    pub fn on_locale_toggle(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_locale_toggle = Some(Box::new(handler));
        self
    }
}

impl RenderOnce for Header {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        div()
            .h(px(52.0))
            .w_full()
            .flex()
            .flex_shrink_0()
            .items_center()
            .justify_between()
            .px_4()
            .bg(RosterColors::surface())
            .border_b_1()
            .border_color(RosterColors::border())
            // Left side: Logo and title
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_3()
                    .child(
                        div()
                            .size(px(32.0))
                            .rounded_md()
                            .bg(RosterColors::accent())
                            .flex()
                            .items_center()
                            .justify_center()
                            .text_color(RosterColors::button_primary_text())
                            .font_weight(gpui::FontWeight::BOLD)
                            .child("R"),
                    )
                    .child(
                        div()
                            .text_color(RosterColors::text_primary())
                            .text_size(px(18.0))
                            .font_weight(gpui::FontWeight::SEMIBOLD)
                            .child(self.title),
                    ),
            )
            // Right side: status and language switcher
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_6()
                    .when_some(self.status, |el, (label, color)| {
                        el.child(
                            div()
                                .flex()
                                .items_center()
                                .gap_1()
                                .child(div().text_color(color).text_size(px(10.0)).child("●"))
                                .child(
                                    div()
                                        .text_color(RosterColors::text_secondary())
                                        .text_size(px(12.0))
                                        .child(label),
                                ),
                        )
                    })
                    .child(
                        div()
                            .id("lang-switcher")
                            .px_3()
                            .py_1()
                            .rounded_md()
                            .bg(RosterColors::surface_raised())
                            .text_color(RosterColors::text_primary())
                            .text_size(px(13.0))
                            .cursor_pointer()
                            .hover(|s| s.bg(RosterColors::row_hover()))
                            .when_some(self.on_locale_toggle, |el, handler| el.on_click(handler))
                            .child(self.locale_label),
                    ),
            )
    }
}
