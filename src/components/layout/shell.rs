//! Shell Component
//!
//! Window frame of the roster: a header bar on top, the main column below
//! it, and an optional side panel (player profile) docked to the right.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ header                               │
//! ├───────────────────────────┬──────────┤
//! │ main (toolbar, list ...)  │  aside   │
//! └───────────────────────────┴──────────┘
//! ```

use gpui::{AnyElement, App, IntoElement, ParentElement, RenderOnce, Styled, Window, div, prelude::*, px};

use crate::theme::colors::RosterColors;
use crate::theme::metrics::Metrics;

#[derive(IntoElement, Default)]
pub struct Shell {
    header: Option<AnyElement>,
    main: Vec<AnyElement>,
    aside: Option<AnyElement>,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, header: impl IntoElement) -> Self {
        self.header = Some(header.into_any_element());
        self
    }

    /// Stacked into the main column, top to bottom
    pub fn child(mut self, child: impl IntoElement) -> Self {
        self.main.push(child.into_any_element());
        self
    }

    /// Side panel; `None` gives the main column the full width
    pub fn aside(mut self, aside: Option<impl IntoElement>) -> Self {
        self.aside = aside.map(IntoElement::into_any_element);
        self
    }
}

impl RenderOnce for Shell {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let gap = px(Metrics::GAP_LG);
        div()
            .size_full()
            .flex()
            .flex_col()
            .bg(RosterColors::background())
            .text_color(RosterColors::text_primary())
            .children(self.header)
            .child(
                div()
                    .flex_1()
                    .min_h_0()
                    .flex()
                    .gap(gap)
                    .p(gap)
                    .child(
                        div()
                            .flex_1()
                            .min_w_0()
                            .flex()
                            .flex_col()
                            .gap(gap)
                            .children(self.main),
                    )
                    .children(self.aside),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots() {
        let shell = Shell::new()
            .header(div())
            .child(div())
            .child(div())
            .aside(None::<gpui::Div>);
        assert!(shell.header.is_some());
        assert_eq!(shell.main.len(), 2);
        assert!(shell.aside.is_none());

        let shell = Shell::new().aside(Some(div()));
        assert!(shell.header.is_none());
        assert!(shell.aside.is_some());
    }
}
