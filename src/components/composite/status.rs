//! Status Views
//!
//! Visuals for the non-list screens chosen by
//! [`present`](crate::list::presentation::present). These only draw; which
//! one shows is decided elsewhere.

use gpui::{
    AnyElement, App, ClickEvent, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
    Window, div, prelude::*, px,
};

use crate::components::primitives::button::{Button, ButtonSize};
use crate::i18n::{Locale, t, t_args};
use crate::list::presentation::{EmptyKind, RetryAffordance};
use crate::theme::colors::RosterColors;
use crate::theme::metrics::Metrics;

type ClickHandler = Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>;

fn icon_badge(glyph: &'static str, fg: gpui::Rgba, bg: gpui::Rgba) -> impl IntoElement {
    div()
        .size(px(56.0))
        .rounded(px(16.0))
        .flex()
        .items_center()
        .justify_center()
        .bg(bg)
        .text_color(fg)
        .text_size(px(Metrics::TEXT_XL))
        .child(glyph)
}

fn centered_panel() -> gpui::Div {
    div()
        .w_full()
        .py(px(48.0))
        .px(px(24.0))
        .flex()
        .flex_col()
        .items_center()
        .justify_center()
        .gap(px(Metrics::GAP_MD))
}

/// Placeholder rows while the first page loads
#[derive(IntoElement)]
pub struct SkeletonList {
    rows: usize,
    row_height: f32,
}

impl SkeletonList {
    pub fn new(rows: usize, row_height: f32) -> Self {
        Self { rows, row_height }
    }
}

impl RenderOnce for SkeletonList {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let bar = |width: f32, height: f32| {
            div()
                .w(px(width))
                .h(px(height))
                .rounded(px(Metrics::RADIUS_SM))
                .bg(RosterColors::skeleton())
        };

        div()
            .w_full()
            .flex()
            .flex_col()
            .gap(px(Metrics::GAP_SM))
            .children((0..self.rows).map(|_| {
                div()
                    .w_full()
                    .h(px(self.row_height))
                    .px(px(Metrics::PADDING_ROW))
                    .flex()
                    .items_center()
                    .gap(px(Metrics::GAP_LG))
                    .bg(RosterColors::surface())
                    .border_1()
                    .border_color(RosterColors::border())
                    .rounded(px(Metrics::RADIUS_LG))
                    .child(
                        div()
                            .size(px(Metrics::AVATAR_SIZE))
                            .rounded(px(Metrics::RADIUS_FULL))
                            .bg(RosterColors::skeleton()),
                    )
                    .child(
                        div()
                            .flex_1()
                            .flex()
                            .flex_col()
                            .gap(px(Metrics::GAP_SM))
                            .child(bar(180.0, 16.0))
                            .child(bar(120.0, 12.0))
                            .child(
                                div()
                                    .flex()
                                    .gap(px(Metrics::GAP_SM))
                                    .child(bar(64.0, 20.0))
                                    .child(bar(64.0, 20.0))
                                    .child(bar(64.0, 20.0)),
                            ),
                    )
            }))
    }
}

/// Full-panel load failure with an optional retry control
#[derive(IntoElement)]
pub struct ErrorState {
    message: SharedString,
    network: bool,
    retry: RetryAffordance,
    locale: Locale,
    on_retry: Option<ClickHandler>,
}

impl ErrorState {
    pub fn new(
        message: impl Into<SharedString>,
        network: bool,
        retry: RetryAffordance,
        locale: Locale,
    ) -> Self {
        Self {
            message: message.into(),
            network,
            retry,
            locale,
            on_retry: None,
        }
    }

    pub fn on_retry(mut self, handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static) -> Self {
        self.on_retry = Some(Box::new(handler));
        self
    }
}

impl RenderOnce for ErrorState {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let locale = self.locale;
        let (title, glyph, fg, bg) = if self.network {
            (
                t(locale, "error-connection-lost"),
                "⚠",
                RosterColors::warning_text(),
                RosterColors::warning_soft(),
            )
        } else {
            (
                t(locale, "error-load-failed"),
                "✕",
                RosterColors::danger_text(),
                RosterColors::danger_soft(),
            )
        };

        let control: Option<AnyElement> = match self.retry {
            RetryAffordance::Available {
                attempt,
                max,
                retrying,
            } => {
                let label = if retrying {
                    t(locale, "action-retrying")
                } else {
                    t(locale, "action-retry")
                };
                let button = if self.network {
                    Button::warning("error-retry", label)
                } else {
                    Button::danger("error-retry", label)
                }
                .icon("↻")
                .disabled(retrying);
                let button = match self.on_retry {
                    Some(handler) => button.on_click(handler),
                    None => button,
                };
                Some(
                    div()
                        .flex()
                        .flex_col()
                        .items_center()
                        .gap(px(Metrics::GAP_SM))
                        .child(button)
                        .when(attempt > 0, |el| {
                            el.child(
                                div()
                                    .text_xs()
                                    .text_color(RosterColors::text_muted())
                                    .child(t_args(
                                        locale,
                                        "error-attempt",
                                        &[
                                            ("attempt", attempt.to_string().as_str()),
                                            ("max", max.to_string().as_str()),
                                        ],
                                    )),
                            )
                        })
                        .into_any_element(),
                )
            }
            RetryAffordance::Exhausted => Some(
                div()
                    .text_sm()
                    .text_color(RosterColors::text_muted())
                    .child(t(locale, "error-exhausted"))
                    .into_any_element(),
            ),
            RetryAffordance::NotOffered => None,
        };

        centered_panel()
            .child(icon_badge(glyph, fg, bg))
            .child(
                div()
                    .text_size(px(Metrics::TEXT_LG))
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .text_color(RosterColors::text_primary())
                    .child(title),
            )
            .child(
                div()
                    .max_w(px(420.0))
                    .text_sm()
                    .text_color(RosterColors::text_secondary())
                    .child(self.message),
            )
            .children(control)
    }
}

/// Nothing to show: no data, no search hits, or filters exclude everything
#[derive(IntoElement)]
pub struct EmptyState {
    kind: EmptyKind,
    locale: Locale,
    on_clear_search: Option<ClickHandler>,
    on_clear_filters: Option<ClickHandler>,
}

impl EmptyState {
    pub fn new(kind: EmptyKind, locale: Locale) -> Self {
        Self {
            kind,
            locale,
            on_clear_search: None,
            on_clear_filters: None,
        }
    }

    pub fn on_clear_search(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_clear_search = Some(Box::new(handler));
        self
    }

    pub fn on_clear_filters(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_clear_filters = Some(Box::new(handler));
        self
    }
}

impl RenderOnce for EmptyState {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let locale = self.locale;
        let (glyph, title, desc, action) = match &self.kind {
            EmptyKind::NoResults { query } => (
                "⌕",
                t_args(locale, "empty-no-results-title", &[("query", query.as_str())]),
                t(locale, "empty-no-results-desc"),
                self.on_clear_search.map(|handler| {
                    Button::secondary("empty-clear-search", t(locale, "action-clear-search"))
                        .on_click(handler)
                }),
            ),
            EmptyKind::Filtered => (
                "⧩",
                t(locale, "empty-filtered-title"),
                t(locale, "empty-filtered-desc"),
                self.on_clear_filters.map(|handler| {
                    Button::secondary("empty-clear-filters", t(locale, "action-clear-filters"))
                        .on_click(handler)
                }),
            ),
            EmptyKind::NoData => (
                "☰",
                t(locale, "empty-no-data-title"),
                t(locale, "empty-no-data-desc"),
                None,
            ),
        };

        centered_panel()
            .child(icon_badge(
                glyph,
                RosterColors::text_secondary(),
                RosterColors::surface_raised(),
            ))
            .child(
                div()
                    .text_size(px(Metrics::TEXT_LG))
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .text_color(RosterColors::text_primary())
                    .child(title),
            )
            .child(
                div()
                    .max_w(px(380.0))
                    .text_sm()
                    .text_color(RosterColors::text_secondary())
                    .child(desc),
            )
            .children(action.map(|button| button.size(ButtonSize::Medium)))
    }
}

/// Amber strip above a degraded list: cached fallback or a failed refresh
#[derive(IntoElement)]
pub struct Banner {
    text: SharedString,
    action_label: SharedString,
    on_action: Option<ClickHandler>,
}

impl Banner {
    pub fn new(text: impl Into<SharedString>, action_label: impl Into<SharedString>) -> Self {
        Self {
            text: text.into(),
            action_label: action_label.into(),
            on_action: None,
        }
    }

    pub fn on_action(mut self, handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static) -> Self {
        self.on_action = Some(Box::new(handler));
        self
    }
}

impl RenderOnce for Banner {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        div()
            .w_full()
            .flex()
            .items_center()
            .gap(px(Metrics::GAP_MD))
            .px_4()
            .py_3()
            .rounded(px(Metrics::RADIUS_LG))
            .bg(RosterColors::warning_soft())
            .border_1()
            .border_color(RosterColors::warning())
            .child(div().text_color(RosterColors::warning_text()).child("⚠"))
            .child(
                div()
                    .flex_1()
                    .min_w_0()
                    .text_sm()
                    .text_color(RosterColors::warning_text())
                    .child(self.text),
            )
            .when_some(self.on_action, |el, handler| {
                el.child(
                    Button::warning("banner-action", self.action_label)
                        .size(ButtonSize::Small)
                        .on_click(handler),
                )
            })
    }
}
