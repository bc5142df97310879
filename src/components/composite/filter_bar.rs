//! FilterBar Component
//!
//! Search input, sort chips and facet chips above the list.

use std::rc::Rc;

use gpui::{
    AnyElement, App, ClickEvent, ElementId, Entity, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div, prelude::*, px,
};

use crate::components::primitives::button::{Button, ButtonSize};
use crate::components::primitives::text_input::TextInput;
use crate::domain::query::SortOrder;
use crate::i18n::{Locale, t};
use crate::list::pipeline::{Facet, FilterState};
use crate::theme::colors::RosterColors;
use crate::theme::metrics::Metrics;

type ToggleHandler = Rc<dyn Fn(&str, &str, &mut Window, &mut App) + 'static>;
type SortHandler = Rc<dyn Fn(usize, &mut Window, &mut App) + 'static>;

/// One entry in the sort row
#[derive(Debug, Clone)]
pub struct SortChip {
    pub label: SharedString,
    /// Direction when this is the active sort
    pub active: Option<SortOrder>,
}

fn chip(id: ElementId, label: SharedString, active: bool) -> gpui::Stateful<gpui::Div> {
    let (bg, fg, border) = if active {
        (
            RosterColors::accent_soft(),
            RosterColors::accent_text(),
            RosterColors::accent(),
        )
    } else {
        (
            RosterColors::surface_raised(),
            RosterColors::text_secondary(),
            RosterColors::border(),
        )
    };
    div()
        .id(id)
        .px_3()
        .py_1()
        .rounded(px(Metrics::RADIUS_FULL))
        .border_1()
        .border_color(border)
        .bg(bg)
        .text_color(fg)
        .text_size(px(Metrics::TEXT_SM))
        .cursor_pointer()
        .hover(|s| s.border_color(RosterColors::border_focus()))
        .child(label)
}

/// Toolbar above the player list
#[derive(IntoElement)]
pub struct FilterBar {
    search: Entity<TextInput>,
    sorts: Vec<SortChip>,
    facets: Vec<Facet>,
    filters: FilterState,
    locale: Locale,
    on_sort: Option<SortHandler>,
    on_toggle: Option<ToggleHandler>,
    on_clear: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
}

impl FilterBar {
    pub fn new(search: Entity<TextInput>, locale: Locale) -> Self {
        Self {
            search,
            sorts: Vec::new(),
            facets: Vec::new(),
            filters: FilterState::default(),
            locale,
            on_sort: None,
            on_toggle: None,
            on_clear: None,
        }
    }

    pub fn sorts(mut self, sorts: Vec<SortChip>) -> Self {
        self.sorts = sorts;
        self
    }

    /// Facets to offer and the current selection
    pub fn facets(mut self, facets: Vec<Facet>, filters: FilterState) -> Self {
        self.facets = facets;
        self.filters = filters;
        self
    }

    /// Called with the index of the clicked sort chip
    pub fn on_sort(mut self, handler: impl Fn(usize, &mut Window, &mut App) + 'static) -> Self {
        self.on_sort = Some(Rc::new(handler));
        self
    }

    /// Called with (dimension key, value) of the clicked facet chip
    pub fn on_toggle(
        mut self,
        handler: impl Fn(&str, &str, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_toggle = Some(Rc::new(handler));
        self
    }

    pub fn on_clear(mut self, handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static) -> Self {
        self.on_clear = Some(Box::new(handler));
        self
    }

    fn render_sorts(&self) -> AnyElement {
        div()
            .flex()
            .flex_wrap()
            .items_center()
            .gap(px(Metrics::GAP_SM))
            .child(
                div()
                    .text_xs()
                    .text_color(RosterColors::text_muted())
                    .child(t(self.locale, "sort-label")),
            )
            .children(self.sorts.iter().enumerate().map(|(index, sort)| {
                let label: SharedString = match sort.active {
                    Some(SortOrder::Asc) => format!("{} ↑", sort.label).into(),
                    Some(SortOrder::Desc) => format!("{} ↓", sort.label).into(),
                    None => sort.label.clone(),
                };
                let handler = self.on_sort.clone();
                chip(("sort-chip", index).into(), label, sort.active.is_some()).on_click(
                    move |_event, window, cx| {
                        if let Some(handler) = &handler {
                            handler(index, window, cx);
                        }
                    },
                )
            }))
            .into_any_element()
    }

    fn render_facet(&self, facet: &Facet) -> AnyElement {
        div()
            .flex()
            .flex_wrap()
            .items_center()
            .gap(px(Metrics::GAP_SM))
            .child(
                div()
                    .text_xs()
                    .text_color(RosterColors::text_muted())
                    .child(t(self.locale, facet.label_key)),
            )
            .children(facet.values.iter().map(|value| {
                let key = facet.key;
                let value = value.clone();
                let active = self.filters.is_selected(key, &value);
                let handler = self.on_toggle.clone();
                chip(
                    ElementId::Name(format!("facet-{key}-{value}").into()),
                    value.clone().into(),
                    active,
                )
                .on_click(move |_event, window, cx| {
                    if let Some(handler) = &handler {
                        handler(key, &value, window, cx);
                    }
                })
            }))
            .into_any_element()
    }
}

impl RenderOnce for FilterBar {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let active = self.filters.count();
        let sorts = self.render_sorts();
        let facets: Vec<AnyElement> = self.facets.iter().map(|f| self.render_facet(f)).collect();
        let clear_label = format!("{} ({active})", t(self.locale, "clear-filters"));
        let on_clear = self.on_clear.filter(|_| active > 0);

        div()
            .w_full()
            .flex()
            .flex_col()
            .gap(px(Metrics::GAP_MD))
            .p_4()
            .bg(RosterColors::surface())
            .border_1()
            .border_color(RosterColors::border())
            .rounded(px(Metrics::RADIUS_LG))
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap(px(Metrics::GAP_MD))
                    .child(self.search.clone())
                    .child(div().flex_1())
                    .when_some(on_clear, |el, handler| {
                        el.child(
                            Button::ghost("clear-filters", clear_label)
                                .size(ButtonSize::Small)
                                .on_click(handler),
                        )
                    }),
            )
            .child(sorts)
            .children(facets)
    }
}
