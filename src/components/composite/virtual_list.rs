//! VirtualList Component
//!
//! Windowed list: only rows inside the current [`RowViewport`] (plus
//! overscan) are built. Rows are absolutely positioned inside a clipped,
//! fixed-height container and keyed by the recycler slot they occupy, so a
//! row scrolling out hands its element state to the row scrolling in.
//!
//! [`RowViewport`]: crate::list::viewport::RowViewport

use std::rc::Rc;
use std::sync::Arc;

use gpui::{
    AnyElement, App, Context, ElementId, EventEmitter, InteractiveElement, IntoElement,
    ParentElement, Render, ScrollWheelEvent, StatefulInteractiveElement, Styled, WeakEntity,
    Window, div, prelude::*, px,
};

use crate::components::primitives::button::{Button, ButtonSize};
use crate::components::primitives::checkbox::Checkbox;
use crate::domain::config::ListConfig;
use crate::domain::record::Record;
use crate::i18n::{Locale, t, t_args};
use crate::list::actions::{ListCallbacks, RowActions};
use crate::list::recycler::RowRecycler;
use crate::list::selection::Selection;
use crate::list::viewport::{RecordSetChange, ScrollModel, row_offset, total_height};
use crate::theme::colors::RosterColors;
use crate::theme::metrics::Metrics;
use crate::utils::format::format_count;

/// Builds the content of one row
pub type RowRenderer<R> = Rc<dyn Fn(&R, &RowContext, &mut Window, &mut App) -> AnyElement>;

/// What a [`RowRenderer`] knows about its row
#[derive(Debug, Clone, Copy)]
pub struct RowContext {
    pub index: usize,
    pub selected: bool,
    pub locale: Locale,
}

/// Emitted by [`VirtualList`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VirtualListEvent {
    /// The user asked for the next page, or scrolled to the last row
    LoadMore,
    /// Selection changed; carries the selected count
    SelectionChanged(usize),
}

/// Windowed list view
pub struct VirtualList<R: Record> {
    records: Arc<Vec<R>>,
    total: u64,
    scroll: ScrollModel,
    recycler: RowRecycler,
    selection: Selection,
    actions: RowActions<R, App>,
    callbacks: ListCallbacks<R, App>,
    render_row: RowRenderer<R>,
    locale: Locale,
    has_more: bool,
    loading_more: bool,
    dimmed: bool,
}

impl<R: Record> EventEmitter<VirtualListEvent> for VirtualList<R> {}

impl<R: Record> VirtualList<R> {
    pub fn new(
        config: &ListConfig,
        render_row: impl Fn(&R, &RowContext, &mut Window, &mut App) -> AnyElement + 'static,
        _cx: &mut Context<Self>,
    ) -> Self {
        Self {
            records: Arc::new(Vec::new()),
            total: 0,
            scroll: ScrollModel::new(config.row_height, config.viewport_height, config.overscan),
            recycler: RowRecycler::new(),
            selection: Selection::new(),
            actions: RowActions::new(),
            callbacks: ListCallbacks::default(),
            render_row: Rc::new(render_row),
            locale: Locale::default(),
            has_more: false,
            loading_more: false,
            dimmed: false,
        }
    }

    /// Replace the displayed rows
    pub fn set_records(&mut self, records: Arc<Vec<R>>, total: u64, change: RecordSetChange) {
        self.total = total;
        if Arc::ptr_eq(&self.records, &records) {
            return;
        }
        self.records = records;
        if self.scroll.apply_change(change, self.records.len()) {
            self.recycler.reset();
        }
    }

    pub fn records(&self) -> &Arc<Vec<R>> {
        &self.records
    }

    pub fn set_paging(&mut self, has_more: bool, loading_more: bool) {
        self.has_more = has_more;
        self.loading_more = loading_more;
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Rows are drawn at reduced opacity (cached fallback)
    pub fn set_dimmed(&mut self, dimmed: bool) {
        self.dimmed = dimmed;
    }

    pub fn set_actions(&mut self, actions: RowActions<R, App>) {
        self.actions = actions;
    }

    pub fn set_callbacks(&mut self, callbacks: ListCallbacks<R, App>) {
        self.callbacks = callbacks;
    }

    /// Re-clamp after the window resized
    pub fn set_viewport_height(&mut self, height: f32) {
        self.scroll.set_viewport_height(height, self.records.len());
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Drop selected ids that no longer exist in `records`
    pub fn retain_selection(&mut self, records: &[R], cx: &mut Context<Self>) {
        let before = self.selection.count();
        self.selection.retain_present(records);
        if self.selection.count() != before {
            cx.emit(VirtualListEvent::SelectionChanged(self.selection.count()));
        }
    }

    /// Deselect every row
    pub fn clear_selection(&mut self, cx: &mut Context<Self>) {
        if !self.selection.is_empty() {
            self.selection.clear();
            cx.emit(VirtualListEvent::SelectionChanged(0));
            cx.notify();
        }
    }

    fn set_selected(&mut self, id: &str, selected: bool, cx: &mut Context<Self>) {
        self.selection.set(id, selected);
        let callbacks = self.callbacks.clone();
        callbacks.select(id, selected, cx);
        cx.emit(VirtualListEvent::SelectionChanged(self.selection.count()));
        cx.notify();
    }

    pub fn scroll_to_top(&mut self, cx: &mut Context<Self>) {
        self.scroll.scroll_to_top();
        cx.notify();
    }

    fn on_scroll_wheel(
        &mut self,
        event: &ScrollWheelEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let delta = event.delta.pixel_delta(px(Metrics::WHEEL_LINE_HEIGHT));
        let len = self.records.len();
        if !self.scroll.scroll_by(-f32::from(delta.y), len) {
            return;
        }
        cx.stop_propagation();
        if self.has_more && !self.loading_more && self.scroll.window(len).end_index >= len {
            cx.emit(VirtualListEvent::LoadMore);
        }
        cx.notify();
    }

    #[allow(clippy::too_many_arguments)]
    fn render_row_shell(
        &self,
        record: &R,
        index: usize,
        slot: usize,
        offset: f32,
        entity: &WeakEntity<Self>,
        window: &mut Window,
        cx: &mut App,
    ) -> AnyElement {
        let row_height = self.scroll.row_height();
        let id = record.id().to_string();
        let selected = self.selection.is_selected(&id);
        let row_cx = RowContext {
            index,
            selected,
            locale: self.locale,
        };
        let content = (self.render_row)(record, &row_cx, window, cx);

        let click_record = record.clone();
        let callbacks = self.callbacks.clone();
        let entity = entity.clone();
        let bg = if selected {
            RosterColors::row_selected()
        } else {
            RosterColors::surface()
        };

        div()
            .id(("virtual-row", slot))
            .absolute()
            .left_0()
            .right_0()
            .top(px(row_offset(index, row_height) - offset))
            .h(px(row_height))
            .px(px(Metrics::PADDING_ROW))
            .flex()
            .items_center()
            .gap(px(Metrics::GAP_MD))
            .bg(bg)
            .hover(|s| s.bg(RosterColors::row_hover()))
            .border_b_1()
            .border_color(RosterColors::border())
            .cursor_pointer()
            .on_click(move |_event, _window, cx| callbacks.click(&click_record, cx))
            .child(
                Checkbox::new(("row-select", slot))
                    .checked(selected)
                    .on_change(move |checked, _window, cx| {
                        let _ = entity.update(cx, |this, cx| this.set_selected(&id, checked, cx));
                    }),
            )
            .child(div().flex_1().min_w_0().overflow_hidden().child(content))
            .when(!self.actions.is_empty(), |el| {
                el.child(self.render_actions(record, slot))
            })
            .into_any_element()
    }

    fn render_actions(&self, record: &R, slot: usize) -> impl IntoElement {
        div()
            .flex()
            .items_center()
            .gap(px(Metrics::GAP_SM))
            .children(self.actions.iter().map(|action| {
                let action = action.clone();
                let record = record.clone();
                Button::ghost(
                    ElementId::Name(format!("row-action-{}-{}", action.id, slot).into()),
                    action.label.clone(),
                )
                .size(ButtonSize::Small)
                .on_click(move |_event, _window, cx| {
                    cx.stop_propagation();
                    action.invoke(&record, cx);
                })
            }))
    }

    fn render_scrollbar(&self, content_height: f32) -> Option<impl IntoElement> {
        let viewport_height = self.scroll.viewport_height();
        if content_height <= viewport_height || content_height <= 0.0 {
            return None;
        }
        let thumb = (viewport_height * viewport_height / content_height).max(24.0);
        let travel = viewport_height - thumb;
        let max_offset = content_height - viewport_height;
        let top = travel * (self.scroll.offset() / max_offset).clamp(0.0, 1.0);

        Some(
            div()
                .absolute()
                .top(px(top))
                .right(px(2.0))
                .w(px(6.0))
                .h(px(thumb))
                .rounded(px(Metrics::RADIUS_FULL))
                .bg(RosterColors::border()),
        )
    }

    fn render_footer(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let locale = self.locale;
        let shown = format_count(self.records.len() as u64);
        let total = format_count(self.total.max(self.records.len() as u64));
        let selected = self.selection.count();
        let selected_text = selected.to_string();

        let paging: Option<AnyElement> = if self.loading_more {
            Some(
                div()
                    .text_sm()
                    .text_color(RosterColors::text_muted())
                    .child(t(locale, "footer-loading-more"))
                    .into_any_element(),
            )
        } else if self.has_more {
            Some(
                Button::secondary("load-more", t(locale, "action-load-more"))
                    .size(ButtonSize::Small)
                    .on_click(cx.listener(|_this, _event, _window, cx| {
                        cx.emit(VirtualListEvent::LoadMore);
                    }))
                    .into_any_element(),
            )
        } else {
            None
        };

        div()
            .w_full()
            .flex()
            .items_center()
            .justify_between()
            .px_4()
            .py_2()
            .text_sm()
            .text_color(RosterColors::text_secondary())
            .child(
                div()
                    .flex()
                    .gap(px(Metrics::GAP_MD))
                    .child(t_args(
                        locale,
                        "footer-showing",
                        &[("shown", shown.as_str()), ("total", total.as_str())],
                    ))
                    .when(selected > 0, |el| {
                        el.child(
                            div()
                                .text_color(RosterColors::accent_text())
                                .child(t_args(
                                    locale,
                                    "footer-selected",
                                    &[("count", selected_text.as_str())],
                                )),
                        )
                        .child(
                            Button::ghost("clear-selection", t(locale, "action-clear-selection"))
                                .size(ButtonSize::Small)
                                .on_click(cx.listener(|this, _event, _window, cx| {
                                    this.clear_selection(cx);
                                })),
                        )
                    }),
            )
            .children(paging)
    }
}

impl<R: Record> Render for VirtualList<R> {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let len = self.records.len();
        let offset = self.scroll.offset();
        let content_height = total_height(len, self.scroll.row_height());
        let viewport = self.scroll.window(len);
        let slots = self.recycler.update(viewport.range());
        let entity = cx.entity().downgrade();

        let rows: Vec<AnyElement> = slots
            .into_iter()
            .filter_map(|(index, slot)| {
                let record = self.records.get(index)?;
                Some(self.render_row_shell(record, index, slot, offset, &entity, window, cx))
            })
            .collect();

        let body = div()
            .id("virtual-list-viewport")
            .relative()
            .w_full()
            .h(px(self.scroll.viewport_height()))
            .overflow_hidden()
            .bg(RosterColors::surface())
            .border_1()
            .border_color(RosterColors::border())
            .rounded(px(Metrics::RADIUS_LG))
            .when(self.dimmed, |el| el.opacity(0.8))
            .on_scroll_wheel(cx.listener(Self::on_scroll_wheel))
            .children(rows)
            .children(self.render_scrollbar(content_height))
            .when(self.scroll.show_scroll_top(), |el| {
                el.child(
                    div()
                        .id("scroll-to-top")
                        .absolute()
                        .bottom(px(Metrics::GAP_LG))
                        .right(px(Metrics::GAP_LG))
                        .size(px(Metrics::SCROLL_TOP_BUTTON))
                        .rounded(px(Metrics::RADIUS_FULL))
                        .flex()
                        .items_center()
                        .justify_center()
                        .bg(RosterColors::button_primary_bg())
                        .text_color(RosterColors::button_primary_text())
                        .hover(|s| s.bg(RosterColors::accent_hover()))
                        .cursor_pointer()
                        .child("↑")
                        .on_click(cx.listener(|this, _event, _window, cx| {
                            this.scroll_to_top(cx);
                        })),
                )
            });

        div()
            .w_full()
            .flex()
            .flex_col()
            .gap(px(Metrics::GAP_SM))
            .child(body)
            .when(len > 0, |el| el.child(self.render_footer(cx)))
    }
}
