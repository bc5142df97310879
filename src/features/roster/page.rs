//! Roster Page
//!
//! Toolbar, windowed player list and the status screens shown in its place.
//! The loader snapshot decides what is on screen; the page holds only the
//! client-side search/filter/sort state and the rows derived from it.

use std::sync::Arc;

use ahash::AHashSet;
use chrono::Utc;
use gpui::{
    AnyElement, App, Context, Entity, IntoElement, ParentElement, Render, Rgba, SharedString,
    Styled, WeakEntity, Window, div, prelude::*, px,
};

use crate::components::composite::filter_bar::{FilterBar, SortChip};
use crate::components::composite::status::{Banner, EmptyState, ErrorState, SkeletonList};
use crate::components::composite::virtual_list::{RowContext, VirtualList, VirtualListEvent};
use crate::components::layout::{Header, Shell};
use crate::components::primitives::button::{Button, ButtonSize};
use crate::components::primitives::text_input::{TextInput, TextInputEvent, text_input};
use crate::constants::{DETAIL_PANEL_WIDTH, LIST_CHROME_HEIGHT};
use crate::domain::config::ListConfig;
use crate::domain::player::{Player, PlayerField};
use crate::features::roster::controller::{LoaderOp, RosterController};
use crate::features::roster::row::{position_label, render_player_row, subtitle};
use crate::i18n::{Locale, t, t_age, t_args};
use crate::list::actions::{ListCallbacks, RowActions};
use crate::list::pipeline::{Facet, ListQuery, apply, facets};
use crate::list::policy::{RecordPolicy, player_policy};
use crate::list::presentation::{EmptyKind, PresentationContext, Screen, present};
use crate::list::viewport::RecordSetChange;
use crate::loader::cache::CacheEntry;
use crate::loader::classify::ClassifiedError;
use crate::loader::controller::{LoadController, LoadSnapshot, LoadState};
use crate::theme::colors::RosterColors;
use crate::theme::metrics::Metrics;
use crate::utils::format::format_metric;

/// Roster page component
pub struct RosterPage {
    config: ListConfig,
    controller: RosterController,
    policy: RecordPolicy<Player>,
    query: ListQuery<PlayerField>,
    snapshot: LoadSnapshot<Player>,
    /// Records the pipeline runs over: live, or cached while degraded
    base: Arc<Vec<Player>>,
    from_cache: bool,
    cached_base: Option<(Arc<CacheEntry<Player>>, Arc<Vec<Player>>)>,
    visible: Arc<Vec<Player>>,
    facets: Vec<Facet>,
    search_input: Entity<TextInput>,
    list: Entity<VirtualList<Player>>,
    shortlist: AHashSet<String>,
    opened: Option<Player>,
    locale: Locale,
    viewport_height: f32,
}

fn row_actions(page: WeakEntity<RosterPage>, locale: Locale) -> RowActions<Player, App> {
    let view_page = page.clone();
    RowActions::new()
        .add("view", t(locale, "action-view").to_string(), move |player: &Player, cx: &mut App| {
            let _ = view_page.update(cx, |this, cx| this.open(player.clone(), cx));
        })
        .add(
            "shortlist",
            t(locale, "action-shortlist").to_string(),
            move |player: &Player, cx: &mut App| {
                let _ = page.update(cx, |this, cx| this.toggle_shortlist(&player.id, cx));
            },
        )
}

impl RosterPage {
    pub fn new(config: ListConfig, loader: LoadController<Player>, cx: &mut Context<Self>) -> Self {
        let locale = Locale::default();
        let page = cx.weak_entity();

        let search_input = text_input("roster-search", t(locale, "search-placeholder"), cx);
        cx.subscribe(&search_input, |this, _input, event: &TextInputEvent, cx| match event {
            TextInputEvent::Changed(value) => this.set_search(value.clone(), cx),
        })
        .detach();

        let list = cx.new(|cx| {
            let row_page = page.clone();
            let mut list = VirtualList::new(
                &config,
                move |player: &Player, row: &RowContext, _window: &mut Window, cx: &mut App| {
                    let shortlisted = row_page
                        .upgrade()
                        .is_some_and(|page| page.read(cx).shortlist.contains(&player.id));
                    render_player_row(player, row, shortlisted)
                },
                cx,
            );
            list.set_locale(locale);
            list.set_actions(row_actions(page.clone(), locale));
            let click_page = page.clone();
            list.set_callbacks(
                ListCallbacks::default()
                    .on_record_click(move |player: &Player, cx: &mut App| {
                        let _ = click_page.update(cx, |this, cx| this.open(player.clone(), cx));
                    })
                    .on_record_select(|id: &str, selected: bool, _cx: &mut App| {
                        tracing::debug!("Player {} selected: {}", id, selected);
                    }),
            );
            list
        });
        cx.subscribe(&list, |this, _list, event: &VirtualListEvent, cx| match event {
            VirtualListEvent::LoadMore => this.controller.dispatch(LoaderOp::LoadMore, cx),
            VirtualListEvent::SelectionChanged(_) => cx.notify(),
        })
        .detach();

        let policy = player_policy();
        let mut query = ListQuery::default();
        query.clear(policy.default_sort_field());

        let controller = RosterController::new(loader);
        let snapshot = controller.snapshot();
        let viewport_height = config.viewport_height;

        let mut this = Self {
            config,
            controller,
            policy,
            query,
            snapshot,
            base: Arc::new(Vec::new()),
            from_cache: false,
            cached_base: None,
            visible: Arc::new(Vec::new()),
            facets: Vec::new(),
            search_input,
            list,
            shortlist: AHashSet::new(),
            opened: None,
            locale,
            viewport_height,
        };
        this.recompute(true, cx);

        if this.controller.has_source() {
            this.controller.dispatch(LoaderOp::Start, cx);
        }
        this
    }

    /// Re-read the loader snapshot
    pub fn sync(&mut self, cx: &mut Context<Self>) {
        self.snapshot = self.controller.snapshot();
        self.recompute(false, cx);
        cx.notify();
    }

    /// Live records, or the cached set while a failed load left nothing live
    fn select_base(&mut self) -> (Arc<Vec<Player>>, bool) {
        let snapshot = &self.snapshot;
        if snapshot.records.is_empty()
            && snapshot.state == LoadState::Error
            && snapshot.cached_records().is_some()
            && let Some(entry) = &snapshot.cached
        {
            if let Some((held, records)) = &self.cached_base
                && Arc::ptr_eq(held, entry)
            {
                return (records.clone(), true);
            }
            let records = Arc::new(entry.records.clone());
            self.cached_base = Some((entry.clone(), records.clone()));
            return (records, true);
        }
        (snapshot.records.clone(), false)
    }

    /// Run the pipeline when the base records or the query changed
    fn recompute(&mut self, query_changed: bool, cx: &mut Context<Self>) {
        let (base, from_cache) = self.select_base();
        let base_changed = !Arc::ptr_eq(&base, &self.base);

        if base_changed || query_changed {
            let change = RecordSetChange::classify(query_changed, from_cache, self.snapshot.page);
            // server-filtered records would hide the unselected facet values
            let narrowed_by_server = self.config.server_query
                && !self.query.filters.is_empty()
                && !self.facets.is_empty();
            if base_changed && !narrowed_by_server {
                self.facets = facets(&base, &self.policy);
            }
            self.visible = Arc::new(apply(&base, &self.policy, &self.query));
            self.base = base;
            self.from_cache = from_cache;

            let visible = self.visible.clone();
            let base = self.base.clone();
            let total = if from_cache {
                base.len() as u64
            } else {
                self.snapshot.total
            };
            tracing::debug!(
                "Pipeline: {} of {} records visible (cached: {})",
                visible.len(),
                base.len(),
                from_cache
            );
            self.list.update(cx, |list, cx| {
                list.set_records(visible, total, change);
                list.set_dimmed(from_cache);
                list.retain_selection(&base, cx);
            });
        }

        let has_more = self.snapshot.has_more && !self.from_cache;
        let loading_more = self.snapshot.is_loading() && !self.snapshot.records.is_empty();
        self.list.update(cx, |list, cx| {
            list.set_paging(has_more, loading_more);
            cx.notify();
        });
    }

    fn set_search(&mut self, search: String, cx: &mut Context<Self>) {
        if self.query.search == search {
            return;
        }
        self.query.search = search;
        if self.config.server_query {
            self.controller.dispatch(LoaderOp::search_of(&self.query), cx);
        }
        self.recompute(true, cx);
        cx.notify();
    }

    fn select_sort(&mut self, index: usize, cx: &mut Context<Self>) {
        let Some(field) = self.policy.sortable_fields().nth(index) else {
            return;
        };
        self.query.select_sort(field);
        if self.config.server_query {
            self.controller.dispatch(LoaderOp::sort_of(&self.query), cx);
        }
        self.recompute(true, cx);
        cx.notify();
    }

    fn toggle_filter(&mut self, dimension: &str, value: &str, cx: &mut Context<Self>) {
        self.query.filters.toggle(dimension, value);
        if self.config.server_query {
            self.controller.dispatch(LoaderOp::filters_of(&self.query), cx);
        }
        self.recompute(true, cx);
        cx.notify();
    }

    fn clear_search(&mut self, cx: &mut Context<Self>) {
        self.search_input.update(cx, |input, cx| input.set_value("", cx));
    }

    /// Reset search, filters and sort
    fn clear_all(&mut self, cx: &mut Context<Self>) {
        self.query.clear(self.policy.default_sort_field());
        self.search_input.update(cx, |input, cx| input.set_value("", cx));
        if self.config.server_query {
            self.controller.dispatch(LoaderOp::query_of(&self.query), cx);
        }
        self.recompute(true, cx);
        cx.notify();
    }

    fn open(&mut self, player: Player, cx: &mut Context<Self>) {
        tracing::info!("Opening player {}", player.id);
        self.opened = Some(player);
        cx.notify();
    }

    fn close(&mut self, cx: &mut Context<Self>) {
        self.opened = None;
        cx.notify();
    }

    fn toggle_shortlist(&mut self, id: &str, cx: &mut Context<Self>) {
        if !self.shortlist.remove(id) {
            self.shortlist.insert(id.to_string());
        }
        self.list.update(cx, |_, cx| cx.notify());
        cx.notify();
    }

    fn toggle_locale(&mut self, cx: &mut Context<Self>) {
        let locale = self.locale.next();
        self.locale = locale;
        self.search_input.update(cx, |input, cx| {
            input.set_placeholder(t(locale, "search-placeholder"));
            cx.notify();
        });
        let page = cx.weak_entity();
        self.list.update(cx, |list, cx| {
            list.set_locale(locale);
            list.set_actions(row_actions(page, locale));
            cx.notify();
        });
        cx.notify();
    }

    /// Fit the list viewport to the window
    fn fit_viewport(&mut self, window: &Window, cx: &mut Context<Self>) {
        let available = f32::from(window.viewport_size().height) - LIST_CHROME_HEIGHT;
        let height = available.max(self.config.row_height);
        if (height - self.viewport_height).abs() >= 1.0 {
            self.viewport_height = height;
            self.list.update(cx, |list, _| list.set_viewport_height(height));
        }
    }

    fn status(&self) -> (SharedString, Rgba) {
        let locale = self.locale;
        match self.snapshot.state {
            LoadState::Idle => (t(locale, "status-idle"), RosterColors::text_muted()),
            LoadState::Loading => (t(locale, "status-loading"), RosterColors::info()),
            LoadState::Success => (t(locale, "status-live"), RosterColors::accent()),
            LoadState::Error if self.from_cache => {
                (t(locale, "status-cached"), RosterColors::warning())
            }
            LoadState::Error => (t(locale, "status-offline"), RosterColors::danger()),
        }
    }

    fn render_filter_bar(&self, cx: &mut Context<Self>) -> FilterBar {
        let locale = self.locale;
        let sorts = self
            .policy
            .sortable_fields()
            .map(|field| SortChip {
                label: t(locale, field.label_key()),
                active: self
                    .query
                    .sort
                    .as_ref()
                    .filter(|sort| sort.field == field)
                    .map(|sort| sort.order),
            })
            .collect();

        let sort_page = cx.weak_entity();
        let toggle_page = cx.weak_entity();
        FilterBar::new(self.search_input.clone(), locale)
            .sorts(sorts)
            .facets(self.facets.clone(), self.query.filters.clone())
            .on_sort(move |index, _window, cx| {
                let _ = sort_page.update(cx, |this, cx| this.select_sort(index, cx));
            })
            .on_toggle(move |dimension, value, _window, cx| {
                let _ = toggle_page.update(cx, |this, cx| this.toggle_filter(dimension, value, cx));
            })
            .on_clear(cx.listener(|this, _event, _window, cx| this.clear_all(cx)))
    }

    fn render_screen(&self, screen: Screen<Player>, cx: &mut Context<Self>) -> AnyElement {
        let locale = self.locale;
        match screen {
            Screen::Skeleton { rows } => div()
                .w_full()
                .h(px(self.viewport_height))
                .overflow_hidden()
                .child(SkeletonList::new(rows, self.config.row_height))
                .into_any_element(),
            Screen::CachedFallback { age, empty, .. } => {
                let age = t_age(locale, age.as_ref());
                let body = match empty {
                    Some(kind) => self.render_empty(kind, cx),
                    None => self.list.clone().into_any_element(),
                };
                div()
                    .w_full()
                    .flex()
                    .flex_col()
                    .gap_3()
                    .child(
                        Banner::new(
                            t_args(locale, "cache-banner", &[("age", age.as_ref())]),
                            t(locale, "action-refresh"),
                        )
                        .on_action(cx.listener(|this, _event, _window, cx| {
                            this.controller.dispatch(LoaderOp::Refresh, cx);
                        })),
                    )
                    .child(body)
                    .into_any_element()
            }
            Screen::Error {
                message,
                network,
                retry,
                ..
            } => ErrorState::new(message, network, retry, locale)
                .on_retry(cx.listener(|this, _event, _window, cx| {
                    this.controller.dispatch(LoaderOp::Retry, cx);
                }))
                .into_any_element(),
            Screen::Empty { kind, stale_error } => {
                let banner = stale_error.map(|error| self.stale_banner(error, cx));
                let empty = self.render_empty(kind, cx);
                div()
                    .w_full()
                    .flex()
                    .flex_col()
                    .gap_3()
                    .children(banner)
                    .child(empty)
                    .into_any_element()
            }
            Screen::List { stale_error, .. } => {
                let banner = stale_error.map(|error| self.stale_banner(error, cx));
                div()
                    .w_full()
                    .flex()
                    .flex_col()
                    .gap_3()
                    .children(banner)
                    .child(self.list.clone())
                    .into_any_element()
            }
        }
    }

    fn render_empty(&self, kind: EmptyKind, cx: &mut Context<Self>) -> AnyElement {
        EmptyState::new(kind, self.locale)
            .on_clear_search(cx.listener(|this, _event, _window, cx| this.clear_search(cx)))
            .on_clear_filters(cx.listener(|this, _event, _window, cx| this.clear_all(cx)))
            .into_any_element()
    }

    /// A failure that left held records on screen; retry while the budget lasts
    fn stale_banner(&self, error: ClassifiedError, cx: &mut Context<Self>) -> Banner {
        let banner = Banner::new(error.message, t(self.locale, "action-retry"));
        if self.snapshot.can_retry() && !self.snapshot.retrying {
            banner.on_action(cx.listener(|this, _event, _window, cx| {
                this.controller.dispatch(LoaderOp::Retry, cx);
            }))
        } else {
            banner
        }
    }

    fn render_detail(&self, player: &Player, cx: &mut Context<Self>) -> AnyElement {
        let locale = self.locale;
        let shortlisted = self.shortlist.contains(&player.id);
        let id = player.id.clone();

        let height_weight = match (player.height.as_deref(), player.weight) {
            (Some(height), Some(weight)) => Some(format!("{height} / {} lbs", format_metric(weight))),
            (Some(height), None) => Some(height.to_string()),
            (None, Some(weight)) => Some(format!("{} lbs", format_metric(weight))),
            (None, None) => None,
        };
        let mut facts: Vec<(SharedString, String)> = vec![
            (t(locale, "detail-positions"), position_label(player)),
            (t(locale, "sort-class"), player.grad_year.to_string()),
        ];
        facts.extend(
            [
                (t(locale, "col-state"), player.high_school_state.clone()),
                (t(locale, "col-college"), player.college_name.clone()),
                (t(locale, "detail-height-weight"), height_weight),
                (t(locale, "sort-gpa"), player.gpa.map(format_metric)),
            ]
            .into_iter()
            .filter_map(|(label, value)| value.map(|v| (label, v))),
        );
        facts.extend(
            player
                .metrics()
                .into_iter()
                .map(|(label, value)| (t(locale, label), value)),
        );

        let shortlist_label = if shortlisted {
            t(locale, "shortlisted")
        } else {
            t(locale, "action-shortlist")
        };

        div()
            .w(px(DETAIL_PANEL_WIDTH))
            .flex_shrink_0()
            .flex()
            .flex_col()
            .gap_3()
            .p_4()
            .bg(RosterColors::surface())
            .border_1()
            .border_color(RosterColors::border())
            .rounded(px(Metrics::RADIUS_LG))
            .child(
                div()
                    .flex()
                    .items_center()
                    .justify_between()
                    .child(
                        div()
                            .text_xs()
                            .text_color(RosterColors::text_muted())
                            .child(t(locale, "detail-title")),
                    )
                    .child(
                        Button::ghost("detail-close", t(locale, "action-close"))
                            .size(ButtonSize::Small)
                            .on_click(cx.listener(|this, _event, _window, cx| this.close(cx))),
                    ),
            )
            .child(
                div()
                    .text_size(px(Metrics::TEXT_XL))
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .text_color(RosterColors::text_primary())
                    .child(player.full_name.clone()),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(RosterColors::text_secondary())
                    .child(subtitle(player, locale)),
            )
            .children(facts.into_iter().map(|(label, value)| {
                div()
                    .flex()
                    .justify_between()
                    .text_sm()
                    .child(div().text_color(RosterColors::text_muted()).child(label))
                    .child(div().text_color(RosterColors::text_primary()).child(value))
            }))
            .child(
                Button::secondary("detail-shortlist", shortlist_label)
                    .icon(if shortlisted { "★" } else { "☆" })
                    .on_click(cx.listener(move |this, _event, _window, cx| {
                        this.toggle_shortlist(&id, cx);
                    })),
            )
            .into_any_element()
    }
}

impl Render for RosterPage {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.fit_viewport(window, cx);
        let locale = self.locale;

        let screen = present(
            &self.snapshot,
            &PresentationContext {
                page_size: self.config.effective_page_size(),
                search: &self.query.search,
                filters_active: !self.query.filters.is_empty(),
                visible_len: self.visible.len(),
                now: Utc::now(),
            },
        );
        let body = self.render_screen(screen, cx);
        let filter_bar = self.render_filter_bar(cx);
        let detail = self
            .opened
            .as_ref()
            .map(|player| self.render_detail(player, cx));
        let (status_label, status_color) = self.status();

        Shell::new()
            .header(
                Header::new(t(locale, "app-title"), locale.display_name())
                    .status(status_label, status_color)
                    .on_locale_toggle(cx.listener(|this, _event, _window, cx| {
                        this.toggle_locale(cx);
                    })),
            )
            .child(filter_bar)
            .child(body)
            .aside(detail)
    }
}
