//! Player Row
//!
//! Content of one roster row inside the virtual list shell.

use gpui::{AnyElement, IntoElement, ParentElement, SharedString, Styled, div, prelude::*, px};

use crate::components::composite::virtual_list::RowContext;
use crate::domain::player::{CommitmentStatus, Player};
use crate::i18n::{Locale, t, t_args};
use crate::theme::colors::RosterColors;
use crate::theme::metrics::Metrics;

/// "SS / 2B"
pub fn position_label(player: &Player) -> String {
    match player.secondary_position.as_deref() {
        Some(second) if !second.is_empty() => format!("{} / {}", player.primary_position, second),
        _ => player.primary_position.clone(),
    }
}

/// "SS / 2B · Class of 2026 · TX"
pub fn subtitle(player: &Player, locale: Locale) -> String {
    let mut parts = vec![position_label(player)];
    if player.grad_year > 0 {
        let year = player.grad_year.to_string();
        parts.push(t_args(locale, "row-class", &[("year", year.as_str())]).to_string());
    }
    if let Some(state) = player.high_school_state.as_deref().filter(|s| !s.is_empty()) {
        parts.push(state.to_string());
    }
    parts.join(" · ")
}

fn avatar(player: &Player) -> impl IntoElement {
    div()
        .size(px(Metrics::AVATAR_SIZE))
        .flex_shrink_0()
        .rounded(px(Metrics::RADIUS_FULL))
        .bg(RosterColors::accent_soft())
        .flex()
        .items_center()
        .justify_center()
        .text_color(RosterColors::accent_text())
        .font_weight(gpui::FontWeight::SEMIBOLD)
        .child(player.initials())
}

fn commitment_badge(player: &Player, locale: Locale) -> Option<impl IntoElement> {
    let key = match player.commitment_status {
        CommitmentStatus::Uncommitted => return None,
        CommitmentStatus::Committed => "status-committed",
        CommitmentStatus::Signed => "status-signed",
    };
    let label: SharedString = match player.college_name.as_deref() {
        Some(college) => format!("{} · {}", t(locale, key), college).into(),
        None => t(locale, key),
    };
    Some(
        div()
            .flex_shrink_0()
            .px_2()
            .py_1()
            .rounded(px(Metrics::RADIUS_FULL))
            .bg(RosterColors::info_soft())
            .text_color(RosterColors::info())
            .text_xs()
            .child(label),
    )
}

/// Row content for `player`
pub fn render_player_row(player: &Player, row: &RowContext, shortlisted: bool) -> AnyElement {
    let locale = row.locale;

    div()
        .w_full()
        .flex()
        .items_center()
        .gap(px(Metrics::GAP_LG))
        .child(avatar(player))
        .child(
            div()
                .flex_1()
                .min_w_0()
                .flex()
                .flex_col()
                .gap(px(Metrics::GAP_SM))
                .child(
                    div()
                        .flex()
                        .items_center()
                        .gap(px(Metrics::GAP_SM))
                        .child(
                            div()
                                .text_size(px(Metrics::TEXT_BASE))
                                .font_weight(gpui::FontWeight::SEMIBOLD)
                                .text_color(RosterColors::text_primary())
                                .child(player.full_name.clone()),
                        )
                        .when(shortlisted, |el| {
                            el.child(div().text_color(RosterColors::warning()).child("★"))
                        }),
                )
                .child(
                    div()
                        .text_sm()
                        .text_color(RosterColors::text_secondary())
                        .child(subtitle(player, locale)),
                )
                .child(
                    div()
                        .flex()
                        .gap(px(Metrics::GAP_SM))
                        .children(player.metrics().into_iter().map(|(label, value)| {
                            div()
                                .px_2()
                                .py_1()
                                .rounded(px(Metrics::RADIUS_SM))
                                .bg(RosterColors::surface_raised())
                                .text_xs()
                                .text_color(RosterColors::text_secondary())
                                .child(format!("{} {}", t(locale, label), value))
                        })),
                ),
        )
        .children(commitment_badge(player, locale))
        .into_any_element()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player {
            id: "p-1".to_string(),
            full_name: "Jalen Reed".to_string(),
            grad_year: 2026,
            primary_position: "SS".to_string(),
            secondary_position: Some("2B".to_string()),
            high_school_state: Some("TX".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_position_label() {
        assert_eq!(position_label(&player()), "SS / 2B");
        let single = Player {
            secondary_position: Some(String::new()),
            ..player()
        };
        assert_eq!(position_label(&single), "SS");
    }

    #[test]
    fn test_subtitle() {
        assert_eq!(subtitle(&player(), Locale::EnUS), "SS / 2B · Class of 2026 · TX");
        let sparse = Player {
            grad_year: 0,
            high_school_state: None,
            secondary_position: None,
            ..player()
        };
        assert_eq!(subtitle(&sparse, Locale::EnUS), "SS");
    }
}
