//! i18n - Internationalization Module
//!
//! HashMap-based lookups with `{name}` placeholders.

use std::collections::HashMap;
use std::sync::OnceLock;

use gpui::SharedString;

use crate::utils::format::Age;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English (US)
    #[default]
    EnUS,
    /// Chinese (Simplified)
    ZhCN,
}

impl Locale {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::EnUS => "English",
            Locale::ZhCN => "中文",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Locale::EnUS => Locale::ZhCN,
            Locale::ZhCN => Locale::EnUS,
        }
    }
}

/// Translation resources
static TRANSLATIONS: OnceLock<HashMap<&'static str, (&'static str, &'static str)>> = OnceLock::new();

/// Initialize translations (key -> (en, zh))
fn init_translations() -> HashMap<&'static str, (&'static str, &'static str)> {
    let mut map = HashMap::new();

    // App
    map.insert("app-title", ("Player Roster", "球员名册"));

    // Toolbar
    map.insert("search-placeholder", ("Search players...", "搜索球员..."));
    map.insert("sort-label", ("Sort", "排序"));
    map.insert("sort-name", ("Name", "姓名"));
    map.insert("sort-class", ("Class", "届别"));
    map.insert("sort-position", ("Position", "位置"));
    map.insert("sort-pitch-velo", ("Pitch Velo", "投球球速"));
    map.insert("sort-exit-velo", ("Exit Velo", "击球初速"));
    map.insert("sort-sixty", ("60 Yard", "60码跑"));
    map.insert("sort-gpa", ("GPA", "GPA"));
    map.insert("col-state", ("State", "州"));
    map.insert("col-college", ("College", "大学"));
    map.insert("filter-position", ("Position", "位置"));
    map.insert("filter-class", ("Class", "届别"));
    map.insert("clear-filters", ("Clear all filters", "清除全部筛选"));

    // Row
    map.insert("metric-pitch", ("Velo", "球速"));
    map.insert("metric-exit", ("Exit", "初速"));
    map.insert("metric-sixty", ("60yd", "60码"));
    map.insert("status-committed", ("Committed", "已承诺"));
    map.insert("status-signed", ("Signed", "已签约"));
    map.insert("action-view", ("View", "查看"));
    map.insert("action-shortlist", ("Shortlist", "候选"));
    map.insert("row-class", ("Class of {year}", "{year} 届"));
    map.insert("shortlisted", ("Shortlisted", "已加入候选"));

    // Header status
    map.insert("status-idle", ("Idle", "空闲"));
    map.insert("status-loading", ("Loading", "加载中"));
    map.insert("status-live", ("Live", "在线"));
    map.insert("status-offline", ("Offline", "离线"));
    map.insert("status-cached", ("Cached", "缓存"));

    // Detail panel
    map.insert("detail-title", ("Player Profile", "球员资料"));
    map.insert("detail-positions", ("Positions", "位置"));
    map.insert("detail-height-weight", ("Height / Weight", "身高 / 体重"));
    map.insert("action-close", ("Close", "关闭"));

    // Footer
    map.insert("footer-showing", ("Showing {shown} of {total} players", "显示 {shown} / {total} 名球员"));
    map.insert("footer-selected", ("{count} selected", "已选 {count} 名"));
    map.insert("footer-loading-more", ("Loading more...", "加载更多..."));
    map.insert("action-load-more", ("Load More", "加载更多"));
    map.insert("action-clear-selection", ("Clear selection", "取消选择"));

    // Empty states
    map.insert("empty-no-data-title", ("No players yet", "暂无球员"));
    map.insert(
        "empty-no-data-desc",
        ("Start building your roster by adding players.", "添加球员以开始建立名册。"),
    );
    map.insert("empty-no-results-title", ("No results for \"{query}\"", "没有 \"{query}\" 的结果"));
    map.insert("empty-no-results-desc", ("Try adjusting your search terms.", "请尝试调整搜索词。"));
    map.insert("empty-filtered-title", ("No matching players", "没有匹配的球员"));
    map.insert(
        "empty-filtered-desc",
        ("No players match your current filters.", "没有球员符合当前筛选条件。"),
    );
    map.insert("action-clear-search", ("Clear Search", "清除搜索"));
    map.insert("action-clear-filters", ("Clear Filters", "清除筛选"));

    // Error states
    map.insert("error-connection-lost", ("Connection Lost", "连接中断"));
    map.insert("error-load-failed", ("Failed to Load Players", "加载球员失败"));
    map.insert("action-retry", ("Try Again", "重试"));
    map.insert("action-retrying", ("Retrying...", "重试中..."));
    map.insert("error-attempt", ("Attempt {attempt} of {max}", "第 {attempt} / {max} 次尝试"));
    map.insert(
        "error-exhausted",
        (
            "Maximum retry attempts reached. Please try again later.",
            "已达到最大重试次数，请稍后再试。",
        ),
    );

    // Cache fallback
    map.insert("cache-banner", ("Showing cached data from {age}", "正在显示缓存数据（{age}）"));
    map.insert("age-just-now", ("just now", "刚刚"));
    map.insert("age-minutes", ("{n}m ago", "{n} 分钟前"));
    map.insert("age-hours", ("{n}h ago", "{n} 小时前"));
    map.insert("age-earlier", ("earlier", "更早"));
    map.insert("action-refresh", ("Refresh", "刷新"));

    map
}

/// Get translations
fn translations() -> &'static HashMap<&'static str, (&'static str, &'static str)> {
    TRANSLATIONS.get_or_init(init_translations)
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    translations().get(key).map(|&(en, zh)| match locale {
        Locale::EnUS => en,
        Locale::ZhCN => zh,
    })
}

/// Translate a key
pub fn t(locale: Locale, key: &str) -> SharedString {
    match lookup(locale, key) {
        Some(text) => SharedString::from(text),
        // Fallback: return the key itself
        None => SharedString::from(key.to_string()),
    }
}

/// Translate a key and fill `{name}` placeholders
pub fn t_args(locale: Locale, key: &str, args: &[(&str, &str)]) -> SharedString {
    let mut text = lookup(locale, key).unwrap_or(key).to_string();
    for (name, value) in args {
        text = text.replace(&format!("{{{name}}}"), value);
    }
    SharedString::from(text)
}

/// Put a snapshot age into words; `None` is an unknown capture time
pub fn t_age(locale: Locale, age: Option<&Age>) -> SharedString {
    match age {
        Some(Age::JustNow) => t(locale, "age-just-now"),
        Some(Age::Minutes(n)) => t_args(locale, "age-minutes", &[("n", n.to_string().as_str())]),
        Some(Age::Hours(n)) => t_args(locale, "age-hours", &[("n", n.to_string().as_str())]),
        Some(Age::Date(date)) => SharedString::from(date.clone()),
        None => t(locale, "age-earlier"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        assert_eq!(t(Locale::EnUS, "sort-gpa").as_ref(), "GPA");
        assert_eq!(t(Locale::ZhCN, "action-refresh").as_ref(), "刷新");
        assert_eq!(t(Locale::EnUS, "missing-key").as_ref(), "missing-key");
    }

    #[test]
    fn test_placeholders() {
        let text = t_args(
            Locale::EnUS,
            "footer-showing",
            &[("shown", "1,204"), ("total", "2,500")],
        );
        assert_eq!(text.as_ref(), "Showing 1,204 of 2,500 players");
        let text = t_args(Locale::EnUS, "empty-no-results-title", &[("query", "reed")]);
        assert_eq!(text.as_ref(), "No results for \"reed\"");
    }

    #[test]
    fn test_cache_banner_age_is_localized() {
        let age = Age::Minutes(10);
        let zh = t_age(Locale::ZhCN, Some(&age));
        assert_eq!(zh.as_ref(), "10 分钟前");
        let banner = t_args(Locale::ZhCN, "cache-banner", &[("age", zh.as_ref())]);
        assert_eq!(banner.as_ref(), "正在显示缓存数据（10 分钟前）");
        assert!(!banner.contains("ago"));

        let en = t_age(Locale::EnUS, Some(&age));
        assert_eq!(en.as_ref(), age.to_string());
        assert_eq!(t_age(Locale::ZhCN, Some(&Age::Hours(3))).as_ref(), "3 小时前");
        assert_eq!(t_age(Locale::ZhCN, Some(&Age::JustNow)).as_ref(), "刚刚");
        assert_eq!(t_age(Locale::ZhCN, None).as_ref(), "更早");
        assert_eq!(t_age(Locale::EnUS, None).as_ref(), "earlier");
    }

    #[test]
    fn test_every_label_key_is_translated() {
        use crate::domain::player::PlayerField;
        for field in PlayerField::SORTABLE {
            assert!(lookup(Locale::EnUS, field.label_key()).is_some(), "{field:?}");
        }
        for key in ["metric-pitch", "metric-exit", "metric-sixty", "filter-position", "filter-class"] {
            assert!(lookup(Locale::ZhCN, key).is_some(), "{key}");
        }
    }
}
