//! Filter-Sort-Search Pipeline
//!
//! `apply` turns the loaded record snapshot into the ordered, visible list:
//! search, then filter, then a stable sort. Pure and deterministic; the input
//! slice is never touched.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use super::policy::{RecordPolicy, SortRule};
use crate::domain::query::SortOrder;
use crate::domain::record::{FieldValue, Record};

/// Active sort field and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    pub field: F,
    pub order: SortOrder,
}

impl<F: Copy + Eq> SortState<F> {
    /// Ascending on `field`
    pub fn new(field: F) -> Self {
        Self {
            field,
            order: SortOrder::Asc,
        }
    }

    /// Pick a sort column: a new field starts ascending, the same field
    /// toggles direction
    pub fn select(&mut self, field: F) {
        if self.field == field {
            self.order = self.order.toggled();
        } else {
            self.field = field;
            self.order = SortOrder::Asc;
        }
    }
}

/// Selected values per filter dimension
///
/// A dimension with no selected values is unconstrained and is not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    selected: BTreeMap<String, BTreeSet<String>>,
}

impl FilterState {
    /// Toggle `value` in `dimension`; returns whether it is now selected
    pub fn toggle(&mut self, dimension: &str, value: &str) -> bool {
        let values = self.selected.entry(dimension.to_string()).or_default();
        let now_selected = if values.remove(value) {
            false
        } else {
            values.insert(value.to_string());
            true
        };
        if values.is_empty() {
            self.selected.remove(dimension);
        }
        now_selected
    }

    pub fn is_selected(&self, dimension: &str, value: &str) -> bool {
        self.selected
            .get(dimension)
            .is_some_and(|values| values.contains(value))
    }

    /// Selected values of `dimension`, if constrained
    pub fn selected(&self, dimension: &str) -> Option<&BTreeSet<String>> {
        self.selected.get(dimension)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of selected values across all dimensions
    pub fn count(&self) -> usize {
        self.selected.values().map(BTreeSet::len).sum()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// As server filter parameters: `{dimension: [values...]}`
    pub fn to_params(&self) -> BTreeMap<String, serde_json::Value> {
        self.selected
            .iter()
            .map(|(dimension, values)| {
                let values = values.iter().cloned().map(serde_json::Value::String).collect();
                (dimension.clone(), serde_json::Value::Array(values))
            })
            .collect()
    }
}

/// Client-side list parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<F> {
    /// Free-text search; blank means no constraint
    pub search: String,
    pub filters: FilterState,
    /// `None` keeps the source order
    pub sort: Option<SortState<F>>,
}

impl<F> Default for ListQuery<F> {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: FilterState::default(),
            sort: None,
        }
    }
}

impl<F: Copy + Eq> ListQuery<F> {
    /// Start sorted ascending on `field`
    pub fn sorted_by(field: F) -> Self {
        Self {
            sort: Some(SortState::new(field)),
            ..Default::default()
        }
    }

    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Search text or any filter narrows the list
    pub fn is_narrowed(&self) -> bool {
        self.search_term().is_some() || !self.filters.is_empty()
    }

    /// Sort by `field`, see [`SortState::select`]
    pub fn select_sort(&mut self, field: F) {
        match &mut self.sort {
            Some(sort) => sort.select(field),
            None => self.sort = Some(SortState::new(field)),
        }
    }

    /// Reset search and filters; sort returns to `default_sort` ascending
    pub fn clear(&mut self, default_sort: Option<F>) {
        self.search.clear();
        self.filters.clear();
        self.sort = default_sort.map(SortState::new);
    }
}

/// Distinct values of one filter dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    pub key: &'static str,
    pub label_key: &'static str,
    pub values: Vec<String>,
}

/// Search, filter and sort `records`
pub fn apply<R: Record>(
    records: &[R],
    policy: &RecordPolicy<R>,
    query: &ListQuery<R::Field>,
) -> Vec<R> {
    let needle = query.search_term().map(str::to_lowercase);

    let mut result: Vec<R> = records
        .iter()
        .filter(|record| match &needle {
            Some(needle) => matches_search(*record, policy, needle),
            None => true,
        })
        .filter(|record| matches_filters(*record, policy, &query.filters))
        .cloned()
        .collect();

    if let Some(sort) = query.sort {
        let rule = policy.sort_rule(sort.field);
        result.sort_by(|a, b| {
            let ordering = compare_values(
                sort_value(a.value(sort.field), rule),
                sort_value(b.value(sort.field), rule),
            );
            let ordering = if rule.inverted {
                ordering.reverse()
            } else {
                ordering
            };
            match sort.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    result
}

/// Sorted distinct values per dimension, for the filter bar
pub fn facets<R: Record>(records: &[R], policy: &RecordPolicy<R>) -> Vec<Facet> {
    policy
        .dimensions()
        .iter()
        .map(|dimension| {
            let distinct: BTreeSet<String> = records
                .iter()
                .flat_map(|record| {
                    dimension
                        .fields
                        .iter()
                        .filter_map(|field| record.value(*field).filter_key())
                })
                .collect();
            let mut values: Vec<String> = distinct.into_iter().collect();
            if dimension.numeric {
                values.sort_by(|a, b| {
                    let a = a.parse::<f64>().unwrap_or(f64::MAX);
                    let b = b.parse::<f64>().unwrap_or(f64::MAX);
                    a.total_cmp(&b)
                });
            }
            Facet {
                key: dimension.key,
                label_key: dimension.label_key,
                values,
            }
        })
        .collect()
}

fn matches_search<R: Record>(record: &R, policy: &RecordPolicy<R>, needle: &str) -> bool {
    policy.searchable().iter().any(|field| {
        record
            .value(*field)
            .filter_key()
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

fn matches_filters<R: Record>(record: &R, policy: &RecordPolicy<R>, filters: &FilterState) -> bool {
    policy.dimensions().iter().all(|dimension| {
        let Some(selected) = filters.selected(dimension.key) else {
            return true;
        };
        dimension.fields.iter().any(|field| {
            record
                .value(*field)
                .filter_key()
                .is_some_and(|key| selected.contains(&key))
        })
    })
}

/// Missing values take the field's sentinel, or sort as empty text
fn sort_value(value: FieldValue<'_>, rule: SortRule) -> FieldValue<'_> {
    match value {
        FieldValue::Missing => rule
            .missing
            .map_or(FieldValue::Text(""), FieldValue::Number),
        value => value,
    }
}

fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(&b),
        (FieldValue::Number(_), _) => Ordering::Less,
        (_, FieldValue::Number(_)) => Ordering::Greater,
        (a, b) => locale_compare(a.as_text().unwrap_or(""), b.as_text().unwrap_or("")),
    }
}

/// Case-folded comparison with a code-point tie-break
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}
