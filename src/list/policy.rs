//! Record Policy
//!
//! Per-record-type description of how the pipeline searches, filters and
//! sorts. The pipeline itself knows nothing about players.

use crate::constants::{MISSING_METRIC_SENTINEL, MISSING_SIXTY_TIME_SENTINEL};
use crate::domain::player::{Player, PlayerField};
use crate::domain::record::Record;

/// A filter dimension backed by one or more fields
///
/// A record passes a dimension if ANY of its field values is selected.
#[derive(Debug, Clone)]
pub struct Dimension<F> {
    /// Stable key, e.g. "position"
    pub key: &'static str,
    /// i18n key of the filter group label
    pub label_key: &'static str,
    /// Fields contributing values
    pub fields: Vec<F>,
    /// Facet values sort numerically instead of alphabetically
    pub numeric: bool,
}

/// How one field sorts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortRule {
    /// Value substituted for a missing number
    pub missing: Option<f64>,
    /// Lower raw values rank higher ("lower is better")
    pub inverted: bool,
}

impl SortRule {
    pub const PLAIN: SortRule = SortRule {
        missing: None,
        inverted: false,
    };
}

/// Search, filter and sort configuration for record type `R`
#[derive(Debug, Clone)]
pub struct RecordPolicy<R: Record> {
    searchable: Vec<R::Field>,
    dimensions: Vec<Dimension<R::Field>>,
    sortable: Vec<(R::Field, SortRule)>,
    default_sort: Option<R::Field>,
}

impl<R: Record> RecordPolicy<R> {
    pub fn new() -> Self {
        Self {
            searchable: Vec::new(),
            dimensions: Vec::new(),
            sortable: Vec::new(),
            default_sort: None,
        }
    }

    /// Fields matched by free-text search
    pub fn search(mut self, fields: impl IntoIterator<Item = R::Field>) -> Self {
        self.searchable.extend(fields);
        self
    }

    pub fn dimension(mut self, dimension: Dimension<R::Field>) -> Self {
        self.dimensions.push(dimension);
        self
    }

    /// Add a sortable field
    pub fn sort(mut self, field: R::Field, rule: SortRule) -> Self {
        self.sortable.push((field, rule));
        self
    }

    /// Sort applied after the filters are cleared
    pub fn default_sort(mut self, field: R::Field) -> Self {
        self.default_sort = Some(field);
        self
    }

    pub fn searchable(&self) -> &[R::Field] {
        &self.searchable
    }

    pub fn dimensions(&self) -> &[Dimension<R::Field>] {
        &self.dimensions
    }

    pub fn find_dimension(&self, key: &str) -> Option<&Dimension<R::Field>> {
        self.dimensions.iter().find(|d| d.key == key)
    }

    /// Sortable fields in menu order
    pub fn sortable_fields(&self) -> impl Iterator<Item = R::Field> + '_ {
        self.sortable.iter().map(|(field, _)| *field)
    }

    /// Rule for `field`; unlisted fields sort plainly
    pub fn sort_rule(&self, field: R::Field) -> SortRule {
        self.sortable
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, rule)| *rule)
            .unwrap_or(SortRule::PLAIN)
    }

    pub fn default_sort_field(&self) -> Option<R::Field> {
        self.default_sort
    }
}

impl<R: Record> Default for RecordPolicy<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dimension key for positions
pub const POSITION: &str = "position";
/// Dimension key for graduation class
pub const CLASS: &str = "class";

/// Policy for the player roster
pub fn player_policy() -> RecordPolicy<Player> {
    let metric = SortRule {
        missing: Some(MISSING_METRIC_SENTINEL),
        inverted: false,
    };
    RecordPolicy::new()
        .search([
            PlayerField::FullName,
            PlayerField::PrimaryPosition,
            PlayerField::SecondaryPosition,
            PlayerField::HighSchoolState,
            PlayerField::CollegeName,
        ])
        .dimension(Dimension {
            key: POSITION,
            label_key: "filter-position",
            fields: vec![PlayerField::PrimaryPosition, PlayerField::SecondaryPosition],
            numeric: false,
        })
        .dimension(Dimension {
            key: CLASS,
            label_key: "filter-class",
            fields: vec![PlayerField::GradYear],
            numeric: true,
        })
        .sort(PlayerField::FullName, SortRule::PLAIN)
        .sort(PlayerField::GradYear, SortRule::PLAIN)
        .sort(PlayerField::PrimaryPosition, SortRule::PLAIN)
        .sort(PlayerField::PitchVelo, metric)
        .sort(PlayerField::ExitVelo, metric)
        .sort(
            PlayerField::SixtyTime,
            SortRule {
                missing: Some(MISSING_SIXTY_TIME_SENTINEL),
                inverted: true,
            },
        )
        .sort(PlayerField::Gpa, metric)
        .default_sort(PlayerField::FullName)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_policy_shape() {
        let policy = player_policy();
        let sortable: Vec<_> = policy.sortable_fields().collect();
        assert_eq!(sortable, PlayerField::SORTABLE.to_vec());
        assert!(policy.sort_rule(PlayerField::SixtyTime).inverted);
        assert_eq!(policy.sort_rule(PlayerField::Gpa).missing, Some(0.0));
        assert_eq!(policy.sort_rule(PlayerField::CollegeName), SortRule::PLAIN);
        assert_eq!(policy.default_sort_field(), Some(PlayerField::FullName));
        let position = policy.find_dimension(POSITION).expect("position dimension");
        assert_eq!(position.fields.len(), 2);
        assert!(policy.find_dimension("state").is_none());
    }
}
