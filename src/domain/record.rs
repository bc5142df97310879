//! Record - Generic Row Abstraction
//!
//! Every row the list displays implements [`Record`]. The pipeline and the
//! renderer only ever see records through this trait, so the same loader and
//! virtual list work for any domain type.

use std::fmt::Debug;
use std::hash::Hash;

/// A single attribute value read from a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Textual attribute
    Text(&'a str),
    /// Numeric attribute
    Number(f64),
    /// Attribute not present on this record
    Missing,
}

impl<'a> FieldValue<'a> {
    /// Build from an optional string, treating empty strings as missing
    pub fn text(value: Option<&'a str>) -> Self {
        match value {
            Some(s) if !s.is_empty() => FieldValue::Text(s),
            _ => FieldValue::Missing,
        }
    }

    /// Build from an optional number
    pub fn number(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::Number)
    }

    /// Text content, if any
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Key used for filter-set membership (numbers without trailing `.0`)
    pub fn filter_key(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some((*s).to_string()),
            FieldValue::Number(n) if n.fract() == 0.0 => Some(format!("{}", *n as i64)),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

/// A normalized row of domain data
///
/// `id` must be unique within a result set and stable across reloads.
/// Records are never patched in place: a reload replaces the whole set.
pub trait Record: Clone + Send + Sync + 'static {
    /// Attribute selector used by search, filters and sorting
    type Field: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// Unique, stable identifier
    fn id(&self) -> &str;

    /// Read one attribute
    fn value(&self, field: Self::Field) -> FieldValue<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_key_integers_have_no_fraction() {
        assert_eq!(FieldValue::Number(2026.0).filter_key().as_deref(), Some("2026"));
        assert_eq!(FieldValue::Number(6.85).filter_key().as_deref(), Some("6.85"));
        assert_eq!(FieldValue::Text("SS").filter_key().as_deref(), Some("SS"));
        assert_eq!(FieldValue::Missing.filter_key(), None);
    }

    #[test]
    fn test_empty_text_is_missing() {
        assert!(FieldValue::text(Some("")).is_missing());
        assert!(FieldValue::text(None).is_missing());
        assert_eq!(FieldValue::text(Some("TX")).as_text(), Some("TX"));
    }
}
