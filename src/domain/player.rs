//! Player - Player Profile Record

use serde::{Deserialize, Serialize};

use super::record::{FieldValue, Record};

/// Recruiting commitment status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentStatus {
    #[default]
    Uncommitted,
    Committed,
    Signed,
}

/// A player profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID
    pub id: String,
    /// Display name
    pub full_name: String,
    /// Graduation year (class)
    pub grad_year: i32,
    /// Primary position (e.g., "SS", "RHP")
    pub primary_position: String,
    /// Secondary position
    #[serde(default)]
    pub secondary_position: Option<String>,
    /// High school state
    #[serde(default)]
    pub high_school_state: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Pitch velocity (mph)
    #[serde(default)]
    pub pitch_velo: Option<f64>,
    /// Exit velocity (mph)
    #[serde(default)]
    pub exit_velo: Option<f64>,
    /// Sixty-yard dash time (seconds, lower is better)
    #[serde(default)]
    pub sixty_time: Option<f64>,
    /// Grade point average
    #[serde(default)]
    pub gpa: Option<f64>,
    /// Height (e.g., "6'2\"")
    #[serde(default)]
    pub height: Option<String>,
    /// Weight (lbs)
    #[serde(default)]
    pub weight: Option<f64>,
    /// Commitment status
    #[serde(default)]
    pub commitment_status: CommitmentStatus,
    /// College the player committed to
    #[serde(default)]
    pub college_name: Option<String>,
}

/// Player attributes addressable by the list pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerField {
    FullName,
    GradYear,
    PrimaryPosition,
    SecondaryPosition,
    HighSchoolState,
    CollegeName,
    PitchVelo,
    ExitVelo,
    SixtyTime,
    Gpa,
}

impl PlayerField {
    /// Fields offered in the sort menu, in display order
    pub const SORTABLE: [PlayerField; 7] = [
        PlayerField::FullName,
        PlayerField::GradYear,
        PlayerField::PrimaryPosition,
        PlayerField::PitchVelo,
        PlayerField::ExitVelo,
        PlayerField::SixtyTime,
        PlayerField::Gpa,
    ];

    /// Wire name used in `FetchQuery::sort_by`
    pub fn key(&self) -> &'static str {
        match self {
            PlayerField::FullName => "full_name",
            PlayerField::GradYear => "grad_year",
            PlayerField::PrimaryPosition => "primary_position",
            PlayerField::SecondaryPosition => "secondary_position",
            PlayerField::HighSchoolState => "high_school_state",
            PlayerField::CollegeName => "college_name",
            PlayerField::PitchVelo => "pitch_velo",
            PlayerField::ExitVelo => "exit_velo",
            PlayerField::SixtyTime => "sixty_time",
            PlayerField::Gpa => "gpa",
        }
    }

    /// Parse a wire name
    pub fn from_key(key: &str) -> Option<Self> {
        Self::SORTABLE
            .into_iter()
            .chain([
                PlayerField::SecondaryPosition,
                PlayerField::HighSchoolState,
                PlayerField::CollegeName,
            ])
            .find(|f| f.key() == key)
    }

    /// i18n key for the column/sort label
    pub fn label_key(&self) -> &'static str {
        match self {
            PlayerField::FullName => "sort-name",
            PlayerField::GradYear => "sort-class",
            PlayerField::PrimaryPosition | PlayerField::SecondaryPosition => "sort-position",
            PlayerField::HighSchoolState => "col-state",
            PlayerField::CollegeName => "col-college",
            PlayerField::PitchVelo => "sort-pitch-velo",
            PlayerField::ExitVelo => "sort-exit-velo",
            PlayerField::SixtyTime => "sort-sixty",
            PlayerField::Gpa => "sort-gpa",
        }
    }
}

impl Record for Player {
    type Field = PlayerField;

    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self, field: PlayerField) -> FieldValue<'_> {
        match field {
            PlayerField::FullName => FieldValue::Text(&self.full_name),
            PlayerField::GradYear => FieldValue::Number(f64::from(self.grad_year)),
            PlayerField::PrimaryPosition => FieldValue::Text(&self.primary_position),
            PlayerField::SecondaryPosition => FieldValue::text(self.secondary_position.as_deref()),
            PlayerField::HighSchoolState => FieldValue::text(self.high_school_state.as_deref()),
            PlayerField::CollegeName => FieldValue::text(self.college_name.as_deref()),
            PlayerField::PitchVelo => FieldValue::number(self.pitch_velo),
            PlayerField::ExitVelo => FieldValue::number(self.exit_velo),
            PlayerField::SixtyTime => FieldValue::number(self.sixty_time),
            PlayerField::Gpa => FieldValue::number(self.gpa),
        }
    }
}

impl Player {
    /// Up to two initials for the avatar fallback
    pub fn initials(&self) -> String {
        self.full_name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }

    /// Non-empty performance metrics as (label key, formatted value)
    pub fn metrics(&self) -> Vec<(&'static str, String)> {
        [
            ("metric-pitch", self.pitch_velo, " mph"),
            ("metric-exit", self.exit_velo, " mph"),
            ("metric-sixty", self.sixty_time, "s"),
        ]
        .into_iter()
        .filter_map(|(label, value, unit)| match value {
            Some(v) if v != 0.0 => Some((label, format!("{v}{unit}"))),
            _ => None,
        })
        .collect()
    }
}
