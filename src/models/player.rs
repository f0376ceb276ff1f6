//! Player (competitor) and Gender.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = String;

/// Name carried by bye placeholders. A player with this name never competes.
pub const BYE_NAME: &str = "EXEMPT";

/// Prefix of every bye placeholder id.
pub const BYE_ID_PREFIX: &str = "bye-";

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// A competitor on a club roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Club affiliation (free text).
    pub club: String,
    /// Kilograms. Byes carry 0.
    pub weight: f64,
    pub gender: Gender,
    pub birth_date: NaiveDate,
}

impl Player {
    /// Create a new player with a fresh id.
    pub fn new(
        name: impl Into<String>,
        club: impl Into<String>,
        gender: Gender,
        birth_date: NaiveDate,
        weight: f64,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, club, gender, birth_date, weight)
    }

    /// Create a player with a caller-chosen id (imports, tests).
    pub fn with_id(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        club: impl Into<String>,
        gender: Gender,
        birth_date: NaiveDate,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            club: club.into(),
            weight,
            gender,
            birth_date,
        }
    }

    /// Synthetic placeholder that keeps a group a complete binary bracket.
    /// `slot` must make the id unique within the partition it belongs to.
    pub fn bye(slot: impl std::fmt::Display) -> Self {
        Self {
            id: format!("{BYE_ID_PREFIX}{slot}"),
            name: BYE_NAME.to_string(),
            club: BYE_NAME.to_string(),
            weight: 0.0,
            gender: Gender::default(),
            birth_date: NaiveDate::MIN,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.name == BYE_NAME
    }

    /// Name or id a roster entry may not take, because byes use them.
    pub fn has_reserved_identity(&self) -> bool {
        self.name.trim().eq_ignore_ascii_case(BYE_NAME) || self.id.starts_with(BYE_ID_PREFIX)
    }

    /// Age in `year`: plain calendar-year subtraction, birthdays within the year are ignored.
    pub fn age_in(&self, year: i32) -> i32 {
        year - self.birth_date.year()
    }
}

/// Current calendar year (local time).
pub fn current_year() -> i32 {
    Local::now().year()
}
