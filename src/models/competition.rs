//! Competition, Category and CompetitionStatus.

use crate::models::player::Gender;
use crate::models::registry::RegistryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a competition.
pub type CompetitionId = String;

/// Unique identifier for a category (unique within its competition).
pub type CategoryId = String;

/// Gender constraint of a category.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGender {
    Male,
    Female,
    #[default]
    Mixed,
}

impl CategoryGender {
    pub fn admits(self, gender: Gender) -> bool {
        match self {
            CategoryGender::Mixed => true,
            CategoryGender::Male => gender == Gender::Male,
            CategoryGender::Female => gender == Gender::Female,
        }
    }
}

/// Age/weight/gender bracket players compete in. All bounds are inclusive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Kilograms.
    pub weight_min: f64,
    pub weight_max: f64,
    /// Years.
    pub age_min: i32,
    pub age_max: i32,
    pub gender: CategoryGender,
}

impl Category {
    /// Validated constructor: name must be non-empty and each range ordered.
    pub fn new(
        name: impl Into<String>,
        weight_range: (f64, f64),
        age_range: (i32, i32),
        gender: CategoryGender,
    ) -> Result<Self, RegistryError> {
        Self::with_id(Uuid::new_v4().to_string(), name, weight_range, age_range, gender)
    }

    /// Same checks as [`Category::new`], for a category that already has an id.
    pub fn with_id(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        weight_range: (f64, f64),
        age_range: (i32, i32),
        gender: CategoryGender,
    ) -> Result<Self, RegistryError> {
        let name: String = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        let (weight_min, weight_max) = weight_range;
        let (age_min, age_max) = age_range;
        // NaN fails the comparison too.
        if !(weight_min <= weight_max) || age_min > age_max {
            return Err(RegistryError::InvalidRange);
        }
        Ok(Self {
            id: id.into(),
            name: name.to_string(),
            weight_min,
            weight_max,
            age_min,
            age_max,
            gender,
        })
    }
}

/// Lifecycle of a competition. Moves forward only.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionStatus {
    /// Players and categories are being set up.
    #[default]
    Registration,
    /// Brackets are being fought.
    Active,
    Completed,
}

/// A competition and the categories it owns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    pub id: CompetitionId,
    pub name: String,
    pub location: String,
    pub status: CompetitionStatus,
    pub created_at: DateTime<Utc>,
    pub categories: Vec<Category>,
}

impl Competition {
    /// Create a new competition in Registration with no categories.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Result<Self, RegistryError> {
        let name: String = name.into();
        let location: String = location.into();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            location: location.trim().to_string(),
            status: CompetitionStatus::Registration,
            created_at: Utc::now(),
            categories: Vec::new(),
        })
    }

    pub fn rename(&mut self, name: &str, location: &str) -> Result<(), RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        self.name = name.trim().to_string();
        self.location = location.trim().to_string();
        Ok(())
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Add a category. Names are unique within a competition (case-insensitive).
    pub fn add_category(&mut self, category: Category) -> Result<(), RegistryError> {
        if self.status == CompetitionStatus::Completed {
            return Err(RegistryError::InvalidState);
        }
        let is_duplicate = self
            .categories
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(&category.name));
        if is_duplicate {
            return Err(RegistryError::DuplicateCategoryName);
        }
        self.categories.push(category);
        Ok(())
    }

    /// Replace the category with the same id. The new name must not clash with another category.
    pub fn update_category(&mut self, category: Category) -> Result<(), RegistryError> {
        if self.status == CompetitionStatus::Completed {
            return Err(RegistryError::InvalidState);
        }
        let is_duplicate = self
            .categories
            .iter()
            .any(|c| c.id != category.id && c.name.eq_ignore_ascii_case(&category.name));
        if is_duplicate {
            return Err(RegistryError::DuplicateCategoryName);
        }
        let slot = self
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| RegistryError::CategoryNotFound(category.id.clone()))?;
        *slot = category;
        Ok(())
    }

    pub fn remove_category(&mut self, id: &str) -> Result<Category, RegistryError> {
        let idx = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| RegistryError::CategoryNotFound(id.to_string()))?;
        Ok(self.categories.remove(idx))
    }

    /// Registration -> Active.
    pub fn start(&mut self) -> Result<(), RegistryError> {
        if self.status != CompetitionStatus::Registration {
            return Err(RegistryError::InvalidState);
        }
        self.status = CompetitionStatus::Active;
        Ok(())
    }

    /// Active -> Completed.
    pub fn complete(&mut self) -> Result<(), RegistryError> {
        if self.status != CompetitionStatus::Active {
            return Err(RegistryError::InvalidState);
        }
        self.status = CompetitionStatus::Completed;
        Ok(())
    }

    /// Move to `status`, accepting the current status as a no-op.
    pub fn set_status(&mut self, status: CompetitionStatus) -> Result<(), RegistryError> {
        use CompetitionStatus::*;
        match (self.status, status) {
            (from, to) if from == to => Ok(()),
            (Registration, Active) => self.start(),
            (Active, Completed) => self.complete(),
            _ => Err(RegistryError::InvalidState),
        }
    }
}
