//! In-memory registry: roster, competitions with their categories, and live brackets.

use crate::logic::{derive_all_brackets, eligible_players, group_count, SeedingPolicy};
use crate::models::bracket::{BracketError, BracketView};
use crate::models::bout::Score;
use crate::models::competition::{Category, CategoryId, Competition, CompetitionId, CompetitionStatus};
use crate::models::player::{current_year, Player, PlayerId, BYE_ID_PREFIX, BYE_NAME};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Errors that can occur while managing records and brackets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistryError {
    PlayerNotFound(PlayerId),
    CompetitionNotFound(CompetitionId),
    CategoryNotFound(CategoryId),
    /// Category has no bracket with this group index.
    GroupNotFound(usize),
    /// A player with this id is already on the roster.
    DuplicatePlayerId(PlayerId),
    /// A category with this name already exists in the competition (case-insensitive).
    DuplicateCategoryName,
    EmptyName,
    /// Player name or id collides with the bye placeholder.
    ReservedName,
    /// A min bound is greater than its max bound.
    InvalidRange,
    /// Competition is not in a state that allows this action.
    InvalidState,
    Bracket(BracketError),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::PlayerNotFound(_) => write!(f, "Player not found"),
            RegistryError::CompetitionNotFound(_) => write!(f, "Competition not found"),
            RegistryError::CategoryNotFound(_) => write!(f, "Category not found"),
            RegistryError::GroupNotFound(g) => write!(f, "Group {} not found", g + 1),
            RegistryError::DuplicatePlayerId(id) => write!(f, "A player with id {} already exists", id),
            RegistryError::DuplicateCategoryName => write!(f, "A category with this name already exists"),
            RegistryError::EmptyName => write!(f, "Name must not be empty"),
            RegistryError::ReservedName => write!(f, "{} and ids starting with {} are reserved for byes", BYE_NAME, BYE_ID_PREFIX),
            RegistryError::InvalidRange => write!(f, "Minimum must not exceed maximum"),
            RegistryError::InvalidState => write!(f, "Invalid state for this action"),
            RegistryError::Bracket(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<BracketError> for RegistryError {
    fn from(e: BracketError) -> Self {
        RegistryError::Bracket(e)
    }
}

impl RegistryError {
    /// Whether the error means a referenced record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegistryError::PlayerNotFound(_)
                | RegistryError::CompetitionNotFound(_)
                | RegistryError::CategoryNotFound(_)
                | RegistryError::GroupNotFound(_)
                | RegistryError::Bracket(BracketError::MatchNotFound(_))
        )
    }
}

/// Summary of one category's brackets.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryBrackets {
    pub category: Category,
    pub eligible_count: usize,
    /// Number of groups the eligible players are split into.
    pub group_count: usize,
    pub groups: Vec<BracketView>,
}

type BracketKey = (CompetitionId, CategoryId);

/// Roster, competitions and the bracket state derived from them.
///
/// Brackets are derived on first access and then carry recorded results. Any change to the
/// roster drops every bracket; any change to a category drops that category's brackets.
#[derive(Debug, Default)]
pub struct Registry {
    players: Vec<Player>,
    competitions: Vec<Competition>,
    brackets: HashMap<BracketKey, Vec<BracketView>>,
    seeding: SeedingPolicy,
    /// Year ages are computed in; None means the current year.
    year: Option<i32>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a fixed seeding policy and age reference year (tests, reproducible draws).
    pub fn with_settings(seeding: SeedingPolicy, year: Option<i32>) -> Self {
        Self {
            seeding,
            year,
            ..Self::default()
        }
    }

    fn year(&self) -> i32 {
        self.year.unwrap_or_else(current_year)
    }

    // Roster

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn add_player(&mut self, player: Player) -> Result<(), RegistryError> {
        check_player(&player)?;
        if self.players.iter().any(|p| p.id == player.id) {
            return Err(RegistryError::DuplicatePlayerId(player.id));
        }
        log::info!("Adding player {} ({})", player.name, player.club);
        self.players.push(player);
        self.roster_changed();
        Ok(())
    }

    pub fn remove_player(&mut self, player_id: &str) -> Result<Player, RegistryError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| RegistryError::PlayerNotFound(player_id.to_string()))?;
        let removed = self.players.remove(idx);
        log::info!("Removed player {}", removed.name);
        self.roster_changed();
        Ok(removed)
    }

    /// Replace a player's record, keeping its id (e.g. a corrected weight at weigh-in).
    pub fn update_player(&mut self, player: Player) -> Result<(), RegistryError> {
        check_player(&player)?;
        let slot = self
            .players
            .iter_mut()
            .find(|p| p.id == player.id)
            .ok_or_else(|| RegistryError::PlayerNotFound(player.id.clone()))?;
        log::info!("Updating player {} ({})", player.name, player.club);
        *slot = player;
        self.roster_changed();
        Ok(())
    }

    /// Replace the whole roster (e.g. after an import). On error the roster is left as it was.
    pub fn replace_roster(&mut self, players: Vec<Player>) -> Result<(), RegistryError> {
        {
            let mut seen = HashSet::new();
            for player in &players {
                check_player(player)?;
                if !seen.insert(player.id.as_str()) {
                    return Err(RegistryError::DuplicatePlayerId(player.id.clone()));
                }
            }
        }
        log::info!("Roster replaced: {} player(s)", players.len());
        self.players = players;
        self.roster_changed();
        Ok(())
    }

    fn roster_changed(&mut self) {
        if !self.brackets.is_empty() {
            log::debug!("Roster changed: dropping {} bracket set(s)", self.brackets.len());
            self.brackets.clear();
        }
    }

    // Competitions and categories

    pub fn competitions(&self) -> &[Competition] {
        &self.competitions
    }

    pub fn competition(&self, id: &str) -> Result<&Competition, RegistryError> {
        self.competitions
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| RegistryError::CompetitionNotFound(id.to_string()))
    }

    fn competition_mut(&mut self, id: &str) -> Result<&mut Competition, RegistryError> {
        self.competitions
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RegistryError::CompetitionNotFound(id.to_string()))
    }

    pub fn add_competition(&mut self, competition: Competition) -> CompetitionId {
        log::info!("Adding competition {} ({})", competition.name, competition.location);
        let id = competition.id.clone();
        self.competitions.push(competition);
        id
    }

    /// Remove a competition together with its categories and brackets.
    pub fn remove_competition(&mut self, id: &str) -> Result<Competition, RegistryError> {
        let idx = self
            .competitions
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| RegistryError::CompetitionNotFound(id.to_string()))?;
        let removed = self.competitions.remove(idx);
        self.brackets.retain(|(comp, _), _| comp != id);
        log::info!("Removed competition {} and {} category(ies)", removed.name, removed.categories.len());
        Ok(removed)
    }

    /// Rename or relocate a competition. Its categories and brackets are kept.
    pub fn update_competition(&mut self, id: &str, name: &str, location: &str) -> Result<(), RegistryError> {
        let competition = self.competition_mut(id)?;
        competition.rename(name, location)?;
        log::info!("Competition {} updated ({})", competition.name, competition.location);
        Ok(())
    }

    pub fn set_competition_status(&mut self, id: &str, status: CompetitionStatus) -> Result<(), RegistryError> {
        let competition = self.competition_mut(id)?;
        competition.set_status(status)?;
        log::info!("Competition {} is now {:?}", competition.name, status);
        Ok(())
    }

    pub fn add_category(&mut self, competition_id: &str, category: Category) -> Result<CategoryId, RegistryError> {
        let id = category.id.clone();
        self.competition_mut(competition_id)?.add_category(category)?;
        Ok(id)
    }

    /// Replace a category's definition, keeping its id. Its brackets are derived again.
    pub fn update_category(&mut self, competition_id: &str, category: Category) -> Result<(), RegistryError> {
        self.competition_mut(competition_id)?.update_category(category.clone())?;
        self.brackets.remove(&(competition_id.to_string(), category.id.clone()));
        log::info!("Category {} updated", category.name);
        Ok(())
    }

    pub fn remove_category(&mut self, competition_id: &str, category_id: &str) -> Result<Category, RegistryError> {
        let removed = self.competition_mut(competition_id)?.remove_category(category_id)?;
        self.brackets
            .remove(&(competition_id.to_string(), category_id.to_string()));
        Ok(removed)
    }

    pub fn category(&self, competition_id: &str, category_id: &str) -> Result<&Category, RegistryError> {
        self.competition(competition_id)?
            .category(category_id)
            .ok_or_else(|| RegistryError::CategoryNotFound(category_id.to_string()))
    }

    // Eligibility and brackets

    pub fn eligible_players(&self, competition_id: &str, category_id: &str) -> Result<Vec<Player>, RegistryError> {
        let category = self.category(competition_id, category_id)?;
        Ok(eligible_players(&self.players, category, self.year()))
    }

    /// All group brackets of a category, deriving them if needed.
    pub fn brackets(&mut self, competition_id: &str, category_id: &str) -> Result<&[BracketView], RegistryError> {
        let key = (competition_id.to_string(), category_id.to_string());
        if !self.brackets.contains_key(&key) {
            let category = self.category(competition_id, category_id)?;
            let views = derive_all_brackets(&self.players, category, &self.seeding, self.year());
            log::debug!("Derived {} group(s) for category {}", views.len(), category.name);
            self.brackets.insert(key.clone(), views);
        }
        Ok(self.brackets.get(&key).map(Vec::as_slice).unwrap_or_default())
    }

    pub fn category_brackets(&mut self, competition_id: &str, category_id: &str) -> Result<CategoryBrackets, RegistryError> {
        let category = self.category(competition_id, category_id)?.clone();
        let eligible_count = eligible_players(&self.players, &category, self.year()).len();
        let groups = self.brackets(competition_id, category_id)?.to_vec();
        Ok(CategoryBrackets {
            category,
            eligible_count,
            group_count: group_count(eligible_count),
            groups,
        })
    }

    pub fn bracket(&mut self, competition_id: &str, category_id: &str, group_index: usize) -> Result<&BracketView, RegistryError> {
        self.brackets(competition_id, category_id)?
            .get(group_index)
            .ok_or(RegistryError::GroupNotFound(group_index))
    }

    /// Record a match result. Only allowed while the competition is Active.
    pub fn record_result(
        &mut self,
        competition_id: &str,
        category_id: &str,
        group_index: usize,
        match_id: &str,
        winner_id: &str,
        score: Option<Score>,
    ) -> Result<&BracketView, RegistryError> {
        if self.competition(competition_id)?.status != CompetitionStatus::Active {
            return Err(RegistryError::InvalidState);
        }
        let updated = self
            .bracket(competition_id, category_id, group_index)?
            .record_result(match_id, winner_id, score)?;
        let views = self
            .brackets
            .get_mut(&(competition_id.to_string(), category_id.to_string()))
            .ok_or(RegistryError::GroupNotFound(group_index))?;
        views[group_index] = updated;
        Ok(&views[group_index])
    }
}

fn check_player(player: &Player) -> Result<(), RegistryError> {
    if player.name.trim().is_empty() {
        return Err(RegistryError::EmptyName);
    }
    if player.has_reserved_identity() {
        return Err(RegistryError::ReservedName);
    }
    Ok(())
}
