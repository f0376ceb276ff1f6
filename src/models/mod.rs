//! Data structures for Taekwondo competitions: players, categories, matches, brackets.

mod bout;
mod bracket;
mod competition;
mod player;
mod registry;

pub use bout::{match_id, Match, MatchId, MatchStatus, Score};
pub use bracket::{round_name, BracketError, BracketView};
pub use competition::{Category, CategoryGender, CategoryId, Competition, CompetitionId, CompetitionStatus};
pub use player::{current_year, Gender, Player, PlayerId, BYE_ID_PREFIX, BYE_NAME};
pub use registry::{CategoryBrackets, Registry, RegistryError};
