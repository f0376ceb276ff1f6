//! Taekwondo competition organizer: library with models and bracket logic.

pub mod logic;
pub mod models;

pub use logic::{
    apply_result, build_bracket, derive_all_brackets, derive_bracket, eligible_for_competition,
    eligible_players, group_count, is_eligible, is_eligible_in, num_rounds, partition, read_roster,
    record_result, render_printable, seeded_groups, weight_label, RosterError, SeedingPolicy,
    MAX_GROUP_SIZE,
};
pub use models::{
    current_year, match_id, round_name, BracketError, BracketView, Category, CategoryBrackets,
    CategoryGender, CategoryId, Competition, CompetitionId, CompetitionStatus, Gender, Match,
    MatchId, MatchStatus, Player, PlayerId, Registry, RegistryError, Score, BYE_ID_PREFIX, BYE_NAME,
};
