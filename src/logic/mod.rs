//! Bracket business logic: eligibility, seeding, grouping, construction, advancement, export.

mod advancement;
mod bracket;
mod eligibility;
mod groups;
mod pipeline;
mod print;
mod roster;
mod seeding;

pub use advancement::{apply_result, record_result};
pub use bracket::{build as build_bracket, num_rounds};
pub use eligibility::{eligible_for_competition, eligible_players, is_eligible, is_eligible_in};
pub use groups::{group_count, partition, MAX_GROUP_SIZE};
pub use pipeline::{derive_all_brackets, derive_bracket, seeded_groups};
pub use print::{render_printable, weight_label};
pub use roster::{read_roster, RosterError};
pub use seeding::SeedingPolicy;
