//! Roster + category -> bracket views. Re-run whenever any input changes.

use crate::logic::{bracket, eligibility, groups, SeedingPolicy};
use crate::models::{BracketView, Category, Player};

/// Bracket of group `group_index` for the players of `roster` eligible for `category` in `year`.
///
/// An out-of-range group index gives an empty view.
pub fn derive_bracket(
    roster: &[Player],
    category: &Category,
    group_index: usize,
    policy: &SeedingPolicy,
    year: i32,
) -> BracketView {
    let groups = seeded_groups(roster, category, policy, year);
    match groups.into_iter().nth(group_index) {
        Some(group) => view_for_group(group, group_index),
        None => BracketView {
            group_index,
            ..BracketView::default()
        },
    }
}

/// Brackets of every group of the category, in group order.
pub fn derive_all_brackets(
    roster: &[Player],
    category: &Category,
    policy: &SeedingPolicy,
    year: i32,
) -> Vec<BracketView> {
    seeded_groups(roster, category, policy, year)
        .into_iter()
        .enumerate()
        .map(|(i, group)| view_for_group(group, i))
        .collect()
}

/// Eligible players in seed order, split into padded groups.
pub fn seeded_groups(
    roster: &[Player],
    category: &Category,
    policy: &SeedingPolicy,
    year: i32,
) -> Vec<Vec<Player>> {
    let eligible = eligibility::eligible_players(roster, category, year);
    log::debug!(
        "Category {}: {} of {} player(s) eligible",
        category.name,
        eligible.len(),
        roster.len()
    );
    groups::partition(&policy.apply(&eligible))
}

fn view_for_group(group: Vec<Player>, group_index: usize) -> BracketView {
    let matches = bracket::build(&group, group_index);
    BracketView::from_matches(group_index, group, matches)
}
