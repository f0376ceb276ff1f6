//! Eligibility: which roster players qualify for a category.

use crate::models::{current_year, Category, Competition, Player};

/// Whether `player` qualifies for `category` this year.
pub fn is_eligible(player: &Player, category: &Category) -> bool {
    is_eligible_in(player, category, current_year())
}

/// Whether `player` qualifies for `category` in `year`.
///
/// Age, weight and gender must all match; every bound is inclusive. Age is calendar-year
/// subtraction (see [`Player::age_in`]). Byes never qualify.
pub fn is_eligible_in(player: &Player, category: &Category, year: i32) -> bool {
    if player.is_bye() {
        return false;
    }
    let age = player.age_in(year);
    let matches_age = age >= category.age_min && age <= category.age_max;
    let matches_weight = player.weight >= category.weight_min && player.weight <= category.weight_max;
    let matches_gender = category.gender.admits(player.gender);
    matches_age && matches_weight && matches_gender
}

/// Roster players eligible for `category` in `year`, in roster order.
pub fn eligible_players(roster: &[Player], category: &Category, year: i32) -> Vec<Player> {
    roster
        .iter()
        .filter(|p| is_eligible_in(p, category, year))
        .cloned()
        .collect()
}

/// Roster players eligible for at least one of the competition's categories, in roster order.
pub fn eligible_for_competition(roster: &[Player], competition: &Competition, year: i32) -> Vec<Player> {
    roster
        .iter()
        .filter(|p| competition.categories.iter().any(|c| is_eligible_in(p, c, year)))
        .cloned()
        .collect()
}
