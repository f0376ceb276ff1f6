//! Integration tests for category eligibility.

use chrono::NaiveDate;
use tkd_competition_web::{
    eligible_for_competition, eligible_players, is_eligible_in, Category, CategoryGender,
    Competition, Gender, Player, RegistryError,
};

const YEAR: i32 = 2024;

fn player(id: &str, gender: Gender, birth_year: i32, weight: f64) -> Player {
    let birth_date = NaiveDate::from_ymd_opt(birth_year, 6, 15).unwrap();
    Player::with_id(id, format!("Player {id}"), "Dragon Blanc", gender, birth_date, weight)
}

/// Ages 10-12, 30-40kg.
fn category(gender: CategoryGender) -> Category {
    Category::new("Minimes", (30.0, 40.0), (10, 12), gender).unwrap()
}

#[test]
fn bounds_are_inclusive() {
    let c = category(CategoryGender::Mixed);
    assert!(is_eligible_in(&player("a", Gender::Male, YEAR - 10, 35.0), &c, YEAR));
    assert!(is_eligible_in(&player("b", Gender::Male, YEAR - 12, 35.0), &c, YEAR));
    assert!(is_eligible_in(&player("c", Gender::Male, YEAR - 11, 30.0), &c, YEAR));
    assert!(is_eligible_in(&player("d", Gender::Male, YEAR - 11, 40.0), &c, YEAR));
}

#[test]
fn one_unit_outside_any_bound_is_excluded() {
    let c = category(CategoryGender::Mixed);
    assert!(!is_eligible_in(&player("a", Gender::Male, YEAR - 9, 35.0), &c, YEAR));
    assert!(!is_eligible_in(&player("b", Gender::Male, YEAR - 13, 35.0), &c, YEAR));
    assert!(!is_eligible_in(&player("c", Gender::Male, YEAR - 11, 29.0), &c, YEAR));
    assert!(!is_eligible_in(&player("d", Gender::Male, YEAR - 11, 41.0), &c, YEAR));
}

#[test]
fn age_is_calendar_year_subtraction() {
    let c = category(CategoryGender::Mixed);
    // Born on Dec 31: still 9 on most days of the year, but counts as 10.
    let late = Player::with_id(
        "late",
        "Late Birthday",
        "Tigres Noirs",
        Gender::Female,
        NaiveDate::from_ymd_opt(YEAR - 10, 12, 31).unwrap(),
        35.0,
    );
    assert_eq!(late.age_in(YEAR), 10);
    assert!(is_eligible_in(&late, &c, YEAR));
}

#[test]
fn gender_constraint() {
    let boy = player("boy", Gender::Male, YEAR - 11, 35.0);
    let girl = player("girl", Gender::Female, YEAR - 11, 35.0);

    let mixed = category(CategoryGender::Mixed);
    assert!(is_eligible_in(&boy, &mixed, YEAR));
    assert!(is_eligible_in(&girl, &mixed, YEAR));

    let male = category(CategoryGender::Male);
    assert!(is_eligible_in(&boy, &male, YEAR));
    assert!(!is_eligible_in(&girl, &male, YEAR));

    let female = category(CategoryGender::Female);
    assert!(!is_eligible_in(&boy, &female, YEAR));
    assert!(is_eligible_in(&girl, &female, YEAR));
}

#[test]
fn byes_are_never_eligible() {
    let c = Category::new("Open", (0.0, 200.0), (-10_000, 10_000), CategoryGender::Mixed).unwrap();
    assert!(!is_eligible_in(&Player::bye("0-0"), &c, YEAR));
}

#[test]
fn eligible_players_keeps_roster_order() {
    let roster = vec![
        player("a", Gender::Male, YEAR - 11, 35.0),
        player("b", Gender::Male, YEAR - 20, 35.0),
        player("c", Gender::Female, YEAR - 10, 31.5),
        player("d", Gender::Male, YEAR - 12, 39.0),
    ];
    let ids: Vec<_> = eligible_players(&roster, &category(CategoryGender::Mixed), YEAR)
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec!["a", "c", "d"]);
}

#[test]
fn competition_eligibility_matches_any_category() {
    let mut competition = Competition::new("Championnat National Junior", "Marrakech").unwrap();
    competition.add_category(category(CategoryGender::Female)).unwrap();
    competition
        .add_category(Category::new("Cadets", (50.0, 70.0), (14, 17), CategoryGender::Male).unwrap())
        .unwrap();
    let roster = vec![
        player("girl", Gender::Female, YEAR - 11, 35.0),
        player("boy", Gender::Male, YEAR - 11, 35.0),
        player("cadet", Gender::Male, YEAR - 16, 62.0),
    ];
    let ids: Vec<_> = eligible_for_competition(&roster, &competition, YEAR)
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec!["girl", "cadet"]);
}

#[test]
fn category_rejects_inverted_ranges() {
    assert_eq!(
        Category::new("Bad", (40.0, 30.0), (10, 12), CategoryGender::Mixed),
        Err(RegistryError::InvalidRange)
    );
    assert_eq!(
        Category::new("Bad", (30.0, 40.0), (12, 10), CategoryGender::Mixed),
        Err(RegistryError::InvalidRange)
    );
    assert_eq!(
        Category::new("  ", (30.0, 40.0), (10, 12), CategoryGender::Mixed),
        Err(RegistryError::EmptyName)
    );
}
