//! Roster import from CSV: `id,name,club,gender,birth_date,weight`.

use crate::models::{Gender, Player, BYE_ID_PREFIX, BYE_NAME};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use uuid::Uuid;

/// Errors while reading a roster file.
#[derive(Debug)]
pub enum RosterError {
    /// Malformed CSV or a field that does not parse.
    Csv(csv::Error),
    /// Row (1-based, header excluded) with an invalid value.
    InvalidRow { line: usize, reason: String },
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Csv(e) => write!(f, "Invalid roster CSV: {}", e),
            RosterError::InvalidRow { line, reason } => write!(f, "Roster row {}: {}", line, reason),
        }
    }
}

impl std::error::Error for RosterError {}

impl From<csv::Error> for RosterError {
    fn from(e: csv::Error) -> Self {
        RosterError::Csv(e)
    }
}

#[derive(Deserialize)]
struct RosterRow {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    club: String,
    gender: Gender,
    birth_date: NaiveDate,
    weight: f64,
}

/// Parse a roster. Blank ids get a fresh UUID; names and clubs are trimmed.
///
/// Ids must be unique within the file, and the bye name and id prefix are reserved.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<Player>, RosterError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut players = Vec::new();
    let mut seen = HashSet::new();
    for (i, row) in rdr.deserialize::<RosterRow>().enumerate() {
        let line = i + 1;
        let row = row?;
        if row.name.trim().is_empty() {
            return Err(RosterError::InvalidRow {
                line,
                reason: "empty name".to_string(),
            });
        }
        if row.name.trim().eq_ignore_ascii_case(BYE_NAME) {
            return Err(RosterError::InvalidRow {
                line,
                reason: format!("{} is reserved for byes", BYE_NAME),
            });
        }
        if !(row.weight > 0.0) {
            return Err(RosterError::InvalidRow {
                line,
                reason: format!("weight must be positive, got {}", row.weight),
            });
        }
        let id = row
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        if id.starts_with(BYE_ID_PREFIX) {
            return Err(RosterError::InvalidRow {
                line,
                reason: format!("ids starting with {} are reserved for byes", BYE_ID_PREFIX),
            });
        }
        if !seen.insert(id.clone()) {
            return Err(RosterError::InvalidRow {
                line,
                reason: format!("duplicate id {}", id),
            });
        }
        players.push(Player::with_id(
            id,
            row.name.trim(),
            row.club.trim(),
            row.gender,
            row.birth_date,
            row.weight,
        ));
    }
    log::info!("Read {} player(s) from roster", players.len());
    Ok(players)
}
