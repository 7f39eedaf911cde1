use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::roster::{Roster, RosterEntry, RosterError};

/// Immutable historical honor season created by finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HonorSeason {
    pub id: i64,
    pub start_date: String,
    pub end_date: String,
    pub participants: Vec<RosterEntry>,
}

/// POST payload for creating a new honor season record.
/// Date field names follow the external API's camelCase contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHonorSeason {
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    pub participants: Vec<RosterEntry>,
}

/// One member's scores within an expedition ranking season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonParticipant {
    pub name: String,
    /// Access-phase score.
    #[serde(rename = "fase", default)]
    pub phase: i64,
    #[serde(default)]
    pub r1: i64,
    #[serde(default)]
    pub r2: i64,
    #[serde(default)]
    pub r3: i64,
}

impl SeasonParticipant {
    /// Combined expedition score across the three rounds.
    pub fn round_total(&self) -> i64 {
        self.r1 + self.r2 + self.r3
    }
}

/// Expedition ranking season snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: i64,
    pub start_date: String,
    pub end_date: String,
    pub participants: Vec<SeasonParticipant>,
}

/// Validate a roster and date pair ahead of season finalization. Runs before
/// any network call; a failure here means nothing was sent. Dates arrive as
/// `YYYY-MM-DD` strings from the date inputs.
pub fn validate_season(
    roster: &Roster,
    start: &str,
    end: &str,
) -> Result<(NaiveDate, NaiveDate), RosterError> {
    if roster.is_empty() {
        return Err(RosterError::EmptyRoster);
    }
    let start = parse_season_date(start)?;
    let end = parse_season_date(end)?;
    if end < start {
        return Err(RosterError::InvalidDateRange);
    }
    Ok((start, end))
}

fn parse_season_date(raw: &str) -> Result<NaiveDate, RosterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RosterError::MissingDate);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| RosterError::MissingDate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_with_one() -> Roster {
        Roster::from_entries(vec![RosterEntry::new("A", "1")])
    }

    #[test]
    fn accepts_ordered_dates_and_nonempty_roster() {
        let (start, end) =
            validate_season(&roster_with_one(), "2025-01-01", "2025-01-31").unwrap();
        assert!(start < end);
    }

    #[test]
    fn accepts_single_day_season() {
        assert!(validate_season(&roster_with_one(), "2025-01-01", "2025-01-01").is_ok());
    }

    #[test]
    fn rejects_empty_roster_before_dates() {
        let err = validate_season(&Roster::new(), "", "").unwrap_err();
        assert_eq!(err, RosterError::EmptyRoster);
    }

    #[test]
    fn rejects_missing_or_malformed_dates() {
        let roster = roster_with_one();
        assert_eq!(
            validate_season(&roster, "", "2025-01-31").unwrap_err(),
            RosterError::MissingDate
        );
        assert_eq!(
            validate_season(&roster, "2025-01-01", "31/01/2025").unwrap_err(),
            RosterError::MissingDate
        );
    }

    #[test]
    fn rejects_end_before_start() {
        assert_eq!(
            validate_season(&roster_with_one(), "2025-02-01", "2025-01-01").unwrap_err(),
            RosterError::InvalidDateRange
        );
    }

    #[test]
    fn new_season_payload_uses_camel_case_dates() {
        let payload = NewHonorSeason {
            start_date: "2025-01-01".to_string(),
            end_date: "2025-01-31".to_string(),
            participants: Vec::new(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""startDate":"2025-01-01""#));
        assert!(json.contains(r#""endDate":"2025-01-31""#));
    }

    #[test]
    fn season_participant_defaults_missing_scores() {
        let p: SeasonParticipant = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(p.phase, 0);
        assert_eq!(p.round_total(), 0);
    }
}
