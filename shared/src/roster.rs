use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of roster slots that form the current honor tier.
pub const HONOR_TIER_SIZE: usize = 3;

/// Wire marker for an affirmative participation flag.
pub const YES_MARKER: &str = "Sim";
/// Wire marker for a negative participation flag.
pub const NO_MARKER: &str = "Não";

/// Canonical eligibility predicate. A flag counts as affirmative when its
/// trimmed, lowercased value starts with the yes marker's initial ("Sim",
/// "sim", "s" all count; "Não", "nao", "" do not).
pub fn is_affirmative(value: &str) -> bool {
    value.trim().to_lowercase().starts_with('s')
}

/// One clan member's honor-eligibility record.
/// Field names on the wire follow the external API ("fase_acesso"/"fase_ataque"
/// hold the "Sim"/"Não" markers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub habby_id: String,
    #[serde(rename = "fase_acesso", default = "negative_marker")]
    pub access_phase: String,
    #[serde(rename = "fase_ataque", default = "negative_marker")]
    pub attack_phase: String,
}

fn negative_marker() -> String {
    NO_MARKER.to_string()
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, habby_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            habby_id: habby_id.into(),
            access_phase: NO_MARKER.to_string(),
            attack_phase: NO_MARKER.to_string(),
        }
    }

    /// A member qualifies for honor-tier consideration when both tracked
    /// participation flags are affirmative.
    pub fn is_eligible(&self) -> bool {
        is_affirmative(&self.access_phase) && is_affirmative(&self.attack_phase)
    }
}

/// Errors produced by roster mutations and season finalization checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// `name` or `habby_id` was empty on add/update.
    MissingField,
    /// Another entry already carries this habby id.
    DuplicateHabbyId(String),
    /// Position is not a valid index into the roster.
    OutOfBounds { index: usize, len: usize },
    /// A season date was missing or unparseable.
    MissingDate,
    /// Season end date precedes the start date.
    InvalidDateRange,
    /// Finalization requires at least one participant.
    EmptyRoster,
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "name and habby id are required"),
            Self::DuplicateHabbyId(id) => write!(f, "duplicate habby id: {id}"),
            Self::OutOfBounds { index, len } => {
                write!(f, "position {index} out of bounds (roster has {len} entries)")
            }
            Self::MissingDate => write!(f, "start and end dates are required"),
            Self::InvalidDateRange => write!(f, "end date precedes start date"),
            Self::EmptyRoster => write!(f, "roster has no participants"),
        }
    }
}

impl std::error::Error for RosterError {}

/// Counts reported by a CSV bulk merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    pub updated: usize,
    pub added: usize,
}

impl MergeOutcome {
    pub fn total(self) -> usize {
        self.updated + self.added
    }
}

/// Ordered honor roster. Positions `0..HONOR_TIER_SIZE` are the current
/// honor-tier holders; everything after is the eligibility pool. Order is
/// stable except through [`Roster::reorder_by_eligibility`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<RosterEntry>);

impl Roster {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_entries(entries: Vec<RosterEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.0
    }

    pub fn into_entries(self) -> Vec<RosterEntry> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RosterEntry> {
        self.0.get(index)
    }

    /// Validate and insert a candidate entry. With `editing` set, the entry at
    /// that position is replaced in place (order preserved); otherwise the
    /// candidate is appended. Uniqueness of `habby_id` is checked against every
    /// other entry before anything is mutated.
    pub fn add_or_update(
        &mut self,
        entry: RosterEntry,
        editing: Option<usize>,
    ) -> Result<(), RosterError> {
        if entry.name.trim().is_empty() || entry.habby_id.trim().is_empty() {
            return Err(RosterError::MissingField);
        }
        if let Some(index) = editing
            && index >= self.0.len()
        {
            return Err(RosterError::OutOfBounds {
                index,
                len: self.0.len(),
            });
        }

        let duplicate = self
            .0
            .iter()
            .enumerate()
            .filter(|&(i, _)| Some(i) != editing)
            .any(|(_, existing)| existing.habby_id == entry.habby_id);
        if duplicate {
            return Err(RosterError::DuplicateHabbyId(entry.habby_id));
        }

        match editing {
            Some(index) => self.0[index] = entry,
            None => self.0.push(entry),
        }
        Ok(())
    }

    /// Delete the entry at `index`; later entries shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<RosterEntry, RosterError> {
        if index >= self.0.len() {
            return Err(RosterError::OutOfBounds {
                index,
                len: self.0.len(),
            });
        }
        Ok(self.0.remove(index))
    }

    /// Merge records parsed from an external tabular source, keyed by habby id.
    /// Matching entries are fully replaced at their existing position
    /// (last-write-wins); genuinely new records are appended in input order.
    /// Records missing a name or habby id are skipped.
    pub fn bulk_merge(&mut self, records: Vec<RosterEntry>) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        for record in records {
            if record.name.trim().is_empty() || record.habby_id.trim().is_empty() {
                continue;
            }
            match self
                .0
                .iter()
                .position(|existing| existing.habby_id == record.habby_id)
            {
                Some(index) => {
                    self.0[index] = record;
                    outcome.updated += 1;
                }
                None => {
                    self.0.push(record);
                    outcome.added += 1;
                }
            }
        }
        outcome
    }

    /// Rotate honor status for a new season: the pool behind the current
    /// honor tier is stably partitioned into eligible and ineligible members,
    /// and the previous tier holders are demoted to a waiting position between
    /// the two blocks (`eligible ++ previous tier ++ ineligible`).
    ///
    /// Rosters of `HONOR_TIER_SIZE` or fewer entries have no pool to promote
    /// from; the call is a no-op and returns `false`.
    pub fn reorder_by_eligibility(&mut self) -> bool {
        if self.0.len() <= HONOR_TIER_SIZE {
            return false;
        }

        let pool = self.0.split_off(HONOR_TIER_SIZE);
        let current_tier = std::mem::take(&mut self.0);

        let (eligible, ineligible): (Vec<_>, Vec<_>) =
            pool.into_iter().partition(RosterEntry::is_eligible);

        self.0 = eligible;
        self.0.extend(current_tier);
        self.0.extend(ineligible);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, id: &str, access: &str, attack: &str) -> RosterEntry {
        RosterEntry {
            name: name.to_string(),
            habby_id: id.to_string(),
            access_phase: access.to_string(),
            attack_phase: attack.to_string(),
        }
    }

    fn ids(roster: &Roster) -> Vec<&str> {
        roster.entries().iter().map(|e| e.habby_id.as_str()).collect()
    }

    #[test]
    fn affirmative_accepts_case_and_prefix_variants() {
        assert!(is_affirmative("Sim"));
        assert!(is_affirmative("SIM"));
        assert!(is_affirmative("sim"));
        assert!(is_affirmative("s"));
        assert!(is_affirmative("  Sim  "));
    }

    #[test]
    fn affirmative_rejects_negative_and_empty_values() {
        assert!(!is_affirmative("Não"));
        assert!(!is_affirmative("nao"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yes"));
    }

    #[test]
    fn add_rejects_missing_required_fields() {
        let mut roster = Roster::new();
        let err = roster
            .add_or_update(entry("", "1", "Sim", "Sim"), None)
            .unwrap_err();
        assert_eq!(err, RosterError::MissingField);
        let err = roster
            .add_or_update(entry("A", "  ", "Sim", "Sim"), None)
            .unwrap_err();
        assert_eq!(err, RosterError::MissingField);
        assert!(roster.is_empty());
    }

    #[test]
    fn add_rejects_duplicate_habby_id() {
        let mut roster = Roster::new();
        roster
            .add_or_update(entry("X", "1", "Não", "Não"), None)
            .unwrap();
        let err = roster
            .add_or_update(entry("Y", "1", "Sim", "Sim"), None)
            .unwrap_err();
        assert_eq!(err, RosterError::DuplicateHabbyId("1".to_string()));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn habby_id_match_is_case_sensitive() {
        let mut roster = Roster::new();
        roster
            .add_or_update(entry("X", "abc", "Não", "Não"), None)
            .unwrap();
        roster
            .add_or_update(entry("Y", "ABC", "Não", "Não"), None)
            .unwrap();
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn edit_replaces_in_place_and_allows_own_id() {
        let mut roster = Roster::new();
        roster
            .add_or_update(entry("A", "1", "Não", "Não"), None)
            .unwrap();
        roster
            .add_or_update(entry("B", "2", "Não", "Não"), None)
            .unwrap();

        roster
            .add_or_update(entry("A2", "1", "Sim", "Sim"), Some(0))
            .unwrap();
        assert_eq!(roster.entries()[0].name, "A2");
        assert_eq!(ids(&roster), vec!["1", "2"]);

        // Editing onto someone else's id is still a duplicate.
        let err = roster
            .add_or_update(entry("B2", "1", "Sim", "Sim"), Some(1))
            .unwrap_err();
        assert_eq!(err, RosterError::DuplicateHabbyId("1".to_string()));
    }

    #[test]
    fn edit_position_out_of_bounds_is_rejected() {
        let mut roster = Roster::new();
        roster
            .add_or_update(entry("A", "1", "Não", "Não"), None)
            .unwrap();
        let err = roster
            .add_or_update(entry("B", "2", "Não", "Não"), Some(5))
            .unwrap_err();
        assert_eq!(err, RosterError::OutOfBounds { index: 5, len: 1 });
    }

    #[test]
    fn remove_shifts_later_entries_down() {
        let mut roster = Roster::from_entries(vec![
            entry("A", "1", "Sim", "Sim"),
            entry("B", "2", "Sim", "Sim"),
            entry("C", "3", "Sim", "Sim"),
        ]);
        let removed = roster.remove(1).unwrap();
        assert_eq!(removed.habby_id, "2");
        assert_eq!(ids(&roster), vec!["1", "3"]);
    }

    #[test]
    fn remove_out_of_bounds_is_an_error() {
        let mut roster = Roster::new();
        let err = roster.remove(0).unwrap_err();
        assert_eq!(err, RosterError::OutOfBounds { index: 0, len: 0 });
    }

    #[test]
    fn bulk_merge_updates_in_place_and_appends_new() {
        let mut roster = Roster::from_entries(vec![
            entry("A", "1", "Não", "Não"),
            entry("B", "2", "Não", "Não"),
        ]);
        let outcome = roster.bulk_merge(vec![
            entry("A-updated", "1", "Sim", "Sim"),
            entry("C", "3", "Sim", "Não"),
        ]);
        assert_eq!(outcome, MergeOutcome { updated: 1, added: 1 });
        assert_eq!(ids(&roster), vec!["1", "2", "3"]);
        assert_eq!(roster.entries()[0].name, "A-updated");
        assert_eq!(roster.entries()[0].access_phase, "Sim");
    }

    #[test]
    fn bulk_merge_skips_records_without_required_fields() {
        let mut roster = Roster::new();
        let outcome = roster.bulk_merge(vec![
            entry("", "1", "Sim", "Sim"),
            entry("B", "", "Sim", "Sim"),
            entry("C", "3", "Sim", "Sim"),
        ]);
        assert_eq!(outcome, MergeOutcome { updated: 0, added: 1 });
        assert_eq!(ids(&roster), vec!["3"]);
    }

    #[test]
    fn bulk_merge_is_idempotent() {
        let records = vec![
            entry("A", "1", "Sim", "Sim"),
            entry("B", "2", "Não", "Sim"),
        ];
        let mut once = Roster::new();
        once.bulk_merge(records.clone());
        let mut twice = once.clone();
        twice.bulk_merge(records);
        assert_eq!(once, twice);
    }

    #[test]
    fn bulk_merge_last_write_wins_within_one_batch() {
        let mut roster = Roster::new();
        let outcome = roster.bulk_merge(vec![
            entry("First", "1", "Não", "Não"),
            entry("Second", "1", "Sim", "Sim"),
        ]);
        assert_eq!(outcome, MergeOutcome { updated: 1, added: 1 });
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.entries()[0].name, "Second");
    }

    #[test]
    fn reorder_moves_eligible_pool_ahead_of_previous_tier() {
        let mut roster = Roster::from_entries(vec![
            entry("A", "a", "Sim", "Sim"),
            entry("B", "b", "Sim", "Sim"),
            entry("C", "c", "Não", "Sim"),
            entry("D", "d", "Sim", "Sim"),
            entry("E", "e", "Não", "Não"),
        ]);
        assert!(roster.reorder_by_eligibility());
        assert_eq!(ids(&roster), vec!["d", "a", "b", "c", "e"]);
    }

    #[test]
    fn reorder_is_a_stable_partition() {
        let mut roster = Roster::from_entries(vec![
            entry("T1", "t1", "Sim", "Sim"),
            entry("T2", "t2", "Sim", "Sim"),
            entry("T3", "t3", "Sim", "Sim"),
            entry("P1", "p1", "Não", "Sim"),
            entry("P2", "p2", "Sim", "Sim"),
            entry("P3", "p3", "Sim", "Não"),
            entry("P4", "p4", "sim", "SIM"),
            entry("P5", "p5", "Não", "Não"),
        ]);
        assert!(roster.reorder_by_eligibility());
        // Eligible pool members keep their relative order, then the previous
        // tier as a contiguous block, then ineligible members in order.
        assert_eq!(
            ids(&roster),
            vec!["p2", "p4", "t1", "t2", "t3", "p1", "p3", "p5"]
        );
    }

    #[test]
    fn reorder_is_a_noop_at_or_below_tier_size() {
        let mut roster = Roster::from_entries(vec![
            entry("A", "a", "Sim", "Sim"),
            entry("B", "b", "Sim", "Sim"),
            entry("C", "c", "Sim", "Sim"),
        ]);
        let before = roster.clone();
        assert!(!roster.reorder_by_eligibility());
        assert_eq!(roster, before);
    }

    #[test]
    fn roster_serializes_with_wire_field_names() {
        let roster = Roster::from_entries(vec![entry("A", "1", "Sim", "Não")]);
        let json = serde_json::to_string(&roster).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"A","habby_id":"1","fase_acesso":"Sim","fase_ataque":"Não"}]"#
        );
        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roster);
    }

    #[test]
    fn entry_deserialization_defaults_missing_phases_to_negative() {
        let parsed: RosterEntry =
            serde_json::from_str(r#"{"name":"A","habby_id":"1"}"#).unwrap();
        assert_eq!(parsed.access_phase, NO_MARKER);
        assert_eq!(parsed.attack_phase, NO_MARKER);
        assert!(!parsed.is_eligible());
    }
}
