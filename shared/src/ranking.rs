use crate::season::{Season, SeasonParticipant};

/// Members counted as active in a ranking board; the remainder is listed
/// below the fold and excluded from the board total.
pub const RANKING_ACTIVE_SIZE: usize = 30;

/// Honor-tier podium size on the home page.
pub const PODIUM_SIZE: usize = 3;

/// One ranking table: an active block that counts toward the total, plus the
/// remaining (inactive) participants in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingBoard {
    pub active: Vec<SeasonParticipant>,
    pub remaining: Vec<SeasonParticipant>,
    pub active_total: i64,
}

impl RankingBoard {
    fn from_sorted(sorted: Vec<SeasonParticipant>, score: impl Fn(&SeasonParticipant) -> i64) -> Self {
        let split = sorted.len().min(RANKING_ACTIVE_SIZE);
        let mut active = sorted;
        let remaining = active.split_off(split);
        let active_total = active.iter().map(&score).sum();
        Self {
            active,
            remaining,
            active_total,
        }
    }
}

/// Both ranking views of one season: access-phase board and expedition board.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRanking {
    pub access: RankingBoard,
    pub expedition: RankingBoard,
}

impl SeasonRanking {
    pub fn build(participants: &[SeasonParticipant]) -> Self {
        let mut by_phase = participants.to_vec();
        by_phase.sort_by(|a, b| b.phase.cmp(&a.phase));
        let access = RankingBoard::from_sorted(by_phase, |p| p.phase);

        let mut by_total = participants.to_vec();
        by_total.sort_by(|a, b| b.round_total().cmp(&a.round_total()));
        let expedition = RankingBoard::from_sorted(by_total, SeasonParticipant::round_total);

        Self { access, expedition }
    }
}

/// Access-phase delta for `name` between the current season and the one
/// before it. `None` when the member is absent from either season.
pub fn evolution(name: &str, current: &Season, previous: &Season) -> Option<i64> {
    let now = current.participants.iter().find(|p| p.name == name)?;
    let then = previous.participants.iter().find(|p| p.name == name)?;
    Some(now.phase - then.phase)
}

/// Top podium entries of a season, highest access phase first.
pub fn podium(participants: &[SeasonParticipant]) -> Vec<SeasonParticipant> {
    let mut sorted = participants.to_vec();
    sorted.sort_by(|a, b| b.phase.cmp(&a.phase));
    sorted.truncate(PODIUM_SIZE);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(name: &str, phase: i64, r1: i64, r2: i64, r3: i64) -> SeasonParticipant {
        SeasonParticipant {
            name: name.to_string(),
            phase,
            r1,
            r2,
            r3,
        }
    }

    fn season(id: i64, participants: Vec<SeasonParticipant>) -> Season {
        Season {
            id,
            start_date: "2025-01-01".to_string(),
            end_date: "2025-01-31".to_string(),
            participants,
        }
    }

    #[test]
    fn boards_sort_descending_by_their_own_score() {
        let ranking = SeasonRanking::build(&[
            participant("low", 10, 1, 1, 1),
            participant("high", 90, 0, 0, 0),
            participant("mid", 50, 30, 30, 30),
        ]);
        let access: Vec<&str> = ranking.access.active.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(access, vec!["high", "mid", "low"]);
        let expedition: Vec<&str> = ranking
            .expedition
            .active
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(expedition, vec!["mid", "low", "high"]);
    }

    #[test]
    fn active_block_caps_at_thirty_and_total_ignores_remainder() {
        let participants: Vec<_> = (0..35)
            .map(|i| participant(&format!("m{i}"), 100 - i as i64, 0, 0, 0))
            .collect();
        let ranking = SeasonRanking::build(&participants);
        assert_eq!(ranking.access.active.len(), RANKING_ACTIVE_SIZE);
        assert_eq!(ranking.access.remaining.len(), 5);
        let expected: i64 = (0..30).map(|i| 100 - i as i64).sum();
        assert_eq!(ranking.access.active_total, expected);
    }

    #[test]
    fn small_seasons_have_no_remainder() {
        let ranking = SeasonRanking::build(&[participant("only", 5, 1, 2, 3)]);
        assert_eq!(ranking.access.active.len(), 1);
        assert!(ranking.access.remaining.is_empty());
        assert_eq!(ranking.expedition.active_total, 6);
    }

    #[test]
    fn evolution_requires_presence_in_both_seasons() {
        let previous = season(1, vec![participant("A", 40, 0, 0, 0)]);
        let current = season(
            2,
            vec![participant("A", 55, 0, 0, 0), participant("B", 70, 0, 0, 0)],
        );
        assert_eq!(evolution("A", &current, &previous), Some(15));
        assert_eq!(evolution("B", &current, &previous), None);
        assert_eq!(evolution("missing", &current, &previous), None);
    }

    #[test]
    fn evolution_can_be_negative() {
        let previous = season(1, vec![participant("A", 40, 0, 0, 0)]);
        let current = season(2, vec![participant("A", 25, 0, 0, 0)]);
        assert_eq!(evolution("A", &current, &previous), Some(-15));
    }

    #[test]
    fn podium_takes_top_three_by_phase() {
        let top = podium(&[
            participant("d", 10, 0, 0, 0),
            participant("a", 99, 0, 0, 0),
            participant("c", 20, 0, 0, 0),
            participant("b", 45, 0, 0, 0),
        ]);
        let names: Vec<&str> = top.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn podium_handles_fewer_than_three() {
        assert_eq!(podium(&[]).len(), 0);
        assert_eq!(podium(&[participant("a", 1, 0, 0, 0)]).len(), 1);
    }
}
