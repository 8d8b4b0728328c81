//! Deterministic standings computation
//!
//! Pure ordering and diff logic for the leaderboard ranker. Ordering key:
//! total score descending, then earliest `last_accepted_at`, then
//! competitor id. The key is total, so ranks are dense and reproducible
//! regardless of input order.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{CompetitorAggregate, LeaderboardEntry, RankDelta};

/// Sort aggregates and assign dense ranks 1..N.
///
/// Aggregates with a missing `last_accepted_at` order after any timestamp;
/// in practice every ranked aggregate carries one, since only accepted
/// reviews create solves.
pub fn rank_aggregates(aggregates: &[CompetitorAggregate]) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&CompetitorAggregate> = aggregates.iter().collect();
    sorted.sort_by_key(|a| ordering_key(a.total_score, a.last_accepted_at, a.competitor_id));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, aggregate)| LeaderboardEntry {
            contest_id: aggregate.contest_id,
            competitor_id: aggregate.competitor_id,
            rank: i as i32 + 1,
            score: aggregate.total_score,
            problems_solved: aggregate.problems_solved,
            last_accepted_at: aggregate.last_accepted_at,
            updated_at: Utc::now(),
        })
        .collect()
}

/// Entries whose rank or score changed relative to the previous set.
///
/// Competitors never leave the board (aggregates only grow), so every delta
/// carries a `new_rank`; `old_rank`/`old_score` are absent for newcomers.
pub fn diff_entries(
    previous: &[LeaderboardEntry],
    current: &[LeaderboardEntry],
) -> Vec<RankDelta> {
    let by_competitor: HashMap<Uuid, &LeaderboardEntry> =
        previous.iter().map(|e| (e.competitor_id, e)).collect();

    current
        .iter()
        .filter_map(|entry| {
            let old = by_competitor.get(&entry.competitor_id);
            let changed = match old {
                Some(old) => old.rank != entry.rank || old.score != entry.score,
                None => true,
            };

            changed.then(|| RankDelta {
                contest_id: entry.contest_id,
                competitor_id: entry.competitor_id,
                new_rank: entry.rank,
                old_rank: old.map(|o| o.rank),
                new_score: entry.score,
                old_score: old.map(|o| o.score),
            })
        })
        .collect()
}

fn ordering_key(
    score: i64,
    last_accepted_at: Option<DateTime<Utc>>,
    competitor_id: Uuid,
) -> (std::cmp::Reverse<i64>, DateTime<Utc>, Uuid) {
    (
        std::cmp::Reverse(score),
        last_accepted_at.unwrap_or(DateTime::<Utc>::MAX_UTC),
        competitor_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn aggregate(
        contest_id: Uuid,
        competitor_id: Uuid,
        total: i64,
        solved: i32,
        accepted_minute: u32,
    ) -> CompetitorAggregate {
        CompetitorAggregate {
            contest_id,
            competitor_id,
            total_score: total,
            problems_solved: solved,
            last_accepted_at: Some(
                Utc.with_ymd_and_hms(2025, 3, 1, 10, accepted_minute, 0).unwrap(),
            ),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_score_orders_first() {
        let contest = Uuid::new_v4();
        let low = Uuid::new_v4();
        let high = Uuid::new_v4();
        let aggregates = vec![
            aggregate(contest, low, 50, 1, 0),
            aggregate(contest, high, 100, 1, 30),
        ];

        let entries = rank_aggregates(&aggregates);

        assert_eq!(entries[0].competitor_id, high);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].competitor_id, low);
        assert_eq!(entries[1].rank, 2);
    }

    #[test]
    fn test_earlier_accept_breaks_score_tie() {
        let contest = Uuid::new_v4();
        let early = Uuid::new_v4();
        let late = Uuid::new_v4();
        let aggregates = vec![
            aggregate(contest, late, 100, 1, 45),
            aggregate(contest, early, 100, 1, 5),
        ];

        let entries = rank_aggregates(&aggregates);

        assert_eq!(entries[0].competitor_id, early);
        assert_eq!(entries[1].competitor_id, late);
    }

    #[test]
    fn test_competitor_id_breaks_full_tie() {
        let contest = Uuid::new_v4();
        let mut ids = [Uuid::new_v4(), Uuid::new_v4()];
        ids.sort();
        let aggregates = vec![
            aggregate(contest, ids[1], 100, 1, 10),
            aggregate(contest, ids[0], 100, 1, 10),
        ];

        let entries = rank_aggregates(&aggregates);

        assert_eq!(entries[0].competitor_id, ids[0]);
        assert_eq!(entries[1].competitor_id, ids[1]);
    }

    #[test]
    fn test_ranks_are_dense_and_unique() {
        let contest = Uuid::new_v4();
        let aggregates: Vec<CompetitorAggregate> = (0..8)
            .map(|i| aggregate(contest, Uuid::new_v4(), 100, 1, i))
            .collect();

        let entries = rank_aggregates(&aggregates);

        let ranks: Vec<i32> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, (1..=8).collect::<Vec<i32>>());
    }

    #[test]
    fn test_ordering_independent_of_input_order() {
        let contest = Uuid::new_v4();
        let mut aggregates: Vec<CompetitorAggregate> = (0..5)
            .map(|i| aggregate(contest, Uuid::new_v4(), 20 * i as i64, 1, i))
            .collect();

        let forward = rank_aggregates(&aggregates);
        aggregates.reverse();
        let backward = rank_aggregates(&aggregates);

        let forward_ids: Vec<Uuid> = forward.iter().map(|e| e.competitor_id).collect();
        let backward_ids: Vec<Uuid> = backward.iter().map(|e| e.competitor_id).collect();
        assert_eq!(forward_ids, backward_ids);
    }

    #[test]
    fn test_diff_identical_sets_is_empty() {
        let contest = Uuid::new_v4();
        let aggregates = vec![
            aggregate(contest, Uuid::new_v4(), 100, 2, 5),
            aggregate(contest, Uuid::new_v4(), 60, 1, 20),
        ];

        let first = rank_aggregates(&aggregates);
        let second = rank_aggregates(&aggregates);

        assert!(diff_entries(&first, &second).is_empty());
    }

    #[test]
    fn test_diff_reports_newcomer_without_old_fields() {
        let contest = Uuid::new_v4();
        let newcomer = Uuid::new_v4();
        let current = rank_aggregates(&[aggregate(contest, newcomer, 40, 1, 0)]);

        let deltas = diff_entries(&[], &current);

        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].competitor_id, newcomer);
        assert_eq!(deltas[0].new_rank, 1);
        assert_eq!(deltas[0].old_rank, None);
        assert_eq!(deltas[0].new_score, 40);
        assert_eq!(deltas[0].old_score, None);
    }

    #[test]
    fn test_diff_reports_rank_and_score_changes() {
        let contest = Uuid::new_v4();
        let riser = Uuid::new_v4();
        let holder = Uuid::new_v4();

        let previous = rank_aggregates(&[
            aggregate(contest, holder, 100, 1, 0),
            aggregate(contest, riser, 50, 1, 10),
        ]);
        let current = rank_aggregates(&[
            aggregate(contest, holder, 100, 1, 0),
            aggregate(contest, riser, 150, 2, 30),
        ]);

        let deltas = diff_entries(&previous, &current);

        // The riser overtook; the holder's rank slipped from 1 to 2
        assert_eq!(deltas.len(), 2);

        let rise = deltas.iter().find(|d| d.competitor_id == riser).unwrap();
        assert_eq!(rise.old_rank, Some(2));
        assert_eq!(rise.new_rank, 1);
        assert_eq!(rise.old_score, Some(50));
        assert_eq!(rise.new_score, 150);

        let slip = deltas.iter().find(|d| d.competitor_id == holder).unwrap();
        assert_eq!(slip.old_rank, Some(1));
        assert_eq!(slip.new_rank, 2);
        assert_eq!(slip.old_score, Some(100));
        assert_eq!(slip.new_score, 100);
    }
}
