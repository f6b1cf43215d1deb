use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use storage::models::NewLeaderboardRow;

use crate::csv::ParsedRow;

/// Leaderboard order: higher prize first, then higher bet.
pub fn compare_standing(a: &ParsedRow, b: &ParsedRow) -> Ordering {
    b.prize.cmp(&a.prize).then_with(|| b.bet.cmp(&a.bet))
}

/// Sorts rows into leaderboard order and assigns dense ranks starting at 1.
///
/// The sort is stable: rows tied on both prize and bet keep their input order.
pub fn rank_rows(mut rows: Vec<ParsedRow>, created_at_utc: DateTime<Utc>) -> Vec<NewLeaderboardRow> {
    rows.sort_by(compare_standing);

    rows.into_iter()
        .zip(1..)
        .map(|(row, rank)| NewLeaderboardRow {
            username: row.username,
            display_name: row.display_name,
            prize: row.prize,
            bet: row.bet,
            rank,
            created_at_utc,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn row(username: &str, prize: i64, bet: i64) -> ParsedRow {
        ParsedRow {
            username: username.to_string(),
            display_name: username.to_uppercase(),
            prize: Decimal::from(prize),
            bet: Decimal::from(bet),
        }
    }

    fn usernames(rows: &[NewLeaderboardRow]) -> Vec<&str> {
        rows.iter().map(|r| r.username.as_str()).collect()
    }

    #[test]
    fn test_prize_then_bet_descending() {
        let ranked = rank_rows(
            vec![row("a", 100, 10), row("b", 200, 5), row("c", 100, 50)],
            Utc::now(),
        );

        assert_eq!(usernames(&ranked), vec!["b", "c", "a"]);
        let ranks: Vec<i32> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_full_ties_keep_input_order() {
        let ranked = rank_rows(
            vec![row("z", 50, 5), row("m", 50, 5), row("a", 50, 5), row("top", 60, 0)],
            Utc::now(),
        );

        assert_eq!(usernames(&ranked), vec!["top", "z", "m", "a"]);
        assert_eq!(ranked[3].rank, 4);
    }

    #[test]
    fn test_shared_timestamp() {
        let now = Utc::now();
        let ranked = rank_rows(vec![row("a", 1, 1), row("b", 2, 2)], now);

        assert!(ranked.iter().all(|r| r.created_at_utc == now));
    }

    #[test]
    fn test_negative_amounts_rank_last() {
        let ranked = rank_rows(vec![row("neg", -5, 0), row("zero", 0, 0)], Utc::now());
        assert_eq!(usernames(&ranked), vec!["zero", "neg"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_rows(Vec::new(), Utc::now()).is_empty());
    }
}
