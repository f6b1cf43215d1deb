mod leaderboard_row;

pub use leaderboard_row::{LeaderboardRow, NewLeaderboardRow};
