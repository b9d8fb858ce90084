pub mod common;
pub mod leaderboard;
