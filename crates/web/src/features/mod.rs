pub mod drivers;
pub mod leaderboards;
