use crate::Result;
use crate::sources::LoadedLeaderboard;

/// Somewhere exported leaderboards can be read from.
pub trait LeaderboardSource {
    fn load(&self) -> Result<Vec<LoadedLeaderboard>>;
}
