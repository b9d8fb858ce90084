use std::sync::Arc;

use importer::LoadedLeaderboard;
use leaderboard::LeaderboardConfig;

/// Leaderboards loaded at startup, shared read-only by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub leaderboards: Arc<Vec<LoadedLeaderboard>>,
    pub config: Arc<LeaderboardConfig>,
}

impl AppState {
    pub fn new(leaderboards: Vec<LoadedLeaderboard>, config: LeaderboardConfig) -> Self {
        Self {
            leaderboards: Arc::new(leaderboards),
            config: Arc::new(config),
        }
    }

    pub fn find(&self, id: &str) -> Option<&LoadedLeaderboard> {
        self.leaderboards.iter().find(|l| l.id == id)
    }
}
